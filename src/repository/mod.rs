// ==========================================
// 客户批量导入 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供客户数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod customer_repo;
pub mod customer_repo_impl;
pub mod error;

// 重导出核心仓储
pub use customer_repo::{CustomerStore, LookupOutcome};
pub use customer_repo_impl::SqliteCustomerStore;
pub use error::{RepositoryError, RepositoryResult};
