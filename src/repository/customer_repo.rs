// ==========================================
// 客户批量导入 - 客户仓储 Trait
// ==========================================
// 职责: 定义客户查询/创建接口（不包含实现）
// 红线: Repository 不含业务规则，只做数据 CRUD + 创建前校验
// ==========================================

use crate::domain::customer::{Customer, CustomerRecord};
use crate::repository::error::{RepositoryError, RepositoryResult};
use std::sync::Arc;

// ==========================================
// LookupOutcome - 按邮箱查询结果
// ==========================================
// Error 与 NotFound 分开表达，由调用方决定如何处理查询失败
#[derive(Debug)]
pub enum LookupOutcome {
    Found(Customer),
    NotFound,
    Error(RepositoryError),
}

// ==========================================
// CustomerStore Trait
// ==========================================
// 用途: 客户注册表访问（去重判断的唯一事实来源）
// 实现者: SqliteCustomerStore
pub trait CustomerStore: Send + Sync {
    /// 按邮箱查询客户
    ///
    /// # 返回
    /// - Found: 客户已存在
    /// - NotFound: 客户不存在
    /// - Error: 查询失败（连接/锁/SQL 错误）
    fn lookup(&self, email: &str) -> LookupOutcome;

    /// 创建客户
    ///
    /// # 返回
    /// - Ok(Customer): 新建的客户
    /// - Err(ValidationError): 必填字段为空或邮箱格式错误
    /// - Err(UniqueConstraintViolation): 邮箱已被占用
    fn create(&self, record: &CustomerRecord) -> RepositoryResult<Customer>;
}

impl<T: CustomerStore + ?Sized> CustomerStore for Arc<T> {
    fn lookup(&self, email: &str) -> LookupOutcome {
        (**self).lookup(email)
    }

    fn create(&self, record: &CustomerRecord) -> RepositoryResult<Customer> {
        (**self).create(record)
    }
}
