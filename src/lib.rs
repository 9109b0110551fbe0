// ==========================================
// 客户批量导入 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: CSV/JSON 客户数据导入，按邮箱去重
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 导入配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{Customer, CustomerRecord, FieldMapping, ImportResult, RawRecord};

// 配置
pub use config::{ImportConfig, LookupFailurePolicy};

// 仓储
pub use repository::{CustomerStore, LookupOutcome, RepositoryError, SqliteCustomerStore};

// 导入
pub use importer::{CustomerImporter, ImportEngine, ImportError, ImporterResult};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "CUSTOMER_IMPORT_DB_PATH";

// 导入配置文件环境变量
pub const CONFIG_PATH_ENV: &str = "CUSTOMER_IMPORT_CONFIG";
