// ==========================================
// 客户批量导入 - 配置层
// ==========================================
// 职责: 导入配置（允许类型 / 字段映射 / 查询失败策略）
// 存储: 内存结构体，可由 JSON 文件覆写
// ==========================================

pub mod import_config;

// 重导出核心配置
pub use import_config::{
    default_allowed_mime_types, ConfigError, ImportConfig, LookupFailurePolicy,
    DEFAULT_ALLOWED_MIME_TYPES, MIME_CSV, MIME_JSON,
};
