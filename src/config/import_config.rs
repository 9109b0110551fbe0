// ==========================================
// 客户批量导入 - 导入配置
// ==========================================
// 职责: 导入运行所需的全部配置（允许的 MIME 类型、字段映射、查询失败策略）
// 红线: 导入开始前可修改，导入过程中只读
// ==========================================

use crate::domain::field_mapping::FieldMapping;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// 默认允许导入的 MIME 类型
pub const DEFAULT_ALLOWED_MIME_TYPES: [&str; 2] = ["application/json", "text/csv"];

pub const MIME_CSV: &str = "text/csv";
pub const MIME_JSON: &str = "application/json";

/// 配置加载错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置格式错误: {0}")]
    ParseError(#[from] serde_json::Error),
}

// ==========================================
// LookupFailurePolicy - 客户查询失败策略
// ==========================================
// TreatAsAbsent: 查询出错视为"客户不存在"并继续创建（默认）
// Abort: 查询出错即终止本次导入
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LookupFailurePolicy {
    #[default]
    TreatAsAbsent,
    Abort,
}

// ==========================================
// ImportConfig - 导入配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    pub allowed_mime_types: Vec<String>,
    pub field_mapping: FieldMapping,
    pub lookup_failure_policy: LookupFailurePolicy,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            allowed_mime_types: default_allowed_mime_types(),
            field_mapping: FieldMapping::customer_default(),
            lookup_failure_policy: LookupFailurePolicy::default(),
        }
    }
}

impl ImportConfig {
    /// 从 JSON 文本加载（缺省字段取默认值）
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// 从 JSON 文件加载
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&content)
    }
}

pub fn default_allowed_mime_types() -> Vec<String> {
    DEFAULT_ALLOWED_MIME_TYPES
        .iter()
        .map(|m| m.to_string())
        .collect()
}
