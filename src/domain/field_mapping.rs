// ==========================================
// 客户批量导入 - 字段映射表
// ==========================================
// 职责: 标准字段 → 源字段 的有序映射
// 红线: 每个标准字段只对应一个源字段；源文件中的未知列被忽略
// ==========================================

use crate::domain::customer::{ATTR_EMAIL, ATTR_FIRSTNAME, ATTR_LASTNAME};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// 映射表构造错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldMappingError {
    #[error("duplicate canonical attribute in field mapping: {0}")]
    DuplicateCanonical(String),

    #[error("field mapping entry has an empty name (canonical={canonical:?}, source={source_field:?})")]
    EmptyName {
        canonical: String,
        source_field: String,
    },
}

/// 单条映射: 标准字段 ← 源字段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldBinding {
    pub canonical: String,
    pub source: String,
}

// ==========================================
// FieldMapping - 有序映射表
// ==========================================
// 顺序即 CSV 数据列的位置顺序
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FieldBinding>", into = "Vec<FieldBinding>")]
pub struct FieldMapping {
    bindings: Vec<FieldBinding>,
}

impl FieldMapping {
    /// 构造映射表（校验标准字段唯一、名称非空）
    pub fn new<I, C, S>(pairs: I) -> Result<Self, FieldMappingError>
    where
        I: IntoIterator<Item = (C, S)>,
        C: Into<String>,
        S: Into<String>,
    {
        let bindings = pairs
            .into_iter()
            .map(|(canonical, source)| FieldBinding {
                canonical: canonical.into(),
                source: source.into(),
            })
            .collect::<Vec<_>>();
        Self::try_from(bindings)
    }

    /// 默认客户映射: firstname ← fname, lastname ← lname, email ← emailaddress
    pub fn customer_default() -> Self {
        Self {
            bindings: vec![
                FieldBinding {
                    canonical: ATTR_FIRSTNAME.to_string(),
                    source: "fname".to_string(),
                },
                FieldBinding {
                    canonical: ATTR_LASTNAME.to_string(),
                    source: "lname".to_string(),
                },
                FieldBinding {
                    canonical: ATTR_EMAIL.to_string(),
                    source: "emailaddress".to_string(),
                },
            ],
        }
    }

    pub fn bindings(&self) -> &[FieldBinding] {
        &self.bindings
    }

    /// 源字段名（按映射顺序）
    pub fn source_names(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(|b| b.source.as_str())
    }

    pub fn contains_source(&self, source: &str) -> bool {
        self.bindings.iter().any(|b| b.source == source)
    }
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self::customer_default()
    }
}

impl TryFrom<Vec<FieldBinding>> for FieldMapping {
    type Error = FieldMappingError;

    fn try_from(bindings: Vec<FieldBinding>) -> Result<Self, Self::Error> {
        let mut seen = HashSet::new();
        for binding in &bindings {
            if binding.canonical.trim().is_empty() || binding.source.trim().is_empty() {
                return Err(FieldMappingError::EmptyName {
                    canonical: binding.canonical.clone(),
                    source_field: binding.source.clone(),
                });
            }
            if !seen.insert(binding.canonical.as_str()) {
                return Err(FieldMappingError::DuplicateCanonical(
                    binding.canonical.clone(),
                ));
            }
        }
        Ok(Self { bindings })
    }
}

impl From<FieldMapping> for Vec<FieldBinding> {
    fn from(mapping: FieldMapping) -> Self {
        mapping.bindings
    }
}
