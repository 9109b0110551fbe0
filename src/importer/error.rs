// ==========================================
// 客户批量导入 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 文案: rust-i18n（locales/*.yml）
// ==========================================

use crate::i18n::{t, t_with_args};
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 路径非法的具体原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInputReason {
    EmptyPath,
    NotAFile,
}

fn invalid_input_message(path: &str, reason: &InvalidInputReason) -> String {
    match reason {
        InvalidInputReason::EmptyPath => t("error.empty_path"),
        InvalidInputReason::NotAFile => t_with_args("error.not_a_file", &[("path", path)]),
    }
}

fn localized(key: &str, arg: &str, value: &str) -> String {
    t_with_args(key, &[(arg, value)])
}

fn io_failure_message(path: &str, message: &str) -> String {
    t_with_args("error.io_failure", &[("path", path), ("reason", message)])
}

fn schema_mismatch_message(unexpected: &[String]) -> String {
    localized("error.schema_mismatch", "columns", &unexpected.join(","))
}

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件校验错误 =====
    #[error("{}", invalid_input_message(.path, .reason))]
    InvalidInput {
        path: String,
        reason: InvalidInputReason,
    },

    #[error("{}", localized("error.file_not_found", "path", .0))]
    NotFound(String),

    #[error("{}", localized("error.unsupported_type", "mime", .mime_type))]
    UnsupportedType { path: String, mime_type: String },

    #[error("{}", io_failure_message(.path, .message))]
    IoFailure { path: String, message: String },

    // ===== 数据结构错误 =====
    #[error("{}", t("error.empty_input"))]
    EmptyInput(String),

    #[error("{}", t("error.insufficient_data"))]
    InsufficientData {
        path: String,
        found: usize,
        required: usize,
    },

    #[error("{}", schema_mismatch_message(.unexpected))]
    SchemaMismatch { unexpected: Vec<String> },

    #[error("{}", localized("error.malformed_input", "reason", .0))]
    MalformedInput(String),

    #[error("{}", t("error.no_records"))]
    NoRecords,

    // ===== 仓储错误（创建客户失败等）=====
    #[error(transparent)]
    Store(#[from] RepositoryError),

    // ===== 统一对外错误 =====
    // message 为原始错误在包装时刻的本地化文案
    #[error("{message}")]
    ImportFailed {
        message: String,
        #[source]
        source: Box<ImportError>,
    },
}

impl ImportError {
    /// 构造 I/O 错误（保留路径）
    pub fn io(path: impl Into<String>, err: &std::io::Error) -> Self {
        ImportError::IoFailure {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// 包装为统一的 ImportFailed（已包装的错误原样返回）
    pub fn failed(inner: ImportError) -> Self {
        match inner {
            failed @ ImportError::ImportFailed { .. } => failed,
            other => ImportError::ImportFailed {
                message: other.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// 剥离 ImportFailed 包装，返回原始错误
    pub fn root_cause(&self) -> &ImportError {
        match self {
            ImportError::ImportFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Result 类型别名
pub type ImporterResult<T> = Result<T, ImportError>;
