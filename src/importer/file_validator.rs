// ==========================================
// 客户批量导入 - 输入文件校验
// ==========================================
// 职责: 路径非空 / 存在 / 是普通文件 / MIME 类型在白名单内
// 红线: 纯校验，无副作用
// ==========================================

use crate::importer::customer_importer_trait::MimeDetector;
use crate::importer::error::{ImportError, ImporterResult, InvalidInputReason};
use std::path::Path;
use tracing::{debug, warn};

pub struct FileValidator<'a> {
    mime_detector: &'a dyn MimeDetector,
}

impl<'a> FileValidator<'a> {
    pub fn new(mime_detector: &'a dyn MimeDetector) -> Self {
        Self { mime_detector }
    }

    /// 校验输入文件
    ///
    /// # 返回
    /// - Ok(String): 识别出的 MIME 类型
    /// - Err(InvalidInput): 路径为空 / 不是普通文件
    /// - Err(NotFound): 路径不存在
    /// - Err(UnsupportedType): MIME 类型非空且不在白名单
    /// - Err(IoFailure): 文件无法读取
    pub fn validate(&self, file_path: &str, allowed_mime_types: &[String]) -> ImporterResult<String> {
        if file_path.is_empty() {
            return Err(ImportError::InvalidInput {
                path: String::new(),
                reason: InvalidInputReason::EmptyPath,
            });
        }

        let path = Path::new(file_path);
        if !path.exists() {
            return Err(ImportError::NotFound(file_path.to_string()));
        }
        if !path.is_file() {
            return Err(ImportError::InvalidInput {
                path: file_path.to_string(),
                reason: InvalidInputReason::NotAFile,
            });
        }

        let mime_type = self.mime_detector.detect_mime_type(path)?;
        if !mime_type.is_empty() && !allowed_mime_types.iter().any(|m| m == &mime_type) {
            warn!(path = %file_path, mime = %mime_type, allowed = ?allowed_mime_types, "文件类型不在白名单内");
            return Err(ImportError::UnsupportedType {
                path: file_path.to_string(),
                mime_type,
            });
        }

        debug!(path = %file_path, mime = %mime_type, "文件校验通过");
        Ok(mime_type)
    }
}
