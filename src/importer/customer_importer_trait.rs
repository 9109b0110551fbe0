// ==========================================
// 客户批量导入 - 导入管道 Trait
// ==========================================
// 职责: 定义导入各阶段接口（不包含实现）
// 管道: 文件校验 → MIME 识别 → 解析 → 字段映射 → 去重/创建
// ==========================================

use crate::domain::customer::{CustomerRecord, ImportResult, RawRecord};
use crate::domain::field_mapping::FieldMapping;
use crate::importer::error::ImporterResult;
use std::path::Path;

// ==========================================
// CustomerImporter Trait
// ==========================================
// 用途: 客户导入主接口
// 实现者: ImportEngine
pub trait CustomerImporter {
    /// 导入单个文件
    ///
    /// # 参数
    /// - file_path: CSV 或 JSON 文件路径（空字符串视为未提供）
    ///
    /// # 返回
    /// - Ok(ImportResult): created_count 为新建客户数
    /// - Err(ImportFailed): 统一包装的错误，root_cause() 为原始错误
    ///
    /// # 导入流程
    /// 1. 文件校验（路径/类型白名单）
    /// 2. 按 MIME 类型选择解析器
    /// 3. 字段映射
    /// 4. 按邮箱去重并创建
    fn start_import(&self, file_path: &str) -> ImporterResult<ImportResult>;
}

// ==========================================
// MimeDetector Trait
// ==========================================
// 用途: 识别文件 MIME 类型（基于内容）
// 实现者: ContentMimeDetector
pub trait MimeDetector: Send + Sync {
    /// # 返回
    /// - Ok(String): MIME 类型
    /// - Err(IoFailure): 文件无法读取
    fn detect_mime_type(&self, path: &Path) -> ImporterResult<String>;
}

// ==========================================
// RecordParser Trait
// ==========================================
// 用途: 文件解析为原始记录
// 实现者: CsvParser, JsonParser
pub trait RecordParser: Send + Sync {
    /// 解析文件为原始记录（源字段名 → 值），保持源顺序
    ///
    /// # 参数
    /// - file_path: 文件路径
    /// - mapping: 字段映射表（CSV 用于表头校验与按位对齐）
    fn parse(&self, file_path: &Path, mapping: &FieldMapping) -> ImporterResult<Vec<RawRecord>>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 源字段 → 标准字段
// 实现者: CustomerFieldMapper
pub trait FieldMapper: Send + Sync {
    /// 将原始记录映射为标准客户记录（纯转换，输出顺序与输入一致）
    fn map_records(&self, mapping: &FieldMapping, raw_records: &[RawRecord])
        -> Vec<CustomerRecord>;
}
