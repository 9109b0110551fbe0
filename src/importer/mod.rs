// ==========================================
// 客户批量导入 - 导入层
// ==========================================
// 职责: 外部文件导入,生成客户数据
// 支持: CSV, JSON
// ==========================================

// 模块声明
pub mod customer_importer_impl;
pub mod customer_importer_trait;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod file_validator;
pub mod mime_detector;

// 重导出核心类型
pub use customer_importer_impl::ImportEngine;
pub use error::{ImportError, ImporterResult, InvalidInputReason};
pub use field_mapper::CustomerFieldMapper;
pub use file_parser::{CsvParser, JsonParser, CSV_MIN_DATA_ROWS, JSON_MIN_RECORDS};
pub use file_validator::FileValidator;
pub use mime_detector::{sniff, ContentMimeDetector};

// 重导出 Trait 接口
pub use customer_importer_trait::{CustomerImporter, FieldMapper, MimeDetector, RecordParser};
