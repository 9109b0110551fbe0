// ==========================================
// 客户批量导入 - 文件解析器实现
// ==========================================
// 支持: CSV (text/csv) / JSON (application/json)
// 输出: 原始记录（源字段名 → 值），保持源顺序
// ==========================================

use crate::domain::customer::RawRecord;
use crate::domain::field_mapping::FieldMapping;
use crate::importer::customer_importer_trait::RecordParser;
use crate::importer::error::{ImportError, ImporterResult};
use csv::ReaderBuilder;
use serde_json::{Map, Value};
use std::fs::File;
use std::path::Path;
use tracing::{debug, warn};

/// CSV 除表头外至少需要的数据行数
pub const CSV_MIN_DATA_ROWS: usize = 1;

/// JSON 至少需要的记录数
pub const JSON_MIN_RECORDS: usize = 2;

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl RecordParser for CsvParser {
    fn parse(&self, file_path: &Path, mapping: &FieldMapping) -> ImporterResult<Vec<RawRecord>> {
        let path_str = file_path.display().to_string();

        let file = File::open(file_path).map_err(|e| ImportError::io(&path_str, &e))?;
        // 表头由本解析器自行处理，行长度不一致时不报错
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        // 读取所有行
        let mut rows: Vec<Vec<String>> = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| csv_error(&path_str, e))?;
            let row: Vec<String> = record.iter().map(|v| v.trim().to_string()).collect();

            // 跳过完全空白的行
            if row.iter().all(|v| v.is_empty()) {
                continue;
            }
            rows.push(row);
        }

        let mut rows = rows.into_iter();
        let header: Vec<String> = match rows.next() {
            Some(header) => header
                .into_iter()
                .map(|h| h.trim_start_matches('\u{feff}').to_string())
                .collect(),
            None => return Err(ImportError::EmptyInput(path_str)),
        };

        // 表头校验: 不允许出现映射表之外的列
        let unexpected: Vec<String> = header
            .iter()
            .filter(|h| !mapping.contains_source(h))
            .cloned()
            .collect();
        if !unexpected.is_empty() {
            warn!(path = %path_str, header = ?header, unexpected = ?unexpected, "CSV 表头与预定义映射不匹配");
            return Err(ImportError::SchemaMismatch { unexpected });
        }

        let data_rows: Vec<Vec<String>> = rows.collect();
        if data_rows.len() < CSV_MIN_DATA_ROWS {
            return Err(ImportError::InsufficientData {
                path: path_str,
                found: data_rows.len(),
                required: CSV_MIN_DATA_ROWS,
            });
        }

        // 数据行按位置对齐到映射表的源字段顺序
        let records: Vec<RawRecord> = data_rows
            .into_iter()
            .map(|row| {
                mapping
                    .source_names()
                    .zip(row)
                    .map(|(source, value)| (source.to_string(), value))
                    .collect()
            })
            .collect();

        debug!(path = %path_str, rows = records.len(), "CSV 解析完成");
        Ok(records)
    }
}

fn csv_error(path: &str, err: csv::Error) -> ImportError {
    if err.is_io_error() {
        ImportError::IoFailure {
            path: path.to_string(),
            message: err.to_string(),
        }
    } else {
        ImportError::MalformedInput(err.to_string())
    }
}

// ==========================================
// JSON Parser 实现
// ==========================================
pub struct JsonParser;

impl RecordParser for JsonParser {
    fn parse(&self, file_path: &Path, _mapping: &FieldMapping) -> ImporterResult<Vec<RawRecord>> {
        let path_str = file_path.display().to_string();

        let content =
            std::fs::read_to_string(file_path).map_err(|e| ImportError::io(&path_str, &e))?;
        let content = content.trim_start_matches('\u{feff}');
        if content.trim().is_empty() {
            return Err(ImportError::EmptyInput(path_str));
        }

        // 顶层必须是对象数组
        let objects: Vec<Map<String, Value>> = serde_json::from_str(content)
            .map_err(|e| ImportError::MalformedInput(e.to_string()))?;

        if objects.len() < JSON_MIN_RECORDS {
            return Err(ImportError::InsufficientData {
                path: path_str,
                found: objects.len(),
                required: JSON_MIN_RECORDS,
            });
        }

        let records: Vec<RawRecord> = objects.into_iter().map(object_to_raw_record).collect();

        debug!(path = %path_str, records = records.len(), "JSON 解析完成");
        Ok(records)
    }
}

/// JSON 值转原始字符串: null 视为缺失，字符串去首尾空白（与 CSV 一致），其他值取紧凑 JSON
fn object_to_raw_record(object: Map<String, Value>) -> RawRecord {
    object
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::String(s) => Some((key, s.trim().to_string())),
            other => Some((key, other.to_string())),
        })
        .collect()
}
