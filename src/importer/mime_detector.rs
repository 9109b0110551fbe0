// ==========================================
// 客户批量导入 - MIME 类型识别
// ==========================================
// 职责: 根据文件内容识别 MIME 类型（扩展名只用于内容无法区分时）
// 红线: 系统其他部分完全信任此处的判断，不再二次校验
// ==========================================

use crate::config::{MIME_CSV, MIME_JSON};
use crate::importer::error::{ImportError, ImporterResult};
use crate::importer::customer_importer_trait::MimeDetector;
use csv::ReaderBuilder;
use std::path::Path;
use tracing::debug;

pub const MIME_EMPTY: &str = "application/x-empty";
pub const MIME_BINARY: &str = "application/octet-stream";
pub const MIME_TEXT: &str = "text/plain";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

// 内容嗅探最多检查的 CSV 行数
const CSV_SNIFF_ROWS: usize = 64;

// ==========================================
// ContentMimeDetector
// ==========================================
pub struct ContentMimeDetector;

impl MimeDetector for ContentMimeDetector {
    fn detect_mime_type(&self, path: &Path) -> ImporterResult<String> {
        let bytes = std::fs::read(path).map_err(|e| ImportError::io(path.display().to_string(), &e))?;
        let mime = sniff(&bytes, extension_of(path).as_deref());
        debug!(path = %path.display(), mime = %mime, "MIME 类型识别完成");
        Ok(mime.to_string())
    }
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// 按内容判定 MIME 类型
///
/// 判定顺序:
/// 1. 空文件或仅含空白 → 扩展名提示，否则 application/x-empty
/// 2. 含 NUL 或非 UTF-8 → application/octet-stream
/// 3. 合法 JSON → application/json
/// 4. 以 `[`/`{` 开头且扩展名为 json → application/json（解析阶段报格式错误）
/// 5. 列数一致（≥2 列）的分隔文本 → text/csv
/// 6. 其他文本: 扩展名 csv → text/csv，否则 text/plain
pub fn sniff(bytes: &[u8], extension: Option<&str>) -> &'static str {
    if bytes.is_empty() {
        return empty_by_extension(extension);
    }

    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if body.contains(&0) {
        return MIME_BINARY;
    }
    let text = match std::str::from_utf8(body) {
        Ok(text) => text,
        Err(_) => return MIME_BINARY,
    };

    let trimmed = text.trim_start();
    // 仅含空白与空文件同样处理，由解析阶段报 EmptyInput
    if trimmed.is_empty() {
        return empty_by_extension(extension);
    }

    let looks_like_json = trimmed.starts_with('[') || trimmed.starts_with('{');
    if looks_like_json {
        if serde_json::from_str::<serde_json::Value>(text).is_ok() {
            return MIME_JSON;
        }
        if extension == Some("json") {
            return MIME_JSON;
        }
    }

    if looks_like_csv(text) {
        return MIME_CSV;
    }

    match extension {
        Some("csv") => MIME_CSV,
        _ => MIME_TEXT,
    }
}

fn empty_by_extension(extension: Option<&str>) -> &'static str {
    match extension {
        Some("csv") => MIME_CSV,
        Some("json") => MIME_JSON,
        _ => MIME_EMPTY,
    }
}

/// 每行列数一致且至少两列（空白行不计）
fn looks_like_csv(text: &str) -> bool {
    // 列数由本函数比较，空白行不能触发 csv 的行长度错误
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut width: Option<usize> = None;
    for result in reader.records().take(CSV_SNIFF_ROWS) {
        let record = match result {
            Ok(record) => record,
            Err(_) => return false,
        };
        if record.iter().all(|v| v.trim().is_empty()) {
            continue;
        }
        match width {
            None if record.len() < 2 => return false,
            None => width = Some(record.len()),
            Some(expected) if expected != record.len() => return false,
            Some(_) => {}
        }
    }
    width.is_some()
}
