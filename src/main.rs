// ==========================================
// 客户批量导入 - 命令行入口
// ==========================================
// 用法:
//   customer-import --profile-file <path>
//   customer-import <path>
//
// 环境变量:
//   CUSTOMER_IMPORT_DB_PATH  客户数据库路径
//   CUSTOMER_IMPORT_CONFIG   导入配置文件（JSON，可选）
//   CUSTOMER_IMPORT_LOCALE   提示语言（en / zh-CN）
//   CUSTOMER_IMPORT_LOG_FORMAT  日志格式（text / json）
//   RUST_LOG                 日志级别
// ==========================================

use anyhow::Context;
use customer_import::i18n::{self, t, t_with_args};
use customer_import::{
    logging, CustomerImporter, ImportConfig, ImportEngine, ImportResult,
    SqliteCustomerStore, CONFIG_PATH_ENV, DB_PATH_ENV,
};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

const PROFILE_FILE_FLAG: &str = "--profile-file";

fn main() -> ExitCode {
    logging::init();
    let locale = i18n::init_from_env();
    tracing::debug!(locale = %locale, "语言已选择");

    println!("{}", t("import.start"));
    let outcome = run();
    report(outcome, &mut std::io::stdout(), &mut std::io::stderr())
}

fn run() -> anyhow::Result<ImportResult> {
    let file_path = profile_file_arg(std::env::args().skip(1));

    let db_path = get_default_db_path();
    tracing::info!(db_path = %db_path, "使用数据库");
    let store = SqliteCustomerStore::new(&db_path)
        .with_context(|| format!("无法打开客户数据库: {}", db_path))?;

    let config = load_config()?;
    let engine = ImportEngine::with_defaults(store, config);

    let result = engine.start_import(&file_path)?;
    match engine.store().count_customers() {
        Ok(total) => tracing::info!(total_customers = total, "客户库当前总数"),
        Err(e) => tracing::warn!(error = %e, "客户总数统计失败"),
    }
    Ok(result)
}

/// 输出导入结果: 成功时打印新建数（大于 0 时）与结束提示，失败时只打印错误
fn report<O, E>(outcome: anyhow::Result<ImportResult>, out: &mut O, err: &mut E) -> ExitCode
where
    O: Write,
    E: Write,
{
    match outcome {
        Ok(result) => {
            if result.created_count > 0 {
                let count = result.created_count.to_string();
                let total = t_with_args("import.total_created", &[("count", &count)]);
                let _ = writeln!(out, "{}", total);
            }
            let _ = writeln!(out, "{}", t("import.end"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            let _ = writeln!(err, "{}", e);
            ExitCode::FAILURE
        }
    }
}

/// 读取 --profile-file 参数（也接受位置参数）；缺失时返回空字符串
fn profile_file_arg<I>(args: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut positional = None;
    while let Some(arg) = args.next() {
        if arg == PROFILE_FILE_FLAG {
            return args.next().unwrap_or_default();
        }
        if let Some(value) = arg.strip_prefix("--profile-file=") {
            return value.to_string();
        }
        if positional.is_none() && !arg.starts_with("--") {
            positional = Some(arg);
        }
    }
    positional.unwrap_or_default()
}

fn load_config() -> anyhow::Result<ImportConfig> {
    match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) if !path.trim().is_empty() => {
            let path = path.trim();
            tracing::info!(config_path = %path, "加载导入配置");
            ImportConfig::from_json_file(path)
                .with_context(|| format!("无法加载导入配置: {}", path))
        }
        _ => Ok(ImportConfig::default()),
    }
}

/// 数据库路径: 环境变量优先，其次用户数据目录
fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./customer_import.db");
    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("customer-import");
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("customer_import.db");
        }
    }
    path.to_string_lossy().to_string()
}
