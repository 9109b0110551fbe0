// ==========================================
// 客户批量导入 - 国际化
// ==========================================
// 工具: rust-i18n（locales/*.yml，宏在 lib.rs 中初始化）
// 语言: en（默认）/ zh-CN
// 选择: CUSTOMER_IMPORT_LOCALE 优先，其次 LC_ALL / LANG
// ==========================================

/// 语言环境变量
pub const LOCALE_ENV: &str = "CUSTOMER_IMPORT_LOCALE";

/// 已提供文案的语言
pub const SUPPORTED_LOCALES: [&str; 2] = ["en", "zh-CN"];

pub const DEFAULT_LOCALE: &str = "en";

pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 将系统语言标识归一为已支持的语言
///
/// 例: `zh_CN.UTF-8` → `zh-CN`，`en_US` → `en`，未知语言 → None
pub fn normalize_locale(raw: &str) -> Option<&'static str> {
    let tag = raw
        .split('.')
        .next()
        .unwrap_or_default()
        .trim()
        .replace('_', "-");
    let language = tag.split('-').next().unwrap_or_default();

    if language.eq_ignore_ascii_case("zh") {
        Some("zh-CN")
    } else if language.eq_ignore_ascii_case("en") {
        Some("en")
    } else {
        None
    }
}

/// 按环境变量选择语言并生效，返回最终语言
pub fn init_from_env() -> String {
    let locale = [LOCALE_ENV, "LC_ALL", "LANG"]
        .iter()
        .filter_map(|key| std::env::var(key).ok())
        .find_map(|value| normalize_locale(&value))
        .unwrap_or(DEFAULT_LOCALE);
    set_locale(locale);
    current_locale()
}

/// 翻译消息
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息并替换 `%{name}` 占位符
///
/// # 示例
/// ```no_run
/// use customer_import::i18n::t_with_args;
/// let msg = t_with_args("error.file_not_found", &[("path", "/tmp/customers.csv")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(t(key), |message, (name, value)| {
        message.replace(&format!("%{{{}}}", name), value)
    })
}

// locale 为进程级全局状态，依赖具体文案的测试需持有此锁
#[cfg(test)]
pub(crate) static LOCALE_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;

    fn lock() -> std::sync::MutexGuard<'static, ()> {
        LOCALE_TEST_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[test]
    fn test_normalize_locale() {
        assert_eq!(normalize_locale("zh_CN.UTF-8"), Some("zh-CN"));
        assert_eq!(normalize_locale("zh-TW"), Some("zh-CN"));
        assert_eq!(normalize_locale("en_US.UTF-8"), Some("en"));
        assert_eq!(normalize_locale("EN"), Some("en"));
        assert_eq!(normalize_locale("fr_FR"), None);
        assert_eq!(normalize_locale("C"), None);
        assert_eq!(normalize_locale(""), None);
    }

    #[test]
    fn test_supported_locales_have_messages() {
        let _guard = lock();
        for locale in SUPPORTED_LOCALES {
            set_locale(locale);
            assert_eq!(current_locale(), locale);
            assert_ne!(t("error.no_records"), "error.no_records");
        }
        set_locale(DEFAULT_LOCALE);
    }

    #[test]
    fn test_translate_by_locale() {
        let _guard = lock();
        set_locale("en");
        assert_eq!(t("error.no_records"), "No Record Found To Create!");

        set_locale("zh-CN");
        assert_eq!(t("error.no_records"), "没有可创建的记录!");

        set_locale(DEFAULT_LOCALE);
    }

    #[test]
    fn test_translate_with_args() {
        let _guard = lock();
        set_locale("en");
        assert_eq!(
            t_with_args("import.total_created", &[("count", "3")]),
            "Total Customer Created : 3"
        );

        set_locale("zh-CN");
        let msg = t_with_args("error.file_not_found", &[("path", "/tmp/customers.csv")]);
        assert!(msg.contains("/tmp/customers.csv"));
        assert!(msg.contains("文件不存在"));

        set_locale(DEFAULT_LOCALE);
    }
}
