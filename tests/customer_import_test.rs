// ==========================================
// 客户导入集成测试
// ==========================================
// 测试目标: 验证文件 → SQLite 客户库的完整导入流程
// ==========================================


use customer_import::importer::InvalidInputReason;
use customer_import::{
    logging, CustomerImporter, CustomerStore, FieldMapping, ImportConfig, ImportError,
    LookupOutcome,
};
use test_helpers::{create_test_engine, customers_csv, fixture_path, write_temp_file};

#[test]
fn test_import_csv_fixture() {
    logging::init_test();

    let (_db, engine) = create_test_engine(ImportConfig::default()).expect("创建引擎失败");

    let result = engine
        .start_import(&fixture_path("customers.csv"))
        .expect("导入应成功");

    assert_eq!(result.created_count, 3);
    assert_eq!(result.skipped_count, 0);
    assert_eq!(result.total_records, 3);

    let customer = match engine.store().lookup("ada.lovelace@example.com") {
        LookupOutcome::Found(customer) => customer,
        other => panic!("expected Found, got {:?}", other),
    };
    assert_eq!(customer.firstname, "Ada");
    assert_eq!(customer.lastname, "Lovelace");
}

#[test]
fn test_import_json_fixture_mapped_by_key() {
    logging::init_test();

    let (_db, engine) = create_test_engine(ImportConfig::default()).expect("创建引擎失败");

    let result = engine
        .start_import(&fixture_path("customers.json"))
        .expect("导入应成功");
    assert_eq!(result.created_count, 3);

    // 键顺序与表头不同的对象也按键名映射
    let customer = engine
        .store()
        .find_by_email("grace.hopper@example.com")
        .unwrap()
        .expect("客户应已创建");
    assert_eq!(customer.firstname, "Grace");
    assert_eq!(customer.lastname, "Hopper");
}

#[test]
fn test_single_row_created_then_skipped() {
    let (_db, engine) = create_test_engine(ImportConfig::default()).expect("创建引擎失败");
    let csv = write_temp_file(
        ".csv",
        &customers_csv(&[("Emma", "Watson", "emma@example.com")]),
    )
    .unwrap();
    let path = csv.path().to_str().unwrap();

    let first = engine.start_import(path).unwrap();
    assert_eq!(first.created_count, 1);

    let second = engine.start_import(path).unwrap();
    assert_eq!(second.created_count, 0);
    assert_eq!(second.skipped_count, 1);
}

#[test]
fn test_reimport_is_idempotent() {
    let (_db, engine) = create_test_engine(ImportConfig::default()).expect("创建引擎失败");
    let path = fixture_path("customers.csv");

    assert_eq!(engine.start_import(&path).unwrap().created_count, 3);
    assert_eq!(engine.start_import(&path).unwrap().created_count, 0);
    assert_eq!(engine.store().count_customers().unwrap(), 3);
}

#[test]
fn test_row_order_does_not_change_count() {
    let rows = [
        ("Emma", "Watson", "emma@example.com"),
        ("John", "Doe", "john@example.com"),
        ("Emma", "W", "emma@example.com"),
        ("Ada", "Lovelace", "ada@example.com"),
    ];
    let mut reversed = rows;
    reversed.reverse();

    let (_db1, engine1) = create_test_engine(ImportConfig::default()).unwrap();
    let (_db2, engine2) = create_test_engine(ImportConfig::default()).unwrap();
    let forward = write_temp_file(".csv", &customers_csv(&rows)).unwrap();
    let backward = write_temp_file(".csv", &customers_csv(&reversed)).unwrap();

    let a = engine1
        .start_import(forward.path().to_str().unwrap())
        .unwrap();
    let b = engine2
        .start_import(backward.path().to_str().unwrap())
        .unwrap();

    assert_eq!(a.created_count, 3);
    assert_eq!(a.created_count, b.created_count);
}

#[test]
fn test_email_dedup_is_case_insensitive() {
    let (_db, engine) = create_test_engine(ImportConfig::default()).unwrap();
    let csv = write_temp_file(
        ".csv",
        &customers_csv(&[
            ("Emma", "Watson", "emma@example.com"),
            ("Emma", "Watson", "EMMA@example.com"),
        ]),
    )
    .unwrap();

    let result = engine.start_import(csv.path().to_str().unwrap()).unwrap();
    assert_eq!(result.created_count, 1);
    assert_eq!(result.skipped_count, 1);
}

#[test]
fn test_header_only_csv_insufficient_data() {
    let (_db, engine) = create_test_engine(ImportConfig::default()).unwrap();

    let err = engine
        .start_import(&fixture_path("header_only.csv"))
        .unwrap_err();
    assert!(matches!(err, ImportError::ImportFailed { .. }));
    assert!(matches!(
        err.root_cause(),
        ImportError::InsufficientData { found: 0, .. }
    ));
}

#[test]
fn test_bad_header_schema_mismatch() {
    let (_db, engine) = create_test_engine(ImportConfig::default()).unwrap();

    let err = engine
        .start_import(&fixture_path("bad_header.csv"))
        .unwrap_err();
    match err.root_cause() {
        ImportError::SchemaMismatch { unexpected } => {
            assert!(unexpected.contains(&"email".to_string()));
        }
        other => panic!("expected SchemaMismatch, got {:?}", other),
    }
    assert_eq!(engine.store().count_customers().unwrap(), 0);
}

#[test]
fn test_single_object_json_insufficient_data() {
    let (_db, engine) = create_test_engine(ImportConfig::default()).unwrap();

    let err = engine
        .start_import(&fixture_path("single.json"))
        .unwrap_err();
    assert!(matches!(
        err.root_cause(),
        ImportError::InsufficientData {
            found: 1,
            required: 2,
            ..
        }
    ));
}

#[test]
fn test_disallowed_mime_type_rejected() {
    let (_db, mut engine) = create_test_engine(ImportConfig::default()).unwrap();
    engine.set_allowed_mime_types(["application/json"]);

    let err = engine
        .start_import(&fixture_path("customers.csv"))
        .unwrap_err();
    match err.root_cause() {
        ImportError::UnsupportedType { mime_type, .. } => assert_eq!(mime_type, "text/csv"),
        other => panic!("expected UnsupportedType, got {:?}", other),
    }
}

#[test]
fn test_plain_text_not_allowed_by_default() {
    let (_db, engine) = create_test_engine(ImportConfig::default()).unwrap();

    let err = engine.start_import(&fixture_path("notes.txt")).unwrap_err();
    assert!(matches!(
        err.root_cause(),
        ImportError::UnsupportedType { .. }
    ));
}

#[test]
fn test_nonexistent_path_not_found() {
    let (_db, engine) = create_test_engine(ImportConfig::default()).unwrap();

    let err = engine
        .start_import("/nonexistent/dir/customers.csv")
        .unwrap_err();
    assert!(matches!(err.root_cause(), ImportError::NotFound(_)));
}

#[test]
fn test_directory_is_invalid_input() {
    let (_db, engine) = create_test_engine(ImportConfig::default()).unwrap();
    let dir = tempfile::TempDir::new().unwrap();

    let err = engine
        .start_import(dir.path().to_str().unwrap())
        .unwrap_err();
    assert!(matches!(
        err.root_cause(),
        ImportError::InvalidInput {
            reason: InvalidInputReason::NotAFile,
            ..
        }
    ));
}

#[test]
fn test_invalid_email_aborts_but_keeps_created() {
    let (_db, engine) = create_test_engine(ImportConfig::default()).unwrap();
    let csv = write_temp_file(
        ".csv",
        &customers_csv(&[
            ("Emma", "Watson", "emma@example.com"),
            ("John", "Doe", "not-an-email"),
            ("Ada", "Lovelace", "ada@example.com"),
        ]),
    )
    .unwrap();

    let err = engine
        .start_import(csv.path().to_str().unwrap())
        .unwrap_err();
    assert!(matches!(err.root_cause(), ImportError::Store(_)));
    assert_eq!(engine.store().count_customers().unwrap(), 1);
}

#[test]
fn test_custom_field_mapping_from_config() {
    let config = ImportConfig::from_json_str(
        r#"{
            "field_mapping": [
                {"canonical": "firstname", "source": "given"},
                {"canonical": "lastname", "source": "family"},
                {"canonical": "email", "source": "mail"},
                {"canonical": "telephone", "source": "tel"}
            ]
        }"#,
    )
    .expect("配置解析失败");
    let (_db, engine) = create_test_engine(config).unwrap();
    let csv = write_temp_file(
        ".csv",
        "given,family,mail,tel\nEmma,Watson,emma@example.com,0123456\n",
    )
    .unwrap();

    let result = engine.start_import(csv.path().to_str().unwrap()).unwrap();
    assert_eq!(result.created_count, 1);

    let customer = engine
        .store()
        .find_by_email("emma@example.com")
        .unwrap()
        .unwrap();
    assert_eq!(
        customer.extra_attributes.get("telephone").map(String::as_str),
        Some("0123456")
    );
}

#[test]
fn test_default_mapping_matches_config_default() {
    let config = ImportConfig::default();
    assert_eq!(config.field_mapping, FieldMapping::customer_default());
}

#[test]
fn test_whitespace_only_files_are_empty_input() {
    let (_db, engine) = create_test_engine(ImportConfig::default()).unwrap();

    for (suffix, content) in [(".json", "  \n"), (".csv", "\n\n"), (".csv", " \t \n")] {
        let file = write_temp_file(suffix, content).unwrap();
        let err = engine
            .start_import(file.path().to_str().unwrap())
            .unwrap_err();
        assert!(
            matches!(err.root_cause(), ImportError::EmptyInput(_)),
            "{} {:?}: got {:?}",
            suffix,
            content,
            err.root_cause()
        );
    }
}

#[test]
fn test_csv_content_with_trailing_blank_line_in_txt_file() {
    let (_db, engine) = create_test_engine(ImportConfig::default()).unwrap();
    let content = format!(
        "{}   \n",
        customers_csv(&[("Emma", "Watson", "emma@example.com")])
    );
    let file = write_temp_file(".txt", &content).unwrap();

    let result = engine.start_import(file.path().to_str().unwrap()).unwrap();
    assert_eq!(result.created_count, 1);
}

#[test]
fn test_json_values_are_trimmed() {
    let (_db, engine) = create_test_engine(ImportConfig::default()).unwrap();
    let file = write_temp_file(
        ".json",
        r#"[
            {"fname": " Emma ", "lname": "Watson", "emailaddress": " emma@example.com "},
            {"fname": "John", "lname": "Doe", "emailaddress": "john@example.com"}
        ]"#,
    )
    .unwrap();

    let result = engine.start_import(file.path().to_str().unwrap()).unwrap();
    assert_eq!(result.created_count, 2);

    let customer = engine
        .store()
        .find_by_email("emma@example.com")
        .unwrap()
        .expect("客户应已创建");
    assert_eq!(customer.firstname, "Emma");
}
