// ==========================================
// 规格单 API 集成测试
// ==========================================
// 覆盖: 会话编辑、分区切换、折扣校验、计算、导出、导入、按配置载入目录
// ==========================================


use radiatool::api::{ApiError, SelectionSession, SpecificationApi};
use radiatool::config::AppConfig;
use radiatool::{DerivationOptions, MountKind, RadiatorType};
use std::fs;
use std::sync::Arc;
use test_helpers::{sample_catalog, vk_left, vk_right, write_csv_catalog};

fn api() -> SpecificationApi {
    SpecificationApi::new(Arc::new(sample_catalog()))
}

fn session(api: &SpecificationApi) -> SelectionSession {
    api.new_session(DerivationOptions::default()).unwrap()
}

// ==========================================
// 会话编辑
// ==========================================

#[test]
fn test_set_cell_at_grid_position() {
    let api = api();
    let mut session = session(&api);
    assert_eq!(session.current_sheet(), vk_right(RadiatorType::T10));

    let article = api.set_cell_at(&mut session, 300, 600, "2").unwrap();
    assert_eq!(article, "A1");
    assert_eq!(session.selection().get(vk_right(RadiatorType::T10), "A1"), Some("2"));

    let err = api.set_cell_at(&mut session, 500, 600, "1").unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));

    // 空白文本清除单元格
    api.set_cell_at(&mut session, 300, 600, " ").unwrap();
    assert!(session.selection().is_empty());
}

#[test]
fn test_set_cell_by_article() {
    let api = api();
    let mut session = session(&api);

    api.set_cell(&mut session, vk_right(RadiatorType::T22), "V22-500-1000", "1")
        .unwrap();
    let err = api
        .set_cell(&mut session, vk_right(RadiatorType::T10), "V22-500-1000", "1")
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
    assert_eq!(session.selection().len(), 1);
}

#[test]
fn test_select_sheet_respects_available_types() {
    let api = api();
    let mut session = session(&api);

    let err = api
        .select_sheet(&mut session, vk_left(RadiatorType::T22))
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
    assert_eq!(session.current_sheet(), vk_right(RadiatorType::T10));

    api.select_sheet(&mut session, vk_left(RadiatorType::T11)).unwrap();
    assert_eq!(
        api.set_cell_at(&mut session, 600, 800, "1").unwrap(),
        "L11-600-800"
    );
    assert!(!api
        .available_types(vk_left(RadiatorType::T11).connection)
        .contains(&RadiatorType::T22));
}

#[test]
fn test_grid_queries() {
    let api = api();
    assert_eq!(api.sheets().len(), 5);

    let grid = api.grid(vk_right(RadiatorType::T10)).unwrap();
    assert_eq!(grid.article_at(300, 1800), Some("A2"));

    let err = api.grid(vk_left(RadiatorType::T33)).unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

// ==========================================
// 折扣与计算
// ==========================================

#[test]
fn test_discount_validation() {
    let api = api();
    let mut session = session(&api);

    assert!(matches!(
        api.set_discounts(&mut session, -1.0, 0.0),
        Err(ApiError::DiscountOutOfRange { field: "radiator_discount_pct", .. })
    ));
    assert!(matches!(
        api.set_discounts(&mut session, 0.0, 100.5),
        Err(ApiError::DiscountOutOfRange { field: "bracket_discount_pct", .. })
    ));
    assert!(api
        .new_session(DerivationOptions::new(120.0, 0.0, MountKind::Wall))
        .is_err());

    api.set_discounts(&mut session, 10.0, 50.0).unwrap();
    assert_eq!(session.options().radiator_discount_pct, 10.0);
    assert_eq!(session.options().bracket_discount_pct, 50.0);
}

#[test]
fn test_derive_follows_session_state() {
    let api = api();
    let mut session = session(&api);
    api.set_cell_at(&mut session, 300, 600, "2").unwrap();
    api.set_discounts(&mut session, 10.0, 50.0).unwrap();

    let spec = api.derive(&session);
    assert_eq!(spec.find("A1").unwrap().total, 1800.0);
    assert_eq!(spec.find("К9.2L").unwrap().total, 170.0);

    api.set_mount_kind(&mut session, MountKind::None);
    let spec = api.derive(&session);
    assert_eq!(spec.brackets().count(), 0);
    assert_eq!(spec.totals.total_sum, 1800.0);

    let err = api
        .derive_selection(
            session.selection(),
            &DerivationOptions::new(0.0, -5.0, MountKind::Wall),
        )
        .unwrap_err();
    assert!(matches!(err, ApiError::DiscountOutOfRange { .. }));
}

// ==========================================
// 导出与导入
// ==========================================

#[test]
fn test_export_empty_session_reports_no_data() {
    let api = api();
    let session = session(&api);
    let spec = api.derive(&session);

    assert!(matches!(api.export_document(&spec, None), Err(ApiError::NoData)));
    assert!(matches!(api.export_minimal_csv(&spec), Err(ApiError::NoData)));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Расчёт стоимости.xlsx");
    assert!(matches!(api.export_xlsx(&spec, None, &path), Err(ApiError::NoData)));
    assert!(!path.exists());
}

#[test]
fn test_export_xlsx_writes_workbook() {
    let api = api();
    let mut session = session(&api);
    api.set_cell_at(&mut session, 300, 600, "1").unwrap();
    let spec = api.derive(&session);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Расчёт стоимости.xlsx");
    api.export_xlsx(&spec, None, &path).unwrap();
    assert!(fs::metadata(&path).unwrap().len() > 0);
}

#[test]
fn test_export_with_correspondence_file() {
    let api = api();
    let mut session = session(&api);
    api.set_cell_at(&mut session, 300, 600, "1").unwrap();
    let spec = api.derive(&session);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Соответствие.csv");
    fs::write(&path, "Старый;Новый\nX-1;A1\n").unwrap();

    let correspondence = api.load_correspondence(&path).unwrap();
    assert_eq!(correspondence.name, "Соответствие");
    assert_eq!(correspondence.rows.len(), 2);

    let document = api.export_document(&spec, Some(&correspondence)).unwrap();
    assert_eq!(document.sheets.len(), 2);
    assert!(document.sheet("Таблица соответствия").is_some());

    let missing = api.load_correspondence(&dir.path().join("нет.csv"));
    assert!(matches!(missing, Err(ApiError::NotFound(_))));
}

#[test]
fn test_import_selection_replaces_session_cells() {
    let api = api();
    let mut session = session(&api);
    api.set_cell_at(&mut session, 300, 1800, "7").unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("selection.csv");
    fs::write(&path, "Артикул;Кол-во\nA1;2\nK22-300-400;1\nZZZ;1\n").unwrap();

    let report = api.import_selection_csv(&mut session, &path).unwrap();
    assert_eq!(report.cells_imported, 2);
    assert_eq!(report.unknown_articles, vec!["ZZZ".to_string()]);
    assert_eq!(session.selection().len(), 2);
    assert!(session.selection().get(vk_right(RadiatorType::T10), "A2").is_none());

    let txt = dir.path().join("selection.txt");
    fs::write(&txt, "A1;1\n").unwrap();
    assert!(matches!(
        api.import_selection_csv(&mut session, &txt),
        Err(ApiError::InvalidInput(_))
    ));
}

// ==========================================
// 按配置载入
// ==========================================

#[test]
fn test_from_config_loads_csv_catalog() {
    let (dir, matrix_dir, brackets) = write_csv_catalog().unwrap();
    let config = AppConfig {
        data_dir: dir.path().to_path_buf(),
        matrix_file: matrix_dir.file_name().unwrap().to_string_lossy().to_string(),
        brackets_file: brackets.file_name().unwrap().to_string_lossy().to_string(),
        ..AppConfig::default()
    };

    let (api, report) = SpecificationApi::from_config(&config).unwrap();
    assert_eq!(report.sheets_loaded, 2);
    assert_eq!(api.catalog().radiator_count(), 3);
    assert_eq!(Arc::strong_count(&api.shared_catalog()), 2);
}

#[test]
fn test_from_config_missing_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        data_dir: dir.path().to_path_buf(),
        ..AppConfig::default()
    };

    let result = SpecificationApi::from_config(&config);
    assert!(matches!(result, Err(ApiError::CatalogError(_))));
}
