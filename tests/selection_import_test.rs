// ==========================================
// 选型 CSV 导入集成测试
// ==========================================
// 覆盖: 分隔符识别、表头识别、BOM、跨分区解析、报告统计、文件错误
// ==========================================


use radiatool::importer::{ImportError, SelectionImporter};
use radiatool::RadiatorType;
use std::fs;
use test_helpers::{k_side, sample_catalog, vk_left, vk_right};

#[test]
fn test_import_resolves_articles_across_sheets() {
    let catalog = sample_catalog();
    let csv = "A1;2\nL11-600-800;1+1\nK33-900-2000;3\n";

    let imported = SelectionImporter::new(&catalog).import_str(csv).unwrap();
    let selection = &imported.selection;

    assert_eq!(selection.get(vk_right(RadiatorType::T10), "A1"), Some("2"));
    assert_eq!(selection.get(vk_left(RadiatorType::T11), "L11-600-800"), Some("2"));
    assert_eq!(selection.get(k_side(RadiatorType::T33), "K33-900-2000"), Some("3"));
    assert_eq!(imported.report.rows_read, 3);
    assert_eq!(imported.report.cells_imported, 3);
}

#[test]
fn test_comma_delimiter_header_and_bom() {
    let catalog = sample_catalog();
    let csv = "\u{feff}article,quantity\nA2,4\nA2,1\n";

    let imported = SelectionImporter::new(&catalog).import_str(csv).unwrap();
    assert_eq!(imported.selection.get(vk_right(RadiatorType::T10), "A2"), Some("5"));
    assert_eq!(imported.report.rows_read, 2);
    assert_eq!(imported.report.cells_imported, 1);
}

#[test]
fn test_report_counts_skipped_rows() {
    let catalog = sample_catalog();
    let csv = "Артикул;Кол-во\nA1;0\nA2;abc\nК9.2L;4\nNOPE;1\nNOPE;2\n;5\n";

    let imported = SelectionImporter::new(&catalog).import_str(csv).unwrap();
    let report = &imported.report;

    assert!(imported.selection.is_empty());
    assert_eq!(report.rows_read, 5);
    assert_eq!(report.zero_quantity_rows, 2);
    assert_eq!(report.bracket_rows_skipped, 1);
    assert_eq!(report.unknown_articles, vec!["NOPE".to_string()]);
}

#[test]
fn test_import_file_errors() {
    let catalog = sample_catalog();
    let importer = SelectionImporter::new(&catalog);

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("нет.csv");
    assert!(matches!(
        importer.import_file(&missing),
        Err(ImportError::FileNotFound(_))
    ));

    let txt = dir.path().join("selection.txt");
    fs::write(&txt, "A1;1\n").unwrap();
    assert!(matches!(
        importer.import_file(&txt),
        Err(ImportError::UnsupportedFormat(_))
    ));

    let csv = dir.path().join("selection.csv");
    fs::write(&csv, "A1;3\n").unwrap();
    let imported = importer.import_file(&csv).unwrap();
    assert_eq!(imported.selection.get(vk_right(RadiatorType::T10), "A1"), Some("3"));
}
