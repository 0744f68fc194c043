// ==========================================
// 目录载入集成测试
// ==========================================
// 覆盖: CSV 目录载入、忽略表、坏行跳过、网格与跨分区查询、缺失源文件
// ==========================================


use radiatool::catalog::{CatalogError, CatalogLoader, BRACKET_SHEET_NAME};
use radiatool::RadiatorType;
use std::fs;
use test_helpers::{k_side, sample_catalog, vk_left, vk_right, write_csv_catalog};

#[test]
fn test_load_csv_directory_catalog() {
    let (_dir, matrix_dir, brackets) = write_csv_catalog().unwrap();

    let loaded = CatalogLoader::new()
        .load_from_paths(&matrix_dir, &brackets)
        .unwrap();
    let report = &loaded.report;

    assert_eq!(report.sheets_loaded, 2);
    assert_eq!(report.sheets_ignored, vec![BRACKET_SHEET_NAME.to_string()]);
    assert_eq!(report.radiators_loaded, 3);
    assert_eq!(report.radiator_rows_skipped, 1);
    assert_eq!(report.brackets_loaded, 18);
    assert_eq!(report.bracket_rows_skipped, 0);

    let index = &loaded.index;
    assert_eq!(
        index.sheet_keys(),
        vec![vk_right(RadiatorType::T10), k_side(RadiatorType::T22)]
    );

    let a1 = index.lookup_radiator(vk_right(RadiatorType::T10), "A1").unwrap();
    assert_eq!((a1.height_mm, a1.length_mm), (300, 600));
    assert_eq!(a1.price, 1000.0);
    assert_eq!(a1.power_w, 500.0);
    assert!(index.lookup_radiator(vk_right(RadiatorType::T10), "BAD").is_none());
    assert_eq!(index.lookup_bracket("К9.3-40").unwrap().price, 120.0);
}

#[test]
fn test_grid_positions_from_names() {
    let (_dir, matrix_dir, brackets) = write_csv_catalog().unwrap();
    let index = CatalogLoader::new()
        .load_from_paths(&matrix_dir, &brackets)
        .unwrap()
        .index;

    let grid = index.grid(vk_right(RadiatorType::T10)).unwrap();
    assert_eq!(grid.article_at(300, 600), Some("A1"));
    assert_eq!(grid.article_at(300, 1800), Some("A2"));
    assert_eq!(grid.article_at(500, 600), None);
    assert_eq!(grid.populated(), 2);

    assert!(index.grid(vk_left(RadiatorType::T10)).is_none());
}

#[test]
fn test_find_radiator_any_sheet_and_radiator_at() {
    let catalog = sample_catalog();

    let entry = catalog.find_radiator_any_sheet("K33-900-2000").unwrap();
    assert_eq!(entry.sheet_key(), k_side(RadiatorType::T33));
    assert!(catalog.find_radiator_any_sheet("К9.2L").is_none());

    let at = catalog
        .radiator_at(vk_left(RadiatorType::T11), 600, 800)
        .unwrap();
    assert_eq!(at.article, "L11-600-800");
    assert_eq!(catalog.radiator_count(), 6);
    assert_eq!(catalog.bracket_count(), 18);
}

#[test]
fn test_missing_bracket_source_is_fatal() {
    let (dir, matrix_dir, _brackets) = write_csv_catalog().unwrap();
    let missing = dir.path().join("нет.csv");

    let result = CatalogLoader::new().load_from_paths(&matrix_dir, &missing);
    assert!(matches!(result, Err(CatalogError::MissingBracketSource(_))));
}

#[test]
fn test_missing_article_column_in_sheet_is_fatal() {
    let (_dir, matrix_dir, brackets) = write_csv_catalog().unwrap();
    fs::write(
        matrix_dir.join("VK-левое 11.csv"),
        "Код;Наименование\nX;Радиатор VK 11/300мм/600мм\n",
    )
    .unwrap();

    let result = CatalogLoader::new().load_from_paths(&matrix_dir, &brackets);
    assert!(matches!(result, Err(CatalogError::MissingColumn { .. })));
}

#[test]
fn test_comma_decimal_numbers_in_catalog() {
    let (dir, matrix_dir, _brackets) = write_csv_catalog().unwrap();
    fs::write(
        matrix_dir.join("VK-левое 11.csv"),
        "Артикул;Наименование;Цена, руб;Мощность, Вт;Вес, кг;Объем, м3\n\
         L11;Радиатор METEOR VK 11/500мм/1000мм;5120,50;1 210;11,4;0,021\n",
    )
    .unwrap();
    let brackets = dir.path().join("Кронштейны-запятая.csv");
    fs::write(&brackets, "Артикул;Наименование;Цена, руб\nК9.2L;Кронштейн;120,5\n").unwrap();

    let index = CatalogLoader::new()
        .load_from_paths(&matrix_dir, &brackets)
        .unwrap()
        .index;

    let entry = index.lookup_radiator(vk_left(RadiatorType::T11), "L11").unwrap();
    assert_eq!(entry.price, 5120.5);
    assert_eq!(entry.power_w, 1210.0);
    assert_eq!(entry.weight_kg, 11.4);
    assert_eq!(entry.volume_m3, 0.021);
    assert_eq!(index.lookup_bracket("К9.2L").unwrap().price, 120.5);
}

#[test]
fn test_matrix_without_known_sheets_is_fatal() {
    let (dir, _matrix_dir, brackets) = write_csv_catalog().unwrap();
    let matrix_dir = dir.path().join("Пусто");
    fs::create_dir(&matrix_dir).unwrap();
    fs::write(matrix_dir.join("Сводка.csv"), "Артикул;Наименование\nX;итог\n").unwrap();

    let result = CatalogLoader::new().load_from_paths(&matrix_dir, &brackets);
    assert!(matches!(result, Err(CatalogError::EmptyCatalog(_))));
}
