// ==========================================
// RadiaTool 散热器规格计算系统 - 文件解析器实现
// ==========================================
// 职责: 文件 → 表格（sheet 名 + 行记录）
// 支持: Excel (.xlsx/.xls, 全部工作表) / CSV (.csv) / CSV 目录（文件名即表名）
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

/// 原始表格: 表名 + 行记录（列名 → 单元格文本）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSheet {
    pub name: String,
    pub rows: Vec<HashMap<String, String>>,
}

impl RawSheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// 由表头与数据行构造（测试与内存数据源使用）
    pub fn from_rows(name: impl Into<String>, headers: &[&str], data: &[Vec<&str>]) -> Self {
        let rows = data
            .iter()
            .map(|values| {
                headers
                    .iter()
                    .zip(values.iter())
                    .map(|(h, v)| (h.trim().to_string(), v.trim().to_string()))
                    .collect()
            })
            .collect();
        Self {
            name: name.into(),
            rows,
        }
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.rows.iter().any(|r| r.contains_key(column))
    }
}

// ==========================================
// FileParser Trait
// ==========================================
pub trait FileParser: Send + Sync {
    /// 解析文件为表格列表
    ///
    /// # 返回
    /// - Ok(Vec<RawSheet>): 按文件内顺序的表格
    /// - Err: 文件不存在、格式错误
    fn parse_sheets(&self, path: &Path) -> ImportResult<Vec<RawSheet>>;
}

// ==========================================
// CSV Parser 实现
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvParser {
    delimiter: Option<u8>,
}

impl CsvParser {
    pub fn new() -> Self {
        Self { delimiter: None }
    }

    /// 指定分隔符（不指定时按首行自动判断 ';' / ','）
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self {
            delimiter: Some(delimiter),
        }
    }

    fn resolve_delimiter(&self, path: &Path) -> ImportResult<u8> {
        if let Some(d) = self.delimiter {
            return Ok(d);
        }
        let mut first_line = String::new();
        BufReader::new(File::open(path)?).read_line(&mut first_line)?;
        Ok(detect_delimiter(&first_line))
    }

    /// 解析单个 CSV 文件, 表名取文件名（不含扩展名）
    pub fn parse_file(&self, path: &Path) -> ImportResult<RawSheet> {
        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        let ext = extension_of(path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let delimiter = self.resolve_delimiter(path)?;
        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(delimiter)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        // 读取表头（去除 UTF-8 BOM）
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        let mut sheet = RawSheet::new(sheet_name_of(path));
        for result in reader.records() {
            let record = result?;
            let mut row_map = HashMap::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            sheet.rows.push(row_map);
        }

        Ok(sheet)
    }

    /// 按原始顺序读取全部记录（含首行）, 不做表头映射
    pub fn read_records(&self, path: &Path) -> ImportResult<Vec<Vec<String>>> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let delimiter = self.resolve_delimiter(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(File::open(path)?);

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            records.push(
                record
                    .iter()
                    .map(|v| v.trim_start_matches('\u{feff}').to_string())
                    .collect(),
            );
        }
        Ok(records)
    }
}

impl FileParser for CsvParser {
    fn parse_sheets(&self, path: &Path) -> ImportResult<Vec<RawSheet>> {
        Ok(vec![self.parse_file(path)?])
    }
}

// ==========================================
// CSV 目录 Parser（每个 .csv 文件一张表）
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvDirectoryParser;

impl FileParser for CsvDirectoryParser {
    fn parse_sheets(&self, path: &Path) -> ImportResult<Vec<RawSheet>> {
        if !path.is_dir() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let mut files: Vec<_> = fs::read_dir(path)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && extension_of(p) == "csv")
            .collect();
        // 目录遍历顺序不稳定, 按文件名排序
        files.sort();

        let parser = CsvParser::new();
        files.iter().map(|f| parser.parse_file(f)).collect()
    }
}

// ==========================================
// Excel Parser 实现（读取全部工作表）
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_sheets(&self, path: &Path) -> ImportResult<Vec<RawSheet>> {
        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        let ext = extension_of(path);
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(path)?;

        let sheet_names = workbook.sheet_names();
        if sheet_names.is_empty() {
            return Err(ImportError::ExcelParseError(
                "Excel 文件无工作表".to_string(),
            ));
        }

        let mut sheets = Vec::with_capacity(sheet_names.len());
        for sheet_name in sheet_names {
            let range = workbook
                .worksheet_range(&sheet_name)
                .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

            let mut rows = range.rows();
            // 空工作表: 保留表名, 无数据行
            let Some(header_row) = rows.next() else {
                sheets.push(RawSheet::new(sheet_name));
                continue;
            };

            let headers: Vec<String> = header_row
                .iter()
                .map(|cell| cell.to_string().trim().to_string())
                .collect();

            let mut sheet = RawSheet::new(sheet_name);
            for data_row in rows {
                let mut row_map = HashMap::new();

                for (col_idx, cell) in data_row.iter().enumerate() {
                    if let Some(header) = headers.get(col_idx) {
                        row_map.insert(header.clone(), cell.to_string().trim().to_string());
                    }
                }

                // 跳过完全空白的行
                if row_map.values().all(|v| v.is_empty()) {
                    continue;
                }

                sheet.rows.push(row_map);
            }
            sheets.push(sheet);
        }

        Ok(sheets)
    }
}

// ==========================================
// 通用文件解析器（根据路径类型/扩展名自动选择）
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<Vec<RawSheet>> {
        let path = file_path.as_ref();
        if path.is_dir() {
            return CsvDirectoryParser.parse_sheets(path);
        }

        match extension_of(path).as_str() {
            "csv" => CsvParser::new().parse_sheets(path),
            "xlsx" | "xls" => ExcelParser.parse_sheets(path),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl FileParser for UniversalFileParser {
    fn parse_sheets(&self, path: &Path) -> ImportResult<Vec<RawSheet>> {
        self.parse(path)
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn sheet_name_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// 首行中 ';' 多于 ',' 时按分号分隔
pub fn detect_delimiter(first_line: &str) -> u8 {
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}
