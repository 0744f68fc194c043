// ==========================================
// 示例目录生成器
// ==========================================
// 用途: 生成可直接载入的 CSV 目录（每个分区一个文件）与支架表
// 输出: <目录>/Матрица/*.csv, <目录>/Кронштейны.csv（默认目录 data）
// 载入: radiatool --data-dir data 并在配置中设置 matrix_file = "Матрица",
//       brackets_file = "Кронштейны.csv"
// ==========================================

use csv::WriterBuilder;
use radiatool::domain::{standard_lengths, SheetKey, STANDARD_HEIGHTS};
use radiatool::ConnectionFamily;
use std::error::Error;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

// 目录表头（与载入器识别的列名一致）
const RADIATOR_HEADER: &[&str] = &[
    "Артикул",
    "Наименование",
    "Цена, руб",
    "Мощность, Вт",
    "Вес, кг",
    "Объем, м3",
];

const BRACKET_HEADER: &[&str] = &["Артикул", "Наименование", "Цена, руб"];

// 规则表引用的全部支架
const BRACKETS: &[(&str, &str, f64)] = &[
    ("К9.2L", "Кронштейн настенный левый", 85.0),
    ("К9.2R", "Кронштейн настенный правый", 85.0),
    ("К9.3-40", "Кронштейн настенный средний", 120.0),
    ("К15.4300", "Кронштейн настенный 300", 150.0),
    ("К15.4400", "Кронштейн настенный 400", 150.0),
    ("К15.4500", "Кронштейн настенный 500", 160.0),
    ("К15.4600", "Кронштейн настенный 600", 160.0),
    ("К15.4900", "Кронштейн настенный 900", 180.0),
    ("КНС430", "Кронштейн напольный средний", 210.0),
    ("КНС450", "Кронштейн напольный 450", 300.0),
    ("КНС470", "Кронштейн напольный 470", 320.0),
    ("КНС4100", "Кронштейн напольный 4100", 350.0),
    ("КНС550", "Кронштейн напольный 550", 310.0),
    ("КНС570", "Кронштейн напольный 570", 330.0),
    ("КНС5100", "Кронштейн напольный 5100", 360.0),
    ("КНС650", "Кронштейн напольный 650", 315.0),
    ("КНС670", "Кронштейн напольный 670", 335.0),
    ("КНС6100", "Кронштейн напольный 6100", 365.0),
];

fn main() -> Result<(), Box<dyn Error>> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));

    println!("开始生成示例目录: {}", out_dir.display());

    let matrix_dir = out_dir.join("Матрица");
    fs::create_dir_all(&matrix_dir)?;

    let mut total = 0;
    for sheet in SheetKey::all() {
        total += generate_sheet(&matrix_dir, sheet)?;
    }
    generate_brackets(&out_dir.join("Кронштейны.csv"))?;

    println!(
        "✓ 生成完成: {} 个分区, {} 个散热器, {} 个支架",
        SheetKey::all().len(),
        total,
        BRACKETS.len()
    );
    Ok(())
}

fn generate_sheet(dir: &Path, sheet: SheetKey) -> Result<usize, Box<dyn Error>> {
    let path = dir.join(format!("{}.csv", sheet));
    let mut wtr = WriterBuilder::new().delimiter(b';').from_writer(File::create(&path)?);
    wtr.write_record(RADIATOR_HEADER)?;

    let code = sheet.radiator_type.code();
    let panels = f64::from(code / 10);
    let mut count = 0;

    for &height in STANDARD_HEIGHTS.iter() {
        for length in standard_lengths() {
            let area = f64::from(height) * f64::from(length) / 1_000_000.0;
            let article = format!(
                "{}{}{:02}{:04}",
                article_prefix(sheet.connection),
                code,
                height / 100,
                length
            );
            let name = format!(
                "Радиатор METEOR {} {}/{}мм/{}мм",
                sheet.connection.short_code(),
                code,
                height,
                length
            );
            let price = (area * 9000.0 * panels).round() + 1500.0;
            let power = (area * 1400.0 * panels).round();
            let weight = area * 22.0 * panels;
            let volume = area * 0.05 * panels;

            wtr.write_record([
                article,
                name,
                format!("{:.2}", price),
                format!("{}", power),
                format!("{:.2}", weight),
                format!("{:.4}", volume),
            ])?;
            count += 1;
        }
    }

    wtr.flush()?;
    println!("  ✓ {} ({} 行)", path.display(), count);
    Ok(count)
}

// 物料号前缀: 左右 VK 分区物料号不得重复
fn article_prefix(connection: ConnectionFamily) -> &'static str {
    match connection {
        ConnectionFamily::VkRight => "VKR",
        ConnectionFamily::VkLeft => "VKL",
        ConnectionFamily::KSide => "K",
    }
}

fn generate_brackets(path: &Path) -> Result<(), Box<dyn Error>> {
    let mut wtr = WriterBuilder::new().delimiter(b';').from_writer(File::create(path)?);
    wtr.write_record(BRACKET_HEADER)?;
    for (article, name, price) in BRACKETS {
        wtr.write_record([article.to_string(), name.to_string(), format!("{:.2}", price)])?;
    }
    wtr.flush()?;
    println!("  ✓ {}", path.display());
    Ok(())
}
