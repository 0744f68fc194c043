// ==========================================
// RadiaTool 散热器规格计算系统 - 命令行入口
// ==========================================
// 子命令:
// - derive: 选型 CSV → 规格单（表格 / JSON / CSV）
// - export-xlsx: 选型 CSV → Расчёт стоимости.xlsx（主表 + 可选对照表）
// - export-csv: 选型 CSV → 精简 (物料号;数量) CSV
// - grid: 打印分区选型网格
// - sheets: 列出已载入分区
// 配置优先级: 默认值 → 配置文件 → 环境变量 → 命令行参数
// ==========================================

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use radiatool::api::{SelectionSession, SpecificationApi};
use radiatool::config::{AppConfig, ConfigManager};
use radiatool::domain::{SheetKey, Specification};
use radiatool::export::{sheet_to_csv_string, write_document_csv, DocumentSheet, SUGGESTED_FILE_STEM};
use radiatool::{i18n, logging, MountKind};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "radiatool", version, about = "RadiaTool 散热器规格计算")]
struct Cli {
    /// 配置文件路径（JSON）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 目录数据目录（含 Матрица.xlsx 与 Кронштейны.xlsx）
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 由选型 CSV 计算规格单
    Derive(DeriveArgs),
    /// 导出 .xlsx 规格单
    ExportXlsx(ExportXlsxArgs),
    /// 导出精简 (物料号;数量) CSV
    ExportCsv {
        /// 选型 CSV
        #[arg(long)]
        selection: PathBuf,
        /// 输出文件（缺省打印到标准输出）
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// 打印分区的 高度 × 长度 网格
    Grid {
        /// 分区名, 例如 "VK-правое 22"
        #[arg(long)]
        sheet: SheetKey,
    },
    /// 列出已载入的分区
    Sheets,
}

#[derive(clap::Args)]
struct PricingArgs {
    /// 选型 CSV
    #[arg(long)]
    selection: PathBuf,
    /// 安装方式: wall / floor / none
    #[arg(long)]
    mount: Option<MountKind>,
    /// 散热器折扣, %
    #[arg(long)]
    radiator_discount: Option<f64>,
    /// 支架折扣, %
    #[arg(long)]
    bracket_discount: Option<f64>,
    /// 对照表 CSV（作为第二张表原样导出）
    #[arg(long)]
    correspondence: Option<PathBuf>,
}

#[derive(clap::Args)]
struct ExportXlsxArgs {
    #[command(flatten)]
    pricing: PricingArgs,
    /// 输出文件（缺省 "Расчёт стоимости.xlsx"）
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(clap::Args)]
struct DeriveArgs {
    #[command(flatten)]
    pricing: PricingArgs,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
    /// 输出文件（缺省打印到标准输出）
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let manager = match &cli.config {
        Some(path) => ConfigManager::with_file(path),
        None => ConfigManager::new(),
    };
    let mut config = manager.load().context("配置加载失败")?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }

    logging::init_with_format(config.log_format);
    i18n::set_locale(&config.locale);
    tracing::info!(version = radiatool::VERSION, "{} 启动", radiatool::APP_NAME);

    let (api, report) = SpecificationApi::from_config(&config).context("目录载入失败")?;
    tracing::info!(
        sheets = report.sheets_loaded,
        radiators = report.radiators_loaded,
        brackets = report.brackets_loaded,
        "目录就绪"
    );

    match cli.command {
        Command::Derive(args) => run_derive(&api, &config, args),
        Command::ExportXlsx(args) => {
            let session = priced_session(&api, &config, &args.pricing)?;
            let spec = api.derive(&session);
            let correspondence = load_correspondence(&api, &args.pricing)?;
            let output = args
                .output
                .unwrap_or_else(|| PathBuf::from(format!("{}.xlsx", SUGGESTED_FILE_STEM)));
            api.export_xlsx(&spec, correspondence.as_ref(), &output)?;
            eprintln!("{}", output.display());
            Ok(())
        }
        Command::ExportCsv { selection, output } => {
            let session = session_from_csv(&api, &config, &selection)?;
            let spec = api.derive(&session);
            let csv = api.export_minimal_csv(&spec)?;
            emit(output.as_deref(), &csv)
        }
        Command::Grid { sheet } => print_grid(&api, sheet),
        Command::Sheets => {
            for sheet in api.sheets() {
                println!("{}", sheet);
            }
            Ok(())
        }
    }
}

fn run_derive(api: &SpecificationApi, config: &AppConfig, args: DeriveArgs) -> Result<()> {
    let session = priced_session(api, config, &args.pricing)?;
    let spec = api.derive(&session);

    match args.format {
        OutputFormat::Table => emit(args.output.as_deref(), &render_table(&spec)),
        OutputFormat::Json => emit(
            args.output.as_deref(),
            &serde_json::to_string_pretty(&spec)?,
        ),
        OutputFormat::Csv => {
            let correspondence = load_correspondence(api, &args.pricing)?;
            let document = api.export_document(&spec, correspondence.as_ref())?;
            match args.output.as_deref() {
                Some(path) => {
                    for written in write_document_csv(&document, path)? {
                        eprintln!("{}", written.display());
                    }
                    Ok(())
                }
                None => {
                    for sheet in &document.sheets {
                        print!("{}", sheet_to_csv_string(sheet)?);
                    }
                    Ok(())
                }
            }
        }
    }
}

/// 选型 CSV + 命令行覆盖的安装方式与折扣
fn priced_session(
    api: &SpecificationApi,
    config: &AppConfig,
    args: &PricingArgs,
) -> Result<SelectionSession> {
    let mut session = session_from_csv(api, config, &args.selection)?;
    if let Some(mount) = args.mount {
        api.set_mount_kind(&mut session, mount);
    }
    let options = session.options();
    api.set_discounts(
        &mut session,
        args.radiator_discount.unwrap_or(options.radiator_discount_pct),
        args.bracket_discount.unwrap_or(options.bracket_discount_pct),
    )?;
    Ok(session)
}

fn load_correspondence(
    api: &SpecificationApi,
    args: &PricingArgs,
) -> Result<Option<DocumentSheet>> {
    Ok(args
        .correspondence
        .as_deref()
        .map(|p| api.load_correspondence(p))
        .transpose()?)
}

fn session_from_csv(
    api: &SpecificationApi,
    config: &AppConfig,
    path: &Path,
) -> Result<SelectionSession> {
    let mut session = SelectionSession::new(radiatool::DerivationOptions::new(
        config.radiator_discount_pct,
        config.bracket_discount_pct,
        config.mount_kind,
    ));
    let report = api
        .import_selection_csv(&mut session, path)
        .with_context(|| format!("选型导入失败: {}", path.display()))?;
    for article in &report.unknown_articles {
        eprintln!(
            "{}",
            i18n::t_with_args("import.unknown_article", &[("article", article)])
        );
    }
    Ok(session)
}

fn render_table(spec: &Specification) -> String {
    if spec.is_empty() {
        return format!("{}\n", i18n::t("summary.empty"));
    }

    let mut out = String::new();
    for item in &spec.items {
        out.push_str(&format!(
            "{:>3}  {:<14} {:<48} {:>10.2} {:>6.1}% {:>10.2} {:>5} {:>12.2}\n",
            item.index,
            item.article,
            item.name,
            item.unit_price,
            item.discount_pct,
            item.discounted_price,
            item.quantity,
            item.total
        ));
    }
    out.push_str(&format!(
        "{}: {}/{}  {:.2}\n",
        i18n::t("export.totals"),
        spec.totals.radiator_quantity,
        spec.totals.bracket_quantity,
        spec.totals.total_sum
    ));
    out.push_str(&i18n::t_with_args(
        "summary.total_power",
        &[("power", &format!("{:.2}", spec.totals.total_power_w))],
    ));
    out.push('\n');
    out.push_str(&i18n::t_with_args(
        "summary.total_sum",
        &[("sum", &format!("{:.2}", spec.totals.total_sum))],
    ));
    out.push('\n');
    out.push_str(&i18n::t(&format!("mount.{}", spec.mount_kind)));
    out.push('\n');
    out
}

fn print_grid(api: &SpecificationApi, sheet: SheetKey) -> Result<()> {
    let grid = api.grid(sheet)?;
    print!("{:>6}", "");
    for height in &grid.heights {
        print!(" {:>16}", height);
    }
    println!();
    for (row, length) in grid.lengths.iter().enumerate() {
        print!("{:>6}", length);
        for cell in &grid.cells[row] {
            print!(" {:>16}", cell.as_deref().unwrap_or("-"));
        }
        println!();
    }
    Ok(())
}

fn emit(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("写入失败: {}", path.display()))
        }
        None => {
            print!("{}", content);
            Ok(())
        }
    }
}
