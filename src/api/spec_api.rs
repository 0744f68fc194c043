// ==========================================
// RadiaTool 散热器规格计算系统 - 规格单 API
// ==========================================
// 职责: 面向界面/命令行的统一入口
// 1. 目录载入与分区/网格查询
// 2. 会话选型编辑（按物料号或按网格坐标）
// 3. 折扣校验（界面范围 0–100）
// 4. 规格单计算与导出
// 5. 选型 CSV 导入
// ==========================================

use crate::api::error::{validate_discount, ApiError, ApiResult};
use crate::api::session::SelectionSession;
use crate::catalog::{CatalogIndex, CatalogLoader, LoadReport, RadiatorGrid};
use crate::config::AppConfig;
use crate::domain::catalog::SheetKey;
use crate::domain::selection::Selection;
use crate::domain::specification::Specification;
use crate::domain::types::{ConnectionFamily, MountKind, RadiatorType};
use crate::engine::aggregator::{DerivationOptions, SpecificationAggregator};
use crate::export::{minimal_csv, write_document_xlsx, DocumentSheet, SpecDocument, SpecFormatter};
use crate::importer::{CsvParser, SelectionImportReport, SelectionImporter};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, instrument};

// ==========================================
// SpecificationApi - 规格单 API
// ==========================================
pub struct SpecificationApi {
    catalog: Arc<CatalogIndex>,
    formatter: SpecFormatter,
}

impl SpecificationApi {
    /// 创建新的 SpecificationApi 实例
    ///
    /// # 参数
    /// - catalog: 已构建的目录索引（可在多个 API 实例间共享）
    pub fn new(catalog: Arc<CatalogIndex>) -> Self {
        Self {
            catalog,
            formatter: SpecFormatter::default(),
        }
    }

    /// 指定导出语言
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.formatter = SpecFormatter::new(locale);
        self
    }

    /// 按配置载入目录并创建 API
    ///
    /// # 返回
    /// - Ok((api, report)): API 与目录载入报告
    /// - Err(CatalogError): 源文件缺失等致命错误
    #[instrument(skip_all, fields(data_dir = %config.data_dir.display()))]
    pub fn from_config(config: &AppConfig) -> ApiResult<(Self, LoadReport)> {
        let loaded =
            CatalogLoader::new().load_from_paths(&config.matrix_path(), &config.brackets_path())?;
        let api = Self::new(Arc::new(loaded.index)).with_locale(config.locale.clone());
        Ok((api, loaded.report))
    }

    pub fn catalog(&self) -> &CatalogIndex {
        &self.catalog
    }

    pub fn shared_catalog(&self) -> Arc<CatalogIndex> {
        Arc::clone(&self.catalog)
    }

    /// 新会话（默认折扣/安装方式须在界面范围内）
    pub fn new_session(&self, defaults: DerivationOptions) -> ApiResult<SelectionSession> {
        validate_discount("radiator_discount_pct", defaults.radiator_discount_pct)?;
        validate_discount("bracket_discount_pct", defaults.bracket_discount_pct)?;
        Ok(SelectionSession::new(defaults))
    }

    // ==========================================
    // 分区与网格
    // ==========================================

    /// 已载入的分区
    pub fn sheets(&self) -> Vec<SheetKey> {
        self.catalog.sheet_keys()
    }

    /// 连接方式可选的型号
    pub fn available_types(&self, connection: ConnectionFamily) -> &'static [RadiatorType] {
        connection.available_types()
    }

    /// 切换当前分区
    pub fn select_sheet(&self, session: &mut SelectionSession, sheet: SheetKey) -> ApiResult<()> {
        if !sheet.connection.available_types().contains(&sheet.radiator_type) {
            return Err(ApiError::InvalidInput(format!(
                "连接方式 {} 不提供型号 {}",
                sheet.connection, sheet.radiator_type
            )));
        }
        session.set_current_sheet(sheet);
        Ok(())
    }

    /// 分区选型网格
    pub fn grid(&self, sheet: SheetKey) -> ApiResult<RadiatorGrid> {
        self.catalog
            .grid(sheet)
            .ok_or_else(|| ApiError::NotFound(format!("分区 '{}'", sheet)))
    }

    // ==========================================
    // 选型编辑
    // ==========================================

    /// 按物料号写入单元格（空白数量文本清除单元格）
    pub fn set_cell(
        &self,
        session: &mut SelectionSession,
        sheet: SheetKey,
        article: &str,
        token: &str,
    ) -> ApiResult<()> {
        if self.catalog.lookup_radiator(sheet, article).is_none() {
            return Err(ApiError::NotFound(format!(
                "分区 '{}' 中的物料号 {}",
                sheet,
                article.trim()
            )));
        }
        session.selection_mut().set(sheet, article, token);
        Ok(())
    }

    /// 按网格坐标写入当前分区的单元格
    ///
    /// # 返回
    /// - Ok(article): 坐标对应的物料号
    /// - Err(InvalidInput): 坐标处没有散热器
    pub fn set_cell_at(
        &self,
        session: &mut SelectionSession,
        height_mm: u32,
        length_mm: u32,
        token: &str,
    ) -> ApiResult<String> {
        let sheet = session.current_sheet();
        let entry = self
            .catalog
            .radiator_at(sheet, height_mm, length_mm)
            .ok_or_else(|| {
                ApiError::InvalidInput(format!(
                    "分区 '{}' 无 {}×{} 规格",
                    sheet, height_mm, length_mm
                ))
            })?;

        let article = entry.article.clone();
        debug!(sheet = %sheet, article = %article, token, "写入选型单元格");
        session.selection_mut().set(sheet, article.as_str(), token);
        Ok(article)
    }

    /// 设置折扣
    pub fn set_discounts(
        &self,
        session: &mut SelectionSession,
        radiator_discount_pct: f64,
        bracket_discount_pct: f64,
    ) -> ApiResult<()> {
        let radiator = validate_discount("radiator_discount_pct", radiator_discount_pct)?;
        let bracket = validate_discount("bracket_discount_pct", bracket_discount_pct)?;
        session.set_discounts(radiator, bracket);
        Ok(())
    }

    pub fn set_mount_kind(&self, session: &mut SelectionSession, mount_kind: MountKind) {
        session.set_mount_kind(mount_kind);
    }

    // ==========================================
    // 计算
    // ==========================================

    /// 按会话当前状态计算规格单
    pub fn derive(&self, session: &SelectionSession) -> Specification {
        SpecificationAggregator::new(&self.catalog).derive(session.selection(), &session.options())
    }

    /// 对任意选型计算规格单（折扣按界面范围校验）
    pub fn derive_selection(
        &self,
        selection: &Selection,
        options: &DerivationOptions,
    ) -> ApiResult<Specification> {
        validate_discount("radiator_discount_pct", options.radiator_discount_pct)?;
        validate_discount("bracket_discount_pct", options.bracket_discount_pct)?;
        Ok(SpecificationAggregator::new(&self.catalog).derive(selection, options))
    }

    // ==========================================
    // 导出
    // ==========================================

    /// 导出文档（主表 + 可选对照表）
    pub fn export_document(
        &self,
        spec: &Specification,
        correspondence: Option<&DocumentSheet>,
    ) -> ApiResult<SpecDocument> {
        Ok(self.formatter.format(spec, correspondence)?)
    }

    /// 导出 .xlsx 工作簿（主表 + 可选对照表）
    #[instrument(skip(self, spec, correspondence), fields(path = %path.display()))]
    pub fn export_xlsx(
        &self,
        spec: &Specification,
        correspondence: Option<&DocumentSheet>,
        path: &Path,
    ) -> ApiResult<()> {
        let document = self.formatter.format(spec, correspondence)?;
        write_document_xlsx(&document, path)?;
        Ok(())
    }

    /// 精简 (物料号;数量) CSV
    pub fn export_minimal_csv(&self, spec: &Specification) -> ApiResult<String> {
        Ok(minimal_csv(spec)?)
    }

    /// 读取对照表 CSV（原样保留行列; 导出时表名统一替换）
    pub fn load_correspondence(&self, path: &Path) -> ApiResult<DocumentSheet> {
        let records = CsvParser::new().read_records(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(DocumentSheet::from_records(name, records))
    }

    // ==========================================
    // 导入
    // ==========================================

    /// 导入选型 CSV, 替换会话中的选型
    pub fn import_selection_csv(
        &self,
        session: &mut SelectionSession,
        path: &Path,
    ) -> ApiResult<SelectionImportReport> {
        let imported = SelectionImporter::new(&self.catalog).import_file(path)?;
        info!(
            cells = imported.report.cells_imported,
            unknown = imported.report.unknown_articles.len(),
            "会话选型已替换"
        );
        session.replace_selection(imported.selection);
        Ok(imported.report)
    }
}
