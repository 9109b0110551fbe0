// ==========================================
// 客户批量导入 - 导入引擎实现
// ==========================================
// 职责: 整合导入流程，从文件到客户仓储
// 流程: 校验 → 解析 → 映射 → 按邮箱去重 → 创建
// 红线: 单线程顺序执行；创建失败不回滚已创建的客户
// ==========================================

use crate::config::{default_allowed_mime_types, ImportConfig, LookupFailurePolicy, MIME_CSV, MIME_JSON};
use crate::domain::customer::{CustomerRecord, ImportResult, RawRecord};
use crate::importer::customer_importer_trait::{
    CustomerImporter, FieldMapper, MimeDetector, RecordParser,
};
use crate::importer::error::{ImportError, ImporterResult};
use crate::importer::field_mapper::CustomerFieldMapper;
use crate::importer::file_parser::{CsvParser, JsonParser};
use crate::importer::file_validator::FileValidator;
use crate::importer::mime_detector::ContentMimeDetector;
use crate::repository::customer_repo::{CustomerStore, LookupOutcome};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};

// ==========================================
// ImportEngine - 客户导入引擎
// ==========================================
pub struct ImportEngine<S>
where
    S: CustomerStore,
{
    // 客户仓储（存在性判断的唯一事实来源）
    store: S,

    // 导入配置（导入过程中只读）
    config: ImportConfig,

    // 导入组件
    mime_detector: Box<dyn MimeDetector>,
    csv_parser: Box<dyn RecordParser>,
    json_parser: Box<dyn RecordParser>,
    field_mapper: Box<dyn FieldMapper>,
}

impl<S> ImportEngine<S>
where
    S: CustomerStore,
{
    /// 创建新的 ImportEngine 实例
    ///
    /// # 参数
    /// - store: 客户仓储
    /// - config: 导入配置
    /// - mime_detector: MIME 识别器
    /// - csv_parser / json_parser: 文件解析器
    /// - field_mapper: 字段映射器
    pub fn new(
        store: S,
        config: ImportConfig,
        mime_detector: Box<dyn MimeDetector>,
        csv_parser: Box<dyn RecordParser>,
        json_parser: Box<dyn RecordParser>,
        field_mapper: Box<dyn FieldMapper>,
    ) -> Self {
        Self {
            store,
            config,
            mime_detector,
            csv_parser,
            json_parser,
            field_mapper,
        }
    }

    /// 使用默认组件创建
    pub fn with_defaults(store: S, config: ImportConfig) -> Self {
        Self::new(
            store,
            config,
            Box::new(ContentMimeDetector),
            Box::new(CsvParser),
            Box::new(JsonParser),
            Box::new(CustomerFieldMapper),
        )
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 当前允许导入的 MIME 类型
    pub fn allowed_mime_types(&self) -> &[String] {
        &self.config.allowed_mime_types
    }

    /// 设置允许导入的 MIME 类型（导入开始前）
    pub fn set_allowed_mime_types<I, T>(&mut self, mime_types: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.config.allowed_mime_types = mime_types.into_iter().map(Into::into).collect();
    }

    /// 恢复默认白名单（application/json, text/csv）
    pub fn reset_allowed_mime_types(&mut self) {
        self.config.allowed_mime_types = default_allowed_mime_types();
    }
}

impl<S> CustomerImporter for ImportEngine<S>
where
    S: CustomerStore,
{
    #[instrument(skip(self), fields(file_path = %file_path))]
    fn start_import(&self, file_path: &str) -> ImporterResult<ImportResult> {
        let start_time = Instant::now();
        info!("开始导入客户数据");

        match self.run_import(file_path) {
            Ok(result) => {
                info!(
                    total = result.total_records,
                    created = result.created_count,
                    skipped = result.skipped_count,
                    elapsed_ms = start_time.elapsed().as_millis() as u64,
                    "客户数据导入完成"
                );
                Ok(result)
            }
            Err(e) => {
                error!(error = %e, elapsed_ms = start_time.elapsed().as_millis() as u64, "客户数据导入失败");
                Err(ImportError::failed(e))
            }
        }
    }
}

// 辅助方法
impl<S> ImportEngine<S>
where
    S: CustomerStore,
{
    fn run_import(&self, file_path: &str) -> ImporterResult<ImportResult> {
        // === 步骤 1: 读取白名单 ===
        let allowed_mime_types = &self.config.allowed_mime_types;

        // === 步骤 2: 文件校验 ===
        debug!("步骤 2: 文件校验");
        let mime_type =
            FileValidator::new(self.mime_detector.as_ref()).validate(file_path, allowed_mime_types)?;

        // === 步骤 3: 按 MIME 类型解析 ===
        debug!(mime = %mime_type, "步骤 3: 解析文件");
        let raw_records = self.parse_records(Path::new(file_path), &mime_type)?;

        // === 步骤 4: 空记录检查 ===
        if raw_records.is_empty() {
            return Err(ImportError::NoRecords);
        }
        info!(total_rows = raw_records.len(), "文件解析完成");

        // === 步骤 5: 字段映射 ===
        debug!("步骤 5: 字段映射");
        let records = self
            .field_mapper
            .map_records(&self.config.field_mapping, &raw_records);

        // === 步骤 6: 去重并创建 ===
        debug!("步骤 6: 去重并创建");
        self.process_data_import(&records)
    }

    /// 按 MIME 类型选择解析器；其他类型返回空记录
    fn parse_records(&self, path: &Path, mime_type: &str) -> ImporterResult<Vec<RawRecord>> {
        match mime_type {
            MIME_CSV => self.csv_parser.parse(path, &self.config.field_mapping),
            MIME_JSON => self.json_parser.parse(path, &self.config.field_mapping),
            other => {
                debug!(mime = %other, "无对应解析器，按空记录处理");
                Ok(Vec::new())
            }
        }
    }

    /// 逐条去重并创建
    fn process_data_import(&self, records: &[CustomerRecord]) -> ImporterResult<ImportResult> {
        let mut result = ImportResult {
            total_records: records.len(),
            ..Default::default()
        };

        for (idx, record) in records.iter().enumerate() {
            let row_number = idx + 1;
            if self.customer_exists(&record.email)? {
                debug!(row_number, email = %record.email, "客户已存在，跳过");
                result.skipped_count += 1;
                continue;
            }

            match self.store.create(record) {
                Ok(customer) => {
                    debug!(row_number, customer_id = %customer.customer_id, "客户创建成功");
                    result.created_count += 1;
                }
                Err(e) => {
                    error!(
                        row_number,
                        email = %record.email,
                        created_before_failure = result.created_count,
                        error = %e,
                        "客户创建失败，终止导入"
                    );
                    return Err(e.into());
                }
            }
        }

        Ok(result)
    }

    /// 按邮箱判断客户是否存在
    ///
    /// 查询失败默认视为"不存在"（LookupFailurePolicy::TreatAsAbsent）
    fn customer_exists(&self, email: &str) -> ImporterResult<bool> {
        match self.store.lookup(email) {
            LookupOutcome::Found(_) => Ok(true),
            LookupOutcome::NotFound => Ok(false),
            LookupOutcome::Error(e) => match self.config.lookup_failure_policy {
                LookupFailurePolicy::TreatAsAbsent => {
                    warn!(email = %email, error = %e, "客户查询失败，按不存在处理");
                    Ok(false)
                }
                LookupFailurePolicy::Abort => Err(ImportError::Store(e)),
            },
        }
    }
}
