// ==========================================
// 客户批量导入 - 字段映射器实现
// ==========================================
// 职责: 源字段 → 标准字段映射，生成 CustomerRecord
// 红线: 纯转换，不做校验；缺失字段映射为空字符串
// ==========================================

use crate::domain::customer::{CustomerRecord, RawRecord};
use crate::domain::field_mapping::FieldMapping;
use crate::importer::customer_importer_trait::FieldMapper as FieldMapperTrait;

pub struct CustomerFieldMapper;

impl FieldMapperTrait for CustomerFieldMapper {
    fn map_records(
        &self,
        mapping: &FieldMapping,
        raw_records: &[RawRecord],
    ) -> Vec<CustomerRecord> {
        raw_records
            .iter()
            .map(|row| self.map_record(mapping, row))
            .collect()
    }
}

impl CustomerFieldMapper {
    fn map_record(&self, mapping: &FieldMapping, row: &RawRecord) -> CustomerRecord {
        let mut record = CustomerRecord::default();
        for binding in mapping.bindings() {
            let value = row.get(&binding.source).cloned().unwrap_or_default();
            record.set_attribute(&binding.canonical, value);
        }
        record
    }
}
