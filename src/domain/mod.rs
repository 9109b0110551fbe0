// ==========================================
// 客户批量导入 - 领域模型层
// ==========================================
// 职责: 定义客户实体、映射表与导入结果
// 红线: 不含数据访问逻辑,不含导入流程逻辑
// ==========================================

pub mod customer;
pub mod field_mapping;

// 重导出核心类型
pub use customer::{
    Customer, CustomerRecord, ImportResult, RawRecord, ATTR_EMAIL, ATTR_FIRSTNAME, ATTR_LASTNAME,
};
pub use field_mapping::{FieldBinding, FieldMapping, FieldMappingError};
