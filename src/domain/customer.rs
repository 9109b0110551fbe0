// ==========================================
// 客户批量导入 - 客户领域模型
// ==========================================
// 职责: 定义导入管道中流转的客户数据结构
// 流转: RawRecord（源字段） → CustomerRecord（标准字段） → Customer（已落库）
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use validator::Validate;

/// 原始记录: 源字段名 → 原始值（未映射）
///
/// 由文件解析器产出，每行/每个 JSON 对象一条
pub type RawRecord = HashMap<String, String>;

// ===== 标准字段名 =====
pub const ATTR_FIRSTNAME: &str = "firstname";
pub const ATTR_LASTNAME: &str = "lastname";
pub const ATTR_EMAIL: &str = "email";

// ==========================================
// CustomerRecord - 标准客户记录
// ==========================================
// 用途: 字段映射输出，写入客户仓储前的形态
// 红线: email 为去重标识；缺失时不预检，由仓储在创建时校验
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CustomerRecord {
    #[validate(length(min = 1, max = 255))]
    pub firstname: String,

    #[validate(length(min = 1, max = 255))]
    pub lastname: String,

    #[validate(email)]
    pub email: String,

    /// 映射表中除三个基础字段外的其他标准字段
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra_attributes: BTreeMap<String, String>,
}

impl CustomerRecord {
    /// 按标准字段名赋值
    pub fn set_attribute(&mut self, attribute: &str, value: String) {
        match attribute {
            ATTR_FIRSTNAME => self.firstname = value,
            ATTR_LASTNAME => self.lastname = value,
            ATTR_EMAIL => self.email = value,
            other => {
                self.extra_attributes.insert(other.to_string(), value);
            }
        }
    }
}

// ==========================================
// Customer - 已落库客户
// ==========================================
// 对齐: customer 表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: String, // UUID v4
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra_attributes: BTreeMap<String, String>,
    pub created_at: DateTime<Utc>,
}

// ==========================================
// ImportResult - 单次导入结果
// ==========================================
// 生命周期: 每次导入从 0 开始，不跨次持久化
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    pub created_count: usize, // 新建客户数
    pub skipped_count: usize, // 已存在而跳过的记录数
    pub total_records: usize, // 解析出的记录总数
}
