// ==========================================
// 客户批量导入 - 客户仓储实现
// ==========================================
// 职责: 实现客户查询/创建（使用 rusqlite）
// 红线: Repository 不含业务规则，只做数据 CRUD
// ==========================================

use crate::db::{
    configure_sqlite_connection, init_schema, open_sqlite_connection, read_schema_version,
    CURRENT_SCHEMA_VERSION,
};
use crate::domain::customer::{Customer, CustomerRecord};
use crate::repository::customer_repo::{CustomerStore, LookupOutcome};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

const SELECT_COLUMNS: &str =
    "customer_id, firstname, lastname, email, attributes_json, created_at";

// ==========================================
// SqliteCustomerStore
// ==========================================
pub struct SqliteCustomerStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteCustomerStore {
    /// 打开数据库文件并确保 schema 存在
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    /// 内存数据库
    #[cfg(test)]
    pub(crate) fn open_in_memory() -> RepositoryResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    /// 从已有连接创建
    ///
    /// 说明：会对传入连接再次应用统一 PRAGMA 并建表（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            prepare_schema(&guard)?;
        }

        Ok(Self { conn })
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 按邮箱查询（大小写不敏感）
    pub fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Customer>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM customer WHERE email = ?1", SELECT_COLUMNS);
        let customer = conn
            .query_row(&sql, params![email], map_customer_row)
            .optional()?;
        Ok(customer)
    }

    /// 客户总数
    pub fn count_customers(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM customer", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

/// 应用统一 PRAGMA、建表，并拒绝比当前程序更新的 schema
fn prepare_schema(conn: &Connection) -> RepositoryResult<()> {
    configure_sqlite_connection(conn)?;
    init_schema(conn)?;

    match read_schema_version(conn)? {
        Some(found) if found > CURRENT_SCHEMA_VERSION => {
            Err(RepositoryError::UnsupportedSchemaVersion {
                found,
                supported: CURRENT_SCHEMA_VERSION,
            })
        }
        version => {
            debug!(schema_version = ?version, "客户数据库就绪");
            Ok(())
        }
    }
}

impl CustomerStore for SqliteCustomerStore {
    fn lookup(&self, email: &str) -> LookupOutcome {
        match self.find_by_email(email) {
            Ok(Some(customer)) => LookupOutcome::Found(customer),
            Ok(None) => LookupOutcome::NotFound,
            Err(e) => LookupOutcome::Error(e),
        }
    }

    fn create(&self, record: &CustomerRecord) -> RepositoryResult<Customer> {
        record
            .validate()
            .map_err(|e| RepositoryError::ValidationError(e.to_string()))?;

        let customer = Customer {
            customer_id: Uuid::new_v4().to_string(),
            firstname: record.firstname.clone(),
            lastname: record.lastname.clone(),
            email: record.email.clone(),
            extra_attributes: record.extra_attributes.clone(),
            created_at: Utc::now(),
        };

        let attributes_json = if customer.extra_attributes.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&customer.extra_attributes)?)
        };

        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO customer (
                customer_id, firstname, lastname, email, attributes_json, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                customer.customer_id,
                customer.firstname,
                customer.lastname,
                customer.email,
                attributes_json,
                customer.created_at,
            ],
        )
        .map_err(|e| match RepositoryError::from(e) {
            RepositoryError::UniqueConstraintViolation(_) => {
                RepositoryError::UniqueConstraintViolation(customer.email.clone())
            }
            other => other,
        })?;

        debug!(customer_id = %customer.customer_id, email = %customer.email, "客户已创建");
        Ok(customer)
    }
}

fn map_customer_row(row: &Row<'_>) -> rusqlite::Result<Customer> {
    let attributes_json: Option<String> = row.get(4)?;
    let extra_attributes = match attributes_json {
        Some(json) => serde_json::from_str::<BTreeMap<String, String>>(&json)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?,
        None => BTreeMap::new(),
    };
    let created_at: DateTime<Utc> = row.get(5)?;

    Ok(Customer {
        customer_id: row.get(0)?,
        firstname: row.get(1)?,
        lastname: row.get(2)?,
        email: row.get(3)?,
        extra_attributes,
        created_at,
    })
}
