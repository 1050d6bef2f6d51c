use crate::database::{DbPool, init_sample_data};
use crate::entities::member_entity as members;
use crate::error::AppResult;
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use std::sync::Arc;

/// 内存 SQLite, 已执行全部迁移
pub async fn setup_test_db() -> AppResult<DbPool> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;
    Ok(Arc::new(db))
}

/// 内存 SQLite + 示例数据 (userA / userB 各一个订单)
pub async fn setup_seeded_db() -> AppResult<DbPool> {
    let db = setup_test_db().await?;
    init_sample_data(&db).await?;
    Ok(db)
}

pub fn new_member(name: &str, city: &str, street: &str, zipcode: &str) -> members::Model {
    members::Model {
        id: 0,
        name: name.to_string(),
        city: Some(city.to_string()),
        street: Some(street.to_string()),
        zipcode: Some(zipcode.to_string()),
    }
}

/// 释放最后一个引用后, 统计 MockDatabase 收到的语句数
pub fn statement_count(db: DbPool) -> usize {
    Arc::into_inner(db)
        .expect("mock connection is still shared")
        .into_transaction_log()
        .len()
}
