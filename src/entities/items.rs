use crate::error::{AppError, AppResult};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 商品类型 (单表继承的 dtype 列)
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(1))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemKind {
    #[sea_orm(string_value = "B")]
    Book,
    #[sea_orm(string_value = "A")]
    Album,
    #[sea_orm(string_value = "M")]
    Movie,
}

/// 商品实体
/// 概念说明:
/// - Book 使用 author / isbn
/// - Album 使用 artist / etc
/// - Movie 使用 director / actor
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub dtype: ItemKind,
    pub name: String,
    pub price: i32,
    pub stock_quantity: i32,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub artist: Option<String>,
    pub etc: Option<String>,
    pub director: Option<String>,
    pub actor: Option<String>,
}

impl Model {
    /// 增加库存, 返回新的库存数量
    pub fn add_stock(&self, quantity: i32) -> AppResult<i32> {
        self.stock_quantity.checked_add(quantity).ok_or_else(|| {
            AppError::ValidationError(format!(
                "Stock quantity overflow for {} ({} + {})",
                self.name, self.stock_quantity, quantity
            ))
        })
    }

    /// 扣减库存, 库存不足时返回错误
    pub fn remove_stock(&self, quantity: i32) -> AppResult<i32> {
        let rest = self.stock_quantity - quantity;
        if rest < 0 {
            return Err(AppError::NotEnoughStock {
                item: self.name.clone(),
                requested: quantity,
                available: self.stock_quantity,
            });
        }
        Ok(rest)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_items::Entity")]
    OrderItems,
}

impl Related<super::order_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
