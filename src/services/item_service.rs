use crate::database::DbPool;
use crate::entities::item_entity as items;
use crate::error::{AppError, AppResult};
use crate::models::{CreateItemRequest, UpdateItemRequest};
use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, QueryOrder, Set};

#[derive(Clone)]
pub struct ItemService {
    pool: DbPool,
}

impl ItemService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn save_item(&self, request: CreateItemRequest) -> AppResult<i64> {
        validate_item(&request.name, request.price, request.stock_quantity)?;

        let saved = items::ActiveModel {
            dtype: Set(request.kind),
            name: Set(request.name),
            price: Set(request.price),
            stock_quantity: Set(request.stock_quantity),
            author: Set(request.author),
            isbn: Set(request.isbn),
            artist: Set(request.artist),
            etc: Set(request.etc),
            director: Set(request.director),
            actor: Set(request.actor),
            ..Default::default()
        }
        .insert(self.pool.as_ref())
        .await?;

        log::info!("Item saved: id={}, name={}", saved.id, saved.name);
        Ok(saved.id)
    }

    /// 修改商品的名称、价格与库存
    pub async fn update_item(
        &self,
        item_id: i64,
        request: UpdateItemRequest,
    ) -> AppResult<items::Model> {
        validate_item(&request.name, request.price, request.stock_quantity)?;

        let mut model = self.find_one(item_id).await?.into_active_model();
        model.name = Set(request.name);
        model.price = Set(request.price);
        model.stock_quantity = Set(request.stock_quantity);
        Ok(model.update(self.pool.as_ref()).await?)
    }

    pub async fn find_items(&self) -> AppResult<Vec<items::Model>> {
        Ok(items::Entity::find()
            .order_by_asc(items::Column::Id)
            .all(self.pool.as_ref())
            .await?)
    }

    pub async fn find_one(&self, item_id: i64) -> AppResult<items::Model> {
        items::Entity::find_by_id(item_id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Item {item_id} not found")))
    }
}

fn validate_item(name: &str, price: i32, stock_quantity: i32) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::ValidationError(
            "Item name must not be empty".to_string(),
        ));
    }
    if price < 0 {
        return Err(AppError::ValidationError(
            "Item price must not be negative".to_string(),
        ));
    }
    if stock_quantity < 0 {
        return Err(AppError::ValidationError(
            "Stock quantity must not be negative".to_string(),
        ));
    }
    Ok(())
}
