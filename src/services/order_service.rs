use crate::config::FetchConfig;
use crate::database::DbPool;
use crate::entities::{
    DeliveryStatus, OrderStatus, delivery_entity as deliveries, item_entity as items,
    member_entity as members, order_entity as orders, order_item_entity as order_items,
};
use crate::error::{AppError, AppResult};
use crate::models::{OrderLine, OrderSearch};
use crate::repositories::OrderRepository;
use chrono::Local;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

/// 下单、取消与订单检索
#[derive(Clone)]
pub struct OrderService {
    pool: DbPool,
    order_repository: OrderRepository,
}

impl OrderService {
    pub fn new(pool: DbPool, fetch: FetchConfig) -> Self {
        Self {
            order_repository: OrderRepository::new(pool.clone(), fetch),
            pool,
        }
    }

    /// 下单
    ///
    /// 逻辑:
    /// 1. 按会员地址创建配送信息 (READY)
    /// 2. 为每一行创建订单明细, 单价取商品当前价格, 并扣减库存
    /// 3. 订单状态 ORDER, 下单时间为当前时间
    ///
    /// 全部在同一事务中完成, 任一行库存不足则整体回滚。
    pub async fn order(&self, member_id: i64, lines: &[OrderLine]) -> AppResult<i64> {
        if lines.is_empty() {
            return Err(AppError::ValidationError(
                "Order must contain at least one item".into(),
            ));
        }
        if let Some(line) = lines.iter().find(|l| l.count <= 0) {
            return Err(AppError::ValidationError(format!(
                "Order count must be positive (item {})",
                line.item_id
            )));
        }

        let txn = self.pool.begin().await?;

        let member = members::Entity::find_by_id(member_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Member {member_id} not found")))?;

        let delivery = deliveries::ActiveModel {
            city: Set(member.city.clone()),
            street: Set(member.street.clone()),
            zipcode: Set(member.zipcode.clone()),
            status: Set(DeliveryStatus::Ready),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let order = orders::ActiveModel {
            member_id: Set(member.id),
            delivery_id: Set(delivery.id),
            order_date: Set(Local::now().naive_local()),
            status: Set(OrderStatus::Order),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        for line in lines {
            let item = find_item(&txn, line.item_id).await?;
            decrease_stock(&txn, &item, line.count).await?;

            order_items::ActiveModel {
                order_id: Set(order.id),
                item_id: Set(line.item_id),
                order_price: Set(item.price),
                count: Set(line.count),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        log::info!(
            "Order placed: id={}, member_id={}, lines={}",
            order.id,
            member_id,
            lines.len()
        );
        Ok(order.id)
    }

    /// 取消订单: 已配送完成的订单不能取消, 取消后恢复库存
    pub async fn cancel_order(&self, order_id: i64) -> AppResult<orders::Model> {
        let txn = self.pool.begin().await?;

        let order = orders::Entity::find_by_id(order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Order {order_id} not found")))?;

        if order.status == OrderStatus::Cancel {
            return Err(already_cancelled(order_id));
        }

        let delivery = order
            .find_related(deliveries::Entity)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Delivery of order {order_id} not found")))?;
        if delivery.status == DeliveryStatus::Comp {
            return Err(AppError::OrderNotCancelable(order_id));
        }

        // 只有仍为 ORDER 的订单能切换状态, 并发的第二次取消在这里落空
        let switched = orders::Entity::update_many()
            .col_expr(orders::Column::Status, Expr::value(OrderStatus::Cancel))
            .filter(orders::Column::Id.eq(order_id))
            .filter(orders::Column::Status.eq(OrderStatus::Order))
            .exec(&txn)
            .await?;
        if switched.rows_affected == 0 {
            return Err(already_cancelled(order_id));
        }

        let lines = order
            .find_related(order_items::Entity)
            .order_by_asc(order_items::Column::Id)
            .all(&txn)
            .await?;
        for line in lines {
            let item = find_item(&txn, line.item_id).await?;
            increase_stock(&txn, &item, line.count).await?;
        }

        txn.commit().await?;

        log::info!("Order cancelled: id={order_id}");
        Ok(orders::Model {
            status: OrderStatus::Cancel,
            ..order
        })
    }

    /// 按条件检索订单实体
    pub async fn find_orders(&self, search: &OrderSearch) -> AppResult<Vec<orders::Model>> {
        self.order_repository.find_all_by_search(search).await
    }
}

async fn find_item(txn: &DatabaseTransaction, item_id: i64) -> AppResult<items::Model> {
    items::Entity::find_by_id(item_id)
        .one(txn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Item {item_id} not found")))
}

fn already_cancelled(order_id: i64) -> AppError {
    AppError::ValidationError(format!("Order {order_id} is already cancelled"))
}

/// 扣减库存
///
/// `item` 只用于提前给出错误信息, 真正的扣减是一条带条件的 UPDATE,
/// 按数据库中的当前值计算, 不会覆盖其他事务的修改。
async fn decrease_stock(txn: &DatabaseTransaction, item: &items::Model, count: i32) -> AppResult<()> {
    item.remove_stock(count)?;

    let updated = items::Entity::update_many()
        .col_expr(
            items::Column::StockQuantity,
            Expr::col(items::Column::StockQuantity).sub(count),
        )
        .filter(items::Column::Id.eq(item.id))
        .filter(items::Column::StockQuantity.gte(count))
        .exec(txn)
        .await?;
    if updated.rows_affected == 0 {
        let current = find_item(txn, item.id).await?;
        return Err(AppError::NotEnoughStock {
            item: current.name,
            requested: count,
            available: current.stock_quantity,
        });
    }
    Ok(())
}

/// 恢复库存, 同样在数据库中累加
async fn increase_stock(txn: &DatabaseTransaction, item: &items::Model, count: i32) -> AppResult<()> {
    item.add_stock(count)?;

    let updated = items::Entity::update_many()
        .col_expr(
            items::Column::StockQuantity,
            Expr::col(items::Column::StockQuantity).add(count),
        )
        .filter(items::Column::Id.eq(item.id))
        .filter(items::Column::StockQuantity.lte(i32::MAX.saturating_sub(count)))
        .exec(txn)
        .await?;
    if updated.rows_affected == 0 {
        return Err(AppError::ValidationError(format!(
            "Stock quantity overflow for {}",
            item.name
        )));
    }
    Ok(())
}
