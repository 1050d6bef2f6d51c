use super::order_simple_query_repository::select_order_header;
use crate::database::DbPool;
use crate::entities::{item_entity as items, order_entity as orders, order_item_entity as order_items};
use crate::error::AppResult;
use crate::models::{OrderFlatDto, OrderItemQueryDto, OrderQueryDto, attach_order_items};
use sea_orm::{
    ColumnTrait, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Select,
};

/// 明细 DTO 查询: order_item ⋈ item
fn select_order_items() -> Select<order_items::Entity> {
    order_items::Entity::find()
        .select_only()
        .column_as(order_items::Column::OrderId, "order_id")
        .column_as(items::Column::Name, "item_name")
        .column_as(order_items::Column::OrderPrice, "order_price")
        .column_as(order_items::Column::Count, "count")
        .join(JoinType::InnerJoin, order_items::Relation::Item.def())
        .order_by_asc(order_items::Column::Id)
}

/// 直接查询订单 DTO (含明细)
#[derive(Clone)]
pub struct OrderQueryRepository {
    pool: DbPool,
}

impl OrderQueryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// 订单头一条语句, 每个订单的明细各一条语句 (1 + N)
    pub async fn find_order_query_dtos(&self) -> AppResult<Vec<OrderQueryDto>> {
        let mut result = self.find_orders().await?;
        for order in result.iter_mut() {
            order.order_items = self.find_order_items(order.order_id).await?;
        }
        Ok(result)
    }

    /// 订单头一条语句, 全部明细用一条 IN (...) 语句, 内存中按订单分组 (1 + 1)
    pub async fn find_all_by_dto_optimization(&self) -> AppResult<Vec<OrderQueryDto>> {
        let mut result = self.find_orders().await?;
        let order_ids: Vec<i64> = result.iter().map(|o| o.order_id).collect();
        if order_ids.is_empty() {
            return Ok(result);
        }

        let items = select_order_items()
            .filter(order_items::Column::OrderId.is_in(order_ids))
            .into_model::<OrderItemQueryDto>()
            .all(self.pool.as_ref())
            .await?;
        attach_order_items(&mut result, items);

        Ok(result)
    }

    /// 订单与明细 join 成一条语句, 返回扁平行
    pub async fn find_all_by_dto_flat(&self) -> AppResult<Vec<OrderFlatDto>> {
        Ok(select_order_header()
            .column_as(items::Column::Name, "item_name")
            .column_as(order_items::Column::OrderPrice, "order_price")
            .column_as(order_items::Column::Count, "count")
            .join(JoinType::InnerJoin, orders::Relation::OrderItems.def())
            .join(JoinType::InnerJoin, order_items::Relation::Item.def())
            .order_by_asc(order_items::Column::Id)
            .into_model::<OrderFlatDto>()
            .all(self.pool.as_ref())
            .await?)
    }

    async fn find_orders(&self) -> AppResult<Vec<OrderQueryDto>> {
        Ok(select_order_header()
            .into_model::<OrderQueryDto>()
            .all(self.pool.as_ref())
            .await?)
    }

    async fn find_order_items(&self, order_id: i64) -> AppResult<Vec<OrderItemQueryDto>> {
        Ok(select_order_items()
            .filter(order_items::Column::OrderId.eq(order_id))
            .into_model::<OrderItemQueryDto>()
            .all(self.pool.as_ref())
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_find_order_query_dtos() -> AppResult<()> {
        let db = setup_seeded_db().await?;
        let dtos = OrderQueryRepository::new(db).find_order_query_dtos().await?;

        assert_eq!(dtos.len(), 2);
        assert_eq!(dtos[0].order_items.len(), 2);
        assert_eq!(dtos[0].order_items[0].item_name, "JPA1 BOOK");
        assert_eq!(dtos[0].order_items[0].order_id, dtos[0].order_id);
        assert_eq!(dtos[1].order_items[1].item_name, "SPRING2 BOOK");
        assert_eq!(dtos[1].order_items[1].count, 4);
        Ok(())
    }

    #[tokio::test]
    async fn test_dto_optimization_matches_one_plus_n() -> AppResult<()> {
        let db = setup_seeded_db().await?;
        let repo = OrderQueryRepository::new(db);

        let naive = repo.find_order_query_dtos().await?;
        let optimized = repo.find_all_by_dto_optimization().await?;
        assert_eq!(naive, optimized);
        Ok(())
    }

    #[tokio::test]
    async fn test_find_all_by_dto_flat() -> AppResult<()> {
        let db = setup_seeded_db().await?;
        let flats = OrderQueryRepository::new(db).find_all_by_dto_flat().await?;

        // 2 个订单 x 2 条明细
        assert_eq!(flats.len(), 4);
        assert_eq!(flats[0].order_id, flats[1].order_id);
        assert_eq!(flats[0].item_name, "JPA1 BOOK");
        assert_eq!(flats[3].item_name, "SPRING2 BOOK");
        assert_eq!(flats[3].order_price, 40000);
        Ok(())
    }

    #[tokio::test]
    async fn test_queries_on_empty_database() -> AppResult<()> {
        let db = setup_test_db().await?;
        let repo = OrderQueryRepository::new(db);
        assert!(repo.find_order_query_dtos().await?.is_empty());
        assert!(repo.find_all_by_dto_optimization().await?.is_empty());
        assert!(repo.find_all_by_dto_flat().await?.is_empty());
        Ok(())
    }
}
