use crate::database::DbPool;
use crate::entities::{
    delivery_entity as deliveries, member_entity as members, order_entity as orders,
};
use crate::error::AppResult;
use crate::models::OrderSimpleQueryDto;
use sea_orm::{EntityTrait, JoinType, QueryOrder, QuerySelect, RelationTrait, Select};

/// 订单头查询: order ⋈ member ⋈ delivery, 只取页面需要的列
///
/// 列别名: order_id, name, order_date, order_status, city, street, zipcode
pub(crate) fn select_order_header() -> Select<orders::Entity> {
    orders::Entity::find()
        .select_only()
        .column_as(orders::Column::Id, "order_id")
        .column_as(members::Column::Name, "name")
        .column_as(orders::Column::OrderDate, "order_date")
        .column_as(orders::Column::Status, "order_status")
        .column_as(deliveries::Column::City, "city")
        .column_as(deliveries::Column::Street, "street")
        .column_as(deliveries::Column::Zipcode, "zipcode")
        .join(JoinType::InnerJoin, orders::Relation::Member.def())
        .join(JoinType::InnerJoin, orders::Relation::Delivery.def())
        .order_by_asc(orders::Column::Id)
}

/// 为特定页面服务的 DTO 查询, 与实体查询分开维护
#[derive(Clone)]
pub struct OrderSimpleQueryRepository {
    pool: DbPool,
}

impl OrderSimpleQueryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn find_order_dtos(&self) -> AppResult<Vec<OrderSimpleQueryDto>> {
        Ok(select_order_header()
            .into_model::<OrderSimpleQueryDto>()
            .all(self.pool.as_ref())
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::OrderStatus;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_find_order_dtos() -> AppResult<()> {
        let db = setup_seeded_db().await?;
        let dtos = OrderSimpleQueryRepository::new(db).find_order_dtos().await?;

        assert_eq!(dtos.len(), 2);
        assert_eq!(dtos[0].name, "userA");
        assert_eq!(dtos[0].order_status, OrderStatus::Order);
        assert_eq!(dtos[0].address.city.as_deref(), Some("Seoul"));
        assert_eq!(dtos[1].name, "userB");
        assert_eq!(dtos[1].address.zipcode.as_deref(), Some("2222"));
        Ok(())
    }
}
