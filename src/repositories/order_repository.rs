use super::select_prefixed;
use crate::config::FetchConfig;
use crate::database::DbPool;
use crate::entities::{
    delivery_entity as deliveries, item_entity as items, member_entity as members,
    order_entity as orders, order_item_entity as order_items,
};
use crate::error::{AppError, AppResult};
use crate::models::{MAX_OFFSET, OrderGraph, OrderSearch, OrderToOne};
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ColumnTrait, DbErr, EntityTrait, FromQueryResult, JoinType, ModelTrait,
    QueryFilter, QueryOrder, QueryResult, QuerySelect, RelationTrait, Select,
};
use std::collections::HashMap;

const ORDER_PREFIX: &str = "o_";
const MEMBER_PREFIX: &str = "m_";
const DELIVERY_PREFIX: &str = "d_";
const ORDER_ITEM_PREFIX: &str = "oi_";
const ITEM_PREFIX: &str = "i_";

impl FromQueryResult for OrderToOne {
    fn from_query_result(res: &QueryResult, _pre: &str) -> Result<Self, DbErr> {
        Ok(Self {
            order: orders::Model::from_query_result(res, ORDER_PREFIX)?,
            member: members::Model::from_query_result(res, MEMBER_PREFIX)?,
            delivery: deliveries::Model::from_query_result(res, DELIVERY_PREFIX)?,
        })
    }
}

/// fetch join 后的一行: 订单 x 明细
struct OrderGraphRow {
    to_one: OrderToOne,
    order_item: order_items::Model,
    item: items::Model,
}

impl FromQueryResult for OrderGraphRow {
    fn from_query_result(res: &QueryResult, pre: &str) -> Result<Self, DbErr> {
        Ok(Self {
            to_one: OrderToOne::from_query_result(res, pre)?,
            order_item: order_items::Model::from_query_result(res, ORDER_ITEM_PREFIX)?,
            item: items::Model::from_query_result(res, ITEM_PREFIX)?,
        })
    }
}

/// 面向实体的订单查询
#[derive(Clone)]
pub struct OrderRepository {
    pool: DbPool,
    fetch: FetchConfig,
}

impl OrderRepository {
    pub fn new(pool: DbPool, fetch: FetchConfig) -> Self {
        Self { pool, fetch }
    }

    /// 只查询订单本身, 关联对象需要时再单独加载
    pub async fn find_all(&self) -> AppResult<Vec<orders::Model>> {
        Ok(orders::Entity::find()
            .order_by_asc(orders::Column::Id)
            .all(self.pool.as_ref())
            .await?)
    }

    /// 按会员名 (模糊) 与订单状态检索, 条件为空时不过滤
    pub async fn find_all_by_search(&self, search: &OrderSearch) -> AppResult<Vec<orders::Model>> {
        let mut select = orders::Entity::find();

        if let Some(name) = search.member_name.as_deref().filter(|n| !n.is_empty()) {
            select = select
                .join(JoinType::InnerJoin, orders::Relation::Member.def())
                .filter(
                    Expr::col((members::Entity, members::Column::Name))
                        .like(LikeExpr::new(like_contains(name)).escape('\\')),
                );
        }
        if let Some(status) = search.order_status {
            select = select.filter(orders::Column::Status.eq(status));
        }

        Ok(select
            .order_by_asc(orders::Column::Id)
            .limit(self.fetch.max_search_results)
            .all(self.pool.as_ref())
            .await?)
    }

    // -----------------------------
    // 按需加载单个关联 (每次调用一条语句)
    // -----------------------------

    pub async fn find_member(&self, order: &orders::Model) -> AppResult<members::Model> {
        order
            .find_related(members::Entity)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Member of order {} not found", order.id)))
    }

    pub async fn find_delivery(&self, order: &orders::Model) -> AppResult<deliveries::Model> {
        order
            .find_related(deliveries::Entity)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Delivery of order {} not found", order.id)))
    }

    pub async fn find_order_items(
        &self,
        order: &orders::Model,
    ) -> AppResult<Vec<order_items::Model>> {
        Ok(order
            .find_related(order_items::Entity)
            .order_by_asc(order_items::Column::Id)
            .all(self.pool.as_ref())
            .await?)
    }

    pub async fn find_item(&self, order_item: &order_items::Model) -> AppResult<items::Model> {
        order_item
            .find_related(items::Entity)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Item {} not found", order_item.item_id)))
    }

    // -----------------------------
    // fetch join
    // -----------------------------

    fn select_with_member_delivery() -> Select<orders::Entity> {
        let select = orders::Entity::find()
            .select_only()
            .join(JoinType::InnerJoin, orders::Relation::Member.def())
            .join(JoinType::InnerJoin, orders::Relation::Delivery.def());
        let select = select_prefixed::<orders::Entity, _>(select, ORDER_PREFIX);
        let select = select_prefixed::<members::Entity, _>(select, MEMBER_PREFIX);
        select_prefixed::<deliveries::Entity, _>(select, DELIVERY_PREFIX)
    }

    /// ToOne 关联一次 join 查出, 可分页
    pub async fn find_all_with_member_delivery(
        &self,
        offset: Option<u64>,
        limit: Option<u64>,
    ) -> AppResult<Vec<OrderToOne>> {
        let mut select = Self::select_with_member_delivery().order_by_asc(orders::Column::Id);
        if let Some(offset) = offset {
            select = select.offset(offset.min(MAX_OFFSET));
        }
        if let Some(limit) = limit {
            select = select.limit(limit);
        }
        Ok(select.into_model::<OrderToOne>().all(self.pool.as_ref()).await?)
    }

    /// 订单、会员、配送、明细、商品一次 join 查出
    ///
    /// 明细是 ToMany, 每个订单会按明细数量重复出现, 这里按订单 id 去重。
    /// 集合 join 之后无法按订单分页。
    pub async fn find_all_with_item(&self) -> AppResult<Vec<OrderGraph>> {
        let select = Self::select_with_member_delivery()
            .join(JoinType::InnerJoin, orders::Relation::OrderItems.def())
            .join(JoinType::InnerJoin, order_items::Relation::Item.def());
        let select = select_prefixed::<order_items::Entity, _>(select, ORDER_ITEM_PREFIX);
        let select = select_prefixed::<items::Entity, _>(select, ITEM_PREFIX);

        let rows = select
            .order_by_asc(orders::Column::Id)
            .order_by_asc(order_items::Column::Id)
            .into_model::<OrderGraphRow>()
            .all(self.pool.as_ref())
            .await?;

        Ok(distinct_orders(rows))
    }

    // -----------------------------
    // IN (...) 批量加载
    // -----------------------------

    /// 按 order_id 批量加载明细, 每条语句最多 batch_size 个 id
    pub async fn find_order_items_in(
        &self,
        order_ids: &[i64],
    ) -> AppResult<Vec<order_items::Model>> {
        let mut loaded = self
            .find_in_batches::<order_items::Entity, _>(order_items::Column::OrderId, order_ids)
            .await?;
        loaded.sort_by_key(|oi| oi.id);
        Ok(loaded)
    }

    pub async fn find_items_in(&self, item_ids: &[i64]) -> AppResult<HashMap<i64, items::Model>> {
        let loaded = self
            .find_in_batches::<items::Entity, _>(items::Column::Id, item_ids)
            .await?;
        Ok(loaded.into_iter().map(|item| (item.id, item)).collect())
    }

    async fn find_in_batches<E, C>(&self, column: C, keys: &[i64]) -> AppResult<Vec<E::Model>>
    where
        E: EntityTrait,
        C: ColumnTrait,
    {
        let batch_size = self.fetch.batch_size.max(1) as usize;
        let mut loaded = Vec::with_capacity(keys.len());
        for chunk in keys.chunks(batch_size) {
            let mut part = E::find()
                .filter(column.is_in(chunk.iter().copied()))
                .all(self.pool.as_ref())
                .await?;
            loaded.append(&mut part);
        }
        Ok(loaded)
    }
}

/// `%name%` 模式, 名字里的 `%` `_` `\` 按字面匹配
fn like_contains(raw: &str) -> String {
    let mut pattern = String::with_capacity(raw.len() + 2);
    pattern.push('%');
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// 应用层 distinct: 同一订单的多行合并为一个实体图
fn distinct_orders(rows: Vec<OrderGraphRow>) -> Vec<OrderGraph> {
    let mut index: HashMap<i64, usize> = HashMap::new();
    let mut grouped: Vec<(OrderToOne, Vec<(order_items::Model, items::Model)>)> = Vec::new();

    for row in rows {
        match index.get(&row.to_one.order.id) {
            Some(&pos) => grouped[pos].1.push((row.order_item, row.item)),
            None => {
                index.insert(row.to_one.order.id, grouped.len());
                grouped.push((row.to_one, vec![(row.order_item, row.item)]));
            }
        }
    }

    grouped
        .into_iter()
        .map(|(to_one, lines)| OrderGraph::new(to_one, lines))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_find_all_with_member_delivery() -> AppResult<()> {
        let db = setup_seeded_db().await?;
        let repo = OrderRepository::new(db, FetchConfig::default());

        let orders = repo.find_all_with_member_delivery(None, None).await?;
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].member.name, "userA");
        assert_eq!(orders[0].delivery.city.as_deref(), Some("Seoul"));
        assert_eq!(orders[1].member.name, "userB");
        assert_eq!(orders[0].order.delivery_id, orders[0].delivery.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_find_all_with_member_delivery_paging() -> AppResult<()> {
        let db = setup_seeded_db().await?;
        let repo = OrderRepository::new(db, FetchConfig::default());

        let page = repo.find_all_with_member_delivery(Some(1), Some(1)).await?;
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].member.name, "userB");

        let empty = repo.find_all_with_member_delivery(Some(2), Some(10)).await?;
        assert!(empty.is_empty());

        let beyond = repo.find_all_with_member_delivery(Some(u64::MAX), None).await?;
        assert!(beyond.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_find_all_with_item_is_distinct() -> AppResult<()> {
        let db = setup_seeded_db().await?;
        let repo = OrderRepository::new(db, FetchConfig::default());

        // join 后共 4 行, 去重后 2 个订单
        let graphs = repo.find_all_with_item().await?;
        assert_eq!(graphs.len(), 2);
        assert_eq!(graphs[0].order_items.len(), 2);
        assert_eq!(graphs[0].order_items[0].item.name, "JPA1 BOOK");
        assert_eq!(graphs[0].order_items[1].order_item.count, 2);
        assert_eq!(graphs[0].total_price, 10000 + 20000 * 2);
        assert_eq!(graphs[1].total_price, 20000 * 3 + 40000 * 4);
        Ok(())
    }

    #[tokio::test]
    async fn test_find_order_items_in_batches() -> AppResult<()> {
        let db = setup_seeded_db().await?;
        let orders = OrderRepository::new(db.clone(), FetchConfig::default())
            .find_all()
            .await?;
        let ids: Vec<i64> = orders.iter().map(|o| o.id).collect();

        // batch_size = 1 时每个订单一条语句, 结果应与一次加载一致
        let small = OrderRepository::new(
            db.clone(),
            FetchConfig {
                batch_size: 1,
                ..FetchConfig::default()
            },
        );
        let large = OrderRepository::new(db, FetchConfig::default());

        let a = small.find_order_items_in(&ids).await?;
        let b = large.find_order_items_in(&ids).await?;
        assert_eq!(a.len(), 4);
        assert_eq!(a, b);
        Ok(())
    }

    fn line(id: i64, order_id: i64) -> order_items::Model {
        order_items::Model {
            id,
            order_id,
            item_id: 10,
            order_price: 10000,
            count: 1,
        }
    }

    #[tokio::test]
    async fn test_find_order_items_in_statement_count() -> AppResult<()> {
        // 5 个订单, batch_size = 2 => ceil(5 / 2) = 3 条语句
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![line(1, 1), line(2, 2)]])
            .append_query_results([vec![line(3, 3), line(4, 4)]])
            .append_query_results([vec![line(5, 5)]])
            .into_connection();
        let db = Arc::new(db);
        let repo = OrderRepository::new(
            db.clone(),
            FetchConfig {
                batch_size: 2,
                ..FetchConfig::default()
            },
        );

        let loaded = repo.find_order_items_in(&[1, 2, 3, 4, 5]).await?;
        assert_eq!(loaded.len(), 5);

        drop(repo);
        assert_eq!(statement_count(db), 3);
        Ok(())
    }

    #[test]
    fn test_like_contains_escapes_wildcards() {
        assert_eq!(like_contains("user"), "%user%");
        assert_eq!(like_contains("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_contains("a\\b"), "%a\\\\b%");
    }

    #[tokio::test]
    async fn test_find_all_by_search_treats_wildcards_literally() -> AppResult<()> {
        let db = setup_seeded_db().await?;
        let repo = OrderRepository::new(db, FetchConfig::default());

        for name in ["%", "_", "user_"] {
            let found = repo
                .find_all_by_search(&OrderSearch {
                    member_name: Some(name.into()),
                    order_status: None,
                })
                .await?;
            assert!(found.is_empty(), "{name} should match literally");
        }

        let found = repo
            .find_all_by_search(&OrderSearch {
                member_name: Some("user".into()),
                order_status: None,
            })
            .await?;
        assert_eq!(found.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_find_all_by_search() -> AppResult<()> {
        let db = setup_seeded_db().await?;
        let repo = OrderRepository::new(db, FetchConfig::default());

        let all = repo.find_all_by_search(&OrderSearch::default()).await?;
        assert_eq!(all.len(), 2);

        let by_name = repo
            .find_all_by_search(&OrderSearch {
                member_name: Some("userB".into()),
                order_status: None,
            })
            .await?;
        assert_eq!(by_name.len(), 1);

        let cancelled = repo
            .find_all_by_search(&OrderSearch {
                member_name: None,
                order_status: Some(crate::entities::OrderStatus::Cancel),
            })
            .await?;
        assert!(cancelled.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_find_all_by_search_respects_max_results() -> AppResult<()> {
        let db = setup_seeded_db().await?;
        let repo = OrderRepository::new(
            db,
            FetchConfig {
                max_search_results: 1,
                ..FetchConfig::default()
            },
        );
        let found = repo.find_all_by_search(&OrderSearch::default()).await?;
        assert_eq!(found.len(), 1);
        Ok(())
    }
}
