use crate::config::FetchConfig;
use crate::database::DbPool;
use crate::entities::{item_entity as items, order_entity as orders, order_item_entity as order_items};
use crate::error::{AppError, AppResult};
use crate::models::{
    OffsetLimitParams, OrderDto, OrderGraph, OrderQueryDto, OrderSearch, OrderSimpleQueryDto,
    OrderToOne, SimpleOrderDto, group_flat_rows,
};
use crate::repositories::{OrderQueryRepository, OrderRepository, OrderSimpleQueryRepository};

use std::collections::{HashMap, HashSet};

/// 订单查询的各种加载策略
///
/// 同一份数据, 每种策略返回的 DTO 完全一致, 区别只在于发出的 SQL 数量与形状:
///
/// | 策略 | 语句数 |
/// |---|---|
/// | 逐个加载关联 | 1 + N * (3 + 明细数) |
/// | fetch join | 1 (不可分页) |
/// | ToOne join + 批量 IN | 1 + ceil(N / batch) + ceil(商品数 / batch) |
/// | DTO 1 + N | 1 + N |
/// | DTO 1 + 1 | 2 |
/// | 扁平行重组 | 1 |
#[derive(Clone)]
pub struct OrderQueryService {
    orders: OrderRepository,
    order_query: OrderQueryRepository,
    order_simple_query: OrderSimpleQueryRepository,
}

impl OrderQueryService {
    pub fn new(pool: DbPool, fetch: FetchConfig) -> Self {
        Self {
            orders: OrderRepository::new(pool.clone(), fetch),
            order_query: OrderQueryRepository::new(pool.clone()),
            order_simple_query: OrderSimpleQueryRepository::new(pool),
        }
    }

    // -----------------------------
    // 订单 + 明细
    // -----------------------------

    /// 先查订单, 再逐个加载会员、配送、明细以及每条明细的商品
    pub async fn find_orders_lazy(&self) -> AppResult<Vec<OrderDto>> {
        let found = self.orders.find_all().await?;

        let mut result = Vec::with_capacity(found.len());
        for order in found {
            let member = self.orders.find_member(&order).await?;
            let delivery = self.orders.find_delivery(&order).await?;
            let lines = self.orders.find_order_items(&order).await?;

            let mut loaded = Vec::with_capacity(lines.len());
            for line in lines {
                let item = self.orders.find_item(&line).await?;
                loaded.push((line, item));
            }

            let to_one = OrderToOne {
                order,
                member,
                delivery,
            };
            result.push(OrderGraph::new(to_one, loaded).into());
        }
        Ok(result)
    }

    /// 一次 join 查出完整实体图
    pub async fn find_orders_fetch_join(&self) -> AppResult<Vec<OrderGraph>> {
        self.orders.find_all_with_item().await
    }

    /// ToOne 关联 join + 分页, 明细和商品用 IN (...) 批量加载
    pub async fn find_orders_batch_fetch(
        &self,
        page: &OffsetLimitParams,
    ) -> AppResult<Vec<OrderDto>> {
        let to_ones = self
            .orders
            .find_all_with_member_delivery(Some(page.get_offset()), Some(page.get_limit()))
            .await?;
        if to_ones.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<i64> = to_ones.iter().map(|o| o.order.id).collect();
        let lines = self.orders.find_order_items_in(&order_ids).await?;

        let mut seen = HashSet::new();
        let item_ids: Vec<i64> = lines
            .iter()
            .map(|l| l.item_id)
            .filter(|id| seen.insert(*id))
            .collect();
        let item_map = self.orders.find_items_in(&item_ids).await?;

        let mut lines_by_order = group_lines_by_order(lines, &item_map)?;

        Ok(to_ones
            .into_iter()
            .map(|to_one| {
                let lines = lines_by_order.remove(&to_one.order.id).unwrap_or_default();
                OrderGraph::new(to_one, lines).into()
            })
            .collect())
    }

    /// DTO 直查, 明细按订单逐个查询 (1 + N)
    pub async fn find_order_query_dtos(&self) -> AppResult<Vec<OrderQueryDto>> {
        self.order_query.find_order_query_dtos().await
    }

    /// DTO 直查, 明细一次 IN (...) 查出后在内存中分组 (1 + 1)
    pub async fn find_order_query_dtos_optimized(&self) -> AppResult<Vec<OrderQueryDto>> {
        self.order_query.find_all_by_dto_optimization().await
    }

    /// 单条扁平查询, 在应用层按订单重新组装
    pub async fn find_order_query_dtos_flat(&self) -> AppResult<Vec<OrderQueryDto>> {
        let flats = self.order_query.find_all_by_dto_flat().await?;
        Ok(group_flat_rows(flats))
    }

    // -----------------------------
    // 只有 ToOne 关联的简单订单
    // -----------------------------

    /// 直接返回订单实体
    pub async fn find_simple_order_entities(
        &self,
        search: &OrderSearch,
    ) -> AppResult<Vec<orders::Model>> {
        self.orders.find_all_by_search(search).await
    }

    /// 先查订单, 再逐个加载会员和配送 (1 + 2N)
    pub async fn find_simple_orders_lazy(
        &self,
        search: &OrderSearch,
    ) -> AppResult<Vec<SimpleOrderDto>> {
        let found = self.orders.find_all_by_search(search).await?;

        let mut result = Vec::with_capacity(found.len());
        for order in found {
            let member = self.orders.find_member(&order).await?;
            let delivery = self.orders.find_delivery(&order).await?;
            result.push(
                OrderToOne {
                    order,
                    member,
                    delivery,
                }
                .into(),
            );
        }
        Ok(result)
    }

    pub async fn find_simple_orders_fetch_join(&self) -> AppResult<Vec<SimpleOrderDto>> {
        let to_ones = self.orders.find_all_with_member_delivery(None, None).await?;
        Ok(to_ones.into_iter().map(SimpleOrderDto::from).collect())
    }

    pub async fn find_simple_order_dtos(&self) -> AppResult<Vec<OrderSimpleQueryDto>> {
        self.order_simple_query.find_order_dtos().await
    }
}

type OrderLines = Vec<(order_items::Model, items::Model)>;

/// 把批量加载的明细挂上商品后按 order_id 分组, 明细保持 id 顺序
fn group_lines_by_order(
    lines: Vec<order_items::Model>,
    item_map: &HashMap<i64, items::Model>,
) -> AppResult<HashMap<i64, OrderLines>> {
    let mut grouped: HashMap<i64, OrderLines> = HashMap::new();
    for line in lines {
        let item = item_map
            .get(&line.item_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Item {} not found", line.item_id)))?;
        grouped.entry(line.order_id).or_default().push((line, item));
    }
    Ok(grouped)
}
