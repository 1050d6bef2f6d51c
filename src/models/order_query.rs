//! 直接由查询结果构造的 DTO (不经过实体)

use crate::entities::OrderStatus;
use crate::models::Address;
use chrono::NaiveDateTime;
use sea_orm::{DbErr, FromQueryResult, QueryResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderQueryDto {
    pub order_id: i64,
    pub name: String,
    pub order_date: NaiveDateTime,
    pub order_status: OrderStatus,
    pub address: Address,
    pub order_items: Vec<OrderItemQueryDto>,
}

/// 查询列: order_id, name, order_date, order_status, city, street, zipcode
/// order_items 由后续查询填充
impl FromQueryResult for OrderQueryDto {
    fn from_query_result(res: &QueryResult, pre: &str) -> Result<Self, DbErr> {
        Ok(Self {
            order_id: res.try_get(pre, "order_id")?,
            name: res.try_get(pre, "name")?,
            order_date: res.try_get(pre, "order_date")?,
            order_status: res.try_get(pre, "order_status")?,
            address: Address::from_query_result(res, pre)?,
            order_items: Vec::new(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, FromQueryResult)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemQueryDto {
    #[serde(skip)]
    pub order_id: i64,
    pub item_name: String,
    pub order_price: i32,
    pub count: i32,
}

/// 订单 + 明细 join 后的一行
#[derive(Debug, Clone, PartialEq)]
pub struct OrderFlatDto {
    pub order_id: i64,
    pub name: String,
    pub order_date: NaiveDateTime,
    pub order_status: OrderStatus,
    pub address: Address,
    pub item_name: String,
    pub order_price: i32,
    pub count: i32,
}

impl FromQueryResult for OrderFlatDto {
    fn from_query_result(res: &QueryResult, pre: &str) -> Result<Self, DbErr> {
        Ok(Self {
            order_id: res.try_get(pre, "order_id")?,
            name: res.try_get(pre, "name")?,
            order_date: res.try_get(pre, "order_date")?,
            order_status: res.try_get(pre, "order_status")?,
            address: Address::from_query_result(res, pre)?,
            item_name: res.try_get(pre, "item_name")?,
            order_price: res.try_get(pre, "order_price")?,
            count: res.try_get(pre, "count")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderSimpleQueryDto {
    pub order_id: i64,
    pub name: String,
    pub order_date: NaiveDateTime,
    pub order_status: OrderStatus,
    pub address: Address,
}

impl FromQueryResult for OrderSimpleQueryDto {
    fn from_query_result(res: &QueryResult, pre: &str) -> Result<Self, DbErr> {
        Ok(Self {
            order_id: res.try_get(pre, "order_id")?,
            name: res.try_get(pre, "name")?,
            order_date: res.try_get(pre, "order_date")?,
            order_status: res.try_get(pre, "order_status")?,
            address: Address::from_query_result(res, pre)?,
        })
    }
}

/// 按 order_id 把扁平行重新组装成带明细的订单
///
/// 订单头取自每组第一行, 组的先后顺序与明细顺序都保持行的出现顺序。
pub fn group_flat_rows(flats: Vec<OrderFlatDto>) -> Vec<OrderQueryDto> {
    let mut index: HashMap<i64, usize> = HashMap::new();
    let mut grouped: Vec<OrderQueryDto> = Vec::new();

    for flat in flats {
        let item = OrderItemQueryDto {
            order_id: flat.order_id,
            item_name: flat.item_name,
            order_price: flat.order_price,
            count: flat.count,
        };
        match index.get(&flat.order_id) {
            Some(&pos) => grouped[pos].order_items.push(item),
            None => {
                index.insert(flat.order_id, grouped.len());
                grouped.push(OrderQueryDto {
                    order_id: flat.order_id,
                    name: flat.name,
                    order_date: flat.order_date,
                    order_status: flat.order_status,
                    address: flat.address,
                    order_items: vec![item],
                });
            }
        }
    }

    grouped
}

/// 把明细按 order_id 分组后挂到对应订单上
pub fn attach_order_items(orders: &mut [OrderQueryDto], items: Vec<OrderItemQueryDto>) {
    let mut by_order: HashMap<i64, Vec<OrderItemQueryDto>> = HashMap::new();
    for item in items {
        by_order.entry(item.order_id).or_default().push(item);
    }
    for order in orders.iter_mut() {
        order.order_items = by_order.remove(&order.order_id).unwrap_or_default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn flat(order_id: i64, name: &str, item_name: &str, count: i32) -> OrderFlatDto {
        OrderFlatDto {
            order_id,
            name: name.to_string(),
            order_date: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            order_status: OrderStatus::Order,
            address: Address::new(Some("Seoul".into()), Some("1".into()), Some("1111".into())),
            item_name: item_name.to_string(),
            order_price: 10000,
            count,
        }
    }

    #[test]
    fn test_group_flat_rows() {
        let rows = vec![
            flat(4, "userA", "JPA1 BOOK", 1),
            flat(4, "userA", "JPA2 BOOK", 2),
            flat(11, "userB", "SPRING1 BOOK", 3),
            flat(11, "userB", "SPRING2 BOOK", 4),
        ];

        let grouped = group_flat_rows(rows);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].order_id, 4);
        assert_eq!(grouped[0].name, "userA");
        assert_eq!(grouped[0].order_items.len(), 2);
        assert_eq!(grouped[0].order_items[1].item_name, "JPA2 BOOK");
        assert_eq!(grouped[1].order_id, 11);
        assert_eq!(grouped[1].order_items[0].count, 3);
    }

    #[test]
    fn test_group_keeps_first_occurrence_order() {
        let rows = vec![
            flat(7, "userB", "SPRING1 BOOK", 1),
            flat(3, "userA", "JPA1 BOOK", 1),
            flat(7, "userB", "SPRING2 BOOK", 2),
        ];

        let grouped = group_flat_rows(rows);
        let ids: Vec<i64> = grouped.iter().map(|o| o.order_id).collect();
        assert_eq!(ids, vec![7, 3]);
        assert_eq!(grouped[0].order_items.len(), 2);
    }

    #[test]
    fn test_group_empty() {
        assert!(group_flat_rows(Vec::new()).is_empty());
    }

    #[test]
    fn test_attach_order_items() {
        let mut orders = group_flat_rows(vec![flat(1, "userA", "JPA1 BOOK", 1), flat(2, "userB", "SPRING1 BOOK", 1)]);
        for o in orders.iter_mut() {
            o.order_items.clear();
        }

        let items = vec![
            OrderItemQueryDto {
                order_id: 2,
                item_name: "SPRING1 BOOK".into(),
                order_price: 20000,
                count: 3,
            },
            OrderItemQueryDto {
                order_id: 2,
                item_name: "SPRING2 BOOK".into(),
                order_price: 40000,
                count: 4,
            },
        ];
        attach_order_items(&mut orders, items);

        assert!(orders[0].order_items.is_empty());
        assert_eq!(orders[1].order_items.len(), 2);
    }

    #[test]
    fn test_item_query_dto_hides_order_id() {
        let item = OrderItemQueryDto {
            order_id: 9,
            item_name: "JPA1 BOOK".into(),
            order_price: 10000,
            count: 1,
        };
        let value = serde_json::to_value(&item).unwrap();
        assert!(value.get("orderId").is_none());
        assert_eq!(value["itemName"], "JPA1 BOOK");
    }
}
