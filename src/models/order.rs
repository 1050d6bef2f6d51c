use crate::entities::{
    OrderStatus, delivery_entity as deliveries, item_entity as items,
    member_entity as members, order_entity as orders, order_item_entity as order_items,
};
use crate::models::Address;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// 订单检索条件 (均为可选)
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct OrderSearch {
    pub member_name: Option<String>,
    pub order_status: Option<OrderStatus>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub member_id: i64,
    pub item_id: i64,
    #[schema(example = 1)]
    pub count: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderResponse {
    pub order_id: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrderResponse {
    pub order_id: i64,
    pub order_status: OrderStatus,
}

/// 下单明细行
#[derive(Debug, Clone, Copy)]
pub struct OrderLine {
    pub item_id: i64,
    pub count: i32,
}

/// 订单及其 ToOne 关联 (member, delivery)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderToOne {
    #[serde(flatten)]
    pub order: orders::Model,
    pub member: members::Model,
    pub delivery: deliveries::Model,
}

/// 订单实体图: ToOne 关联加上订单明细与商品
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderGraph {
    #[serde(flatten)]
    pub order: orders::Model,
    pub member: members::Model,
    pub delivery: deliveries::Model,
    pub order_items: Vec<OrderItemGraph>,
    pub total_price: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemGraph {
    #[serde(flatten)]
    pub order_item: order_items::Model,
    pub item: items::Model,
}

impl OrderGraph {
    pub fn new(to_one: OrderToOne, lines: Vec<(order_items::Model, items::Model)>) -> Self {
        let order_items: Vec<OrderItemGraph> = lines
            .into_iter()
            .map(|(order_item, item)| OrderItemGraph { order_item, item })
            .collect();
        let total_price = order_items.iter().map(|l| l.order_item.total_price()).sum();
        Self {
            order: to_one.order,
            member: to_one.member,
            delivery: to_one.delivery,
            order_items,
            total_price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub order_id: i64,
    pub name: String,
    pub order_date: NaiveDateTime,
    pub order_status: OrderStatus,
    pub address: Address,
    pub order_items: Vec<OrderItemDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDto {
    pub item_name: String,
    pub order_price: i32,
    pub count: i32,
}

impl From<OrderGraph> for OrderDto {
    fn from(g: OrderGraph) -> Self {
        Self {
            order_id: g.order.id,
            name: g.member.name,
            order_date: g.order.order_date,
            order_status: g.order.status,
            address: g.delivery.address(),
            order_items: g.order_items.into_iter().map(OrderItemDto::from).collect(),
        }
    }
}

impl From<OrderItemGraph> for OrderItemDto {
    fn from(l: OrderItemGraph) -> Self {
        Self {
            item_name: l.item.name,
            order_price: l.order_item.order_price,
            count: l.order_item.count,
        }
    }
}

/// ToOne 关联的简单订单 DTO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SimpleOrderDto {
    pub order_id: i64,
    pub name: String,
    pub order_date: NaiveDateTime,
    pub order_status: OrderStatus,
    pub address: Address,
}

impl From<OrderToOne> for SimpleOrderDto {
    fn from(o: OrderToOne) -> Self {
        Self {
            order_id: o.order.id,
            name: o.member.name,
            order_date: o.order.order_date,
            order_status: o.order.status,
            address: o.delivery.address(),
        }
    }
}
