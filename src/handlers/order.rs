use crate::models::*;
use crate::services::{OrderQueryService, OrderService};
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/api/v2/orders",
    tag = "order",
    responses(
        (status = 200, description = "逐个加载关联后转换为 DTO", body = Vec<OrderDto>)
    )
)]
pub async fn orders_v2(query_service: web::Data<OrderQueryService>) -> Result<HttpResponse> {
    match query_service.find_orders_lazy().await {
        Ok(orders) => Ok(HttpResponse::Ok().json(orders)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/v3/orders",
    tag = "order",
    responses(
        (status = 200, description = "一次 join 查出并去重的订单实体图")
    )
)]
pub async fn orders_v3(query_service: web::Data<OrderQueryService>) -> Result<HttpResponse> {
    match query_service.find_orders_fetch_join().await {
        Ok(orders) => Ok(HttpResponse::Ok().json(orders)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/v3.1/orders",
    tag = "order",
    params(OffsetLimitParams),
    responses(
        (status = 200, description = "ToOne join 分页 + 批量 IN 加载明细", body = Vec<OrderDto>)
    )
)]
pub async fn orders_v3_page(
    query_service: web::Data<OrderQueryService>,
    query: web::Query<OffsetLimitParams>,
) -> Result<HttpResponse> {
    match query_service.find_orders_batch_fetch(&query).await {
        Ok(orders) => Ok(HttpResponse::Ok().json(orders)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/v4/orders",
    tag = "order",
    responses(
        (status = 200, description = "DTO 直查 (1 + N)", body = Vec<OrderQueryDto>)
    )
)]
pub async fn orders_v4(query_service: web::Data<OrderQueryService>) -> Result<HttpResponse> {
    match query_service.find_order_query_dtos().await {
        Ok(orders) => Ok(HttpResponse::Ok().json(orders)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/v5/orders",
    tag = "order",
    responses(
        (status = 200, description = "DTO 直查 (1 + 1)", body = Vec<OrderQueryDto>)
    )
)]
pub async fn orders_v5(query_service: web::Data<OrderQueryService>) -> Result<HttpResponse> {
    match query_service.find_order_query_dtos_optimized().await {
        Ok(orders) => Ok(HttpResponse::Ok().json(orders)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/v6/orders",
    tag = "order",
    responses(
        (status = 200, description = "单条扁平查询后在应用层重组", body = Vec<OrderQueryDto>)
    )
)]
pub async fn orders_v6(query_service: web::Data<OrderQueryService>) -> Result<HttpResponse> {
    match query_service.find_order_query_dtos_flat().await {
        Ok(orders) => Ok(HttpResponse::Ok().json(orders)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/orders",
    tag = "order",
    request_body = PlaceOrderRequest,
    responses(
        (status = 200, description = "下单成功", body = PlaceOrderResponse),
        (status = 400, description = "数量不合法", body = ApiError),
        (status = 404, description = "会员或商品不存在", body = ApiError),
        (status = 409, description = "库存不足", body = ApiError)
    )
)]
pub async fn place_order(
    order_service: web::Data<OrderService>,
    request: web::Json<PlaceOrderRequest>,
) -> Result<HttpResponse> {
    let line = OrderLine {
        item_id: request.item_id,
        count: request.count,
    };
    match order_service.order(request.member_id, &[line]).await {
        Ok(order_id) => Ok(HttpResponse::Ok().json(PlaceOrderResponse { order_id })),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/orders/{id}/cancel",
    tag = "order",
    params(
        ("id" = i64, Path, description = "订单ID")
    ),
    responses(
        (status = 200, description = "取消成功", body = CancelOrderResponse),
        (status = 404, description = "订单不存在", body = ApiError),
        (status = 409, description = "已配送完成, 不能取消", body = ApiError)
    )
)]
pub async fn cancel_order(
    order_service: web::Data<OrderService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match order_service.cancel_order(path.into_inner()).await {
        Ok(order) => Ok(HttpResponse::Ok().json(CancelOrderResponse {
            order_id: order.id,
            order_status: order.status,
        })),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn order_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/v1/orders", web::post().to(place_order))
        .route("/api/v1/orders/{id}/cancel", web::post().to(cancel_order))
        .route("/api/v2/orders", web::get().to(orders_v2))
        .route("/api/v3/orders", web::get().to(orders_v3))
        .route("/api/v3.1/orders", web::get().to(orders_v3_page))
        .route("/api/v4/orders", web::get().to(orders_v4))
        .route("/api/v5/orders", web::get().to(orders_v5))
        .route("/api/v6/orders", web::get().to(orders_v6));
}
