use crate::models::*;
use crate::services::OrderQueryService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/api/v1/simple-orders",
    tag = "simple-order",
    params(OrderSearch),
    responses(
        (status = 200, description = "订单实体列表 (直接暴露实体)")
    )
)]
pub async fn simple_orders_v1(
    query_service: web::Data<OrderQueryService>,
    search: web::Query<OrderSearch>,
) -> Result<HttpResponse> {
    match query_service.find_simple_order_entities(&search).await {
        Ok(orders) => Ok(HttpResponse::Ok().json(orders)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/v2/simple-orders",
    tag = "simple-order",
    params(OrderSearch),
    responses(
        (status = 200, description = "逐个加载会员与配送 (1 + 2N)", body = Vec<SimpleOrderDto>)
    )
)]
pub async fn simple_orders_v2(
    query_service: web::Data<OrderQueryService>,
    search: web::Query<OrderSearch>,
) -> Result<HttpResponse> {
    match query_service.find_simple_orders_lazy(&search).await {
        Ok(orders) => Ok(HttpResponse::Ok().json(orders)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/v3/simple-orders",
    tag = "simple-order",
    responses(
        (status = 200, description = "会员与配送一次 join 查出", body = Vec<SimpleOrderDto>)
    )
)]
pub async fn simple_orders_v3(
    query_service: web::Data<OrderQueryService>,
) -> Result<HttpResponse> {
    match query_service.find_simple_orders_fetch_join().await {
        Ok(orders) => Ok(HttpResponse::Ok().json(orders)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/v4/simple-orders",
    tag = "simple-order",
    responses(
        (status = 200, description = "DTO 直接查询", body = Vec<OrderSimpleQueryDto>)
    )
)]
pub async fn simple_orders_v4(
    query_service: web::Data<OrderQueryService>,
) -> Result<HttpResponse> {
    match query_service.find_simple_order_dtos().await {
        Ok(orders) => Ok(HttpResponse::Ok().json(orders)),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn simple_order_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/v1/simple-orders", web::get().to(simple_orders_v1))
        .route("/api/v2/simple-orders", web::get().to(simple_orders_v2))
        .route("/api/v3/simple-orders", web::get().to(simple_orders_v3))
        .route("/api/v4/simple-orders", web::get().to(simple_orders_v4));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FetchConfig;
    use crate::test_utils::*;
    use actix_web::{App, test};
    use serde_json::Value;

    #[actix_web::test]
    async fn test_simple_order_versions() {
        let db = setup_seeded_db().await.unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(OrderQueryService::new(
                    db,
                    FetchConfig::default(),
                )))
                .configure(simple_order_config),
        )
        .await;

        let mut bodies = Vec::new();
        for uri in [
            "/api/v2/simple-orders",
            "/api/v3/simple-orders",
            "/api/v4/simple-orders",
        ] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let body: Value = test::call_and_read_body_json(&app, req).await;
            bodies.push(body);
        }
        assert_eq!(bodies[0][0]["address"]["zipcode"], "1111");
        assert_eq!(bodies[1], bodies[0]);
        assert_eq!(bodies[2], bodies[0]);
    }

    #[actix_web::test]
    async fn test_simple_orders_v1_search() {
        let db = setup_seeded_db().await.unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(OrderQueryService::new(
                    db,
                    FetchConfig::default(),
                )))
                .configure(simple_order_config),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/simple-orders?memberName=userB&orderStatus=ORDER")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.as_array().map(Vec::len), Some(1));
        assert_eq!(body[0]["status"], "ORDER");

        let req = test::TestRequest::get()
            .uri("/api/v1/simple-orders?orderStatus=CANCEL")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, Value::Array(Vec::new()));
    }
}
