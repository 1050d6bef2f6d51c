use crate::models::*;
use crate::services::ItemService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/api/v1/items",
    tag = "item",
    responses(
        (status = 200, description = "商品列表")
    )
)]
pub async fn list_items(item_service: web::Data<ItemService>) -> Result<HttpResponse> {
    match item_service.find_items().await {
        Ok(items) => Ok(HttpResponse::Ok().json(items)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/items",
    tag = "item",
    request_body = CreateItemRequest,
    responses(
        (status = 200, description = "登记成功", body = CreateItemResponse),
        (status = 400, description = "参数不合法", body = ApiError)
    )
)]
pub async fn create_item(
    item_service: web::Data<ItemService>,
    request: web::Json<CreateItemRequest>,
) -> Result<HttpResponse> {
    match item_service.save_item(request.into_inner()).await {
        Ok(id) => Ok(HttpResponse::Ok().json(CreateItemResponse { id })),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/items/{id}",
    tag = "item",
    params(
        ("id" = i64, Path, description = "商品ID")
    ),
    request_body = UpdateItemRequest,
    responses(
        (status = 200, description = "修改成功"),
        (status = 400, description = "参数不合法", body = ApiError),
        (status = 404, description = "商品不存在", body = ApiError)
    )
)]
pub async fn update_item(
    item_service: web::Data<ItemService>,
    path: web::Path<i64>,
    request: web::Json<UpdateItemRequest>,
) -> Result<HttpResponse> {
    match item_service
        .update_item(path.into_inner(), request.into_inner())
        .await
    {
        Ok(item) => Ok(HttpResponse::Ok().json(item)),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn item_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/v1/items")
            .route(web::get().to(list_items))
            .route(web::post().to(create_item)),
    )
    .route("/api/v1/items/{id}", web::put().to(update_item));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use actix_web::{App, http::StatusCode, test};
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn test_create_update_list_items() {
        let db = setup_test_db().await.unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ItemService::new(db)))
                .configure(item_config),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/items")
            .set_json(json!({
                "kind": "BOOK",
                "name": "JPA1 BOOK",
                "price": 10000,
                "stockQuantity": 100,
                "author": "kim",
                "isbn": "1234"
            }))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["id"].as_i64().unwrap();

        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/items/{id}"))
            .set_json(json!({ "name": "JPA1 BOOK v2", "price": 12000, "stockQuantity": 50 }))
            .to_request();
        let updated: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["price"], 12000);
        assert_eq!(updated["author"], "kim");

        let req = test::TestRequest::get().uri("/api/v1/items").to_request();
        let listed: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed[0]["name"], "JPA1 BOOK v2");
        assert_eq!(listed[0]["stockQuantity"], 50);
        assert_eq!(listed[0]["dtype"], "BOOK");

        let req = test::TestRequest::put()
            .uri("/api/v1/items/999")
            .set_json(json!({ "name": "x", "price": 1, "stockQuantity": 1 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
