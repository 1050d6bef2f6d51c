use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{DeliveryStatus, ItemKind, OrderStatus};
use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::member::members_v1,
        handlers::member::members_v2,
        handlers::member::save_member_v1,
        handlers::member::save_member_v2,
        handlers::member::update_member_v2,
        handlers::order::orders_v2,
        handlers::order::orders_v3,
        handlers::order::orders_v3_page,
        handlers::order::orders_v4,
        handlers::order::orders_v5,
        handlers::order::orders_v6,
        handlers::order::place_order,
        handlers::order::cancel_order,
        handlers::simple_order::simple_orders_v1,
        handlers::simple_order::simple_orders_v2,
        handlers::simple_order::simple_orders_v3,
        handlers::simple_order::simple_orders_v4,
        handlers::item::list_items,
        handlers::item::create_item,
        handlers::item::update_item,
    ),
    components(
        schemas(
            Address,
            ApiError,
            MemberDto,
            CreateMemberRequest,
            CreateMemberResponse,
            UpdateMemberRequest,
            UpdateMemberResponse,
            OrderStatus,
            DeliveryStatus,
            ItemKind,
            OrderSearch,
            OffsetLimitParams,
            OrderDto,
            OrderItemDto,
            SimpleOrderDto,
            OrderQueryDto,
            OrderItemQueryDto,
            OrderSimpleQueryDto,
            PlaceOrderRequest,
            PlaceOrderResponse,
            CancelOrderResponse,
            CreateItemRequest,
            CreateItemResponse,
            UpdateItemRequest,
        )
    ),
    tags(
        (name = "member", description = "Member API"),
        (name = "order", description = "Order API (collection fetch strategies)"),
        (name = "simple-order", description = "Order API (ToOne fetch strategies)"),
        (name = "item", description = "Item catalog API"),
    ),
    info(
        title = "JPA Shop Backend API",
        version = "1.0.0",
        description = "Shop REST API comparing relational fetch strategies"
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
