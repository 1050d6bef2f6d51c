use crate::entities::member_entity as members;
use crate::models::*;
use crate::services::MemberService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/api/v1/members",
    tag = "member",
    responses(
        (status = 200, description = "会员实体列表 (直接暴露实体)")
    )
)]
pub async fn members_v1(member_service: web::Data<MemberService>) -> Result<HttpResponse> {
    match member_service.find_members().await {
        Ok(members) => Ok(HttpResponse::Ok().json(members)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/v2/members",
    tag = "member",
    responses(
        (status = 200, description = "会员名列表, 包在 data 字段中", body = Vec<MemberDto>)
    )
)]
pub async fn members_v2(member_service: web::Data<MemberService>) -> Result<HttpResponse> {
    match member_service.find_members().await {
        Ok(members) => {
            let collect: Vec<MemberDto> = members
                .into_iter()
                .map(|m| MemberDto { name: m.name })
                .collect();
            Ok(HttpResponse::Ok().json(ResultEnvelope::new(collect)))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/members",
    tag = "member",
    responses(
        (status = 200, description = "注册成功", body = CreateMemberResponse),
        (status = 400, description = "会员名为空", body = ApiError),
        (status = 409, description = "会员名已存在", body = ApiError)
    )
)]
pub async fn save_member_v1(
    member_service: web::Data<MemberService>,
    member: web::Json<members::Model>,
) -> Result<HttpResponse> {
    match member_service.join(member.into_inner()).await {
        Ok(id) => Ok(HttpResponse::Ok().json(CreateMemberResponse { id })),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/api/v2/members",
    tag = "member",
    request_body = CreateMemberRequest,
    responses(
        (status = 200, description = "注册成功", body = CreateMemberResponse),
        (status = 400, description = "会员名为空", body = ApiError),
        (status = 409, description = "会员名已存在", body = ApiError)
    )
)]
pub async fn save_member_v2(
    member_service: web::Data<MemberService>,
    request: web::Json<CreateMemberRequest>,
) -> Result<HttpResponse> {
    let member = members::Model {
        id: 0,
        name: request.into_inner().name,
        city: None,
        street: None,
        zipcode: None,
    };
    match member_service.join(member).await {
        Ok(id) => Ok(HttpResponse::Ok().json(CreateMemberResponse { id })),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/api/v2/members/{id}",
    tag = "member",
    params(
        ("id" = i64, Path, description = "会员ID")
    ),
    request_body = UpdateMemberRequest,
    responses(
        (status = 200, description = "修改成功", body = UpdateMemberResponse),
        (status = 404, description = "会员不存在", body = ApiError)
    )
)]
pub async fn update_member_v2(
    member_service: web::Data<MemberService>,
    path: web::Path<i64>,
    request: web::Json<UpdateMemberRequest>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    if let Err(e) = member_service.update(id, &request.name).await {
        return Ok(e.error_response());
    }
    match member_service.find_one(id).await {
        Ok(member) => Ok(HttpResponse::Ok().json(UpdateMemberResponse {
            id: member.id,
            name: member.name,
        })),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn member_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/v1/members")
            .route(web::get().to(members_v1))
            .route(web::post().to(save_member_v1)),
    )
    .service(
        web::resource("/api/v2/members")
            .route(web::get().to(members_v2))
            .route(web::post().to(save_member_v2)),
    )
    .route("/api/v2/members/{id}", web::put().to(update_member_v2));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use actix_web::{App, http::StatusCode, test};
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn test_save_and_list_members() {
        let db = setup_test_db().await.unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(MemberService::new(db)))
                .configure(member_config),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v2/members")
            .set_json(json!({ "name": "userA" }))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        assert!(created["id"].as_i64().is_some());

        let req = test::TestRequest::post()
            .uri("/api/v1/members")
            .set_json(json!({ "name": "userB", "city": "Jinju", "street": "2", "zipcode": "2222" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/api/v2/members").to_request();
        let listed: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed, json!({ "data": [{ "name": "userA" }, { "name": "userB" }] }));

        let req = test::TestRequest::get().uri("/api/v1/members").to_request();
        let entities: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(entities[1]["city"], "Jinju");
        assert!(entities[0]["id"].is_i64());
    }

    #[actix_web::test]
    async fn test_duplicate_member_conflict() {
        let db = setup_test_db().await.unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(MemberService::new(db)))
                .configure(member_config),
        )
        .await;

        for expected in [StatusCode::OK, StatusCode::CONFLICT] {
            let req = test::TestRequest::post()
                .uri("/api/v2/members")
                .set_json(json!({ "name": "userA" }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), expected);
        }
    }

    #[actix_web::test]
    async fn test_update_member() {
        let db = setup_test_db().await.unwrap();
        let id = MemberService::new(db.clone())
            .join(new_member("userA", "Seoul", "1", "1111"))
            .await
            .unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(MemberService::new(db)))
                .configure(member_config),
        )
        .await;

        let req = test::TestRequest::put()
            .uri(&format!("/api/v2/members/{id}"))
            .set_json(json!({ "name": "userC" }))
            .to_request();
        let updated: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated, json!({ "id": id, "name": "userC" }));

        let req = test::TestRequest::put()
            .uri("/api/v2/members/999")
            .set_json(json!({ "name": "userD" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
