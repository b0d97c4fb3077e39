use actix_web::{web, HttpRequest, HttpResponse};

use crate::{api::query_values, models::UserInfo, services::AuthService};

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    params(("id" = Vec<String>, Query, description = "User id (ObjectId hex), repeatable")),
    responses(
        (status = 200, description = "Matching users; unknown ids are omitted", body = Vec<UserInfo>),
        (status = 400, description = "No id given"),
        (status = 404, description = "Malformed id or store error")
    )
)]
pub async fn get_users_by_id(service: web::Data<AuthService>, req: HttpRequest) -> HttpResponse {
    let ids = query_values(req.query_string(), "id");

    if ids.is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Missing 'id' query parameter"
        }));
    }

    log::info!("👥 GET /users - {} id(s)", ids.len());

    match service.get_users_by_id(&ids).await {
        Ok(users) => HttpResponse::Ok().json(users),
        Err(e) => HttpResponse::NotFound().json(serde_json::json!({
            "error": e.message()
        })),
    }
}
