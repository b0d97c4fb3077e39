use actix_web::{HttpResponse, Responder};

use crate::api::MessageResponse;

#[utoipa::path(
    get,
    path = "/api/v1/healthcheck",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up", body = MessageResponse)
    )
)]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(MessageResponse {
        msg: "Health Check".to_string(),
        code: 200,
    })
}
