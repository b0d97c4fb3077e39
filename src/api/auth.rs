use actix_web::{cookie::Cookie, http::StatusCode, web, HttpResponse};

use crate::{
    middleware::auth::AUTH_COOKIE,
    models::{LoginRequest, LoginResponse, SignupRequest, SignupResponse},
    services::AuthService,
    utils::{error::AppError, jwt::TOKEN_TTL_HOURS},
};

fn error_body(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({ "error": message }))
}

#[utoipa::path(
    post,
    path = "/api/v1/signup",
    tag = "Auth",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created", body = SignupResponse),
        (status = 400, description = "Invalid request body"),
        (status = 409, description = "Email or contact number already exists")
    )
)]
pub async fn signup(
    service: web::Data<AuthService>,
    body: Result<web::Json<SignupRequest>, actix_web::Error>,
) -> HttpResponse {
    let request = match body {
        Ok(request) => request.into_inner(),
        Err(_) => return error_body(StatusCode::BAD_REQUEST, "Invalid request body"),
    };

    log::info!("📝 POST /signup - email: {}", request.email);

    match service.signup(request).await {
        Ok(user_type) => HttpResponse::Ok().json(SignupResponse { user_type }),
        Err(e) => {
            log::warn!("❌ Signup failed: {}", e);
            error_body(StatusCode::CONFLICT, e.message())
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful; token set in the auth_token cookie", body = LoginResponse),
        (status = 400, description = "Invalid request body"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    service: web::Data<AuthService>,
    body: Result<web::Json<LoginRequest>, actix_web::Error>,
) -> HttpResponse {
    let request = match body {
        Ok(request) => request.into_inner(),
        Err(_) => return error_body(StatusCode::BAD_REQUEST, "Invalid request body"),
    };

    log::info!("🔐 POST /login - email: {}", request.email);

    match service.login(&request).await {
        Ok((profile, token)) => {
            log::info!("✅ Login successful: {}", request.email);

            let cookie = Cookie::build(AUTH_COOKIE, token)
                .http_only(true)
                .secure(true)
                .path("/")
                .max_age(actix_web::cookie::time::Duration::hours(TOKEN_TTL_HOURS))
                .finish();

            HttpResponse::Ok().cookie(cookie).json(profile)
        }
        Err(e @ AppError::Unauthorized(_)) => error_body(StatusCode::UNAUTHORIZED, e.message()),
        Err(e) => {
            log::error!("❌ Login error for {}: {}", request.email, e);
            error_body(StatusCode::INTERNAL_SERVER_ERROR, e.message())
        }
    }
}
