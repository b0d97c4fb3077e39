pub mod auth;
pub mod health;
pub mod swagger;
pub mod todos;
pub mod users;

use actix_web::{http::StatusCode, middleware::Condition, web, HttpResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    database::{TodoStore, UserStore},
    middleware::AuthMiddleware,
    services::{AuthService, TodoService},
    utils::jwt::TokenIssuer,
};

/// Body shared by the health check and every todo endpoint
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, utoipa::ToSchema)]
pub struct MessageResponse {
    pub msg: String,
    pub code: u16,
}

pub(crate) fn message(status: StatusCode, msg: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(MessageResponse {
        msg: msg.into(),
        code: status.as_u16(),
    })
}

/// Every value of `key` in a raw query string, percent-decoded, in order.
/// Present-but-empty values (`id=`) are kept.
pub(crate) fn query_values(query: &str, key: &str) -> Vec<String> {
    let decode = |raw: &str| {
        urlencoding::decode(&raw.replace('+', " "))
            .ok()
            .map(|v| v.into_owned())
    };

    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            if decode(k)? != key {
                return None;
            }
            decode(v)
        })
        .collect()
}

/// First value of `key`, `None` when absent or empty.
pub(crate) fn first_query_value(query: &str, key: &str) -> Option<String> {
    query_values(query, key)
        .into_iter()
        .next()
        .filter(|v| !v.is_empty())
}

/// Services shared by every worker.
#[derive(Clone)]
pub struct AppState {
    pub todos: web::Data<TodoService>,
    pub auth: web::Data<AuthService>,
    pub require_auth: bool,
}

impl AppState {
    pub fn new(
        todo_store: Arc<dyn TodoStore>,
        user_store: Arc<dyn UserStore>,
        tokens: TokenIssuer,
        bcrypt_cost: u32,
        require_auth: bool,
    ) -> Self {
        Self {
            todos: web::Data::new(TodoService::new(todo_store)),
            auth: web::Data::new(AuthService::new(user_store, tokens, bcrypt_cost)),
            require_auth,
        }
    }
}

/// Registers the `/api/v1` routes.
pub fn configure(cfg: &mut web::ServiceConfig, state: &AppState) {
    let tokens = state.auth.tokens().clone();

    cfg.app_data(state.todos.clone())
        .app_data(state.auth.clone())
        .service(
            web::scope("/api/v1")
                .route("/healthcheck", web::get().to(health::health_check))
                .route("/signup", web::post().to(auth::signup))
                .route("/login", web::post().to(auth::login))
                .service(
                    web::resource("/users")
                        .wrap(Condition::new(
                            state.require_auth,
                            AuthMiddleware::new(tokens.clone()),
                        ))
                        .route(web::get().to(users::get_users_by_id)),
                )
                .service(
                    web::scope("/todos")
                        .wrap(Condition::new(state.require_auth, AuthMiddleware::new(tokens)))
                        .route("", web::get().to(todos::get_todos))
                        .route("/org", web::get().to(todos::get_todos_by_org))
                        .route("/vol", web::get().to(todos::get_todos_by_vol))
                        .route("/create", web::post().to(todos::create_todo))
                        .route("/update/{id}", web::put().to(todos::update_todo))
                        .route("/delete/{id}", web::delete().to(todos::delete_todo))
                        // Must stay last: it would shadow /org and /vol
                        .route("/{id}", web::get().to(todos::get_todo_by_id)),
                ),
        );
}
