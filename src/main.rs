mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::{Config, DEFAULT_JWT_SECRET},
    database::{MongoDB, MongoTodoStore, MongoUserStore},
    utils::jwt::TokenIssuer,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();

    log::info!("🚀 Starting Volunteer Service...");
    log::info!("📊 Database: {}", config.mongodb_uri);

    if config.jwt_secret == DEFAULT_JWT_SECRET {
        log::warn!("⚠️  JWT_SECRET not set, using the built-in development key");
    }

    let db = match MongoDB::new(&config.mongodb_uri).await {
        Ok(db) => db,
        Err(e) => {
            log::error!("❌ Failed to connect to MongoDB: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
        }
    };

    log::info!("✅ MongoDB connected successfully ({})", db.database().name());

    let state = api::AppState::new(
        Arc::new(MongoTodoStore::new(db.clone())),
        Arc::new(MongoUserStore::new(db.clone())),
        TokenIssuer::new(config.jwt_secret.clone()),
        config.bcrypt_cost,
        config.require_auth,
    );

    if config.require_auth {
        log::info!("🔒 Token verification enabled on /todos and /users");
    }

    let (host, port) = config.bind_address();
    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin_fn(|origin, _req_head| {
                origin
                    .to_str()
                    .map(|o| o.starts_with("http://") || o.starts_with("https://"))
                    .unwrap_or(false)
            })
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                header::ACCEPT,
                header::AUTHORIZATION,
                header::CONTENT_TYPE,
                header::HeaderName::from_static("x-csrf-token"),
            ])
            .expose_headers(vec![header::LINK])
            .supports_credentials()
            .max_age(300);

        let openapi = api::swagger::ApiDoc::openapi();
        let state = state.clone();

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi))
            .configure(|cfg| api::configure(cfg, &state))
    })
    .bind((host, port))?
    .run();

    let result = server.await;

    log::info!("🛑 Server stopped, closing MongoDB connections");
    db.client().clone().shutdown().await;

    result
}
