use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Volunteer Service API",
        version = "1.0.0",
        description = "Todo tasks with volunteer sign-ups, and user accounts for organisations and volunteers.\n\n**Authentication:** login sets an `auth_token` cookie. Todo and user routes only check it when the service runs with `REQUIRE_AUTH=true`."
    ),
    paths(
        // Health
        crate::api::health::health_check,

        // Todos
        crate::api::todos::get_todos,
        crate::api::todos::get_todo_by_id,
        crate::api::todos::get_todos_by_org,
        crate::api::todos::get_todos_by_vol,
        crate::api::todos::create_todo,
        crate::api::todos::update_todo,
        crate::api::todos::delete_todo,

        // Auth & users
        crate::api::auth::signup,
        crate::api::auth::login,
        crate::api::users::get_users_by_id,
    ),
    components(
        schemas(
            crate::api::MessageResponse,
            crate::models::Todo,
            crate::models::Volunteer,
            crate::models::SignupRequest,
            crate::models::SignupResponse,
            crate::models::LoginRequest,
            crate::models::LoginResponse,
            crate::models::UserInfo,
        )
    ),
    tags(
        (name = "Health", description = "Liveness check."),
        (name = "Todos", description = "Volunteer tasks: CRUD plus listing by organisation or volunteer type."),
        (name = "Auth", description = "Signup and login with email and password."),
        (name = "Users", description = "Bulk user lookup by id."),
    )
)]
pub struct ApiDoc;
