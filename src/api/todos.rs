use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse};

use crate::{
    api::{first_query_value, message, MessageResponse},
    models::Todo,
    services::TodoService,
};

#[utoipa::path(
    get,
    path = "/api/v1/todos",
    tag = "Todos",
    responses(
        (status = 200, description = "All todos", body = Vec<Todo>),
        (status = 500, description = "Store error", body = MessageResponse)
    )
)]
pub async fn get_todos(service: web::Data<TodoService>) -> HttpResponse {
    log::info!("📋 GET /todos");

    match service.list_all().await {
        Ok(todos) => HttpResponse::Ok().json(todos),
        Err(e) => {
            log::error!("❌ Error retrieving todos: {}", e);
            message(StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving todos")
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/todos/{id}",
    tag = "Todos",
    params(("id" = String, Path, description = "Todo id (ObjectId hex)")),
    responses(
        (status = 200, description = "The todo", body = Todo),
        (status = 404, description = "Malformed id or no such todo", body = MessageResponse)
    )
)]
pub async fn get_todo_by_id(
    service: web::Data<TodoService>,
    id: web::Path<String>,
) -> HttpResponse {
    log::info!("🔍 GET /todos/{}", id);

    match service.get_by_id(&id).await {
        Ok(todo) => HttpResponse::Ok().json(todo),
        Err(e) => {
            log::warn!("⚠️ {}", e);
            message(StatusCode::NOT_FOUND, "Todo not found")
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/todos/org",
    tag = "Todos",
    params(("orgName" = String, Query, description = "Exact organisation name; the first value is used")),
    responses(
        (status = 200, description = "Todos of the organisation", body = Vec<Todo>),
        (status = 400, description = "Missing orgName", body = MessageResponse),
        (status = 500, description = "Store error", body = MessageResponse)
    )
)]
pub async fn get_todos_by_org(service: web::Data<TodoService>, req: HttpRequest) -> HttpResponse {
    let org_name = match first_query_value(req.query_string(), "orgName") {
        Some(org_name) => org_name,
        None => return message(StatusCode::BAD_REQUEST, "Missing 'orgName' query parameter"),
    };

    log::info!("📋 GET /todos/org - orgName: {}", org_name);

    match service.list_by_organisation(&org_name).await {
        Ok(todos) => HttpResponse::Ok().json(todos),
        Err(e) => {
            log::error!("❌ Error retrieving todos by organisation name: {}", e);
            message(StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving todos")
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/todos/vol",
    tag = "Todos",
    params(("volType" = String, Query, description = "Exact volunteer type; the first value is used")),
    responses(
        (status = 200, description = "Todos for the volunteer type", body = Vec<Todo>),
        (status = 400, description = "Missing volType", body = MessageResponse),
        (status = 500, description = "Store error", body = MessageResponse)
    )
)]
pub async fn get_todos_by_vol(service: web::Data<TodoService>, req: HttpRequest) -> HttpResponse {
    let vol_type = match first_query_value(req.query_string(), "volType") {
        Some(vol_type) => vol_type,
        None => return message(StatusCode::BAD_REQUEST, "Missing 'volType' query parameter"),
    };

    log::info!("📋 GET /todos/vol - volType: {}", vol_type);

    match service.list_by_volunteer_type(&vol_type).await {
        Ok(todos) => HttpResponse::Ok().json(todos),
        Err(e) => {
            log::error!("❌ Error retrieving todos by volunteer type: {}", e);
            message(StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving todos")
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/todos/create",
    tag = "Todos",
    request_body = Todo,
    responses(
        (status = 200, description = "Created", body = MessageResponse),
        (status = 304, description = "Store error", body = MessageResponse),
        (status = 400, description = "Body is not a todo", body = MessageResponse)
    )
)]
pub async fn create_todo(
    service: web::Data<TodoService>,
    body: Result<web::Json<Todo>, actix_web::Error>,
) -> HttpResponse {
    let entry = match body {
        Ok(entry) => entry.into_inner(),
        Err(e) => {
            log::warn!("⚠️ POST /todos/create - bad body: {}", e);
            return message(StatusCode::BAD_REQUEST, "Error decoding request");
        }
    };

    log::info!("📝 POST /todos/create - task: {}", entry.task);

    match service.insert(entry).await {
        Ok(_) => message(StatusCode::OK, "Successfully created todo"),
        Err(_) => message(StatusCode::NOT_MODIFIED, "Error creating todo"),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/todos/update/{id}",
    tag = "Todos",
    params(("id" = String, Path, description = "Todo id (ObjectId hex)")),
    request_body = Todo,
    responses(
        (status = 200, description = "Updated", body = MessageResponse),
        (status = 400, description = "Body is not a todo", body = MessageResponse),
        (status = 500, description = "Malformed id or store error", body = MessageResponse)
    )
)]
pub async fn update_todo(
    service: web::Data<TodoService>,
    id: web::Path<String>,
    body: Result<web::Json<Todo>, actix_web::Error>,
) -> HttpResponse {
    let entry = match body {
        Ok(entry) => entry.into_inner(),
        Err(e) => {
            log::warn!("⚠️ PUT /todos/update/{} - bad body: {}", id, e);
            return message(StatusCode::BAD_REQUEST, "Error decoding request");
        }
    };

    log::info!("🔧 PUT /todos/update/{}", id);

    match service.update(&id, entry).await {
        Ok(_) => message(StatusCode::OK, "Successfully updated todo"),
        Err(e) => message(StatusCode::INTERNAL_SERVER_ERROR, e.message()),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/todos/delete/{id}",
    tag = "Todos",
    params(("id" = String, Path, description = "Todo id (ObjectId hex)")),
    responses(
        (status = 200, description = "Deleted, or nothing matched", body = MessageResponse),
        (status = 304, description = "Malformed id or store error", body = MessageResponse)
    )
)]
pub async fn delete_todo(service: web::Data<TodoService>, id: web::Path<String>) -> HttpResponse {
    log::info!("🗑️  DELETE /todos/delete/{}", id);

    match service.delete(&id).await {
        Ok(()) => message(StatusCode::OK, "Successfully deleted todo"),
        Err(e) => {
            log::warn!("⚠️ {}", e);
            message(StatusCode::NOT_MODIFIED, "Error deleting todo")
        }
    }
}
