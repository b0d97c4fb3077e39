use crate::{
    database::UserStore,
    models::{LoginRequest, LoginResponse, SignupRequest, UserDocument, UserInfo},
    utils::{error::AppError, jwt::TokenIssuer},
};
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;

/// Same message for unknown email and wrong password.
pub const INVALID_CREDENTIALS: &str = "invalid credentials";

pub struct AuthService {
    store: Arc<dyn UserStore>,
    tokens: TokenIssuer,
    hash_cost: u32,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, tokens: TokenIssuer, hash_cost: u32) -> Self {
        Self {
            store,
            tokens,
            hash_cost,
        }
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    // User registration. Returns the user type of the new account.
    pub async fn signup(&self, request: SignupRequest) -> Result<String, AppError> {
        // An empty email or contact number is never stored, so it can't collide
        if !request.email.is_empty() && self.store.find_by_email(&request.email).await?.is_some()
        {
            log::warn!("⚠️ Signup rejected, email already exists: {}", request.email);
            return Err(AppError::Conflict("email already exists".to_string()));
        }

        if !request.contact_number.is_empty()
            && self.store.contact_exists(&request.contact_number).await?
        {
            log::warn!(
                "⚠️ Signup rejected, contact number already exists: {}",
                request.contact_number
            );
            return Err(AppError::Conflict("contact number already exists".to_string()));
        }

        // bcrypt is CPU bound, keep it off the async workers
        let password = request.password.clone();
        let cost = self.hash_cost;
        let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;

        let user = UserDocument::from_signup(request, hashed);
        self.store.insert(&user).await?;

        log::info!("✅ User registered: {} ({})", user.email, user.user_type);
        Ok(user.user_type)
    }

    // User login. Returns the profile and the signed token.
    pub async fn login(&self, request: &LoginRequest) -> Result<(LoginResponse, String), AppError> {
        if request.email.is_empty() {
            log::warn!("❌ Login failed, no email given");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let user = match self.store.find_by_email(&request.email).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                log::warn!("❌ Login failed, unknown email: {}", request.email);
                return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
            }
            Err(e) => {
                log::error!("❌ Error finding user {}: {}", request.email, e);
                return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
            }
        };

        let password = request.password.clone();
        let stored_hash = user.password.clone();
        // A corrupt stored hash counts as a mismatch
        let valid = tokio::task::spawn_blocking(move || {
            bcrypt::verify(password, &stored_hash).unwrap_or(false)
        })
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;

        if !valid {
            log::warn!("❌ Login failed, wrong password: {}", request.email);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let token = self.tokens.issue(&user.email)?;

        Ok((LoginResponse::from(&user), token))
    }

    /// Looks up users by hex id. One malformed id fails the whole batch;
    /// ids without a match are simply absent from the result.
    pub async fn get_users_by_id(&self, ids: &[String]) -> Result<Vec<UserInfo>, AppError> {
        let object_ids = ids
            .iter()
            .map(|id| {
                ObjectId::parse_str(id).map_err(|_| {
                    log::warn!("Invalid ID format: {}", id);
                    AppError::Validation(format!("invalid ID format: {}", id))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let users = self.store.find_by_ids(&object_ids).await.map_err(|e| {
            log::error!("❌ Error finding users: {}", e);
            e
        })?;

        Ok(users.into_iter().map(UserInfo::from).collect())
    }
}
