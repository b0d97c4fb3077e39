use std::env;

pub const DEFAULT_JWT_SECRET: &str = "your-secret-key";

/// Runtime settings, read from the environment (after `.env` is loaded).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mongodb_uri: String,
    pub jwt_secret: String,
    pub bcrypt_cost: u32,
    /// Verify `auth_token` on the todo and user routes
    pub require_auth: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let mongodb_uri =
            lookup("MONGODB_URI").unwrap_or_else(|| "mongodb://localhost:27017".to_string());
        let jwt_secret = lookup("JWT_SECRET").unwrap_or_else(|| DEFAULT_JWT_SECRET.to_string());
        let bcrypt_cost = lookup("BCRYPT_COST")
            .and_then(|c| c.parse().ok())
            .unwrap_or(bcrypt::DEFAULT_COST);
        let require_auth = lookup("REQUIRE_AUTH")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            host,
            port,
            mongodb_uri,
            jwt_secret,
            bcrypt_cost,
            require_auth,
        }
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
