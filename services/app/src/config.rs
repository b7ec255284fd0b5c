/// Service configuration loaded from environment variables.
#[derive(Debug)]
pub struct AppConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3113). Env var: `APP_PORT`.
    pub app_port: u16,
    /// HS256 secret for access tokens.
    pub jwt_secret: String,
    /// Directory for stored profile pictures (default `data/profile_pics`).
    pub picture_dir: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            app_port: std::env::var("APP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3113),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            picture_dir: std::env::var("PICTURE_DIR")
                .unwrap_or_else(|_| "data/profile_pics".to_owned()),
        }
    }
}
