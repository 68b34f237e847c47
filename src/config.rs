use std::env;

pub const GOOGLE_BOOKS_URL: &str = "https://www.googleapis.com/books/v1";

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub google_books_url: String,
    pub google_books_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://readmark.db?mode=rwc".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(Vec::new),
            google_books_url: env::var("GOOGLE_BOOKS_URL")
                .unwrap_or_else(|_| GOOGLE_BOOKS_URL.to_string()),
            google_books_api_key: env::var("GOOGLE_BOOKS_API_KEY").ok(),
        }
    }
}
