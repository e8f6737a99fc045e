use crate::*;
use std::net::SocketAddr;

/// Holds the env-derived configuration, initialized on first access
pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);

#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
}

impl Config {
    fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8000);
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_owned());
        Self { port, database_url }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
