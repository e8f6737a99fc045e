use crate::*;

/// Basic Result alias with [`enum@Error`]
pub type Result<T = (), E = Error> = std::result::Result<T, E>;

/// Utility for type inference that allows using `?` operator in closure handlers
pub const OK: Result = Result::Ok(());

use thiserror::Error;
/// Error type used across the codebase, on both sides of the RPC boundary
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(String),
    #[error("todo with id {0} not found")]
    NotFound(i64),
    /// Remote call rejected with a status the client could not map back
    #[error("rpc failure: {0}")]
    Rpc(String),
    #[error(transparent)]
    Db(#[from] sqlx::Error),
    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error(transparent)]
    Env(#[from] std::env::VarError),
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": msg })),
            )
                .into_response(),
            Error::NotFound(id) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": format!("todo with id {id} not found"), "id": id })),
            )
                .into_response(),
            _ => {
                error!("{self}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
