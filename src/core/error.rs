use axum::BoxError;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Database migration error: {0}")]
    DatabaseMigration(#[from] sqlx::migrate::MigrateError),
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
    #[error("Signing secret must not be empty")]
    MissingSecret,
    #[error("Invalid bcrypt cost: {0}")]
    BcryptCost(u32),
    #[error("Token lifetime must be between 1 minute and 1 year, got {0} minutes")]
    TokenTtl(i64),
    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
    #[error("Invalid CORS origin: {0}")]
    CorsOrigin(#[from] axum::http::header::InvalidHeaderValue),
}

/// Reasons a token failed verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature is invalid")]
    SignatureInvalid,
    #[error("token has expired")]
    Expired,
}

/// Reasons a request could not be authenticated.
///
/// The variant is only ever written to the logs. Every variant produces the
/// same response so callers cannot tell which check failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("no bearer credential provided")]
    MissingCredential,
    #[error("invalid token: {0}")]
    InvalidToken(#[from] TokenError),
    #[error("token claims carry no usable subject")]
    MalformedClaims,
    #[error("token subject does not exist")]
    UnknownSubject,
    #[error("email or password did not match")]
    InvalidCredentials,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),
    #[error("Email already registered")]
    DuplicateEmail,
    #[error("Username already taken")]
    UsernameTaken,
    #[error("Invalid email")]
    InvalidEmail,
    #[error("Invalid username")]
    InvalidUsername,
    #[error("Invalid password")]
    InvalidPassword,
    #[error("Invalid date range: start_date cannot be after end_date")]
    InvalidDateRange,
    #[error("Invalid month: {0}")]
    InvalidMonth(String),
    #[error("Entry not found")]
    EntryNotFound,
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("Token expiry is out of range")]
    TokenExpiry,
    #[error("Blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::Auth(cause) => {
                tracing::warn!(%cause, "rejected unauthenticated request");

                return (
                    StatusCode::UNAUTHORIZED,
                    [(header::WWW_AUTHENTICATE, "Bearer")],
                    "Unauthorized",
                )
                    .into_response();
            }
            Error::DuplicateEmail => (StatusCode::BAD_REQUEST, "Email already registered"),
            Error::UsernameTaken => (StatusCode::BAD_REQUEST, "Username already taken"),
            Error::InvalidEmail => (StatusCode::BAD_REQUEST, "Invalid email"),
            Error::InvalidUsername => (StatusCode::BAD_REQUEST, "Invalid username"),
            Error::InvalidPassword => (StatusCode::BAD_REQUEST, "Invalid password"),
            Error::InvalidDateRange => (
                StatusCode::BAD_REQUEST,
                "Invalid date range: start_date cannot be after end_date",
            ),
            Error::InvalidMonth(_) => (StatusCode::BAD_REQUEST, "Invalid month"),
            Error::EntryNotFound => (StatusCode::NOT_FOUND, "Entry not found"),
            Error::Sql(_) => (StatusCode::INTERNAL_SERVER_ERROR, "SQL error"),
            Error::Bcrypt(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Bcrypt error"),
            Error::Jwt(_) | Error::TokenExpiry => {
                (StatusCode::INTERNAL_SERVER_ERROR, "JWT error")
            }
            Error::Join(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        tracing::error!("{:?}", self);

        (status, message).into_response()
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        Error::Auth(self).into_response()
    }
}

pub(crate) async fn handle_middleware_errors(err: BoxError) -> (StatusCode, &'static str) {
    tracing::error!("Unhandled error: {:?}", err);
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
}
