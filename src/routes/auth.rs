use axum::extract::{Extension, Form, Json, State};
use axum::http::StatusCode;
use tracing::instrument;

use crate::controllers::user::UserController;
use crate::core::error::Error;
use crate::credential::store::CredentialStore;
use crate::types::request::{LoginRequest, RegisterRequest, TokenForm};
use crate::types::response::{LoginResponse, Message, UserResponse};
use crate::types::user::AuthenticatedIdentity;

#[instrument(skip_all)]
pub(crate) async fn register<S: CredentialStore>(
    State(users): State<UserController<S>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), Error> {
    let user = users.register(request).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

#[instrument(skip_all)]
pub(crate) async fn login<S: CredentialStore>(
    State(users): State<UserController<S>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, Error> {
    Ok(Json(users.login(request).await?))
}

/// Password-flow login for OAuth2 clients; the form's `username` is the email.
#[instrument(skip_all)]
pub(crate) async fn token<S: CredentialStore>(
    State(users): State<UserController<S>>,
    Form(form): Form<TokenForm>,
) -> Result<Json<LoginResponse>, Error> {
    Ok(Json(users.login(form.into()).await?))
}

#[instrument(skip_all, fields(user_id = identity.id))]
pub(crate) async fn protected(
    Extension(identity): Extension<AuthenticatedIdentity>,
) -> Json<Message> {
    Json(Message {
        message: format!("Hello, {}!", identity.username),
    })
}
