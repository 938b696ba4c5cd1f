use axum::extract::{Extension, Json, State};
use tracing::instrument;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::response::Balance;
use crate::types::user::AuthenticatedIdentity;

#[instrument(skip_all, fields(user_id = user.id))]
pub(crate) async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedIdentity>,
) -> Result<Json<Balance>, Error> {
    Ok(Json(state.summary_controller.balance(user.id).await?))
}
