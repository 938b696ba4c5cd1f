use axum::extract::{Extension, Json, Path, State};
use tracing::instrument;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::response::MonthlySummary;
use crate::types::user::AuthenticatedIdentity;

#[instrument(skip_all, fields(user_id = user.id))]
pub(crate) async fn monthly(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedIdentity>,
) -> Result<Json<Vec<MonthlySummary>>, Error> {
    Ok(Json(state.summary_controller.monthly(user.id).await?))
}

#[instrument(skip_all, fields(user_id = user.id, month = %month))]
pub(crate) async fn month(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedIdentity>,
    Path(month): Path<String>,
) -> Result<Json<MonthlySummary>, Error> {
    Ok(Json(state.summary_controller.month(user.id, &month).await?))
}
