use axum::extract::{Extension, Json, State};
use tracing::instrument;

use crate::controllers::entry::EntryKind;
use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::request::NewEntry;
use crate::types::response::Entry;
use crate::types::user::AuthenticatedIdentity;

#[instrument(skip_all, fields(user_id = user.id))]
pub(crate) async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedIdentity>,
) -> Result<Json<Vec<Entry>>, Error> {
    Ok(Json(
        state.entry_controller.list(EntryKind::Saving, user.id).await?,
    ))
}

#[instrument(skip_all, fields(user_id = user.id))]
pub(crate) async fn post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedIdentity>,
    Json(params): Json<NewEntry>,
) -> Result<Json<Entry>, Error> {
    Ok(Json(
        state
            .entry_controller
            .create(EntryKind::Saving, user.id, params)
            .await?,
    ))
}
