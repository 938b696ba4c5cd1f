use axum::extract::{Extension, Json, Path, Query, State};
use axum::http::StatusCode;
use tracing::instrument;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::request::{CategoryRange, DateRange, NewExpense};
use crate::types::response::{CategoryExpenses, CategorySummary, Expense, ExpenseSummary};
use crate::types::user::AuthenticatedIdentity;

#[instrument(skip_all, fields(user_id = user.id))]
pub(crate) async fn get_all(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedIdentity>,
) -> Result<Json<Vec<Expense>>, Error> {
    Ok(Json(state.expense_controller.list(user.id).await?))
}

#[instrument(skip_all, fields(user_id = user.id))]
pub(crate) async fn post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedIdentity>,
    Json(params): Json<NewExpense>,
) -> Result<Json<Expense>, Error> {
    let expense = state.expense_controller.create(user.id, params).await?;

    tracing::info!(expense_id = expense.id, "created expense");

    Ok(Json(expense))
}

#[instrument(skip_all, fields(user_id = user.id))]
pub(crate) async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedIdentity>,
    Path(id): Path<i32>,
) -> Result<Json<Expense>, Error> {
    Ok(Json(state.expense_controller.get(user.id, id).await?))
}

#[instrument(skip_all, fields(user_id = user.id))]
pub(crate) async fn put(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedIdentity>,
    Path(id): Path<i32>,
    Json(params): Json<NewExpense>,
) -> Result<Json<Expense>, Error> {
    let expense = state.expense_controller.update(user.id, id, params).await?;

    tracing::info!(expense_id = id, "updated expense");

    Ok(Json(expense))
}

#[instrument(skip_all, fields(user_id = user.id))]
pub(crate) async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedIdentity>,
    Path(id): Path<i32>,
) -> Result<StatusCode, Error> {
    state.expense_controller.delete(user.id, id).await?;

    tracing::info!(expense_id = id, "deleted expense");

    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip_all, fields(user_id = user.id))]
pub(crate) async fn by_date(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedIdentity>,
    Query(range): Query<DateRange>,
) -> Result<Json<ExpenseSummary>, Error> {
    Ok(Json(state.expense_controller.by_date(user.id, range).await?))
}

#[instrument(skip_all, fields(user_id = user.id))]
pub(crate) async fn by_date_body(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedIdentity>,
    Json(range): Json<DateRange>,
) -> Result<Json<ExpenseSummary>, Error> {
    Ok(Json(state.expense_controller.by_date(user.id, range).await?))
}

#[instrument(skip_all, fields(user_id = user.id))]
pub(crate) async fn all_category(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedIdentity>,
    Query(range): Query<DateRange>,
) -> Result<Json<CategorySummary>, Error> {
    Ok(Json(
        state.expense_controller.category_totals(user.id, range).await?,
    ))
}

#[instrument(skip_all, fields(user_id = user.id))]
pub(crate) async fn by_category(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedIdentity>,
    Json(range): Json<CategoryRange>,
) -> Result<Json<CategoryExpenses>, Error> {
    Ok(Json(state.expense_controller.by_category(user.id, range).await?))
}
