use sqlx::PgPool;

use crate::controllers::entry::EntryController;
use crate::controllers::expense::ExpenseController;
use crate::controllers::summary::SummaryController;
use crate::controllers::user::UserController;
use crate::core::config::AuthConfig;
use crate::core::error::ConfigError;
use crate::credential::postgres::PgCredentialStore;

#[derive(Clone, Debug)]
pub(crate) struct AppState {
    pub(crate) pool: PgPool,
    pub(crate) user_controller: UserController<PgCredentialStore>,
    pub(crate) expense_controller: ExpenseController,
    pub(crate) entry_controller: EntryController,
    pub(crate) summary_controller: SummaryController,
}

impl AppState {
    pub(crate) fn new(pool: PgPool, auth: &AuthConfig) -> Result<Self, ConfigError> {
        Ok(AppState {
            pool: pool.clone(),
            user_controller: UserController::new(PgCredentialStore::new(pool.clone()), auth)?,
            expense_controller: ExpenseController::new(pool.clone()),
            entry_controller: EntryController::new(pool.clone()),
            summary_controller: SummaryController::new(pool),
        })
    }
}
