pub(crate) mod auth;
pub(crate) mod balance;
pub(crate) mod expenses;
pub(crate) mod income;
pub(crate) mod router;
pub(crate) mod savings;
pub(crate) mod summary;
