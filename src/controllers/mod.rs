pub(crate) mod entry;
pub(crate) mod expense;
pub(crate) mod summary;
pub(crate) mod user;
