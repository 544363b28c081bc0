pub(crate) mod history;
pub(crate) mod store;
pub(crate) mod wizard;
