pub(crate) mod collect;
pub(crate) mod customize;
pub(crate) mod export;
pub(crate) mod info;
pub(crate) mod notify;
pub(crate) mod state;
