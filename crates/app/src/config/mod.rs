//! CLI configuration

pub(crate) mod observability;
pub(crate) mod store;

pub(crate) use observability::{LogFormat, LoggingConfig};
pub(crate) use store::StoreConfig;
