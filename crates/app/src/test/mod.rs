//! Test support.

mod helpers;

pub(crate) use context::TestContext;
pub(crate) use helpers::*;
