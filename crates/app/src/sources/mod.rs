//! Data Sources
//!
//! The outside world the basket service talks to: a keyed basket store, the
//! catalog of unit prices and the active promotions. Every call takes the
//! caller's [`CancellationToken`](tokio_util::sync::CancellationToken) and must
//! return [`SourceError::Cancelled`] or [`StoreError::Cancelled`] promptly once
//! it fires.

mod baskets;
mod catalog;
mod errors;
mod promotions;

pub use baskets::*;
pub use catalog::*;
pub use errors::*;
pub use promotions::*;
