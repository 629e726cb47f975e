//! Operation outcomes.
//!
//! What callers at the transport edge see: a value, a safe message, or the
//! fact that they cancelled.

use crate::domain::baskets::BasketsServiceError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Success(T),
    Failure { message: String },
    Cancelled,
}

impl<T> Outcome<T> {
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// The success value, if any.
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure { .. } | Self::Cancelled => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure { .. } | Self::Cancelled => None,
        }
    }

    /// The failure message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Failure { message } => Some(message.as_str()),
            Self::Success(_) | Self::Cancelled => None,
        }
    }

    /// Transform the success value, leaving failures and cancellation as-is.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Success(value) => Outcome::Success(f(value)),
            Self::Failure { message } => Outcome::Failure { message },
            Self::Cancelled => Outcome::Cancelled,
        }
    }
}

impl<T> From<Result<T, BasketsServiceError>> for Outcome<T> {
    fn from(result: Result<T, BasketsServiceError>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(error) if error.is_cancelled() => Self::Cancelled,
            Err(error) => Self::Failure {
                message: error.public_message(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use checkout::basket::DeltaError;

    use super::*;

    #[test]
    fn success_carries_value_only() {
        let outcome = Outcome::from(Ok::<_, BasketsServiceError>(42));

        assert!(outcome.is_success());
        assert_eq!(outcome.value(), Some(&42));
        assert_eq!(outcome.message(), None);
    }

    #[test]
    fn failure_carries_message_only() {
        let outcome = Outcome::<u32>::from(Err(BasketsServiceError::from(DeltaError::Empty)));

        assert!(!outcome.is_success());
        assert_eq!(outcome.value(), None);
        assert_eq!(
            outcome.message(),
            Some("Failed to update basket, did the request contain any items?")
        );
    }

    #[test]
    fn cancellation_is_not_a_failure() {
        let outcome = Outcome::<u32>::from(Err(BasketsServiceError::Cancelled));

        assert!(outcome.is_cancelled());
        assert_eq!(outcome.message(), None);
        assert_eq!(outcome.into_value(), None);
    }
}
