//! Error types shared by the real and mock clients
//!
//! The contract is structural parity: both clients surface the same error
//! types through the same trait methods, so calling code written against one
//! works unmodified against the other. Recoverable conditions come back as
//! `Err` values; nothing in the client surface panics.

/// Auth capability failures. Always recoverable; never thrown past the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Sign-in rejected (empty or unrecognized credentials)
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Transport failure talking to the real backend
    #[error("auth request failed: {0}")]
    Backend(String),
}

impl AuthError {
    /// The human-readable message carried by this error
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidCredentials(msg) | Self::Backend(msg) => msg,
        }
    }
}

/// Table capability failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// `single()` matched zero rows
    #[error("no rows found in {table}")]
    NotFound {
        /// Table the query ran against
        table: String,
    },

    /// `single()` / `maybe_single()` matched more than one row
    #[error("expected one row in {table}, found {count}")]
    MultipleRows {
        /// Table the query ran against
        table: String,
        /// How many rows actually matched
        count: usize,
    },

    /// Transport or server failure on the real backend
    #[error("query failed: {0}")]
    Backend(String),
}

/// Gateway-level failures around client construction and selection.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Real-client path selected but credentials are absent or placeholders.
    /// A deployment error, fatal at construction; fixed by redeploying with
    /// correct configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Auth failure surfaced through a gateway convenience call
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Query failure surfaced through a gateway convenience call
    #[error(transparent)]
    Query(#[from] QueryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_error_message_is_non_empty() {
        let err = AuthError::InvalidCredentials("email and password are required".into());
        assert!(!err.message().is_empty());
        assert!(err.to_string().contains("invalid credentials"));
    }

    #[test]
    fn query_error_display() {
        let err = QueryError::NotFound {
            table: "profiles".into(),
        };
        assert_eq!(err.to_string(), "no rows found in profiles");

        let err = QueryError::MultipleRows {
            table: "profiles".into(),
            count: 3,
        };
        assert_eq!(err.to_string(), "expected one row in profiles, found 3");
    }

    #[test]
    fn gateway_error_wraps_auth() {
        let err: GatewayError = AuthError::InvalidCredentials("nope".into()).into();
        assert!(matches!(err, GatewayError::Auth(_)));
    }
}
