use thiserror::Error;

/// Signing and recovery failures.
#[derive(Debug, Error)]
pub enum SigningError {
    #[error("invalid private scalar: {0}")]
    InvalidPrivateScalar(String),

    #[error("signing failed: {0}")]
    SignatureFailed(String),

    #[error("signature recovery failed: {0}")]
    RecoveryFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_detail() {
        let err = SigningError::InvalidPrivateScalar("scalar is zero".into());
        assert_eq!(err.to_string(), "invalid private scalar: scalar is zero");

        let err = SigningError::RecoveryFailed("no candidate matched".into());
        assert_eq!(err.to_string(), "signature recovery failed: no candidate matched");
    }
}
