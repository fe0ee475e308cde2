//! Error types for output resolution.

use core::error::Error;
use std::sync::Arc;

/// Boxed error type accepted from fallible transforms.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Errors an output can resolve to.
///
/// Every reader of a failed output observes the same error, so the type is
/// `Clone` and the underlying cause is held behind an `Arc`.
#[derive(Debug, Clone, thiserror::Error)]
pub enum OutputError {
    /// A user-supplied transform returned an error.
    #[error("transform failed: {0}")]
    TransformFailure(Arc<dyn Error + Send + Sync + 'static>),

    /// The producer of a deferred output was dropped without resolving it.
    #[error("output abandoned: its resolver was dropped before resolving")]
    Abandoned,
}

impl OutputError {
    /// Wraps any error as a [`TransformFailure`](Self::TransformFailure).
    #[must_use]
    pub fn transform(err: impl Into<BoxError>) -> Self {
        Self::TransformFailure(Arc::from(err.into()))
    }

    /// Returns the transform error if this is a [`TransformFailure`](Self::TransformFailure).
    #[must_use]
    pub fn transform_source(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        match self {
            Self::TransformFailure(err) => Some(err.as_ref()),
            Self::Abandoned => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("bad input: {0}")]
    struct BadInput(i32);

    #[test]
    fn transform_wraps_source() {
        let err = OutputError::transform(BadInput(3));
        assert_eq!(err.to_string(), "transform failed: bad input: 3");

        let source = err.transform_source().unwrap();
        assert!(source.downcast_ref::<BadInput>().is_some());
    }

    #[test]
    fn transform_accepts_strings() {
        let err = OutputError::transform("boom");
        assert_eq!(err.to_string(), "transform failed: boom");
    }

    #[test]
    fn clones_share_cause() {
        let err = OutputError::transform(BadInput(1));
        let copy = err.clone();
        match (err, copy) {
            (OutputError::TransformFailure(a), OutputError::TransformFailure(b)) => {
                assert!(Arc::ptr_eq(&a, &b));
            }
            _ => panic!("expected transform failures"),
        }
    }
}
