use crate::callable::Callable;

/// The only error in the crate: no parameter list could be determined for a
/// callable-like input.
///
/// Raised by signature extraction and propagated unchanged through the
/// resolver. Missing dependencies, extra availability entries, and unusual
/// default values are all normal control flow, never errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("cannot determine a signature for {callable}")]
pub struct UnsupportedCallable {
    callable: Box<Callable>,
}

impl UnsupportedCallable {
    pub(crate) fn new(callable: Callable) -> Self {
        Self {
            callable: Box::new(callable),
        }
    }

    /// The offending input, kept for diagnostics.
    pub fn callable(&self) -> &Callable {
        &self.callable
    }
}
