//! Degrading detailed results to the simple success/failure contract.

use std::fmt::Display;

/// Collapse a detailed result into `Option<T>`, logging the failure.
///
/// ```rust,ignore
/// use govdoin::api::ResultExt;
///
/// let issues = client.fetch_issues().await.or_log("fetch issues");
/// ```
pub trait ResultExt<T> {
    fn or_log(self, context: &str) -> Option<T>;

    /// `true` on success; failures are logged.
    fn succeeded(self, context: &str) -> bool
    where
        Self: Sized,
    {
        self.or_log(context).is_some()
    }
}

impl<T, E: Display> ResultExt<T> for Result<T, E> {
    fn or_log(self, context: &str) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!(error = %e, "Error {}", context);
                None
            }
        }
    }
}
