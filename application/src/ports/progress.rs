//! Progress notification port
//!
//! Lets the presentation layer show a waiting indicator while a completion
//! request is outstanding.

/// Callback for the lifecycle of a single assistant request
pub trait ProgressNotifier: Send + Sync {
    /// Called right before the request is sent
    fn on_request_start(&self);

    /// Called when the request finished, successfully or not
    fn on_request_complete(&self, success: bool);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_request_start(&self) {}
    fn on_request_complete(&self, _success: bool) {}
}
