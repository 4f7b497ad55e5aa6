/// Sink for user-facing success and error notices.
pub trait Notifier: Send + Sync + std::fmt::Debug {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Renders notices as log events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(notice = "success", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::warn!(notice = "error", "{message}");
    }
}

/// Asks the user before a destructive action.
#[async_trait::async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Answers every prompt the same way.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

#[async_trait::async_trait]
impl Confirm for AutoConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        tracing::debug!(prompt, answer = self.0, "auto-confirm");
        self.0
    }
}
