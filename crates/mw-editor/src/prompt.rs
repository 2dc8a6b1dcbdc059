use std::future::Future;

use mw_core::registry::normalize_reference_id;

/// Asks the author for an item or character id.
///
/// `None` means the author cancelled; nothing is changed in that case.
pub trait IdPrompt {
    /// Show `label` and wait for an answer.
    fn ask(&self, label: &str) -> impl Future<Output = Option<String>> + Send;
}

/// A prompt that always gives the same answer. Used for scripted sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CannedAnswer(pub Option<String>);

impl CannedAnswer {
    /// Answer with `id`.
    pub fn id(id: impl Into<String>) -> Self {
        Self(Some(id.into()))
    }

    /// Cancel every prompt.
    pub fn cancel() -> Self {
        Self(None)
    }
}

impl IdPrompt for CannedAnswer {
    async fn ask(&self, _label: &str) -> Option<String> {
        self.0.clone()
    }
}

/// Ask `prompt` and normalise the answer. Blank answers count as cancelled.
pub async fn ask_id(prompt: &impl IdPrompt, label: &str) -> Option<String> {
    let raw = prompt.ask(label).await?;
    normalize_reference_id(&raw)
}
