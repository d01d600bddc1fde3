//! In-process model fakes for unit tests.

use crate::error::UpstreamError;
use crate::model::QaEntry;
use crate::openai::ModelClient;
use crate::prompts::PromptPair;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Model fake driven by a closure over the prompt; records every prompt it sees.
pub struct FnClient<F> {
    respond: F,
    calls: AtomicUsize,
    prompts: Mutex<Vec<PromptPair>>,
}

impl<F> FnClient<F>
where
    F: Fn(&PromptPair) -> Result<String, UpstreamError> + Send + Sync,
{
    pub fn new(respond: F) -> Self {
        Self {
            respond,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<PromptPair> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl<F> ModelClient for FnClient<F>
where
    F: Fn(&PromptPair) -> Result<String, UpstreamError> + Send + Sync,
{
    async fn complete(
        &self,
        prompt: &PromptPair,
        _max_tokens: u32,
        _temperature: f32,
    ) -> Result<String, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.clone());
        }
        (self.respond)(prompt)
    }
}

/// Entries embedded in a QA user prompt.
pub fn qa_entries(prompt: &PromptPair) -> Vec<QaEntry> {
    prompt
        .user
        .rsplit("Entries: ")
        .next()
        .and_then(|json| serde_json::from_str(json).ok())
        .unwrap_or_default()
}

/// A QA model that returns every entry unchanged.
pub fn echo_qa(prompt: &PromptPair) -> Result<String, UpstreamError> {
    serde_json::to_string(&qa_entries(prompt)).map_err(|e| UpstreamError::Malformed(e.to_string()))
}
