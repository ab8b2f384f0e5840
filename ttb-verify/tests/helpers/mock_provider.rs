//! Scripted OCR provider

use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use ttb_verify::ocr::OcrProvider;
use ttb_verify::{OcrSource, VerifyError, VerifyResult, WordObservation};

#[derive(Debug, Clone)]
pub enum ProviderBehavior {
    /// Return these words (source tags are rewritten to the requested slot)
    Words(Vec<WordObservation>),
    /// Fail every call with this message
    Fail(String),
    /// Sleep before answering with no words
    Hang(Duration),
}

/// Provider returning scripted output and recording call statistics
pub struct MockProvider {
    name: String,
    behavior: ProviderBehavior,
    delay: Duration,
    calls: AtomicUsize,
    active: AtomicUsize,
    peak: AtomicUsize,
}

impl MockProvider {
    pub fn new(name: &str, behavior: ProviderBehavior) -> Self {
        Self {
            name: name.to_string(),
            behavior,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            active: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    pub fn words(name: &str, words: Vec<WordObservation>) -> Self {
        Self::new(name, ProviderBehavior::Words(words))
    }

    /// Per-call latency, used to observe concurrency
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Highest number of overlapping calls seen
    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OcrProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn scan(&self, _image: &Path, source: OcrSource) -> VerifyResult<Vec<WordObservation>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let result = match &self.behavior {
            ProviderBehavior::Words(words) => Ok(words
                .iter()
                .cloned()
                .map(|mut w| {
                    w.source = source;
                    w
                })
                .collect()),
            ProviderBehavior::Fail(message) => Err(VerifyError::provider(&self.name, message)),
            ProviderBehavior::Hang(duration) => {
                tokio::time::sleep(*duration).await;
                Ok(Vec::new())
            }
        };

        self.active.fetch_sub(1, Ordering::SeqCst);
        result
    }
}
