//! Recognition providers: the pluggable "what part is this?" backend.

use crate::model::PartIdentification;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Delay the fixed provider waits before answering.
pub const DEFAULT_ANALYSIS_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecognitionError {
    #[error("image is empty")]
    EmptyImage,
    #[error("part not recognized: {0}")]
    Unrecognized(String),
    #[error("recognition backend failed: {0}")]
    Backend(String),
}

/// Identifies a car part from the raw bytes of a photo.
#[async_trait]
pub trait RecognitionProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn recognize(&self, image: &[u8]) -> Result<PartIdentification, RecognitionError>;
}

/// Answers every request with the same identification after a fixed delay.
#[derive(Debug, Clone)]
pub struct FixedProvider {
    delay: Duration,
    answer: PartIdentification,
}

impl FixedProvider {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            answer: oil_filter(),
        }
    }

    pub fn with_answer(mut self, answer: PartIdentification) -> Self {
        self.answer = answer;
        self
    }
}

impl Default for FixedProvider {
    fn default() -> Self {
        Self::new(DEFAULT_ANALYSIS_DELAY)
    }
}

#[async_trait]
impl RecognitionProvider for FixedProvider {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn recognize(&self, _image: &[u8]) -> Result<PartIdentification, RecognitionError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.answer.clone())
    }
}

/// The identification the fixed provider reports.
pub fn oil_filter() -> PartIdentification {
    PartIdentification::new(
        "Масляный фильтр",
        "OF-4521-MNN",
        ["Honda Accord", "Honda Civic", "Acura TLX"],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn fixed_provider_waits_then_answers_regardless_of_input() {
        let provider = FixedProvider::default();
        let start = Instant::now();

        let a = provider.recognize(b"first photo").await.unwrap();
        let b = provider.recognize(&[]).await.unwrap();

        assert_eq!(a, oil_filter());
        assert_eq!(a, b);
        assert!(start.elapsed() >= DEFAULT_ANALYSIS_DELAY * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn custom_answer_replaces_the_oil_filter() {
        let answer = PartIdentification::new("Свеча зажигания", "SP-0001", ["Lada Vesta"]);
        let provider = FixedProvider::new(Duration::ZERO).with_answer(answer.clone());
        assert_eq!(provider.recognize(b"x").await, Ok(answer));
    }
}
