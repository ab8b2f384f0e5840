//! Label verification pipeline
//!
//! ```text
//! image ─┬─ provider A ─┐
//!        └─ provider B ─┴─ fuse ─ locate ─ verify ─ evaluate ─ LabelResult
//! ```
//!
//! [`verify_scans`] is the pure core. [`LabelPipeline`] wraps it with
//! image resolution, OCR invocation (timeouts, reading-order sort) and
//! bounded batch concurrency.

use std::path::Path;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::aggregate::evaluate;
use crate::config::{PipelineConfig, VerifyConfig};
use crate::error::{VerifyError, VerifyResult};
use crate::fusion::fuse;
use crate::locator::{locate_elements, ScanSources};
use crate::ocr::{sort_reading_order, OcrProvider};
use crate::records::ApplicationRecord;
use crate::resolver::ImageResolver;
use crate::types::{ElementOutcome, LabelFields, LabelResult, LabelStatus, OcrSource, WordObservation};
use crate::verifier::verify_elements;

/// Verify one label from two reading-ordered scans
pub fn verify_scans(
    fields: &LabelFields,
    scan_a: &[WordObservation],
    scan_b: &[WordObservation],
    config: &VerifyConfig,
) -> LabelResult {
    let fused = fuse(scan_a, scan_b, config);
    let sources = ScanSources::new(&fused, scan_a, scan_b);

    let located = locate_elements(fields, &sources);
    let verified = verify_elements(&located, &sources, config);

    let mut outcomes: Vec<ElementOutcome> = located.fields.iter().map(ElementOutcome::from).collect();
    outcomes.push(verified.alcohol);
    outcomes.push(verified.net_content);
    outcomes.push(verified.government_warning);

    evaluate(&outcomes, &config.failure_labels).into_label_result()
}

/// OCR providers, image lookup and settings shared across a batch
#[derive(Clone)]
pub struct LabelPipeline {
    provider_a: Arc<dyn OcrProvider>,
    provider_b: Arc<dyn OcrProvider>,
    resolver: Arc<dyn ImageResolver>,
    verify: VerifyConfig,
    settings: PipelineConfig,
}

impl LabelPipeline {
    pub fn new(
        provider_a: Arc<dyn OcrProvider>,
        provider_b: Arc<dyn OcrProvider>,
        resolver: Arc<dyn ImageResolver>,
        verify: VerifyConfig,
        settings: PipelineConfig,
    ) -> Self {
        Self {
            provider_a,
            provider_b,
            resolver,
            verify,
            settings,
        }
    }

    /// Scan `image` with both providers and verify it against `fields`
    pub async fn process(&self, fields: &LabelFields, image: &Path) -> VerifyResult<LabelResult> {
        if tokio::fs::metadata(image).await.is_err() {
            return Err(VerifyError::ImageUnavailable(image.display().to_string()));
        }

        let (scan_a, scan_b) = tokio::try_join!(
            self.scan(self.provider_a.as_ref(), image, OcrSource::A),
            self.scan(self.provider_b.as_ref(), image, OcrSource::B),
        )?;

        let fields = fields.clone();
        let config = self.verify.clone();
        tokio::task::spawn_blocking(move || verify_scans(&fields, &scan_a, &scan_b, &config))
            .await
            .map_err(|e| VerifyError::Join(e.to_string()))
    }

    async fn scan(
        &self,
        provider: &dyn OcrProvider,
        image: &Path,
        source: OcrSource,
    ) -> VerifyResult<Vec<WordObservation>> {
        let budget = self.settings.ocr_timeout();
        let mut words = tokio::time::timeout(budget, provider.scan(image, source))
            .await
            .map_err(|_| VerifyError::OcrTimeout {
                provider: provider.name().to_string(),
                seconds: budget.as_secs(),
            })??;

        sort_reading_order(&mut words);
        debug!(provider = provider.name(), ?source, words = words.len(), "Scan complete");
        Ok(words)
    }

    /// Process one application record; never fails
    ///
    /// Infrastructure errors become an `Error` result for this label.
    pub async fn process_record(&self, record: &ApplicationRecord) -> LabelResult {
        let app_num = record.application_num.as_str();

        let Some(image) = self.resolver.resolve(app_num) else {
            warn!(application_num = app_num, "No label image found");
            return LabelResult::error("Label image not found");
        };

        let fields = LabelFields::from(record);
        match self.process(&fields, &image).await {
            Ok(result) => {
                info!(application_num = app_num, status = %result.status, failures = ?result.failures, "Label verified");
                result
            }
            Err(VerifyError::ImageUnavailable(path)) => {
                warn!(application_num = app_num, path = %path, "Label image unavailable");
                LabelResult::error("Label image not found")
            }
            Err(e) => {
                error!(application_num = app_num, error = %e, "Label processing failed");
                LabelResult::error(e.to_string())
            }
        }
    }

    /// Process records concurrently; results come back in input order
    pub async fn process_batch(&self, records: Vec<ApplicationRecord>) -> Vec<(String, LabelResult)> {
        let limit = self.settings.max_concurrent_labels.max(1);
        let permits = Arc::new(Semaphore::new(limit));
        let total = records.len();
        info!(labels = total, max_concurrent = limit, "Starting batch");

        let mut join_set = JoinSet::new();
        let mut app_nums = Vec::with_capacity(total);
        for (index, record) in records.into_iter().enumerate() {
            app_nums.push(record.application_num.clone());
            let pipeline = self.clone();
            let permits = Arc::clone(&permits);
            join_set.spawn(async move {
                let result = match permits.acquire_owned().await {
                    Ok(_permit) => pipeline.process_record(&record).await,
                    Err(e) => LabelResult::error(e.to_string()),
                };
                (index, result)
            });
        }

        let mut results: Vec<Option<LabelResult>> = vec![None; total];
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, result)) => results[index] = Some(result),
                Err(e) => error!(error = %e, "Label task did not complete"),
            }
        }

        let passed = results
            .iter()
            .filter(|r| r.as_ref().is_some_and(|r| r.status == LabelStatus::Passed))
            .count();
        info!(labels = total, passed, "Batch complete");

        app_nums
            .into_iter()
            .zip(results)
            .map(|(app_num, result)| {
                let result = result.unwrap_or_else(|| LabelResult::error("Verification task failed"));
                (app_num, result)
            })
            .collect()
    }
}
