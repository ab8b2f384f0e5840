//! Application record dataset
//!
//! The dataset is a JSON array of application rows. Older datasets spell
//! the fanciful name key `fancifcul_name`; both spellings are read and the
//! correct one wins when both are present.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use tracing::debug;

use crate::types::{LabelFields, LabelResult};

/// One application row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub application_num: String,

    #[serde(default)]
    pub brand_name: Option<String>,

    #[serde(default)]
    pub class: Option<String>,

    #[serde(default)]
    pub fanciful_name: Option<String>,

    #[serde(default, rename = "fancifcul_name", skip_serializing)]
    legacy_fanciful_name: Option<String>,

    #[serde(default)]
    pub bottler_name: Option<String>,

    #[serde(default)]
    pub bottler_address: Option<String>,

    /// Result from an earlier run; read but never used as input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_result: Option<serde_json::Value>,
}

impl ApplicationRecord {
    pub fn new(application_num: impl Into<String>) -> Self {
        Self {
            application_num: application_num.into(),
            ..Default::default()
        }
    }

    /// Record carrying `fields` as its reference values
    pub fn with_fields(application_num: impl Into<String>, fields: LabelFields) -> Self {
        Self {
            application_num: application_num.into(),
            brand_name: fields.brand_name,
            class: fields.class,
            fanciful_name: fields.fanciful_name,
            bottler_name: fields.bottler_name,
            bottler_address: fields.bottler_address,
            ..Default::default()
        }
    }

    /// Fanciful name under either key spelling
    pub fn fanciful_name(&self) -> Option<&str> {
        self.fanciful_name
            .as_deref()
            .or(self.legacy_fanciful_name.as_deref())
    }
}

impl From<&ApplicationRecord> for LabelFields {
    fn from(record: &ApplicationRecord) -> Self {
        LabelFields {
            brand_name: record.brand_name.clone(),
            class: record.class.clone(),
            fanciful_name: record.fanciful_name().map(str::to_string),
            bottler_name: record.bottler_name.clone(),
            bottler_address: record.bottler_address.clone(),
        }
    }
}

/// One processed label as written to the results file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordOutcome {
    pub application_num: String,
    pub result: LabelResult,
    pub display_status: String,
}

impl RecordOutcome {
    pub fn new(application_num: String, result: LabelResult) -> Self {
        let display_status = result.display_status();
        Self {
            application_num,
            result,
            display_status,
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

/// Parse a JSON array of application records
pub fn parse_records(json: &str) -> ttb_common::Result<Vec<ApplicationRecord>> {
    Ok(serde_json::from_str(json)?)
}

/// Load application records from a JSON file
pub fn load_records(path: &Path) -> ttb_common::Result<Vec<ApplicationRecord>> {
    let json = std::fs::read_to_string(path)?;
    let records = parse_records(&json)?;
    debug!(path = %path.display(), records = records.len(), "Loaded application records");
    Ok(records)
}
