//! Result Aggregator
//!
//! Folds the eight element outcomes into a pass/fail verdict. The
//! fanciful name is optional and never fails a label.

use crate::config::FailureLabels;
use crate::types::{Element, ElementOutcome, LabelResult};

/// Aggregated verdict for one label
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    /// Names of the missing elements, in element order
    Failed(Vec<String>),
}

impl Verdict {
    pub fn is_passed(&self) -> bool {
        matches!(self, Verdict::Passed)
    }

    pub fn into_label_result(self) -> LabelResult {
        match self {
            Verdict::Passed => LabelResult::passed(),
            Verdict::Failed(failures) => LabelResult::failed(failures),
        }
    }
}

fn is_optional(index: usize) -> bool {
    Element::ALL.get(index).is_some_and(|element| element.is_optional())
}

/// Evaluate outcomes listed in [`Element::ALL`] order
pub fn evaluate(outcomes: &[ElementOutcome], labels: &FailureLabels) -> Verdict {
    let failures: Vec<String> = outcomes
        .iter()
        .enumerate()
        .filter(|(index, outcome)| !outcome.found && !is_optional(*index))
        .map(|(index, _)| labels.label(index))
        .collect();

    if failures.is_empty() {
        Verdict::Passed
    } else {
        Verdict::Failed(failures)
    }
}
