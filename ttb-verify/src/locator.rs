//! Element Locator
//!
//! Finds each required element in the scans, consulting sources in
//! priority order: fused set (both engines agree), then scan A, then
//! scan B. First hit wins.
//!
//! - Identity fields: every whitespace token of the reference phrase must
//!   resolve by normalized key, otherwise the whole field is missing.
//! - Alcohol content: first word containing a bare percentage.
//! - Net content: first "number + U.S. volume unit" phrase in a source's
//!   joined text, else the first self-sufficient digit+unit token.
//!
//! Nothing here returns an error; absence is `None`.

use std::collections::HashMap;

use tracing::debug;

use crate::fusion::FusedSet;
use crate::patterns::{is_net_content_token, ALCOHOL_PERCENT, NET_CONTENT_PHRASE};
use crate::text::{normalize, normalize_for_pattern};
use crate::types::{FieldMatch, LabelFields, LocatedWord, WordObservation, WordRecord};

/// The three word sources of one label, in lookup priority order
#[derive(Debug, Clone, Copy)]
pub struct ScanSources<'a> {
    pub fused: &'a FusedSet,
    pub scan_a: &'a [WordObservation],
    pub scan_b: &'a [WordObservation],
}

impl<'a> ScanSources<'a> {
    pub fn new(fused: &'a FusedSet, scan_a: &'a [WordObservation], scan_b: &'a [WordObservation]) -> Self {
        Self { fused, scan_a, scan_b }
    }

    /// First record in priority order satisfying `predicate`
    pub fn first_match<F>(&self, predicate: F) -> Option<LocatedWord>
    where
        F: Fn(&str) -> bool,
    {
        first_in(self.fused.as_slice(), &predicate)
            .or_else(|| first_in(self.scan_a, &predicate))
            .or_else(|| first_in(self.scan_b, &predicate))
    }

    /// Word texts of each source, in priority order
    pub fn texts(&self) -> [Vec<&'a str>; 3] {
        [
            self.fused.iter().map(|w| w.text.as_str()).collect(),
            self.scan_a.iter().map(|w| w.text.as_str()).collect(),
            self.scan_b.iter().map(|w| w.text.as_str()).collect(),
        ]
    }
}

fn first_in<W, F>(words: &[W], predicate: &F) -> Option<LocatedWord>
where
    W: WordRecord,
    F: Fn(&str) -> bool,
{
    words
        .iter()
        .find(|w| predicate(w.text()))
        .map(LocatedWord::from_record)
}

// ============================================================================
// Identity fields
// ============================================================================

/// Normalized-key index over one source; the first record per key wins
#[derive(Debug, Clone, Default)]
pub struct WordLookup {
    entries: HashMap<String, LocatedWord>,
}

impl WordLookup {
    pub fn build<W: WordRecord>(words: &[W]) -> Self {
        let mut entries = HashMap::new();
        for word in words {
            let key = normalize(word.text());
            if !key.is_empty() {
                entries
                    .entry(key)
                    .or_insert_with(|| LocatedWord::from_record(word));
            }
        }
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&LocatedWord> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lookups for all three sources, in priority order
#[derive(Debug, Clone)]
pub struct SourceLookups {
    pub fused: WordLookup,
    pub scan_a: WordLookup,
    pub scan_b: WordLookup,
}

impl SourceLookups {
    pub fn build(sources: &ScanSources<'_>) -> Self {
        Self {
            fused: WordLookup::build(sources.fused.as_slice()),
            scan_a: WordLookup::build(sources.scan_a),
            scan_b: WordLookup::build(sources.scan_b),
        }
    }

    /// Resolve one token: fused, then A, then B
    pub fn resolve(&self, token: &str) -> Option<&LocatedWord> {
        let key = normalize(token);
        self.fused
            .get(&key)
            .or_else(|| self.scan_a.get(&key))
            .or_else(|| self.scan_b.get(&key))
    }
}

/// Locate one reference phrase; all-or-nothing
pub fn locate_field(phrase: Option<&str>, lookups: &SourceLookups) -> FieldMatch {
    let phrase = phrase?;
    let tokens: Vec<&str> = phrase.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }

    let mut matches = Vec::with_capacity(tokens.len());
    for token in tokens {
        match lookups.resolve(token) {
            Some(found) => matches.push(found.clone()),
            None => {
                debug!(phrase = %phrase, token = %token, "Field token not found in any source");
                return None;
            }
        }
    }
    Some(matches)
}

// ============================================================================
// Pattern elements
// ============================================================================

/// First word containing a bare percentage
pub fn locate_alcohol(sources: &ScanSources<'_>) -> Option<LocatedWord> {
    sources.first_match(|text| ALCOHOL_PERCENT.is_match(&normalize_for_pattern(text)))
}

/// How net content was located
#[derive(Debug, Clone, PartialEq)]
pub enum NetContentMatch {
    /// Regex match over a source's joined text, e.g. "12 FL OZ"
    Phrase(String),
    /// One token with both quantity and unit, e.g. "12FLOZ"
    Token(LocatedWord),
}

/// First net-content phrase by source, else first digit+unit token
pub fn locate_net_content(sources: &ScanSources<'_>) -> Option<NetContentMatch> {
    for texts in sources.texts() {
        let joined = texts.join(" ");
        if let Some(found) = NET_CONTENT_PHRASE.find(&joined) {
            return Some(NetContentMatch::Phrase(found.as_str().to_string()));
        }
    }

    sources
        .first_match(is_net_content_token)
        .map(NetContentMatch::Token)
}

// ============================================================================
// All elements
// ============================================================================

/// Locator output for one label
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedElements {
    /// Brand name, class, fanciful name, bottler name, bottler address
    pub fields: [FieldMatch; 5],
    pub alcohol: Option<LocatedWord>,
    pub net_content: Option<NetContentMatch>,
}

pub fn locate_elements(fields: &LabelFields, sources: &ScanSources<'_>) -> LocatedElements {
    let lookups = SourceLookups::build(sources);
    let fields = fields.phrases().map(|phrase| locate_field(phrase, &lookups));

    let located = LocatedElements {
        fields,
        alcohol: locate_alcohol(sources),
        net_content: locate_net_content(sources),
    };

    debug!(
        fields_found = located.fields.iter().filter(|f| f.is_some()).count(),
        alcohol = located.alcohol.is_some(),
        net_content = located.net_content.is_some(),
        "Located label elements"
    );

    located
}
