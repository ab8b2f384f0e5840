//! Insertion-ordered, value-equality set of fused words

use std::collections::HashSet;

use crate::types::{FusedWord, Point};

/// Identity of a fused word: `(text, location, confidence bits)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FusedKey {
    text: String,
    location: Point,
    confidence_bits: u64,
}

impl FusedKey {
    fn of(word: &FusedWord) -> Self {
        // -0.0 and 0.0 are the same confidence
        let confidence = if word.confidence == 0.0 { 0.0 } else { word.confidence };
        Self {
            text: word.text.clone(),
            location: word.location,
            confidence_bits: confidence.to_bits(),
        }
    }
}

/// Deduplicating container for fusion output
///
/// Iterates in first-insertion order so downstream "first match wins"
/// rules are reproducible run to run.
#[derive(Debug, Clone, Default)]
pub struct FusedSet {
    words: Vec<FusedWord>,
    seen: HashSet<FusedKey>,
}

impl FusedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unless an equal `(text, location, confidence)` is present.
    /// Returns `true` when the word was added.
    pub fn insert(&mut self, word: FusedWord) -> bool {
        if self.seen.insert(FusedKey::of(&word)) {
            self.words.push(word);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FusedWord> {
        self.words.iter()
    }

    pub fn as_slice(&self) -> &[FusedWord] {
        &self.words
    }
}

impl<'a> IntoIterator for &'a FusedSet {
    type Item = &'a FusedWord;
    type IntoIter = std::slice::Iter<'a, FusedWord>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}

impl FromIterator<FusedWord> for FusedSet {
    fn from_iter<I: IntoIterator<Item = FusedWord>>(iter: I) -> Self {
        let mut set = FusedSet::new();
        for word in iter {
            set.insert(word);
        }
        set
    }
}
