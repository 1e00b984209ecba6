use std::collections::BTreeSet;

use crate::{
    dataset::Sequence,
    quark::{Quark, StringTable},
};

/// A decoder input symbol after vocabulary lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Observation {
    Known(usize),
    /// Sentinel standing in for an out-of-vocabulary word. No tag has an
    /// emission entry for it.
    Unknown,
}

/// Observations ready for decoding together with the number of words that
/// were replaced by [`Observation::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub observations: Vec<Observation>,
    pub oov: usize,
}

/// Known words and tags of a training corpus. Both alphabets are sorted so the
/// ids, and therefore the tag order used to break ties, are canonical.
#[derive(Debug, Default, Clone)]
pub struct VocabularyIndex {
    words: Quark,
    tags: Quark,
}

impl VocabularyIndex {
    pub fn new<W, T>(words: W, tags: T) -> Self
    where
        W: IntoIterator,
        W::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        let words: BTreeSet<String> = words.into_iter().map(Into::into).collect();
        let tags: BTreeSet<String> = tags.into_iter().map(Into::into).collect();
        Self {
            words: Quark::from(words),
            tags: Quark::from(tags),
        }
    }

    pub fn from_sequences(seqs: &[Sequence]) -> Self {
        Self::new(
            seqs.iter().flat_map(|s| s.words.iter().cloned()),
            seqs.iter().flat_map(|s| s.tags.iter().cloned()),
        )
    }

    pub fn num_words(&self) -> usize {
        self.words.len()
    }

    pub fn num_tags(&self) -> usize {
        self.tags.len()
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.words.to_id(word).is_some()
    }

    pub fn word_id(&self, word: &str) -> Option<usize> {
        self.words.to_id(word)
    }

    pub fn tag_id(&self, tag: &str) -> Option<usize> {
        self.tags.to_id(tag)
    }

    pub fn tag_name(&self, id: usize) -> Option<&str> {
        self.tags.to_str(id)
    }

    /// Tags in canonical order, indexed by tag id.
    pub fn tags(&self) -> &[String] {
        self.tags.as_slice()
    }

    pub fn words(&self) -> &[String] {
        self.words.as_slice()
    }

    /// Replaces every word missing from the vocabulary by the sentinel.
    pub fn substitute<S: AsRef<str>>(&self, words: &[S]) -> Substitution {
        let mut oov = 0;
        let observations = words
            .iter()
            .map(|w| match self.words.to_id(w.as_ref()) {
                Some(id) => Observation::Known(id),
                None => {
                    oov += 1;
                    Observation::Unknown
                }
            })
            .collect();
        Substitution { observations, oov }
    }
}
