use std::{borrow::Borrow, collections::HashMap, hash::Hash};

use crate::dataset::Sequence;

/// Occurrence counts keyed by `K`. Keys never seen read as zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountTable<K: Eq + Hash> {
    m: HashMap<K, usize>,
}

impl<K: Eq + Hash> Default for CountTable<K> {
    fn default() -> Self {
        Self { m: HashMap::new() }
    }
}

impl<K: Eq + Hash> CountTable<K> {
    fn add(&mut self, key: K) {
        *self.m.entry(key).or_default() += 1;
    }

    pub fn get<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.m.get(key).copied().unwrap_or_default()
    }

    pub fn total(&self) -> usize {
        self.m.values().sum()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.m.len()
    }

    pub fn is_empty(&self) -> bool {
        self.m.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> {
        self.m.iter().map(|(k, &c)| (k, c))
    }
}

impl<K: Eq + Hash> FromIterator<K> for CountTable<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut table = Self::default();
        for key in iter {
            table.add(key);
        }
        table
    }
}

/// Tag and word counts aggregated over a training corpus.
#[derive(Debug, Default, Clone)]
pub struct CorpusStatistics {
    pub unigrams: CountTable<String>,
    pub bigrams: CountTable<(String, String)>,
    pub starts: CountTable<String>,
    pub ends: CountTable<String>,
    /// `pairs[tag][word]`: how often `word` was tagged `tag`.
    pub pairs: HashMap<String, CountTable<String>>,
    /// Number of non-empty sequences.
    pub num_sequences: usize,
    pub num_tokens: usize,
}

impl CorpusStatistics {
    pub fn from_sequences(seqs: &[Sequence]) -> Self {
        let tags: Vec<&[String]> = seqs.iter().map(|s| s.tags.as_slice()).collect();
        let words: Vec<&[String]> = seqs.iter().map(|s| s.words.as_slice()).collect();
        let unigrams = unigram_counts(&tags);
        let num_tokens = unigrams.total();
        let starts = starting_counts(&tags);
        Self {
            num_sequences: starts.total(),
            num_tokens,
            unigrams,
            bigrams: bigram_counts(&tags),
            starts,
            ends: ending_counts(&tags),
            pairs: pair_counts(&tags, &words),
        }
    }

    pub fn pair(&self, tag: &str, word: &str) -> usize {
        self.pairs.get(tag).map(|c| c.get(word)).unwrap_or_default()
    }

    pub fn bigram(&self, first: &str, second: &str) -> usize {
        self.bigrams.get(&(first.to_string(), second.to_string()))
    }
}

pub fn unigram_counts<S: AsRef<[String]>>(seqs: &[S]) -> CountTable<String> {
    seqs.iter()
        .flat_map(|s| s.as_ref().iter().cloned())
        .collect()
}

/// Counts adjacent pairs `(seq[i], seq[i + 1])`.
pub fn bigram_counts<S: AsRef<[String]>>(seqs: &[S]) -> CountTable<(String, String)> {
    seqs.iter()
        .flat_map(|s| s.as_ref().windows(2).map(|w| (w[0].clone(), w[1].clone())))
        .collect()
}

/// Empty sequences have no first element and are skipped.
pub fn starting_counts<S: AsRef<[String]>>(seqs: &[S]) -> CountTable<String> {
    seqs.iter().filter_map(|s| s.as_ref().first().cloned()).collect()
}

pub fn ending_counts<S: AsRef<[String]>>(seqs: &[S]) -> CountTable<String> {
    seqs.iter().filter_map(|s| s.as_ref().last().cloned()).collect()
}

/// For each value of `keys` counts the values of `values` found at the same
/// positions, e.g. words per tag.
pub fn pair_counts<A: AsRef<[String]>, B: AsRef<[String]>>(
    keys: &[A],
    values: &[B],
) -> HashMap<String, CountTable<String>> {
    let mut grouped: HashMap<String, CountTable<String>> = HashMap::new();
    for (ks, vs) in keys.iter().zip(values) {
        for (k, v) in ks.as_ref().iter().zip(vs.as_ref()) {
            grouped.entry(k.clone()).or_default().add(v.clone());
        }
    }
    grouped
}
