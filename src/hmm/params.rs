use crate::error::{HmmError, Result};

use super::{counts::CorpusStatistics, vocab::VocabularyIndex};

/// Normalized HMM distributions over an indexed tag alphabet.
///
/// Tables are dense and addressed by the ids of a [`VocabularyIndex`]:
/// `trans` is an `[L][L]` matrix and `emit` an `[L][V]` matrix, both row-major.
#[derive(Debug, Clone)]
pub struct HmmParameters {
    num_tags: usize,
    num_words: usize,
    prior: Vec<f64>,
    start: Vec<f64>,
    end: Vec<f64>,
    exit: Vec<f64>,
    trans: Vec<f64>,
    emit: Vec<f64>,
}

impl HmmParameters {
    /// Derives all distributions from `stats`. Fails if a tag of `vocab` has
    /// no occurrence in `stats`.
    pub fn new(stats: &CorpusStatistics, vocab: &VocabularyIndex) -> Result<Self> {
        let L = vocab.num_tags();
        let V = vocab.num_words();

        let mut unigram = vec![0.0; L];
        for (t, tag) in vocab.tags().iter().enumerate() {
            let n = stats.unigrams.get(tag.as_str());
            if n == 0 {
                return Err(HmmError::Configuration { tag: tag.clone() });
            }
            unigram[t] = n as f64;
        }

        let num_sequences = stats.num_sequences as f64;
        let num_tokens = stats.num_tokens as f64;
        let mut this = Self {
            num_tags: L,
            num_words: V,
            prior: unigram.iter().map(|n| n / num_tokens).collect(),
            start: vec![0.0; L],
            end: vec![0.0; L],
            exit: vec![0.0; L],
            trans: vec![0.0; L * L],
            emit: vec![0.0; L * V],
        };

        for (tag, n) in stats.starts.iter() {
            if let Some(t) = vocab.tag_id(tag) {
                this.start[t] = n as f64 / num_sequences;
            }
        }
        for (tag, n) in stats.ends.iter() {
            if let Some(t) = vocab.tag_id(tag) {
                this.end[t] = n as f64 / num_sequences;
                this.exit[t] = n as f64 / unigram[t];
            }
        }
        for ((first, second), n) in stats.bigrams.iter() {
            if let (Some(i), Some(j)) = (vocab.tag_id(first), vocab.tag_id(second)) {
                this.trans[L * i + j] = n as f64 / unigram[i];
            }
        }
        for (tag, words) in &stats.pairs {
            let Some(t) = vocab.tag_id(tag) else {
                continue;
            };
            for (word, n) in words.iter() {
                if let Some(w) = vocab.word_id(word) {
                    this.emit[V * t + w] = n as f64 / unigram[t];
                }
            }
        }
        log::info!(
            "hmm parameters (L: {L}, V: {V}, sequences: {}, tokens: {})",
            stats.num_sequences,
            stats.num_tokens
        );
        Ok(this)
    }

    pub fn num_tags(&self) -> usize {
        self.num_tags
    }

    pub fn num_words(&self) -> usize {
        self.num_words
    }

    /// Share of all training tokens tagged `t`.
    pub fn prior(&self, t: usize) -> f64 {
        self.prior[t]
    }

    /// P(a sequence starts with `t`).
    pub fn start_bias(&self, t: usize) -> f64 {
        self.start[t]
    }

    /// P(a sequence ends with `t`).
    pub fn end_bias(&self, t: usize) -> f64 {
        self.end[t]
    }

    /// P(the sequence ends | current tag is `t`), the edge into the end state.
    /// Together with the transition row of `t` it sums to one.
    pub fn exit(&self, t: usize) -> f64 {
        self.exit[t]
    }

    /// P(`j` follows `i`).
    pub fn transition(&self, i: usize, j: usize) -> f64 {
        self.trans[self.num_tags * i + j]
    }

    pub fn transitions_from(&self, i: usize) -> &[f64] {
        &self.trans[self.num_tags * i..self.num_tags * (i + 1)]
    }

    /// P(word `w` | tag `t`).
    pub fn emission(&self, t: usize, w: usize) -> f64 {
        self.emit[self.num_words * t + w]
    }

    pub fn emissions_of(&self, t: usize) -> &[f64] {
        &self.emit[self.num_words * t..self.num_words * (t + 1)]
    }
}
