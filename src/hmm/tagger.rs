use crate::{
    config::DecodeOptions,
    dataset::Sequence,
    error::{DecodeError, Result},
};

use super::{
    counts::CorpusStatistics, params::HmmParameters, viterbi::ViterbiDecoder,
    vocab::VocabularyIndex,
};

/// Output of tagging one word sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Tagged {
    pub tags: Vec<String>,
    /// Number of words replaced by the out-of-vocabulary sentinel.
    pub oov: usize,
    pub log_prob: f64,
}

/// Anything that assigns one tag per word.
pub trait Tagger {
    fn tag<S: AsRef<str>>(&self, words: &[S]) -> Result<Tagged, DecodeError>;
    /// The tag alphabet.
    fn labels(&self) -> &[String];
}

/// A trained first-order HMM: vocabulary, parameters and decoder.
#[derive(Debug, Clone)]
pub struct HmmTagger {
    vocab: VocabularyIndex,
    params: HmmParameters,
    decoder: ViterbiDecoder,
}

impl HmmTagger {
    pub fn new(vocab: VocabularyIndex, params: HmmParameters, opts: &DecodeOptions) -> Result<Self> {
        let decoder = ViterbiDecoder::new(&params, opts)?;
        Ok(Self {
            vocab,
            params,
            decoder,
        })
    }

    pub fn train(seqs: &[Sequence], opts: &DecodeOptions) -> Result<Self> {
        let stats = CorpusStatistics::from_sequences(seqs);
        let vocab = VocabularyIndex::from_sequences(seqs);
        log::info!(
            "train (N: {}, tokens: {}, tags: {}, words: {})",
            stats.num_sequences,
            stats.num_tokens,
            vocab.num_tags(),
            vocab.num_words()
        );
        let params = HmmParameters::new(&stats, &vocab)?;
        Self::new(vocab, params, opts)
    }

    pub fn vocabulary(&self) -> &VocabularyIndex {
        &self.vocab
    }

    pub fn parameters(&self) -> &HmmParameters {
        &self.params
    }
}

impl Tagger for HmmTagger {
    fn tag<S: AsRef<str>>(&self, words: &[S]) -> Result<Tagged, DecodeError> {
        let sub = self.vocab.substitute(words);
        if sub.oov > 0 {
            log::debug!("substituted {}/{} unknown words", sub.oov, words.len());
        }
        let path = self.decoder.decode(&sub.observations)?;
        let tags = path
            .tags
            .iter()
            .map(|&t| self.vocab.tags()[t].clone())
            .collect();
        Ok(Tagged {
            tags,
            oov: sub.oov,
            log_prob: path.log_prob,
        })
    }

    fn labels(&self) -> &[String] {
        self.vocab.tags()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagger() -> HmmTagger {
        let seqs = vec![
            Sequence::from_iter([("dog", "NOUN"), ("barks", "VERB")]),
            Sequence::from_iter([("cat", "NOUN"), ("sleeps", "VERB")]),
        ];
        HmmTagger::train(&seqs, &DecodeOptions::default()).expect("failed to train")
    }

    #[test]
    fn tag() {
        let tagger = tagger();
        let out = tagger.tag(&["dog", "sleeps"]).expect("failed to tag");
        assert_eq!(out.tags, ["NOUN", "VERB"]);
        assert_eq!(out.oov, 0);
        assert_eq!(tagger.labels(), &["NOUN", "VERB"]);
    }

    #[test]
    fn oov_is_counted() {
        let tagger = tagger();
        let out = tagger.tag(&["elephant".to_string(), "sleeps".to_string()]).expect("failed to tag");
        assert_eq!(out.tags, ["NOUN", "VERB"]);
        assert_eq!(out.oov, 1);
    }

    #[test]
    fn deterministic() {
        let tagger = tagger();
        let first = tagger.tag(&["cat", "barks"]).unwrap();
        for _ in 0..5 {
            assert_eq!(tagger.tag(&["cat", "barks"]).unwrap(), first);
        }
    }

    #[test]
    fn shared_between_threads() {
        let tagger = tagger();
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| tagger.tag(&["dog", "barks"]).map(|t| t.tags)))
                .collect();
            for h in handles {
                assert_eq!(h.join().unwrap().unwrap(), ["NOUN", "VERB"]);
            }
        });
    }
}
