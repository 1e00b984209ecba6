//! First-order hidden Markov model tagger.
//!
//! Count tables are aggregated from tagged sequences ([`CorpusStatistics`]),
//! normalized into dense probability tables ([`HmmParameters`]) and decoded
//! with a log-domain Viterbi search ([`ViterbiDecoder`]). Words missing from
//! the training vocabulary are replaced by a sentinel before decoding.
//!
//! ```
//! use hmmtag::{DecodeOptions, HmmTagger, Sequence, Tagger};
//!
//! let corpus = vec![
//!     Sequence::from_iter([("dog", "NOUN"), ("barks", "VERB")]),
//!     Sequence::from_iter([("cat", "NOUN"), ("sleeps", "VERB")]),
//! ];
//! let tagger = HmmTagger::train(&corpus, &DecodeOptions::default()).unwrap();
//! assert_eq!(tagger.tag(&["dog", "sleeps"]).unwrap().tags, ["NOUN", "VERB"]);
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod evaluation;
pub mod hmm;
pub mod quark;

pub use config::{DecodeOptions, InitialDistribution, Termination};
pub use dataset::{Dataset, Sequence};
pub use error::{DecodeError, HmmError, Result};
pub use evaluation::{AccuracyEvaluator, Estimation, Evaluation, LabelMeasure};
pub use hmm::{
    CorpusStatistics, CountTable, DecodePath, HmmParameters, HmmTagger, Observation, Tagged,
    Tagger, ViterbiDecoder, VocabularyIndex,
};
