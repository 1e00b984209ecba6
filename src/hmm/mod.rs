pub mod counts;
pub mod params;
pub mod tagger;
pub mod viterbi;
pub mod vocab;

pub use counts::{CorpusStatistics, CountTable};
pub use params::HmmParameters;
pub use tagger::{HmmTagger, Tagged, Tagger};
pub use viterbi::{DecodePath, ViterbiDecoder};
pub use vocab::{Observation, Substitution, VocabularyIndex};
