use std::{fs::File, io::BufReader, path::Path};

use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::error::{HmmError, Result};

/// Distribution scoring the first tag of a sequence.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum InitialDistribution {
    /// P(sequence starts with t).
    #[default]
    Start,
    /// Share of training tokens tagged t.
    Prior,
}

/// Factor folded into the final position before picking the best last tag.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Termination {
    /// P(end | t), the transition into the end state.
    #[default]
    Exit,
    /// P(sequence ends with t).
    EndBias,
    /// No termination factor.
    Skip,
}

/// Decoding and smoothing options.
///
/// Out-of-vocabulary words are always ignored by the emission model (they
/// contribute probability one for every tag). `unseen_emission` is the
/// probability given to a known word under a tag it was never observed with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Args)]
#[serde(default)]
pub struct DecodeOptions {
    /// emission probability of a known word under a tag it never occurred with
    #[arg(long, default_value_t = 0.0)]
    pub unseen_emission: f64,
    /// distribution scoring the first tag
    #[arg(long, value_enum, default_value_t = InitialDistribution::Start)]
    pub initial: InitialDistribution,
    /// factor folded in after the last observation
    #[arg(long, value_enum, default_value_t = Termination::Exit)]
    pub termination: Termination,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            unseen_emission: 0.0,
            initial: InitialDistribution::Start,
            termination: Termination::Exit,
        }
    }
}

impl DecodeOptions {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let f = File::open(path)?;
        let opts: Self = serde_json::from_reader(BufReader::new(f))?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> Result<()> {
        let p = self.unseen_emission;
        if !(p.is_finite() && (0.0..1.0).contains(&p)) {
            return Err(HmmError::invalid_option(
                "unseen_emission",
                format!("{p} is not a probability in [0, 1)"),
            ));
        }
        Ok(())
    }
}
