use crate::{
    config::{DecodeOptions, InitialDistribution, Termination},
    error::{DecodeError, Result},
};

use super::{params::HmmParameters, vocab::Observation};

/// The most likely tag ids for an observation sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodePath {
    pub tags: Vec<usize>,
    /// Log probability of the path, including the termination factor.
    pub log_prob: f64,
}

/// Log-domain Viterbi decoder.
///
/// All tables are logarithms computed once from [`HmmParameters`]; the lattice
/// is allocated per call so a decoder can be shared between threads.
#[derive(Debug, Clone)]
pub struct ViterbiDecoder {
    num_tags: usize,
    num_words: usize,
    /// [L] initial scores.
    initial: Vec<f64>,
    /// [L][L] transition scores.
    trans: Vec<f64>,
    /// [L][V] emission scores, unseen pairs already smoothed.
    emit: Vec<f64>,
    /// [L] scores of leaving the lattice after the last item.
    term: Vec<f64>,
}

impl ViterbiDecoder {
    pub fn new(params: &HmmParameters, opts: &DecodeOptions) -> Result<Self> {
        opts.validate()?;
        let L = params.num_tags();
        let V = params.num_words();
        let unseen = opts.unseen_emission.ln();

        let initial = (0..L)
            .map(|t| match opts.initial {
                InitialDistribution::Start => params.start_bias(t),
                InitialDistribution::Prior => params.prior(t),
            })
            .map(f64::ln)
            .collect();
        let term = (0..L)
            .map(|t| match opts.termination {
                Termination::Exit => params.exit(t).ln(),
                Termination::EndBias => params.end_bias(t).ln(),
                Termination::Skip => 0.0,
            })
            .collect();
        let trans = (0..L)
            .flat_map(|i| params.transitions_from(i).iter().map(|p| p.ln()))
            .collect();
        let emit = (0..L)
            .flat_map(|t| {
                params
                    .emissions_of(t)
                    .iter()
                    .map(move |&p| if p > 0.0 { p.ln() } else { unseen })
            })
            .collect();

        Ok(Self {
            num_tags: L,
            num_words: V,
            initial,
            trans,
            emit,
            term,
        })
    }

    pub fn num_tags(&self) -> usize {
        self.num_tags
    }

    /// Log emission score of `obs` under tag `t`. The out-of-vocabulary
    /// sentinel, and any id outside the vocabulary, scores zero for every tag.
    fn state_score(&self, t: usize, obs: Observation) -> f64 {
        match obs {
            Observation::Known(w) if w < self.num_words => self.emit[self.num_words * t + w],
            _ => 0.0,
        }
    }

    /// Finds the most likely tag path. Ties go to the lowest tag id.
    pub fn decode(&self, obs: &[Observation]) -> Result<DecodePath, DecodeError> {
        let T = obs.len();
        let L = self.num_tags;
        if T == 0 {
            return Err(DecodeError::EmptySequence);
        }

        /* score[t][j]: best log probability of a path ending in tag j at t. */
        let mut score = vec![f64::NEG_INFINITY; T * L];
        /* backward_edge[t][j]: tag at t - 1 on that best path. */
        let mut backward_edge = vec![0usize; T * L];

        for j in 0..L {
            score[j] = self.initial[j] + self.state_score(j, obs[0]);
        }
        if !viable(&score[..L]) {
            return Err(DecodeError::NoViablePath { position: 0 });
        }

        for t in 1..T {
            for j in 0..L {
                let state = self.state_score(j, obs[t]);
                if state == f64::NEG_INFINITY {
                    continue;
                }
                let mut max_score = f64::NEG_INFINITY;
                let mut argmax_score = 0;
                for i in 0..L {
                    /* Transit from (t-1, i) to (t, j). */
                    let s = score[L * (t - 1) + i] + self.trans[L * i + j];
                    if max_score < s {
                        max_score = s;
                        argmax_score = i;
                    }
                }
                backward_edge[L * t + j] = argmax_score;
                score[L * t + j] = max_score + state;
            }
            if !viable(&score[L * t..L * (t + 1)]) {
                return Err(DecodeError::NoViablePath { position: t });
            }
        }

        let mut max_score = f64::NEG_INFINITY;
        let mut last = None;
        for i in 0..L {
            let s = score[L * (T - 1) + i] + self.term[i];
            if max_score < s {
                max_score = s;
                last = Some(i);
            }
        }
        let Some(last) = last else {
            return Err(DecodeError::NoViablePath { position: T });
        };

        let mut tags = vec![0; T];
        tags[T - 1] = last;
        for t in (0..T - 1).rev() {
            tags[t] = backward_edge[L * (t + 1) + tags[t + 1]];
        }
        Ok(DecodePath {
            tags,
            log_prob: max_score,
        })
    }
}

fn viable(row: &[f64]) -> bool {
    row.iter().any(|&s| s > f64::NEG_INFINITY)
}
