use std::{collections::BTreeMap, fmt::Display, iter::zip};

use serde::Serialize;

use crate::{
    error::{DecodeError, HmmError, Result},
    hmm::Tagger,
};

/// Label-wise counts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LabelMeasure {
    /// Number of correct predictions.
    pub num_correct: usize,
    /// Number of occurrences of the label in the gold-standard data.
    pub num_observation: usize,
    /// Number of predictions.
    pub num_prediction: usize,
}

impl LabelMeasure {
    pub fn precision(&self) -> f64 {
        ratio(self.num_correct, self.num_prediction)
    }

    pub fn recall(&self) -> f64 {
        ratio(self.num_correct, self.num_observation)
    }

    pub fn fmeasure(&self) -> f64 {
        let (p, r) = (self.precision(), self.recall());
        if p + r > 0.0 {
            p * r * 2.0 / (p + r)
        } else {
            0.0
        }
    }

    fn merge(&mut self, other: &LabelMeasure) {
        self.num_correct += other.num_correct;
        self.num_observation += other.num_observation;
        self.num_prediction += other.num_prediction;
    }
}

fn ratio(n: usize, d: usize) -> f64 {
    if d > 0 {
        n as f64 / d as f64
    } else {
        0.0
    }
}

/// Accumulated tagging performance.
///
/// Sequences that fail to decode count toward the item total with no correct
/// items. Partial evaluations can be combined with [`Evaluation::merge`] in any
/// order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Evaluation {
    tbl: BTreeMap<String, LabelMeasure>,
    /// Number of correctly predicted items.
    item_total_correct: usize,
    /// Total number of reference items.
    item_total_num: usize,
    /// Number of sequences predicted without any error.
    inst_total_correct: usize,
    inst_total_num: usize,
    /// Words replaced by the out-of-vocabulary sentinel.
    oov_substitutions: usize,
    /// Sequences that could not be scored, by batch index.
    failures: Vec<(usize, DecodeError)>,
}

/// Summary figures of an [`Evaluation`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimation {
    pub precision: f64,
    pub recall: f64,
    pub fmeasure: f64,
    pub item_accuracy: f64,
    pub sequence_accuracy: f64,
    pub num_items: usize,
    pub num_sequences: usize,
    pub num_failures: usize,
    pub oov_substitutions: usize,
}

impl Evaluation {
    /// Adds a decoded sequence. A prediction of a different length than the
    /// reference is recorded as a failure of sequence `index`.
    pub fn accumulate<R: AsRef<str>, P: AsRef<str>>(&mut self, index: usize, reference: &[R], prediction: &[P]) {
        if reference.len() != prediction.len() {
            let err = DecodeError::LengthMismatch {
                reference: reference.len(),
                predicted: prediction.len(),
            };
            self.accumulate_failure(index, reference, err);
            return;
        }
        let mut matched = 0;
        for (r, p) in zip(reference, prediction) {
            let (r, p) = (r.as_ref(), p.as_ref());
            self.tbl.entry(r.to_string()).or_default().num_observation += 1;
            self.tbl.entry(p.to_string()).or_default().num_prediction += 1;
            if r == p {
                self.tbl.entry(r.to_string()).or_default().num_correct += 1;
                matched += 1;
            }
        }
        self.item_total_correct += matched;
        self.item_total_num += reference.len();
        if matched == reference.len() {
            self.inst_total_correct += 1;
        }
        self.inst_total_num += 1;
    }

    /// Adds a sequence that could not be decoded: its items count, none is
    /// correct.
    pub fn accumulate_failure<R: AsRef<str>>(&mut self, index: usize, reference: &[R], err: DecodeError) {
        log::warn!("sequence #{index} scored as wrong: {err}");
        for r in reference {
            self.tbl.entry(r.as_ref().to_string()).or_default().num_observation += 1;
        }
        self.item_total_num += reference.len();
        self.inst_total_num += 1;
        self.failures.push((index, err));
    }

    pub fn add_oov(&mut self, n: usize) {
        self.oov_substitutions += n;
    }

    pub fn merge(&mut self, other: Evaluation) {
        for (label, lev) in &other.tbl {
            self.tbl.entry(label.clone()).or_default().merge(lev);
        }
        self.item_total_correct += other.item_total_correct;
        self.item_total_num += other.item_total_num;
        self.inst_total_correct += other.inst_total_correct;
        self.inst_total_num += other.inst_total_num;
        self.oov_substitutions += other.oov_substitutions;
        self.failures.extend(other.failures);
        self.failures.sort();
    }

    /// Correct items over reference items; zero for an empty batch.
    pub fn item_accuracy(&self) -> f64 {
        ratio(self.item_total_correct, self.item_total_num)
    }

    pub fn sequence_accuracy(&self) -> f64 {
        ratio(self.inst_total_correct, self.inst_total_num)
    }

    pub fn failures(&self) -> &[(usize, DecodeError)] {
        &self.failures
    }

    pub fn label(&self, label: &str) -> Option<&LabelMeasure> {
        self.tbl.get(label)
    }

    /// Macro averages run over labels present in the references.
    pub fn estimate(&self) -> Estimation {
        let observed: Vec<&LabelMeasure> = self.tbl.values().filter(|l| l.num_observation > 0).collect();
        let n = observed.len().max(1) as f64;
        Estimation {
            precision: observed.iter().map(|l| l.precision()).sum::<f64>() / n,
            recall: observed.iter().map(|l| l.recall()).sum::<f64>() / n,
            fmeasure: observed.iter().map(|l| l.fmeasure()).sum::<f64>() / n,
            item_accuracy: self.item_accuracy(),
            sequence_accuracy: self.sequence_accuracy(),
            num_items: self.item_total_num,
            num_sequences: self.inst_total_num,
            num_failures: self.failures.len(),
            oov_substitutions: self.oov_substitutions,
        }
    }
}

impl Display for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Performance by label (#match, #model, #ref) (precision, recall, F1):")?;
        for (label, lev) in &self.tbl {
            if lev.num_observation == 0 {
                writeln!(f, "\t{}: ({}, {}, {}) (******, ******, ******)", label, lev.num_correct, lev.num_prediction, lev.num_observation)?;
            } else {
                writeln!(f, "\t{}: ({}, {}, {}) ({:.4}, {:.4}, {:.4})", label, lev.num_correct, lev.num_prediction, lev.num_observation,
                    lev.precision(), lev.recall(), lev.fmeasure()
                )?;
            }
        }
        let est = self.estimate();
        writeln!(f, "Macro-average precision, recall, F1: ({:.6}, {:.6}, {:.6})", est.precision, est.recall, est.fmeasure)?;
        writeln!(f, "Item accuracy: {}/{} => {:.6}", self.item_total_correct, self.item_total_num, est.item_accuracy)?;
        writeln!(f, "Sequence accuracy: {}/{} => {:.6}", self.inst_total_correct, self.inst_total_num, est.sequence_accuracy)?;
        writeln!(f, "Unknown words substituted: {}", self.oov_substitutions)?;
        write!(f, "Failed sequences: {}", self.failures.len())
    }
}

/// Drives observation batches through a [`Tagger`] and scores the output.
pub struct AccuracyEvaluator<'a, T: Tagger> {
    tagger: &'a T,
}

impl<'a, T: Tagger> AccuracyEvaluator<'a, T> {
    pub fn new(tagger: &'a T) -> Self {
        Self { tagger }
    }

    /// Tags every sequence of `xs` and compares it with the same position of
    /// `ys`. Decode failures never abort the batch.
    pub fn evaluate<X, Y>(&self, xs: &[X], ys: &[Y]) -> Result<Evaluation>
    where
        X: AsRef<[String]>,
        Y: AsRef<[String]>,
    {
        self.evaluate_from(0, xs, ys)
    }

    /// Same as [`evaluate`](Self::evaluate) for a chunk that starts at
    /// `offset` in a larger batch; failures are recorded by batch index, so
    /// the evaluations of all chunks merge into the serial result.
    pub fn evaluate_from<X, Y>(&self, offset: usize, xs: &[X], ys: &[Y]) -> Result<Evaluation>
    where
        X: AsRef<[String]>,
        Y: AsRef<[String]>,
    {
        if xs.len() != ys.len() {
            return Err(HmmError::BatchMismatch {
                observations: xs.len(),
                references: ys.len(),
            });
        }
        let mut evaluation = Evaluation::default();
        for (i, (x, y)) in zip(xs, ys).enumerate() {
            let i = offset + i;
            let (x, y) = (x.as_ref(), y.as_ref());
            if x.len() != y.len() {
                let err = DecodeError::ObservationMismatch {
                    reference: y.len(),
                    observed: x.len(),
                };
                evaluation.accumulate_failure(i, y, err);
                continue;
            }
            match self.tagger.tag(x) {
                Ok(tagged) => {
                    evaluation.add_oov(tagged.oov);
                    evaluation.accumulate(i, y, tagged.tags.as_slice());
                }
                Err(err) => evaluation.accumulate_failure(i, y, err),
            }
        }
        Ok(evaluation)
    }

    /// Token level accuracy with failed sequences counted as fully wrong.
    pub fn accuracy<X, Y>(&self, xs: &[X], ys: &[Y]) -> Result<f64>
    where
        X: AsRef<[String]>,
        Y: AsRef<[String]>,
    {
        Ok(self.evaluate(xs, ys)?.item_accuracy())
    }
}
