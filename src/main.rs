use std::path::{Path, PathBuf};

use clap::Parser;
use hmmtag::{AccuracyEvaluator, Dataset, DecodeOptions, HmmError, HmmTagger, Tagger};

/// Train a hidden Markov model tagger on a corpus (TRAIN) and assign tags to
/// the sequences of the data files (FILE)
/// Evaluate the accuracy of the model on tagged sequences (with -t option)
#[derive(Debug, Parser)]
#[command(name = "hmmtag")]
struct Argv {
    /// read the training corpus from a file (TRAIN)
    #[arg(long, required = true, value_name = "TRAIN")]
    train: PathBuf,
    /// report the performance of the model on the data
    #[arg(short = 't', long = "test")]
    evaluate: bool,
    /// print the performance summary as JSON
    #[arg(long)]
    json: bool,
    /// output the reference tags in the input data
    #[arg(short, long)]
    reference: bool,
    /// suppress tagging results (useful for test mode)
    #[arg(short, long)]
    quiet: bool,
    /// read decoding options from a JSON file, overriding the flags
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,
    #[command(flatten)]
    decode: DecodeOptions,
    /// data files in the `word<TAB>tag` format
    #[arg(value_name = "FILE")]
    datasets: Vec<PathBuf>,
}

fn report(path: &Path, ds: &Dataset) {
    log::info!(
        "{}: {} sequences, {} items, longest sequence {}",
        path.display(),
        ds.len(),
        ds.total_items(),
        ds.max_length()
    );
}

fn main() -> Result<(), HmmError> {
    env_logger::init();
    let argv = Argv::parse();
    log::info!("{:?}", argv);

    let opts = match &argv.config {
        Some(path) => DecodeOptions::from_path(path)?,
        None => argv.decode.clone(),
    };
    let corpus = Dataset::from_path(&argv.train)?;
    report(&argv.train, &corpus);
    let tagger = HmmTagger::train(&corpus.seqs, &opts)?;
    let evaluator = AccuracyEvaluator::new(&tagger);

    for fpath in &argv.datasets {
        let ds = Dataset::from_path(fpath)?;
        report(fpath, &ds);
        if !argv.quiet {
            for seq in &ds.seqs {
                match tagger.tag(&seq.words) {
                    Ok(tagged) => {
                        for ((word, reference), tag) in seq.pairs().zip(&tagged.tags) {
                            if argv.reference {
                                println!("{word}\t{reference}\t{tag}");
                            } else {
                                println!("{word}\t{tag}");
                            }
                        }
                    }
                    Err(err) => log::warn!("failed to tag: {err}"),
                }
                println!();
            }
        }
        if argv.evaluate {
            let (xs, ys) = ds.split_xy();
            let evaluation = evaluator.evaluate(&xs, &ys)?;
            if argv.json {
                println!("{}", serde_json::to_string_pretty(&evaluation.estimate())?);
            } else {
                println!("{}", evaluation);
            }
        }
    }
    Ok(())
}
