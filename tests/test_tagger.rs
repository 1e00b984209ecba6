use hmmtag::{
    AccuracyEvaluator, CorpusStatistics, Dataset, DecodeError, DecodeOptions, Evaluation,
    HmmError, HmmParameters, HmmTagger, Sequence, Tagger, VocabularyIndex,
};

fn init() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

fn animals() -> Vec<Sequence> {
    vec![
        Sequence::from_iter([("dog", "NOUN"), ("barks", "VERB")]),
        Sequence::from_iter([("cat", "NOUN"), ("sleeps", "VERB")]),
    ]
}

fn words(v: &[&[&str]]) -> Vec<Vec<String>> {
    v.iter()
        .map(|s| s.iter().map(|w| w.to_string()).collect())
        .collect()
}

const CORPUS: &str = "\
The\tDET
dog\tNOUN
saw\tVERB
the\tDET
cat\tNOUN
.\t.

A\tDET
cat\tNOUN
runs\tVERB
.\t.

Dogs\tNOUN
bark\tVERB
loudly\tADV
.\t.

the\tDET
cat\tNOUN
sleeps\tVERB
.\t.
";

#[test]
fn counts_and_decode() {
    init();
    let corpus = animals();
    let stats = CorpusStatistics::from_sequences(&corpus);
    assert_eq!(stats.unigrams.get("NOUN"), 2);
    assert_eq!(stats.unigrams.get("VERB"), 2);
    assert_eq!(stats.bigram("NOUN", "VERB"), 2);
    assert_eq!(stats.bigrams.len(), 1);
    assert_eq!(stats.starts.get("NOUN"), 2);
    assert_eq!(stats.ends.get("VERB"), 2);
    assert_eq!(stats.pair("NOUN", "dog"), 1);
    assert_eq!(stats.pair("NOUN", "cat"), 1);

    let tagger = HmmTagger::train(&corpus, &DecodeOptions::default()).expect("failed to train");
    let tagged = tagger.tag(&["dog", "sleeps"]).expect("failed to tag");
    assert_eq!(tagged.tags, ["NOUN", "VERB"]);
}

#[test]
fn unknown_word_still_decodes() {
    init();
    let tagger = HmmTagger::train(&animals(), &DecodeOptions::default()).expect("failed to train");
    let tagged = tagger.tag(&["dog", "elephant"]).expect("failed to tag");
    assert_eq!(tagged.tags.len(), 2);
    assert_eq!(tagged.tags, ["NOUN", "VERB"]);
    assert_eq!(tagged.oov, 1);
}

#[test]
fn accuracy_three_quarters() {
    init();
    let tagger = HmmTagger::train(&animals(), &DecodeOptions::default()).expect("failed to train");
    let evaluator = AccuracyEvaluator::new(&tagger);
    let xs = words(&[&["dog", "sleeps"], &["cat", "barks"]]);
    // the model tags "barks" as VERB, so one reference tag of the second
    // sentence is missed
    let ys = words(&[&["NOUN", "VERB"], &["NOUN", "NOUN"]]);
    let accuracy = evaluator.accuracy(&xs, &ys).expect("failed to evaluate");
    assert_eq!(accuracy, 0.75);
}

#[test]
fn failures_are_conservative() {
    init();
    let tagger = HmmTagger::train(&animals(), &DecodeOptions::default()).expect("failed to train");
    let evaluator = AccuracyEvaluator::new(&tagger);
    let xs = words(&[&["dog", "sleeps"], &[], &["barks", "dog"], &["cat"]]);
    let ys = words(&[&["NOUN", "VERB"], &[], &["VERB", "NOUN"], &["NOUN", "VERB"]]);
    let evaluation = evaluator.evaluate(&xs, &ys).expect("failed to evaluate");
    let est = evaluation.estimate();
    assert_eq!(est.num_items, 6);
    assert_eq!(est.item_accuracy, 2.0 / 6.0);
    assert!(est.item_accuracy.is_finite());
    assert_eq!(
        evaluation.failures(),
        &[
            (1, DecodeError::EmptySequence),
            (2, DecodeError::NoViablePath { position: 0 }),
            (3, DecodeError::ObservationMismatch { reference: 2, observed: 1 }),
        ]
    );
}

#[test]
fn only_empty_sequences() {
    init();
    let tagger = HmmTagger::train(&animals(), &DecodeOptions::default()).expect("failed to train");
    let evaluator = AccuracyEvaluator::new(&tagger);
    let xs: Vec<Vec<String>> = vec![vec![]];
    let accuracy = evaluator.accuracy(&xs, &xs).expect("failed to evaluate");
    assert_eq!(accuracy, 0.0);
}

#[test]
fn batch_mismatch() {
    let tagger = HmmTagger::train(&animals(), &DecodeOptions::default()).expect("failed to train");
    let evaluator = AccuracyEvaluator::new(&tagger);
    let xs = words(&[&["dog"]]);
    let ys: Vec<Vec<String>> = vec![];
    match evaluator.evaluate(&xs, &ys) {
        Err(HmmError::BatchMismatch { observations: 1, references: 0 }) => {}
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn untrained_tag() {
    let corpus = animals();
    let stats = CorpusStatistics::from_sequences(&corpus);
    let vocab = VocabularyIndex::new(["dog"], ["ADJ", "NOUN", "VERB"]);
    match HmmParameters::new(&stats, &vocab) {
        Err(HmmError::Configuration { tag }) => assert_eq!(tag, "ADJ"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn corpus_round() {
    init();
    let mut ds = Dataset::default();
    ds.read(CORPUS.as_bytes()).expect("failed to read corpus");
    assert_eq!(ds.len(), 4);
    let tagger = HmmTagger::train(&ds.seqs, &DecodeOptions::default()).expect("failed to train");
    let evaluator = AccuracyEvaluator::new(&tagger);

    let (xs, ys) = ds.split_xy();
    let first = evaluator.evaluate(&xs, &ys).expect("failed to evaluate");
    let second = evaluator.evaluate(&xs, &ys).expect("failed to evaluate");
    assert_eq!(first.estimate(), second.estimate());
    assert_eq!(first.item_accuracy(), 1.0);

    let tagged = tagger
        .tag(&["the", "dog", "runs", "quickly", "."])
        .expect("failed to tag");
    assert_eq!(tagged.tags, ["DET", "NOUN", "VERB", "ADV", "."]);
    assert_eq!(tagged.oov, 1);
}

#[test]
fn parallel_scoring_matches_serial() {
    init();
    let mut ds = Dataset::default();
    ds.read(CORPUS.as_bytes()).expect("failed to read corpus");
    let tagger = HmmTagger::train(&ds.seqs, &DecodeOptions::default()).expect("failed to train");
    let evaluator = AccuracyEvaluator::new(&tagger);
    let (mut xs, mut ys) = ds.split_xy();
    // one failing sequence in each chunk of two
    xs.insert(1, vec![]);
    ys.insert(1, vec![]);
    xs.insert(3, words(&[&["cat"]]).remove(0));
    ys.insert(3, words(&[&["NOUN", "VERB"]]).remove(0));
    xs.insert(4, words(&[&[".", "."]]).remove(0));
    ys.insert(4, words(&[&[".", "."]]).remove(0));
    let serial = evaluator.evaluate(&xs, &ys).expect("failed to evaluate");
    assert_eq!(
        serial.failures(),
        &[
            (1, DecodeError::EmptySequence),
            (3, DecodeError::ObservationMismatch { reference: 2, observed: 1 }),
            (4, DecodeError::NoViablePath { position: 0 }),
        ]
    );
    let evaluator = &evaluator;

    let parts: Vec<Evaluation> = std::thread::scope(|s| {
        let handles: Vec<_> = xs
            .chunks(2)
            .zip(ys.chunks(2))
            .enumerate()
            .map(|(k, (x, y))| s.spawn(move || evaluator.evaluate_from(2 * k, x, y)))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap().expect("failed to evaluate"))
            .collect()
    });
    let mut forward = Evaluation::default();
    for part in parts.iter().cloned() {
        forward.merge(part);
    }
    let mut backward = Evaluation::default();
    for part in parts.into_iter().rev() {
        backward.merge(part);
    }
    assert_eq!(forward.failures(), serial.failures());
    assert_eq!(backward.failures(), serial.failures());
    assert_eq!(forward, serial);
    assert_eq!(backward, serial);
    assert_eq!(backward.estimate(), serial.estimate());
}
