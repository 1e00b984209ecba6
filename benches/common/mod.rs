use hmmtag::Sequence;

const TAGS: [&str; 6] = ["ADJ", "ADV", "DET", "NOUN", "PRON", "VERB"];

/// Deterministic corpus: each tag owns a block of words and picks the next
/// tag with a linear congruential generator.
pub fn corpus(n: usize, len: usize, seed: u64) -> Vec<Sequence> {
    let mut state = seed;
    let mut next = move |m: usize| {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((state >> 33) as usize) % m
    };
    (0..n)
        .map(|_| {
            (0..len)
                .map(|_| {
                    let t = next(TAGS.len());
                    (format!("w{}_{}", t, next(500)), TAGS[t])
                })
                .collect()
        })
        .collect()
}
