//! Deterministic filler text for row payloads.
//!
//! Every row in a batch carries the same payload so row size stays uniform;
//! what the text says is irrelevant. A seeded generator keeps runs
//! reproducible.

use rand::{rngs::StdRng, Rng};

const WORDS: &[&str] = &[
    "lorem",
    "ipsum",
    "dolor",
    "sit",
    "amet",
    "consectetur",
    "adipiscing",
    "elit",
    "sed",
    "do",
    "eiusmod",
    "tempor",
    "incididunt",
    "ut",
    "labore",
    "et",
    "dolore",
    "magna",
    "aliqua",
    "enim",
    "ad",
    "minim",
    "veniam",
    "quis",
    "nostrud",
    "exercitation",
    "ullamco",
    "laboris",
    "nisi",
    "aliquip",
    "ex",
    "ea",
    "commodo",
    "consequat",
    "duis",
    "aute",
    "irure",
    "in",
    "reprehenderit",
    "voluptate",
    "velit",
    "esse",
    "cillum",
    "fugiat",
    "nulla",
    "pariatur",
];

/// Produce a filler paragraph of at most `max_chars` characters.
///
/// Sentences of four to eight words are appended until the next one would no
/// longer fit. Identical RNG state yields identical text.
pub fn text(rng: &mut StdRng, max_chars: usize) -> String {
    let mut out = String::new();

    loop {
        let sentence = sentence(rng);

        let needed = if out.is_empty() {
            sentence.len()
        } else {
            sentence.len() + 1
        };

        if out.len() + needed > max_chars {
            break;
        }

        if !out.is_empty() {
            out.push(' ');
        }

        out.push_str(&sentence);
    }

    out
}

fn sentence(rng: &mut StdRng) -> String {
    let word_count = rng.gen_range(4..=8);
    let mut sentence = String::new();

    for i in 0..word_count {
        let word = WORDS[rng.gen_range(0..WORDS.len())];

        if i == 0 {
            sentence.push_str(&word[..1].to_ascii_uppercase());
            sentence.push_str(&word[1..]);
        } else {
            sentence.push(' ');
            sentence.push_str(word);
        }
    }

    sentence.push('.');

    sentence
}

#[cfg(test)]
mod tests {
    use super::text;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn same_seed_same_text() {
        let first = text(&mut StdRng::seed_from_u64(0), 2000);
        let second = text(&mut StdRng::seed_from_u64(0), 2000);

        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn respects_the_length_budget() {
        let mut rng = StdRng::seed_from_u64(42);

        for max_chars in &[200usize, 500, 1000, 2000] {
            let paragraph = text(&mut rng, *max_chars);

            assert!(paragraph.len() <= *max_chars);
            assert!(paragraph.ends_with('.'));
        }
    }

    #[test]
    fn zero_budget_yields_empty_text() {
        let mut rng = StdRng::seed_from_u64(0);

        assert!(text(&mut rng, 0).is_empty());
    }

    #[test]
    fn successive_calls_differ() {
        let mut rng = StdRng::seed_from_u64(0);

        let first = text(&mut rng, 1000);
        let second = text(&mut rng, 1000);

        assert_ne!(first, second);
    }
}
