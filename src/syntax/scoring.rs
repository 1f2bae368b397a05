//! POS-pair affinities with distance decay

use crate::lang::{Tokenized, ROOT_POSTAG};

use super::Index;

pub const UNKNOWN_HEAD_AFFINITY: f64 = 0.5;
pub const DISTANCE_DECAY: f64 = 5.0;

/// (head category, [(dependent category, affinity)], default for the head)
static AFFINITY_TABLE: &'static [(&'static str, &'static [(&'static str, f64)], f64)] = &[
    (
        "ROOT",
        &[("Verb", 1.0), ("Noun", 0.3), ("Adjective", 0.3)],
        0.2,
    ),
    (
        "Verb",
        &[
            ("Noun", 0.9),
            ("Pronoun", 0.9),
            ("ProperNoun", 0.9),
            ("Adverb", 0.8),
            ("Preposition", 0.7),
            ("Conjunction", 0.5),
            ("Verb", 0.4),
        ],
        0.3,
    ),
    (
        "Noun",
        &[
            ("Determiner", 0.9),
            ("Adjective", 0.8),
            ("Value", 0.6),
            ("Preposition", 0.6),
            ("Noun", 0.4),
        ],
        0.2,
    ),
    (
        "ProperNoun",
        &[("Determiner", 0.7), ("Noun", 0.4), ("ProperNoun", 0.6)],
        0.2,
    ),
    ("Pronoun", &[], 0.1),
    (
        "Preposition",
        &[("Noun", 0.8), ("Pronoun", 0.8), ("ProperNoun", 0.8)],
        0.2,
    ),
    ("Adjective", &[("Adverb", 0.7)], 0.1),
    ("Adverb", &[("Adverb", 0.3)], 0.1),
    ("Conjunction", &[("Noun", 0.5), ("Verb", 0.5)], 0.1),
    ("Determiner", &[], 0.1),
];

/// Looks up the affinity of `head_pos` governing `dep_pos`.
pub fn affinity(head_pos: &str, dep_pos: &str) -> f64 {
    match AFFINITY_TABLE.iter().find(|entry| entry.0 == head_pos) {
        Some(&(_, deps, default)) => deps.iter()
            .find(|dep| dep.0 == dep_pos)
            .map(|dep| dep.1)
            .unwrap_or(default),
        None => UNKNOWN_HEAD_AFFINITY,
    }
}

#[inline]
pub fn decay(distance: usize) -> f64 {
    (-(distance as f64) / DISTANCE_DECAY).exp()
}

pub fn score(head_pos: &str, dep_pos: &str, distance: usize) -> f64 {
    affinity(head_pos, dep_pos) * decay(distance)
}

/// Dense `(n+1)x(n+1)` scores over ROOT-augmented indices; `get(i, j)` is `i` heading `j`.
///
/// Built once per parse call and owned by it. The diagonal is zero.
#[derive(Clone, Debug)]
pub struct ScoreMatrix {
    size: usize,
    data: Vec<f64>,
}

impl ScoreMatrix {
    pub fn new<T: Tokenized>(tokens: &[T]) -> Self {
        let size = tokens.len() + 1;
        let mut postags = Vec::with_capacity(size);
        postags.push(ROOT_POSTAG);
        postags.extend(tokens.iter().map(|t| t.postag()));

        let mut data = vec![0.0; size * size];
        for i in 0..size {
            for j in 0..size {
                if i != j {
                    let distance = if i > j { i - j } else { j - i };
                    data[i * size + j] = score(postags[i], postags[j], distance);
                }
            }
        }
        ScoreMatrix {
            size: size,
            data: data,
        }
    }

    /// Number of rows, including ROOT.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn num_tokens(&self) -> usize {
        self.size - 1
    }

    #[inline]
    pub fn get(&self, head: Index, dependent: Index) -> f64 {
        self.data[head * self.size + dependent]
    }

    pub fn row(&self, head: Index) -> &[f64] {
        &self.data[head * self.size..(head + 1) * self.size]
    }
}
