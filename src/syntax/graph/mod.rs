use crate::lang::Tokenized;

use super::scoring::ScoreMatrix;
use super::{Arc, Index, ParseGraph, ROOT};

/// Assigns heads greedily under a crossing constraint against the arcs fixed so far
///
/// Dependents are visited left to right and each takes its best-scoring head among the
/// candidates whose arc does not cross an already assigned arc. Ties go to the lowest head
/// index; with no admissible head the dependent attaches to ROOT. This is not Eisner's
/// dynamic program: the result depends on the visiting order and later constraints never
/// revise earlier choices.
///
/// Returns heads over ROOT-augmented indices, `None` for ROOT.
pub fn eisner(scores: &ScoreMatrix) -> Vec<Option<Index>> {
    let size = scores.size();
    let mut heads: Vec<Option<Index>> = vec![None; size];
    for j in 1..size {
        let mut best_head = ROOT;
        let mut best_score = f64::NEG_INFINITY;
        for i in 0..size {
            if i == j {
                continue;
            }
            let candidate = Arc::new(i, j);
            let projective = heads.iter().enumerate().all(|(k, head)| match *head {
                Some(h) if k != j => !candidate.crosses(&Arc::new(h, k)),
                _ => true,
            });
            if projective {
                let s = scores.get(i, j);
                if s > best_score {
                    best_head = i;
                    best_score = s;
                }
            }
        }
        heads[j] = Some(best_head);
    }
    heads
}

/// Picks the arg-max head of every dependent independently
///
/// There is no cycle detection nor contraction, so unlike the Chu-Liu/Edmonds algorithm
/// the result may contain cycles among non-ROOT nodes. Ties go to the lowest head index.
///
/// Returns heads over ROOT-augmented indices, `None` for ROOT.
pub fn chu_liu_edmonds(scores: &ScoreMatrix) -> Vec<Option<Index>> {
    let size = scores.size();
    let mut heads: Vec<Option<Index>> = vec![None; size];
    for j in 1..size {
        let mut best_head = ROOT;
        let mut best_score = f64::NEG_INFINITY;
        for i in (0..size).filter(|&i| i != j) {
            let s = scores.get(i, j);
            if s > best_score {
                best_head = i;
                best_score = s;
            }
        }
        heads[j] = Some(best_head);
    }
    heads
}

pub fn arcs_from_heads(heads: &[Option<Index>]) -> Vec<Arc> {
    heads
        .iter()
        .enumerate()
        .filter_map(|(dependent, head)| head.map(|h| Arc::new(h, dependent)))
        .collect()
}

pub fn parse_projective<T: Tokenized>(tokens: &[T]) -> ParseGraph {
    parse_with(tokens, eisner)
}

pub fn parse_greedy_arborescence<T: Tokenized>(tokens: &[T]) -> ParseGraph {
    parse_with(tokens, chu_liu_edmonds)
}

fn parse_with<T, F>(tokens: &[T], select: F) -> ParseGraph
where
    T: Tokenized,
    F: Fn(&ScoreMatrix) -> Vec<Option<Index>>,
{
    if tokens.is_empty() {
        return ParseGraph::new();
    }
    let scores = ScoreMatrix::new(tokens);
    let heads = select(&scores);
    ParseGraph::from_arcs(tokens, &arcs_from_heads(&heads), &scores)
}
