//! Structural agreement between two parses

use std::collections::{HashMap, HashSet};

use super::Edge;

/// Jaccard similarity of the `(source, target)` pair sets; 1.0 when both are empty.
pub fn jaccard(edges1: &[Edge], edges2: &[Edge]) -> f64 {
    let set1: HashSet<(&str, &str)> = edge_pairs(edges1).collect();
    let set2: HashSet<(&str, &str)> = edge_pairs(edges2).collect();
    let union = set1.union(&set2).count();
    if union == 0 {
        return 1.0;
    }
    let intersection = set1.intersection(&set2).count();
    intersection as f64 / union as f64
}

/// Fraction of dependents assigned the same head by both edge sets
///
/// Counted over the union of dependents; a dependent present on one side only never matches.
/// When a dependent occurs more than once in an edge set, its last head wins.
/// Returns 1.0 when there are no dependents at all.
pub fn attachment_score(edges1: &[Edge], edges2: &[Edge]) -> f64 {
    let heads1 = head_map(edges1);
    let heads2 = head_map(edges2);
    let dependents: HashSet<&str> = heads1.keys().chain(heads2.keys()).map(|&d| d).collect();
    if dependents.is_empty() {
        return 1.0;
    }
    let matches = dependents
        .iter()
        .filter(|d| match (heads1.get(*d), heads2.get(*d)) {
            (Some(h1), Some(h2)) => h1 == h2,
            _ => false,
        })
        .count();
    matches as f64 / dependents.len() as f64
}

fn edge_pairs<'a>(edges: &'a [Edge]) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
    edges
        .iter()
        .map(|e| (e.source.as_str(), e.target.as_str()))
}

fn head_map(edges: &[Edge]) -> HashMap<&str, &str> {
    let mut heads = HashMap::with_capacity(edges.len());
    for edge in edges {
        heads.insert(edge.target.as_str(), edge.source.as_str());
    }
    heads
}
