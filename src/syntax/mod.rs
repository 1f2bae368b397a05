use std::fmt;
use std::mem;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::lang::{Tokenized, ROOT_FORM, ROOT_POSTAG};

use self::scoring::ScoreMatrix;

pub mod graph;
pub mod scoring;
pub mod similarity;
pub mod transition;

pub type Index = usize;

pub const ROOT: Index = 0;

/// A head-dependent relation over ROOT-augmented indices
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Arc {
    pub head: Index,
    pub dependent: Index,
}

impl Arc {
    pub fn new(head: Index, dependent: Index) -> Self {
        Arc {
            head: head,
            dependent: dependent,
        }
    }

    #[inline]
    pub fn span(&self) -> (Index, Index) {
        if self.head < self.dependent {
            (self.head, self.dependent)
        } else {
            (self.dependent, self.head)
        }
    }

    /// Returns true if the two spans properly interleave.
    ///
    /// Nested and disjoint spans, including spans sharing an endpoint, do not cross.
    pub fn crosses(&self, other: &Arc) -> bool {
        let (l1, r1) = self.span();
        let (l2, r2) = other.span();
        (l1 < l2 && l2 < r1 && r1 < r2) || (l2 < l1 && l1 < r2 && r2 < r1)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub pos: String,
    pub weight: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl ParseGraph {
    pub fn new() -> Self {
        ParseGraph {
            nodes: vec![],
            edges: vec![],
        }
    }

    /// Builds a graph from arcs, keeping the arc order for the edges.
    ///
    /// Nodes are ROOT followed by the tokens in input order. A node's weight is one plus the
    /// number of dependents attached to it.
    pub fn from_arcs<T: Tokenized>(tokens: &[T], arcs: &[Arc], scores: &ScoreMatrix) -> Self {
        if tokens.is_empty() {
            return ParseGraph::new();
        }
        let mut num_children = vec![0usize; tokens.len() + 1];
        for arc in arcs {
            num_children[arc.head] += 1;
        }
        let mut nodes = Vec::with_capacity(tokens.len() + 1);
        nodes.push(Node {
            id: node_id(tokens, ROOT),
            label: ROOT_FORM.to_string(),
            pos: ROOT_POSTAG.to_string(),
            weight: 1.0 + num_children[ROOT] as f64,
        });
        for (i, token) in tokens.iter().enumerate() {
            nodes.push(Node {
                id: node_id(tokens, i + 1),
                label: token.form().to_string(),
                pos: token.postag().to_string(),
                weight: 1.0 + num_children[i + 1] as f64,
            });
        }
        let edges = arcs
            .iter()
            .map(|arc| Edge {
                source: node_id(tokens, arc.head),
                target: node_id(tokens, arc.dependent),
                weight: scores.get(arc.head, arc.dependent),
            })
            .collect();
        ParseGraph {
            nodes: nodes,
            edges: edges,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Appends another graph, as when several sentences are merged into one corpus graph.
    pub fn append(&mut self, other: ParseGraph) {
        self.nodes.extend(other.nodes);
        self.edges.extend(other.edges);
    }

    /// Approximate heap and inline size of the graph in bytes.
    pub fn footprint(&self) -> usize {
        let nodes: usize = self.nodes
            .iter()
            .map(|n| mem::size_of::<Node>() + n.id.capacity() + n.label.capacity() + n.pos.capacity())
            .sum();
        let edges: usize = self.edges
            .iter()
            .map(|e| mem::size_of::<Edge>() + e.source.capacity() + e.target.capacity())
            .sum();
        mem::size_of::<ParseGraph>() + nodes + edges
    }
}

/// Resolves the external id of a ROOT-augmented index.
pub fn node_id<T: Tokenized>(tokens: &[T], index: Index) -> String {
    if index == ROOT {
        ROOT_FORM.to_string()
    } else {
        format!("{}_{}", tokens[index - 1].form(), index - 1)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Projective,
    Greedy,
    ArcStandard,
}

impl Algorithm {
    pub fn all() -> [Algorithm; 3] {
        [Algorithm::Projective, Algorithm::Greedy, Algorithm::ArcStandard]
    }

    pub fn as_str(&self) -> &'static str {
        match *self {
            Algorithm::Projective => "projective",
            Algorithm::Greedy => "greedy",
            Algorithm::ArcStandard => "arcstandard",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "projective" | "eisner" => Ok(Algorithm::Projective),
            "greedy" | "chu-liu-edmonds" | "cle" => Ok(Algorithm::Greedy),
            "arcstandard" | "arc-standard" => Ok(Algorithm::ArcStandard),
            _ => Err(format!("unknown algorithm: `{}`", s)),
        }
    }
}

pub fn parse<T: Tokenized>(algorithm: Algorithm, tokens: &[T]) -> ParseGraph {
    match algorithm {
        Algorithm::Projective => graph::parse_projective(tokens),
        Algorithm::Greedy => graph::parse_greedy_arborescence(tokens),
        Algorithm::ArcStandard => transition::parse_arc_standard(tokens),
    }
}

/// Parses every sentence and concatenates the graphs in sentence order.
pub fn parse_corpus<'a, T, I>(algorithm: Algorithm, sentences: I) -> ParseGraph
where
    T: Tokenized + 'a,
    I: IntoIterator<Item = &'a Vec<T>>,
{
    let mut corpus = ParseGraph::new();
    for sentence in sentences {
        corpus.append(parse(algorithm, sentence));
    }
    corpus
}
