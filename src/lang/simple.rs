use std::fmt;

use serde::{Deserialize, Serialize};

use crate::lang::Tokenized;

/// A tagged token as produced by an external tagger
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    text: String,
    pos: String,
    idx: usize,
}

impl Token {
    pub fn new<S1: Into<String>, S2: Into<String>>(text: S1, pos: S2, idx: usize) -> Self {
        Token {
            text: text.into(),
            pos: pos.into(),
            idx: idx,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn pos(&self) -> &str {
        &self.pos
    }

    pub fn idx(&self) -> usize {
        self.idx
    }
}

impl Tokenized for Token {
    fn id(&self) -> usize {
        self.idx
    }

    fn form(&self) -> &str {
        &self.text
    }

    fn postag(&self) -> &str {
        &self.pos
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "idx: {}, text: {}, pos: {}", self.idx, self.text, self.pos)
    }
}

/// Builds a sentence from `(text, pos)` pairs, numbering tokens from zero.
pub fn tokens_from_pairs<S1, S2, I>(pairs: I) -> Vec<Token>
where
    S1: Into<String>,
    S2: Into<String>,
    I: IntoIterator<Item = (S1, S2)>,
{
    pairs
        .into_iter()
        .enumerate()
        .map(|(i, (text, pos))| Token::new(text, pos, i))
        .collect()
}
