//! CoNLL-X input for tagged sentences
//!
//! Only FORM and the POS columns are used. Blank lines separate sentences and lines starting
//! with `#` are comments.

use std::io as std_io;
use std::path::Path;

use crate::dataset::Dataset;
use crate::io::{self as mod_io, FileOpen, Read};
use crate::lang::Token;

static CONLL_FIELD_DELIMITER: &'static str = "\t";
static CONLL_EMPTY_FIELD: &'static str = "_";
pub static UNKNOWN_POSTAG: &'static str = "X";

const CONLL_MIN_FIELDS: usize = 5;
const CONLL_MAX_FIELDS: usize = 10;

/// One token line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: usize,
    pub form: String,
    pub lemma: Option<String>,
    pub cpostag: Option<String>,
    pub postag: Option<String>,
}

impl Entry {
    /// CPOSTAG, then POSTAG, then `X`.
    pub fn pos(&self) -> &str {
        self.cpostag
            .as_ref()
            .or(self.postag.as_ref())
            .map(|s| s.as_str())
            .unwrap_or(UNKNOWN_POSTAG)
    }

    /// Token with its tag mapped to a scoring category, see [`category`].
    pub fn into_token(self, idx: usize) -> Token {
        let pos = category(self.pos()).to_string();
        Token::new(self.form, pos, idx)
    }
}

/// Maps a Universal Dependencies or Penn Treebank tag to the category the scorer knows.
///
/// Unrecognized tags are returned unchanged.
pub fn category(tag: &str) -> &str {
    match tag {
        "DET" | "DT" | "PDT" | "WDT" => "Determiner",
        "PROPN" => "ProperNoun",
        "NOUN" => "Noun",
        "VERB" | "AUX" | "MD" => "Verb",
        "ADJ" => "Adjective",
        "ADV" => "Adverb",
        "ADP" | "IN" => "Preposition",
        "PRON" | "WP" | "WP$" => "Pronoun",
        "CCONJ" | "SCONJ" | "CC" => "Conjunction",
        "NUM" | "CD" => "Value",
        _ if tag.starts_with("NNP") => "ProperNoun",
        _ if tag.starts_with("NN") => "Noun",
        _ if tag.starts_with("VB") => "Verb",
        _ if tag.starts_with("JJ") => "Adjective",
        _ if tag.starts_with("RB") => "Adverb",
        _ if tag.starts_with("PRP") => "Pronoun",
        _ => tag,
    }
}

#[inline]
fn parse_optional_str_field(field: &str) -> Option<String> {
    if field == CONLL_EMPTY_FIELD {
        None
    } else {
        Some(field.to_string())
    }
}

impl mod_io::FromLine for Entry {
    type Err = std_io::Error;

    fn from_line(line: &str) -> Result<Entry, Self::Err> {
        let cols: Vec<&str> = line.trim_end_matches(|c| c == '\n' || c == '\r')
            .split(CONLL_FIELD_DELIMITER)
            .collect();
        if cols.len() < CONLL_MIN_FIELDS || cols.len() > CONLL_MAX_FIELDS {
            return Err(std_io::Error::new(
                std_io::ErrorKind::InvalidData,
                format!(
                    "expected {} to {} fields, found {}",
                    CONLL_MIN_FIELDS,
                    CONLL_MAX_FIELDS,
                    cols.len()
                ),
            ));
        }
        let id = cols[0].parse::<usize>().map_err(|e| {
            std_io::Error::new(std_io::ErrorKind::InvalidData, e)
        })?;
        Ok(Entry {
            id: id,
            form: cols[1].to_string(),
            lemma: parse_optional_str_field(cols[2]),
            cpostag: parse_optional_str_field(cols[3]),
            postag: parse_optional_str_field(cols[4]),
        })
    }
}

pub fn read_upto<R: std_io::BufRead>(
    reader: &mut R,
    num: usize,
    buf: &mut Vec<Vec<Token>>,
) -> std_io::Result<usize> {
    let mut count = 0;
    let mut line = String::new();
    let mut tokens = vec![];
    while count < num {
        match reader.read_line(&mut line) {
            Ok(0) => {
                if !tokens.is_empty() {
                    buf.push(tokens);
                    count += 1;
                }
                break;
            }
            Ok(_) => {
                let line_trimmed = line.trim();
                if line_trimmed.is_empty() {
                    if !tokens.is_empty() {
                        buf.push(tokens);
                        count += 1;
                    }
                    tokens = vec![];
                } else if !line_trimmed.starts_with('#') {
                    let entry = <Entry as mod_io::FromLine>::from_line(line_trimmed)?;
                    let idx = tokens.len();
                    tokens.push(entry.into_token(idx));
                }
            }
            Err(ref e) if e.kind() == std_io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
        line.clear();
    }
    Ok(count)
}

pub type Reader<R> = mod_io::Reader<R, Vec<Token>>;

impl<R: std_io::BufRead> Read for Reader<R> {
    type Item = Vec<Token>;

    fn read_upto(&mut self, num: usize, buf: &mut Vec<Self::Item>) -> std_io::Result<usize> {
        read_upto(self.inner_mut(), num, buf)
    }
}

pub fn load<P: AsRef<Path>>(path: P) -> std_io::Result<Dataset<Vec<Token>>> {
    let mut reader = Reader::<std_io::BufReader<std::fs::File>>::open(path)?;
    let mut sentences = vec![];
    reader.read(&mut sentences)?;
    Ok(Dataset::from_items(sentences))
}
