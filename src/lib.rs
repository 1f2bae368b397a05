//! Heuristic dependency parsers over POS-tagged sentences, and a harness that checks whether
//! parsing a random sample of a corpus agrees with parsing all of it.
//!
//! The head selectors in [`syntax::graph`] are named after Eisner's algorithm and
//! Chu-Liu/Edmonds but are greedy approximations of them; see their docs.

extern crate chrono;
extern crate rand;
extern crate serde;
extern crate serde_json;
#[macro_use]
extern crate slog;
extern crate slog_async;
extern crate slog_term;
extern crate uuid;

pub mod dataset;
pub mod io;
pub mod lang;
pub mod logging;
pub mod stats;
pub mod syntax;
pub mod utils;
pub mod validation;

pub use crate::syntax::graph::{parse_greedy_arborescence, parse_projective};
pub use crate::syntax::transition::parse_arc_standard;
pub use crate::syntax::{Algorithm, ParseGraph};
pub use crate::validation::{run_validation, ValidationReport};
