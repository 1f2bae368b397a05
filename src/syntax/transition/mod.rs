use std::error;
use std::fmt;

use crate::lang::Tokenized;

use super::scoring::ScoreMatrix;
use super::{Arc, Index, ParseGraph};

pub use self::arc_standard::*;
pub use self::state::*;

mod arc_standard;
mod state;

pub type Action = u32;

pub trait TransitionState {
    fn step(&self) -> usize {
        self.actions().len()
    }

    fn num_tokens(&self) -> usize;

    fn stack_top(&self) -> Option<Index>;

    /// Stack element counted from the top, `stack(0)` being the top.
    fn stack(&self, position: usize) -> Option<Index>;

    fn stack_size(&self) -> usize;

    fn is_stack_empty(&self) -> bool {
        self.stack_size() == 0
    }

    fn buffer_head(&self) -> Option<Index>;

    fn buffer_size(&self) -> usize;

    fn is_buffer_empty(&self) -> bool {
        self.buffer_size() == 0
    }

    fn head(&self, index: Index) -> Option<Index>;

    fn heads(&self) -> &[Option<Index>];

    /// Arcs in creation order.
    fn arcs(&self) -> &[Arc];

    fn actions(&self) -> &[Action];
}

pub trait TransitionMutableState: TransitionState {
    fn advance(&mut self) -> Result<(), Error>;

    fn push(&mut self, index: Index) -> Result<(), Error>;

    fn pop(&mut self) -> Result<Index, Error>;

    fn add_arc(&mut self, index: Index, head: Index) -> Result<(), Error>;

    fn record(&mut self, action: Action) -> Result<(), Error>;
}

pub trait TransitionSystem {
    fn estimate_num_actions(num_tokens: usize) -> usize;

    fn apply<S: TransitionMutableState>(action: Action, state: &mut S) -> Result<(), Error>;

    fn is_allowed<S: TransitionState>(action: Action, state: &S) -> bool;

    fn is_terminal<S: TransitionState>(state: &S) -> bool;

    /// Chooses the next action from arc scores, `None` when no action applies.
    fn next_action<S: TransitionState>(state: &S, scores: &ScoreMatrix) -> Option<Action>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    InvalidOperation,
    InvalidArgument,
}

impl Error {
    pub fn as_str(&self) -> &'static str {
        match *self {
            Error::InvalidOperation => "invalid operation",
            Error::InvalidArgument => "invalid argument",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl error::Error for Error {}

/// Runs a transition system to completion with the score-driven policy.
///
/// A disallowed or failing action ends the run early with the arcs built so far.
pub fn run<T: TransitionSystem>(scores: &ScoreMatrix) -> State {
    let size = scores.size();
    let mut state = State::with_capacity(size, T::estimate_num_actions(size));
    while !T::is_terminal(&state) {
        let action = match T::next_action(&state, scores) {
            Some(action) if T::is_allowed(action, &state) => action,
            _ => break,
        };
        if T::apply(action, &mut state).is_err() {
            break;
        }
    }
    state
}

pub fn parse_arc_standard<T: Tokenized>(tokens: &[T]) -> ParseGraph {
    if tokens.is_empty() {
        return ParseGraph::new();
    }
    let scores = ScoreMatrix::new(tokens);
    let state = run::<ArcStandard>(&scores);
    ParseGraph::from_arcs(tokens, state.arcs(), &scores)
}
