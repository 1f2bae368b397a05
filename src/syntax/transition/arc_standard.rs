use std::fmt;

use super::{Action, Error, TransitionMutableState, TransitionState, TransitionSystem};
use crate::syntax::scoring::ScoreMatrix;
use crate::syntax::ROOT;

/// Minimum score for an arc to be built while the buffer still has tokens.
pub const ARC_THRESHOLD: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcStandardActionType {
    Shift,
    LeftArc,
    RightArc,
}

impl ArcStandardActionType {
    pub fn from_action(action: Action) -> Self {
        match action {
            0 => ArcStandardActionType::Shift,
            1 => ArcStandardActionType::LeftArc,
            _ => ArcStandardActionType::RightArc,
        }
    }

    pub fn into_action(self) -> Action {
        match self {
            ArcStandardActionType::Shift => 0,
            ArcStandardActionType::LeftArc => 1,
            ArcStandardActionType::RightArc => 2,
        }
    }
}

impl fmt::Display for ArcStandardActionType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ArcStandardActionType::Shift => write!(f, "Shift"),
            ArcStandardActionType::LeftArc => write!(f, "LeftArc"),
            ArcStandardActionType::RightArc => write!(f, "RightArc"),
        }
    }
}

#[derive(Debug)]
pub struct ArcStandard;

impl ArcStandard {
    /// Shift: (s, i|b, A) => (s|i, b, A)
    pub fn apply_shift<S: TransitionMutableState>(state: &mut S) -> Result<(), Error> {
        match state.buffer_head() {
            Some(b0) => {
                state.push(b0)?;
                state.advance()
            }
            None => Err(Error::InvalidOperation),
        }
    }

    /// Left Arc: (s|i|j, b, A) => (s|j, b, A + (j, i))
    pub fn apply_left_arc<S: TransitionMutableState>(state: &mut S) -> Result<(), Error> {
        if !ArcStandard::is_allowed_left_arc(state) {
            return Err(Error::InvalidOperation);
        }
        let s0 = state.pop()?;
        let s1 = state.pop()?;
        state.add_arc(s1, s0)?;
        state.push(s0)
    }

    /// Right Arc: (s|i|j, b, A) => (s|i, b, A + (i, j))
    pub fn apply_right_arc<S: TransitionMutableState>(state: &mut S) -> Result<(), Error> {
        if !ArcStandard::is_allowed_right_arc(state) {
            return Err(Error::InvalidOperation);
        }
        let s0 = state.pop()?;
        let s1 = state.stack_top().ok_or(Error::InvalidOperation)?;
        state.add_arc(s0, s1)
    }

    pub fn is_allowed_shift<S: TransitionState>(state: &S) -> bool {
        !state.is_buffer_empty()
    }

    /// ROOT sits at the bottom of the stack and never becomes a dependent.
    pub fn is_allowed_left_arc<S: TransitionState>(state: &S) -> bool {
        state.stack_size() > 2
    }

    pub fn is_allowed_right_arc<S: TransitionState>(state: &S) -> bool {
        state.stack_size() > 1
    }
}

impl TransitionSystem for ArcStandard {
    fn estimate_num_actions(num_tokens: usize) -> usize {
        2 * num_tokens.saturating_sub(1)
    }

    fn apply<S: TransitionMutableState>(action: Action, state: &mut S) -> Result<(), Error> {
        match ArcStandardActionType::from_action(action) {
            ArcStandardActionType::Shift => ArcStandard::apply_shift(state)?,
            ArcStandardActionType::LeftArc => ArcStandard::apply_left_arc(state)?,
            ArcStandardActionType::RightArc => ArcStandard::apply_right_arc(state)?,
        }
        state.record(action)
    }

    fn is_allowed<S: TransitionState>(action: Action, state: &S) -> bool {
        match ArcStandardActionType::from_action(action) {
            ArcStandardActionType::Shift => ArcStandard::is_allowed_shift(state),
            ArcStandardActionType::LeftArc => ArcStandard::is_allowed_left_arc(state),
            ArcStandardActionType::RightArc => ArcStandard::is_allowed_right_arc(state),
        }
    }

    fn is_terminal<S: TransitionState>(state: &S) -> bool {
        state.is_buffer_empty() && state.stack_size() < 2
    }

    /// Priority: right arc above threshold, left arc above threshold, shift, then a forced
    /// arc once the buffer is exhausted.
    fn next_action<S: TransitionState>(state: &S, scores: &ScoreMatrix) -> Option<Action> {
        let (s0, s1) = match (state.stack(0), state.stack(1)) {
            (Some(s0), Some(s1)) => (s0, s1),
            _ => {
                return if state.is_buffer_empty() {
                    None
                } else {
                    Some(ArcStandardActionType::Shift.into_action())
                };
            }
        };
        let left_score = scores.get(s0, s1);
        let right_score = scores.get(s1, s0);
        let action = if right_score > left_score && right_score > ARC_THRESHOLD {
            ArcStandardActionType::RightArc
        } else if left_score > ARC_THRESHOLD && s1 != ROOT {
            ArcStandardActionType::LeftArc
        } else if !state.is_buffer_empty() {
            ArcStandardActionType::Shift
        } else if right_score >= left_score || s1 == ROOT {
            ArcStandardActionType::RightArc
        } else {
            ArcStandardActionType::LeftArc
        };
        Some(action.into_action())
    }
}
