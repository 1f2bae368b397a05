use super::{Action, Error, TransitionMutableState, TransitionState};
use crate::syntax::{Arc, Index, ROOT};

/// Stack, buffer and arcs over ROOT-augmented indices
///
/// `num_tokens` counts ROOT. The stack starts as `[ROOT]` and the buffer as `1..num_tokens`.
#[derive(Debug, Clone)]
pub struct State {
    num_tokens: usize,
    stack: Vec<Index>,
    buffer: Option<Index>,
    heads: Vec<Option<Index>>,
    arcs: Vec<Arc>,
    actions: Vec<Action>,
}

impl State {
    pub fn with_capacity(num_tokens: usize, capacity: usize) -> Self {
        State {
            num_tokens: num_tokens,
            stack: vec![ROOT],
            buffer: if num_tokens > 1 { Some(1) } else { None },
            heads: vec![None; num_tokens],
            arcs: Vec::with_capacity(num_tokens.saturating_sub(1)),
            actions: Vec::with_capacity(capacity),
        }
    }
}

impl TransitionState for State {
    fn step(&self) -> usize {
        self.actions.len()
    }

    fn num_tokens(&self) -> usize {
        self.num_tokens
    }

    fn stack_top(&self) -> Option<Index> {
        self.stack.last().map(|&i| i)
    }

    fn stack(&self, position: usize) -> Option<Index> {
        let stack_size = self.stack.len();
        if position < stack_size {
            self.stack.get(stack_size - 1 - position).map(|&i| i)
        } else {
            None
        }
    }

    fn stack_size(&self) -> usize {
        self.stack.len()
    }

    fn is_stack_empty(&self) -> bool {
        self.stack.is_empty()
    }

    fn buffer_head(&self) -> Option<Index> {
        self.buffer
    }

    fn buffer_size(&self) -> usize {
        match self.buffer {
            Some(buffer) => self.num_tokens - buffer,
            None => 0,
        }
    }

    fn is_buffer_empty(&self) -> bool {
        self.buffer.is_none()
    }

    fn head(&self, index: Index) -> Option<Index> {
        if index < self.num_tokens {
            return self.heads[index];
        }
        None
    }

    fn heads(&self) -> &[Option<Index>] {
        &self.heads
    }

    fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    fn actions(&self) -> &[Action] {
        &self.actions
    }
}

impl TransitionMutableState for State {
    fn advance(&mut self) -> Result<(), Error> {
        match self.buffer {
            Some(buffer) => {
                if buffer == self.num_tokens - 1 {
                    self.buffer = None;
                } else {
                    self.buffer = Some(buffer + 1);
                }
                Ok(())
            }
            None => Err(Error::InvalidOperation),
        }
    }

    fn push(&mut self, index: Index) -> Result<(), Error> {
        if index >= self.num_tokens {
            return Err(Error::InvalidArgument);
        }
        self.stack.push(index);
        Ok(())
    }

    fn pop(&mut self) -> Result<Index, Error> {
        self.stack.pop().ok_or(Error::InvalidOperation)
    }

    fn add_arc(&mut self, index: Index, head: Index) -> Result<(), Error> {
        if index >= self.num_tokens || head >= self.num_tokens {
            Err(Error::InvalidArgument)
        } else if index == head || index == ROOT {
            Err(Error::InvalidOperation)
        } else {
            let val = &mut self.heads[index];
            match *val {
                Some(_) => Err(Error::InvalidOperation),
                None => {
                    *val = Some(head);
                    self.arcs.push(Arc::new(head, index));
                    Ok(())
                }
            }
        }
    }

    fn record(&mut self, action: Action) -> Result<(), Error> {
        self.actions.push(action);
        Ok(())
    }
}
