//=========================================================================
// Input Buffer
//=========================================================================
//
// Collects converted input between two redraws.
//
// Two lanes:
// - `discrete`: keys, buttons and typed text, kept in arrival order
//   (no deduplication; typing "ll" must produce two characters)
// - `continuous`: pointer movement, coalesced to the latest position
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::event::InputEvent;

//=== InputBuffer =========================================================

pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    continuous: Option<InputEvent>,
}

impl InputBuffer {
    pub(crate) fn new() -> Self {
        const DISCRETE_BASE: usize = 64;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            continuous: None,
        }
    }

    /// Replaces any pending pointer movement.
    pub(crate) fn push_continuous(&mut self, event: InputEvent) {
        self.continuous = Some(event);
    }

    pub(crate) fn push_discrete(&mut self, event: InputEvent) {
        self.discrete.push(event);
    }

    /// Takes both lanes, or `None` when nothing was buffered.
    pub(crate) fn drain(&mut self) -> Option<(Vec<InputEvent>, Vec<InputEvent>)> {
        if self.is_empty() {
            return None;
        }
        let discrete = std::mem::take(&mut self.discrete);
        let continuous = self.continuous.take().into_iter().collect();
        Some((discrete, continuous))
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_none()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
