//=========================================================================
// Transition Queue
//=========================================================================
//
// Scene change requests made during a tick.
//
// Scenes push target keys here; the scene manager applies them in FIFO
// order at the tick boundary, after every scene hook has run.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::SceneKey;

//=== Transition Queue ====================================================

pub struct TransitionQueue<S: SceneKey> {
    queue: Vec<S>,
}

impl<S: SceneKey> TransitionQueue<S> {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Requests a change to `next` at the end of this tick.
    pub fn push(&mut self, next: S) {
        self.queue.push(next);
    }

    pub fn iter(&self) -> impl Iterator<Item = &S> {
        self.queue.iter()
    }

    pub fn contains(&self, key: S) -> bool {
        self.queue.contains(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn clear(&mut self) {
        self.queue.clear()
    }

    /// Takes all requests, leaving the queue empty.
    pub fn take(&mut self) -> Vec<S> {
        std::mem::take(&mut self.queue)
    }
}

impl<S: SceneKey> Default for TransitionQueue<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
