//=========================================================================
// Scheduler
//=========================================================================
//
// Tick-based deadlines tagged with the scene that created them.
//
// Architecture:
//   Scene → schedule(owner, due_tick) → DeadlineId
//   GlobalSystems → take_due(now) → [Deadline] (due, then id order)
//   SceneManager → cancel_owner(scene) on exit / suspend
//
// Deadlines are checked once per tick against a monotonic counter, so a
// deadline whose tick never comes is deferred rather than dropped.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::scene::SceneKey;

//=== DeadlineId ==========================================================

/// Opaque handle to a scheduled deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeadlineId(u64);

//=== Deadline ============================================================

/// A pending deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline<S: SceneKey> {
    pub id: DeadlineId,
    pub owner: S,
    /// Tick on or after which the deadline fires.
    pub due: u64,
}

//=== Scheduler ===========================================================

/// Owner-tagged deadline list.
pub struct Scheduler<S: SceneKey> {
    pending: Vec<Deadline<S>>,
    next_id: u64,
}

impl<S: SceneKey> Scheduler<S> {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_id: 0,
        }
    }

    //--- Scheduling -------------------------------------------------------

    /// Schedules a deadline for `owner` at tick `due`.
    pub fn schedule(&mut self, owner: S, due: u64) -> DeadlineId {
        let id = DeadlineId(self.next_id);
        self.next_id += 1;
        trace!("Scheduled {:?} for {:?} at tick {}", id, owner, due);
        self.pending.push(Deadline { id, owner, due });
        id
    }

    /// Cancels a single deadline. Returns `false` if it already fired or
    /// was cancelled.
    pub fn cancel(&mut self, id: DeadlineId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|d| d.id != id);
        before != self.pending.len()
    }

    /// Cancels every deadline created by `owner`.
    pub fn cancel_owner(&mut self, owner: S) -> usize {
        let before = self.pending.len();
        self.pending.retain(|d| d.owner != owner);
        before - self.pending.len()
    }

    /// Removes and returns all deadlines due at or before `now`.
    pub fn take_due(&mut self, now: u64) -> Vec<Deadline<S>> {
        let mut due = Vec::new();
        self.pending.retain(|d| {
            if d.due <= now {
                due.push(*d);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|d| (d.due, d.id));
        due
    }

    //--- Query API --------------------------------------------------------

    pub fn is_pending(&self, id: DeadlineId) -> bool {
        self.pending.iter().any(|d| d.id == id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl<S: SceneKey> Default for Scheduler<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestScene {
        A,
        B,
    }

    impl SceneKey for TestScene {}

    #[test]
    fn nothing_fires_before_due() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule(TestScene::A, 10);

        assert!(scheduler.take_due(9).is_empty());
        assert!(scheduler.is_pending(id));
    }

    #[test]
    fn late_check_still_fires() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule(TestScene::A, 10);

        // The tick loop was paused well past the due tick.
        let fired = scheduler.take_due(500);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].id, id);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn due_deadlines_come_out_in_order() {
        let mut scheduler = Scheduler::new();
        let late = scheduler.schedule(TestScene::A, 5);
        let early = scheduler.schedule(TestScene::B, 2);
        let tie = scheduler.schedule(TestScene::A, 5);

        let fired: Vec<_> = scheduler.take_due(5).into_iter().map(|d| d.id).collect();
        assert_eq!(fired, vec![early, late, tie]);
    }

    #[test]
    fn cancel_owner_only_touches_that_owner() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(TestScene::A, 1);
        scheduler.schedule(TestScene::A, 2);
        let kept = scheduler.schedule(TestScene::B, 3);

        assert_eq!(scheduler.cancel_owner(TestScene::A), 2);
        assert_eq!(scheduler.len(), 1);
        assert!(scheduler.is_pending(kept));
    }

    #[test]
    fn cancel_single_deadline() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule(TestScene::A, 1);

        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id), "Second cancel is a no-op");
        assert!(scheduler.take_due(10).is_empty());
    }
}
