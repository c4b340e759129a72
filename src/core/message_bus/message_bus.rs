//=========================================================================
// Message Bus
//=========================================================================
//
// Type-safe multi-consumer message queue for scene → overlay signals.
//
// Architecture:
//   Scenes / GlobalContext → push<M>() → HashMap<TypeId, Vec<M>>
//                                              ↓
//   HUD, tests ← read<M>() (shared, any number of readers)
//                                              ↓
//   GlobalSystems ──────────→ clear_all() at tick boundary
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::TypeId;
use std::collections::HashMap;

use log::error;

//=== Internal Dependencies ===============================================

use super::message_queue::MessageQueue;

//=== Public API ==========================================================

/// Marker trait for types that can travel on the [`MessageBus`].
pub trait Message: Send + 'static {}

impl<T: Send + 'static> Message for T {}

//=========================================================================

/// One queue per message type, emptied every tick.
pub struct MessageBus {
    queues: HashMap<TypeId, Box<dyn MessageQueue>>,
}

impl MessageBus {
    pub fn new() -> Self {
        MessageBus {
            queues: HashMap::new(),
        }
    }

    //--- Message Operations -----------------------------------------------

    /// Appends a message to the queue for its type.
    pub fn push<M: Message>(&mut self, msg: M) {
        let queue = self
            .queues
            .entry(TypeId::of::<M>())
            .or_insert_with(|| Box::new(Vec::<M>::new()));

        match queue.as_any_mut().downcast_mut::<Vec<M>>() {
            Some(queue) => queue.push(msg),
            None => error!(
                "MessageBus queue for {} holds another type; message dropped",
                std::any::type_name::<M>()
            ),
        }
    }

    /// All messages of type `M` pushed since the last clear, oldest first.
    pub fn read<M: Message>(&self) -> &[M] {
        self.queue::<M>().map(|v| v.as_slice()).unwrap_or(&[])
    }

    //--- Query API --------------------------------------------------------

    pub fn has_messages<M: Message>(&self) -> bool {
        self.count::<M>() > 0
    }

    pub fn count<M: Message>(&self) -> usize {
        self.queue::<M>().map(|v| v.len()).unwrap_or(0)
    }

    /// Clears messages of type `M`, keeping the allocation.
    pub fn clear<M: Message>(&mut self) {
        if let Some(queue) = self.queues.get_mut(&TypeId::of::<M>()) {
            queue.clear_queue();
        }
    }

    /// Clears every queue, keeping entries and allocations.
    pub fn clear_all(&mut self) {
        for queue in self.queues.values_mut() {
            queue.clear_queue();
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn queue<M: Message>(&self) -> Option<&Vec<M>> {
        self.queues
            .get(&TypeId::of::<M>())
            .and_then(|q| q.as_any().downcast_ref::<Vec<M>>())
    }
}

impl Default for MessageBus {
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
    use crate::core::anxiety::{AnxietyCue, AnxietyMeter};

    #[derive(Debug, PartialEq, Clone)]
    struct Chime(u8);

    fn cue_for_rise(from: u32, by: u32) -> AnxietyCue {
        let mut meter = AnxietyMeter::new();
        meter.increase(from);
        let change = meter.increase(by);
        AnxietyCue::for_change(&change).expect("non-zero change has a cue")
    }

    #[test]
    fn new_bus_is_empty() {
        let bus = MessageBus::new();
        assert!(!bus.has_messages::<AnxietyCue>());
        assert!(bus.read::<AnxietyCue>().is_empty());
    }

    #[test]
    fn messages_are_read_in_push_order() {
        let mut bus = MessageBus::new();
        bus.push(cue_for_rise(0, 1));
        bus.push(cue_for_rise(0, 3));

        let cues = bus.read::<AnxietyCue>();
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].magnitude, 1);
        assert_eq!(cues[1].magnitude, 3);
    }

    #[test]
    fn readers_share_the_same_messages() {
        let mut bus = MessageBus::new();
        bus.push(Chime(7));

        assert_eq!(bus.read::<Chime>(), &[Chime(7)]);
        assert_eq!(bus.read::<Chime>(), &[Chime(7)], "Reading does not consume");
    }

    #[test]
    fn types_have_separate_queues() {
        let mut bus = MessageBus::new();
        bus.push(Chime(1));
        bus.push(cue_for_rise(2, 2));
        bus.push(Chime(2));

        assert_eq!(bus.count::<Chime>(), 2);
        assert_eq!(bus.count::<AnxietyCue>(), 1);

        bus.clear::<Chime>();
        assert_eq!(bus.count::<Chime>(), 0);
        assert_eq!(bus.count::<AnxietyCue>(), 1, "Other queues untouched");
    }

    #[test]
    fn clear_all_empties_every_queue() {
        let mut bus = MessageBus::new();
        bus.push(Chime(1));
        bus.push(cue_for_rise(0, 2));

        bus.clear_all();
        assert!(!bus.has_messages::<Chime>());
        assert!(!bus.has_messages::<AnxietyCue>());

        bus.push(Chime(3));
        assert_eq!(bus.read::<Chime>(), &[Chime(3)]);
    }
}
