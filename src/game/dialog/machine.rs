//=========================================================================
// Dialog Machine
//=========================================================================
//
// Walks a `DialogTree` one node at a time.
//
// Per node:
//   1. play the node's cues back to back (options stay hidden)
//   2. after the last cue: apply the node's finish delta, then its outcome
//   3. on a selection: commit, schedule the anxiety change and the move to
//      the next node as separate deadlines
//
// Invariants:
// - Options accept input only after the node's media finished.
// - At most one option is committed per node; later clicks are ignored,
//   except repeatable options which never commit.
// - Pending anxiety changes survive node changes; they belong to the
//   scene and die with it.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::marker::PhantomData;

use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use super::{DialogOption, DialogTree, NodeSpec, OptionBody, OptionSpec, Outcome, TextField};
use crate::core::globals::GlobalContext;
use crate::core::media::Cue;
use crate::core::render::Point;
use crate::core::schedule::DeadlineId;
use crate::game::GameScene;

//=== DialogMachine =======================================================

pub struct DialogMachine<T: DialogTree> {
    node: T::Node,
    spec: NodeSpec<T::Node>,
    cue_index: usize,
    media_finished: bool,
    options: Vec<DialogOption<T::Node>>,
    committed: bool,
    pending_advance: Option<(DeadlineId, T::Node)>,
    pending_anxiety: Vec<(DeadlineId, i32)>,
    blocked: Option<DeadlineId>,
    finished: bool,
    _tree: PhantomData<fn() -> T>,
}

impl<T: DialogTree> DialogMachine<T> {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            node: T::first(),
            spec: NodeSpec::silent(Outcome::Leave),
            cue_index: 0,
            media_finished: false,
            options: Vec::new(),
            committed: false,
            pending_advance: None,
            pending_anxiety: Vec::new(),
            blocked: None,
            finished: false,
            _tree: PhantomData,
        }
    }

    /// Begins the conversation at the tree's first node.
    pub fn start(&mut self, context: &mut GlobalContext<GameScene>) {
        self.finished = false;
        self.pending_anxiety.clear();
        self.enter_node(T::first(), context);
    }

    //--- Query API --------------------------------------------------------

    pub fn node(&self) -> T::Node {
        self.node
    }

    pub fn options(&self) -> &[DialogOption<T::Node>] {
        &self.options
    }

    pub fn media_finished(&self) -> bool {
        self.media_finished
    }

    pub fn is_committed(&self) -> bool {
        self.committed
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Cue whose frame is on screen: the one playing, or the last one
    /// once the sequence is over.
    pub fn current_cue(&self) -> Option<Cue> {
        let last = self.spec.cues.len().checked_sub(1)?;
        self.spec.cues.get(self.cue_index.min(last)).copied()
    }

    //--- Events -----------------------------------------------------------

    pub fn on_media_complete(&mut self, cue: Cue, context: &mut GlobalContext<GameScene>) {
        if self.media_finished || self.spec.cues.get(self.cue_index) != Some(&cue) {
            trace!(target: "dialog", "Ignoring end of {:?} at {:?}", cue, self.node);
            return;
        }

        self.cue_index += 1;
        match self.spec.cues.get(self.cue_index).copied() {
            Some(next) => context.media.play(T::SCENE, next),
            None => self.finish_sequence(context),
        }
    }

    /// Returns `true` if the deadline belonged to this machine.
    pub fn on_deadline(&mut self, id: DeadlineId, context: &mut GlobalContext<GameScene>) -> bool {
        if let Some(pos) = self.pending_anxiety.iter().position(|(pending, _)| *pending == id) {
            let (_, delta) = self.pending_anxiety.remove(pos);
            context.adjust_anxiety(delta);
            return true;
        }

        if let Some((pending, next)) = self.pending_advance {
            if pending == id {
                self.pending_advance = None;
                self.enter_node(next, context);
                return true;
            }
        }

        if self.blocked == Some(id) {
            self.blocked = None;
            let specs = match &self.spec.outcome {
                Outcome::Blocked(specs) => specs.clone(),
                _ => Vec::new(),
            };
            self.show_options(&specs, context);
            return true;
        }

        false
    }

    /// Reschedules deadlines cancelled by a suspension, each with its
    /// full delay.
    pub fn resume(&mut self, context: &mut GlobalContext<GameScene>) {
        let timing = context.settings.timing.clone();

        if let Some((_, next)) = self.pending_advance {
            let id = context.schedule_after(T::SCENE, timing.advance_delay_ms);
            self.pending_advance = Some((id, next));
        }
        for (id, _) in self.pending_anxiety.iter_mut() {
            *id = context.schedule_after(T::SCENE, timing.anxiety_delay_ms);
        }
        if self.blocked.is_some() {
            self.blocked = Some(context.schedule_after(T::SCENE, timing.blocked_options_ms));
        }
    }

    //--- Input ------------------------------------------------------------

    /// Routes a click to the option under it.
    pub fn click(&mut self, point: Point, context: &mut GlobalContext<GameScene>) -> bool {
        match self.options.iter().position(|option| option.is_hit(point)) {
            Some(index) => self.select(index, context),
            None => false,
        }
    }

    /// Activates the option at `index`. Returns `true` if anything happened.
    pub fn select(&mut self, index: usize, context: &mut GlobalContext<GameScene>) -> bool {
        if !self.accepts_input() {
            debug!(target: "dialog", "Selection at {:?} rejected", self.node);
            return false;
        }
        let Some(option) = self.options.get(index) else { return false };

        let choice = match &option.body {
            OptionBody::Choice { label } => Some((*label, option.anxiety, option.sound, option.is_repeatable())),
            OptionBody::TextInput(_) => None,
        };

        match choice {
            None => self.submit(context),
            Some((label, delta, sound, true)) => {
                debug!(target: "dialog", "Repeatable \"{}\" at {:?}", label, self.node);
                context.adjust_anxiety(delta);
                context.media.play_sound(sound, 1.0);
                true
            }
            Some((label, _, _, false)) => {
                self.commit(index, label.to_string(), context);
                true
            }
        }
    }

    pub fn type_char(&mut self, c: char) -> bool {
        if !self.accepts_input() {
            return false;
        }
        self.text_field_mut().is_some_and(|field| field.push(c))
    }

    pub fn backspace(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        self.text_field_mut().is_some_and(|field| field.backspace())
    }

    /// Commits the node's text field if its content is acceptable.
    pub fn submit(&mut self, context: &mut GlobalContext<GameScene>) -> bool {
        if !self.accepts_input() {
            return false;
        }

        let Some((index, value)) = self.options.iter().enumerate().find_map(|(i, option)| {
            option
                .text_field()
                .filter(|field| field.is_committable())
                .map(|field| (i, field.value().to_string()))
        }) else {
            debug!(target: "dialog", "Nothing committable at {:?}", self.node);
            return false;
        };

        self.commit(index, value, context);
        true
    }

    //--- Internal Helpers -------------------------------------------------

    fn accepts_input(&self) -> bool {
        self.media_finished && !self.committed && !self.finished
    }

    fn text_field_mut(&mut self) -> Option<&mut TextField> {
        self.options.iter_mut().find_map(|option| option.text_field_mut())
    }

    fn enter_node(&mut self, id: T::Node, context: &mut GlobalContext<GameScene>) {
        debug!(target: "dialog", "{:?} enters {:?}", T::SCENE, id);

        if let Some(blocked) = self.blocked.take() {
            context.scheduler.cancel(blocked);
        }
        if let Some((pending, _)) = self.pending_advance.take() {
            context.scheduler.cancel(pending);
        }

        self.node = id;
        self.spec = T::node(id, &context.session);
        self.cue_index = 0;
        self.media_finished = false;
        self.options.clear();
        self.committed = false;

        match self.spec.cues.first().copied() {
            Some(cue) => context.media.play(T::SCENE, cue),
            None => self.finish_sequence(context),
        }
    }

    fn finish_sequence(&mut self, context: &mut GlobalContext<GameScene>) {
        self.media_finished = true;
        if self.spec.on_finish != 0 {
            context.adjust_anxiety(self.spec.on_finish);
        }

        match self.spec.outcome.clone() {
            Outcome::Options(specs) => self.show_options(&specs, context),
            Outcome::Chain(next) => self.enter_node(next, context),
            Outcome::Blocked(_) => {
                let delay = context.settings.timing.blocked_options_ms;
                self.blocked = Some(context.schedule_after(T::SCENE, delay));
            }
            Outcome::Leave => {
                info!(target: "dialog", "{:?} conversation over at {:?}", T::SCENE, self.node);
                self.finished = true;
            }
        }
    }

    fn show_options(&mut self, specs: &[OptionSpec<T::Node>], context: &GlobalContext<GameScene>) {
        let max_len = context.settings.text_input_max_len;
        self.options = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| DialogOption::from_spec(spec, i, max_len))
            .collect();
    }

    fn commit(&mut self, index: usize, value: String, context: &mut GlobalContext<GameScene>) {
        let Some(option) = self.options.get(index) else { return };
        let (id, anxiety, next, keep, sound) =
            (option.id, option.anxiety, option.next, option.keep, option.sound);
        let timing = context.settings.timing.clone();

        debug!(target: "dialog", "Committed {} at {:?}", id, self.node);
        self.committed = true;

        if let Some(keepsake) = keep {
            context.session.keep(keepsake, value);
        }
        if anxiety != 0 {
            let deadline = context.schedule_after(T::SCENE, timing.anxiety_delay_ms);
            self.pending_anxiety.push((deadline, anxiety));
        }
        if let Some(next) = next {
            let deadline = context.schedule_after(T::SCENE, timing.advance_delay_ms);
            self.pending_advance = Some((deadline, next));
        }

        context.media.play_sound(sound, 1.0);
    }
}

impl<T: DialogTree> Default for DialogMachine<T> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
