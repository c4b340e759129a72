//=========================================================================
// Dialog Engine
//=========================================================================
//
// Branching conversations as data plus one generic state machine.
//
// Architecture:
//   DialogTree (static node table: cues, options, outcome per node)
//        ↓
//   DialogMachine<T> (current node, cue sequence, armed option,
//                     pending deadlines)
//        ↓
//   DialogScene<T> (Scene impl: input → machine, machine → renderer)
//
// Node lifecycle:
//   enter → play cues in order → apply relief → outcome
//   outcome: options | chain to node | options after a lockout | leave
//
//=========================================================================

//=== Module Declarations =================================================

mod machine;
mod option;
mod scene;

//=== External Dependencies ===============================================

use std::fmt::Debug;

//=== Internal Dependencies ===============================================

use super::GameScene;
use crate::core::globals::GlobalContext;
use crate::core::media::{Cue, Sound};
use crate::core::session::{Keepsake, Session};

//=== Public API ==========================================================

pub use machine::DialogMachine;
pub use option::{option_rect, DialogOption, OptionBody, TextField};
pub use scene::DialogScene;

//=== DialogTree ==========================================================

/// A conversation: node ids, their contents and where the tree leads.
///
/// Trees are stateless; everything that changes while talking lives in
/// [`DialogMachine`] or in the [`Session`].
pub trait DialogTree: Send + 'static {
    type Node: Copy + Eq + Debug + Send + 'static;

    /// Scene hosting the tree; owns its media and deadlines.
    const SCENE: GameScene;

    fn first() -> Self::Node;

    /// Contents of a node. May depend on the session (e.g. the table).
    fn node(id: Self::Node, session: &Session) -> NodeSpec<Self::Node>;

    /// Text drawn over a node.
    fn captions(_id: Self::Node, _session: &Session) -> Vec<String> {
        Vec::new()
    }

    /// Scene to switch to once the tree is left.
    fn exit(context: &GlobalContext<GameScene>) -> GameScene;
}

//=== NodeSpec ============================================================

/// One step of a conversation.
#[derive(Debug, Clone)]
pub struct NodeSpec<N> {
    /// Played back to back; options appear after the last one.
    pub cues: Vec<Cue>,

    /// Anxiety change applied when the cue sequence ends.
    pub on_finish: i32,

    pub outcome: Outcome<N>,
}

impl<N> NodeSpec<N> {
    pub fn new(cues: Vec<Cue>, outcome: Outcome<N>) -> Self {
        Self { cues, on_finish: 0, outcome }
    }

    /// A node driven by a single dialog line.
    pub fn line(name: &'static str, outcome: Outcome<N>) -> Self {
        Self::new(vec![Cue::Line(name)], outcome)
    }

    /// Node without media; its outcome applies on entry.
    pub fn silent(outcome: Outcome<N>) -> Self {
        Self::new(Vec::new(), outcome)
    }

    pub fn with_finish_delta(mut self, delta: i32) -> Self {
        self.on_finish = delta;
        self
    }
}

/// What follows a node's cue sequence.
#[derive(Debug, Clone)]
pub enum Outcome<N> {
    Options(Vec<OptionSpec<N>>),
    /// Pass-through to another node.
    Chain(N),
    /// Options that only appear after the blocked-options window.
    Blocked(Vec<OptionSpec<N>>),
    /// The conversation is over.
    Leave,
}

//=== OptionSpec ==========================================================

/// Static description of a selectable response.
#[derive(Debug, Clone, Copy)]
pub struct OptionSpec<N> {
    pub id: &'static str,
    pub image: &'static str,
    pub anxiety: i32,
    /// `None` for a repeatable option that never leaves its node.
    pub next: Option<N>,
    /// Where the label or the typed text is remembered, if anywhere.
    pub keep: Option<Keepsake>,
    /// Played when the option is activated.
    pub sound: Sound,
    pub kind: OptionKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Choice { label: &'static str },
    TextInput { required: &'static [&'static str] },
}

impl<N> OptionSpec<N> {
    pub fn choice(id: &'static str, label: &'static str, image: &'static str, next: N) -> Self {
        Self {
            id,
            image,
            anxiety: 0,
            next: Some(next),
            keep: None,
            sound: Sound::Click,
            kind: OptionKind::Choice { label },
        }
    }

    /// A choice that re-applies its anxiety on every click and stays put.
    pub fn repeatable(id: &'static str, label: &'static str, image: &'static str, anxiety: i32) -> Self {
        Self {
            id,
            image,
            anxiety,
            next: None,
            keep: None,
            sound: Sound::Click,
            kind: OptionKind::Choice { label },
        }
    }

    pub fn text(id: &'static str, image: &'static str, next: N) -> Self {
        Self {
            id,
            image,
            anxiety: 0,
            next: Some(next),
            keep: None,
            sound: Sound::Click,
            kind: OptionKind::TextInput { required: &[] },
        }
    }

    pub fn anxiety(mut self, delta: i32) -> Self {
        self.anxiety = delta;
        self
    }

    pub fn keep(mut self, keepsake: Keepsake) -> Self {
        self.keep = Some(keepsake);
        self
    }

    pub fn sound(mut self, sound: Sound) -> Self {
        self.sound = sound;
        self
    }

    /// Text must contain one of `required` (case-insensitive) to commit.
    pub fn requiring(mut self, required: &'static [&'static str]) -> Self {
        if let OptionKind::TextInput { required: slot } = &mut self.kind {
            *slot = required;
        }
        self
    }
}
