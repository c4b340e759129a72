//=========================================================================
// Dialog Options
//=========================================================================
//
// Live, on-screen responses built from `OptionSpec`s when a node's media
// finishes.
//
// Layout (canvas pixels, stacked by index):
//   choice:      (100, 500 + 60·i, 250x50)
//   text field:  (100, 500 + 60·i, 300x40), submit check 40x40 to its right
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{OptionKind, OptionSpec};
use crate::core::media::Sound;
use crate::core::render::{Point, Rect};
use crate::core::session::Keepsake;

//=== Constants ===========================================================

const OPTION_X: f32 = 100.0;
const OPTION_TOP: f32 = 500.0;
const OPTION_SPACING: f32 = 60.0;

const CHOICE_SIZE: (f32, f32) = (250.0, 50.0);
const FIELD_SIZE: (f32, f32) = (300.0, 40.0);
const CHECK_SIZE: f32 = 40.0;
const CHECK_GAP: f32 = 10.0;

/// Rectangle of the option at `index` in a node's list.
pub fn option_rect(index: usize, text_input: bool) -> Rect {
    let (w, h) = if text_input { FIELD_SIZE } else { CHOICE_SIZE };
    Rect::new(OPTION_X, OPTION_TOP + OPTION_SPACING * index as f32, w, h)
}

//=== TextField ===========================================================

/// Editable single-line input with an optional keyword requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    value: String,
    max_len: usize,
    required: &'static [&'static str],
}

impl TextField {
    pub fn new(max_len: usize, required: &'static [&'static str]) -> Self {
        Self {
            value: String::new(),
            max_len,
            required,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Appends a printable ASCII character. Returns `false` if refused.
    pub fn push(&mut self, c: char) -> bool {
        if !(' '..='~').contains(&c) || self.value.len() >= self.max_len {
            return false;
        }
        self.value.push(c);
        true
    }

    pub fn backspace(&mut self) -> bool {
        self.value.pop().is_some()
    }

    /// Non-empty, within the length limit, and matching a required
    /// keyword when there are any.
    pub fn is_committable(&self) -> bool {
        if self.value.is_empty() || self.value.len() > self.max_len {
            return false;
        }
        if self.required.is_empty() {
            return true;
        }
        let lowered = self.value.to_lowercase();
        self.required
            .iter()
            .any(|needle| lowered.contains(&needle.to_lowercase()))
    }
}

//=== DialogOption ========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionBody {
    Choice { label: &'static str },
    TextInput(TextField),
}

/// A response currently on screen.
#[derive(Debug, Clone)]
pub struct DialogOption<N> {
    pub id: &'static str,
    pub image: &'static str,
    pub rect: Rect,
    pub anxiety: i32,
    pub next: Option<N>,
    pub keep: Option<Keepsake>,
    pub sound: Sound,
    pub body: OptionBody,
}

impl<N: Copy> DialogOption<N> {
    pub fn from_spec(spec: &OptionSpec<N>, index: usize, max_len: usize) -> Self {
        let (rect, body) = match spec.kind {
            OptionKind::Choice { label } => (option_rect(index, false), OptionBody::Choice { label }),
            OptionKind::TextInput { required } => (
                option_rect(index, true),
                OptionBody::TextInput(TextField::new(max_len, required)),
            ),
        };

        Self {
            id: spec.id,
            image: spec.image,
            rect,
            anxiety: spec.anxiety,
            next: spec.next,
            keep: spec.keep,
            sound: spec.sound,
            body,
        }
    }

    /// Submit control of a text field.
    pub fn check_rect(&self) -> Option<Rect> {
        match self.body {
            OptionBody::TextInput(_) => Some(Rect::new(
                self.rect.right() + CHECK_GAP,
                self.rect.y,
                CHECK_SIZE,
                CHECK_SIZE,
            )),
            OptionBody::Choice { .. } => None,
        }
    }

    /// `true` when a click at `point` activates this option.
    pub fn is_hit(&self, point: Point) -> bool {
        match self.body {
            OptionBody::Choice { .. } => self.rect.contains(point),
            OptionBody::TextInput(_) => self.check_rect().is_some_and(|r| r.contains(point)),
        }
    }

    pub fn is_repeatable(&self) -> bool {
        self.next.is_none()
    }

    pub fn text_field(&self) -> Option<&TextField> {
        match &self.body {
            OptionBody::TextInput(field) => Some(field),
            OptionBody::Choice { .. } => None,
        }
    }

    pub fn text_field_mut(&mut self) -> Option<&mut TextField> {
        match &mut self.body {
            OptionBody::TextInput(field) => Some(field),
            OptionBody::Choice { .. } => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
