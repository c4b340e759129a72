//=========================================================================
// Media Cues
//=========================================================================
//
// Enum-keyed catalog of every video and sound the game plays.
//
// Scenes name media through `Cue` values; only the backend turns them
// into catalog names (`catalog_name()`), which are the keys of the
// external asset table.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::session::{Stage, Table};

//=== TableShot ===========================================================

/// The four clips filmed for each table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableShot {
    /// Walking up to the table.
    Approach,
    /// Idle loop while deciding.
    Linger,
    /// Walking back to the overview.
    Retreat,
    /// Sitting down.
    Settle,
}

//=== Sound ===============================================================

/// Short fire-and-forget sound effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    ButtonPress,
    Click,
    AnxietyUp,
    AnxietyDown,
    Warning,
    Pencil,
    Eraser,
    EnglishUnavailable,
}

impl Sound {
    pub fn catalog_name(self) -> &'static str {
        match self {
            Sound::ButtonPress => "B_pressed",
            Sound::Click => "click",
            Sound::AnxietyUp => "anxiety_up",
            Sound::AnxietyDown => "anxiety_down",
            Sound::Warning => "anxiety_warning",
            Sound::Pencil => "pencil",
            Sound::Eraser => "eraser",
            Sound::EnglishUnavailable => "english_not_available",
        }
    }
}

//=== Cue =================================================================

/// A playable media item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Intro,
    TableOverview,
    Table(Table, TableShot),
    MiniGameIntro(Stage, Table),
    /// Looping table backdrop behind the first mini-game.
    MiniGameBackdrop(Table),
    /// Room tone that accompanies the backdrop.
    TableAmbience(Table),
    /// Reflection clip between drawing and completion (first mini-game).
    ThoughtBubble,
    MiniGameOutro(Stage, Table),
    /// A dialog clip, named by its catalog key (e.g. `"M_Q1"`).
    Line(&'static str),
    /// The "sent back" clip of the declined-order path.
    SentBack(Table),
    Success,
    GameOver,
    Sound(Sound),
}

impl Cue {
    /// Key of this cue in the external asset table.
    pub fn catalog_name(&self) -> String {
        match self {
            Cue::Intro => "intro".to_string(),
            Cue::TableOverview => "tableSelect".to_string(),
            Cue::Table(table, shot) => {
                let n = table.number();
                match shot {
                    TableShot::Approach => format!("table{}_transition", n),
                    TableShot::Linger => format!("table{}", n),
                    TableShot::Retreat => format!("table{}_quitTransition", n),
                    TableShot::Settle => format!("table{}_pickTransition", n),
                }
            }
            Cue::MiniGameIntro(stage, table) => match stage {
                Stage::One => format!("mini1_T{}", table.number()),
                Stage::Two => format!("mini2T{}", table.number()),
                Stage::Three => format!("mini3T{}", table.number()),
            },
            Cue::MiniGameBackdrop(table) => format!("mini_T{}", table.number()),
            Cue::TableAmbience(table) => format!("mini_T{}_ambience", table.number()),
            Cue::ThoughtBubble => "mini1_thought".to_string(),
            Cue::MiniGameOutro(stage, table) => match stage {
                Stage::One => format!("mini1_T{}END", table.number()),
                Stage::Two => format!("mini2T{}End", table.number()),
                Stage::Three => format!("mini3T{}End", table.number()),
            },
            Cue::Line(name) => (*name).to_string(),
            Cue::SentBack(table) => format!("SB_T{}", table.number()),
            Cue::Success => "success".to_string(),
            Cue::GameOver => "gameOver".to_string(),
            Cue::Sound(sound) => sound.catalog_name().to_string(),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
