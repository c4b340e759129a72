//=========================================================================
// Session
//=========================================================================
//
// Per-playthrough data that outlives individual scenes: the chosen
// table, the names and items the player gave in the dialog trees, and
// the drawing captured at the end of each mini-game.
//
// Cleared in one place (`reset`) when the player starts over.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::core::drawing::DrawingSnapshot;

//=== Table ===============================================================

/// One of the three cafe tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Table {
    One,
    Two,
    Three,
}

impl Table {
    pub const ALL: [Table; 3] = [Table::One, Table::Two, Table::Three];

    /// 1-based table number, as used in asset names.
    pub fn number(self) -> u8 {
        match self {
            Table::One => 1,
            Table::Two => 2,
            Table::Three => 3,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Table::One),
            2 => Some(Table::Two),
            3 => Some(Table::Three),
            _ => None,
        }
    }
}

//=== Stage ===============================================================

/// Which of the three drawing mini-games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    One,
    Two,
    Three,
}

impl Stage {
    pub fn number(self) -> u8 {
        match self {
            Stage::One => 1,
            Stage::Two => 2,
            Stage::Three => 3,
        }
    }

    /// The stage whose drawing this one starts from.
    pub fn previous(self) -> Option<Self> {
        match self {
            Stage::One => None,
            Stage::Two => Some(Stage::One),
            Stage::Three => Some(Stage::Two),
        }
    }
}

//=== Keepsake ============================================================

/// Values the dialog trees remember for later nodes and scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keepsake {
    /// Name given to the barista.
    PlayerName,
    /// Name given to the waiter for the snack order.
    OrderName,
    /// Drink chosen from the barista's menu.
    Drink,
    /// Snack chosen from the waiter's menu.
    Snack,
}

//=== Session =============================================================

/// Mutable record of the current playthrough.
#[derive(Debug, Clone, Default)]
pub struct Session {
    table: Option<Table>,
    keepsakes: HashMap<Keepsake, String>,
    drawings: HashMap<Stage, DrawingSnapshot>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Table ------------------------------------------------------------

    pub fn table(&self) -> Option<Table> {
        self.table
    }

    pub fn select_table(&mut self, table: Table) {
        debug!("Table {} selected", table.number());
        self.table = Some(table);
    }

    //--- Keepsakes --------------------------------------------------------

    pub fn keep(&mut self, keepsake: Keepsake, value: impl Into<String>) {
        let value = value.into();
        debug!("Remembering {:?} = {:?}", keepsake, value);
        self.keepsakes.insert(keepsake, value);
    }

    pub fn kept(&self, keepsake: Keepsake) -> Option<&str> {
        self.keepsakes.get(&keepsake).map(String::as_str)
    }

    //--- Drawings ---------------------------------------------------------

    /// Stores the finished drawing of a stage. A stage's drawing is
    /// written once; later captures are ignored.
    pub fn capture_drawing(&mut self, stage: Stage, snapshot: DrawingSnapshot) {
        if self.drawings.contains_key(&stage) {
            warn!("Drawing for stage {} already captured, keeping the first", stage.number());
            return;
        }
        self.drawings.insert(stage, snapshot);
    }

    pub fn drawing(&self, stage: Stage) -> Option<&DrawingSnapshot> {
        self.drawings.get(&stage)
    }

    //--- Reset ------------------------------------------------------------

    pub fn reset(&mut self) {
        self.table = None;
        self.keepsakes.clear();
        self.drawings.clear();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
