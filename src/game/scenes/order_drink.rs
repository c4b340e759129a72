//=========================================================================
// Order Drink (barista)
//=========================================================================
//
// The barista only speaks Meowish until the player turns on captions.
//
// Node graph:
//   Q1 → Q2 → Q3 ─┬─ "Meow" ─────────→ Q4_1 (sent back) ─┬→ Q1
//                 │                                       └→ Done
//                 ├─ "Subtitles" ────→ Q4_2 → Q5 ─┬─ no ──→ Q5_1 (locked) ─┬→ Q1
//                 │                               │                        └→ Done
//                 │                               └─ yes ─→ Q5_2 → Q6
//                 └─ "English" (repeatable)
//
//   Q6 ─┬─ name ──────────────→ Q7_1 → Q7_3 → Q8 (leave)
//       └─ "WHAT DID YOU SAY?" → Q7_2 ─ name → Q7_3
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::globals::GlobalContext;
use crate::core::media::{Cue, Sound};
use crate::core::session::{Keepsake, Session, Table};
use crate::game::dialog::{DialogTree, NodeSpec, OptionSpec, Outcome};
use crate::game::GameScene;

//=== Nodes ===============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrinkNode {
    Q1,
    Q2,
    Q3,
    Q4_1,
    Q4_2,
    Q5,
    Q5_1,
    Q5_2,
    Q6,
    Q7_1,
    Q7_2,
    Q7_3,
    Q8,
    Done,
}

//=== DrinkOrder ==========================================================

pub struct DrinkOrder;

impl DrinkOrder {
    fn try_again_or_quit() -> Vec<OptionSpec<DrinkNode>> {
        vec![
            OptionSpec::choice("try_again", "Try Again", "B_tryagain", DrinkNode::Q1),
            OptionSpec::choice("quit", "Quit", "B_quit", DrinkNode::Done),
        ]
    }

    fn drink(id: &'static str, label: &'static str, image: &'static str) -> OptionSpec<DrinkNode> {
        OptionSpec::choice(id, label, image, DrinkNode::Q6)
            .anxiety(-1)
            .keep(Keepsake::Drink)
    }

    /// Relief after being sent back, by table.
    fn sent_back_relief(table: Table) -> i32 {
        match table {
            Table::One => -1,
            Table::Two => 0,
            Table::Three => -2,
        }
    }
}

impl DialogTree for DrinkOrder {
    type Node = DrinkNode;
    const SCENE: GameScene = GameScene::OrderDrink;

    fn first() -> DrinkNode {
        DrinkNode::Q1
    }

    fn node(id: DrinkNode, session: &Session) -> NodeSpec<DrinkNode> {
        use DrinkNode::*;

        match id {
            Q1 => NodeSpec::line("M_Q1", Outcome::Chain(Q2)),

            Q2 => NodeSpec::line(
                "M_Q2",
                Outcome::Options(vec![OptionSpec::choice("r1_1", "Display Captions", "M_R1.1", Q3)]),
            ),

            Q3 => NodeSpec::line(
                "M_Q3",
                Outcome::Options(vec![
                    OptionSpec::choice("r2_2", "Meow", "M_R2.2", Q4_1).anxiety(1),
                    OptionSpec::choice("r2_3", "Subtitle Translation", "M_R2.3", Q4_2).anxiety(1),
                    OptionSpec::repeatable("r3_2", "English not available", "M_R3.2", 1)
                        .sound(Sound::EnglishUnavailable),
                ]),
            ),

            Q4_1 => match session.table() {
                Some(table) => NodeSpec::new(
                    vec![
                        Cue::Line("M_Q4.1"),
                        Cue::Line("SB_thought"),
                        Cue::Line("SB_thought2"),
                        Cue::SentBack(table),
                    ],
                    Outcome::Options(Self::try_again_or_quit()),
                )
                .with_finish_delta(Self::sent_back_relief(table)),
                None => NodeSpec::line("M_Q4.1", Outcome::Chain(Done)),
            },

            Q4_2 => NodeSpec::line(
                "M_Q4.2",
                Outcome::Options(vec![
                    OptionSpec::choice("r4_1", "For here", "M_R4.1", Q5),
                    OptionSpec::choice("r4_2", "A drink", "M_R4.2", Q5).anxiety(1),
                ]),
            ),

            Q5 => NodeSpec::line(
                "M_Q5",
                Outcome::Options(vec![
                    OptionSpec::choice("yes", "Yes", "M_YES", Q5_2),
                    OptionSpec::choice("no", "No", "M_NO", Q5_1).anxiety(1),
                ]),
            ),

            Q5_1 => NodeSpec::line("M_Q5.1", Outcome::Blocked(Self::try_again_or_quit())),

            Q5_2 => NodeSpec::line(
                "M_Q5.2",
                Outcome::Options(vec![
                    Self::drink("r5_1", "Whisker Matcha", "M_R5.1"),
                    Self::drink("r5_2", "PURspresso", "M_R5.2"),
                    Self::drink("r5_3", "Catnip Tea", "M_R5.3"),
                ]),
            ),

            Q6 => NodeSpec::line(
                "M_Q6",
                Outcome::Options(vec![
                    OptionSpec::text("text_input", "M_R6.Blank", Q7_1).keep(Keepsake::PlayerName),
                    OptionSpec::choice("r6", "WHAT DID YOU SAY?", "M_R6", Q7_2).anxiety(1),
                ]),
            ),

            Q7_1 => NodeSpec::line("M_Q7.1", Outcome::Chain(Q7_3)),

            Q7_2 => NodeSpec::line(
                "M_Q7.2",
                Outcome::Options(vec![OptionSpec::text("text_input", "M_R6.Blank", Q7_3)
                    .anxiety(1)
                    .keep(Keepsake::PlayerName)]),
            ),

            Q7_3 => NodeSpec::line("M_Q7.3", Outcome::Chain(Q8)),

            Q8 => NodeSpec::line("M_Q8", Outcome::Leave),

            Done => NodeSpec::silent(Outcome::Leave),
        }
    }

    fn captions(id: DrinkNode, session: &Session) -> Vec<String> {
        match (id, session.kept(Keepsake::PlayerName)) {
            (DrinkNode::Q8, Some(name)) => vec![format!("Order for: {}", name)],
            _ => Vec::new(),
        }
    }

    fn exit(_context: &GlobalContext<GameScene>) -> GameScene {
        GameScene::MiniGame2
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
