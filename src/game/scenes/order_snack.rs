//=========================================================================
// Order Snack (waiter)
//=========================================================================
//
// The waiter mumbles; asking him to repeat himself gets more and more
// expensive.
//
// Node graph:
//   Q1 → Q1_1 ─┬─ repeat → Q1_2 ─┬─ repeat → Q1_2
//              ├─ "Yea?" → Q3    ├─ "Yea?" → Q3
//              └─ "No?" → Q3_R2  └─ "No?"  → Q3_R2 (sent back) ─┬→ Q1
//                                                               └→ Done
//   Q3 → Q4 ─┬─ text ───────→ Q5_3
//            └─ "repeat?" ──→ Q5_1 ─┬─ "here"/"to go" → Q5_3
//                                   └─ "repeat?" → Q5_2 ─ "here"/"to go" → Q5_3
//   Q5_3 ─ name → Q6 (leave)
//
// Leaving goes to GameOver when the meter is already full.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::globals::GlobalContext;
use crate::core::media::Cue;
use crate::core::session::{Keepsake, Session};
use crate::game::dialog::{DialogTree, NodeSpec, OptionSpec, Outcome};
use crate::game::GameScene;

//=== Constants ===========================================================

const DINING_CHOICES: &[&str] = &["here", "to go"];
const DEFAULT_SNACK: &str = "Croissant";

//=== Nodes ===============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnackNode {
    Q1,
    Q1_1,
    Q1_2,
    Q3,
    Q3_R2,
    Q4,
    Q5_1,
    Q5_2,
    Q5_3,
    Q6,
    Done,
}

//=== SnackOrder ==========================================================

pub struct SnackOrder;

impl SnackOrder {
    fn repeat_please(next: SnackNode, anxiety: i32) -> OptionSpec<SnackNode> {
        OptionSpec::choice("r1_1", "Can you repeat that please?", "P_R1.1", next).anxiety(anxiety)
    }

    fn yes_or_no(repeat_next: SnackNode, repeat_anxiety: i32) -> Vec<OptionSpec<SnackNode>> {
        vec![
            Self::repeat_please(repeat_next, repeat_anxiety),
            OptionSpec::choice("yes", "Yea?", "P_YES", SnackNode::Q3),
            OptionSpec::choice("no", "No?", "P_NO", SnackNode::Q3_R2).anxiety(4),
        ]
    }

    fn snack(id: &'static str, label: &'static str, image: &'static str) -> OptionSpec<SnackNode> {
        OptionSpec::choice(id, label, image, SnackNode::Q4)
            .anxiety(-1)
            .keep(Keepsake::Snack)
    }

    fn didnt_catch(next: SnackNode) -> OptionSpec<SnackNode> {
        OptionSpec::choice("r4_2", "I didn't catch that, can you repeat?", "P_R4.2", next)
    }

    fn dining_field(anxiety: i32) -> OptionSpec<SnackNode> {
        OptionSpec::text("text_input", "P_R4.Blank", SnackNode::Q5_3)
            .anxiety(anxiety)
            .requiring(DINING_CHOICES)
    }
}

impl DialogTree for SnackOrder {
    type Node = SnackNode;
    const SCENE: GameScene = GameScene::OrderSnack;

    fn first() -> SnackNode {
        SnackNode::Q1
    }

    fn node(id: SnackNode, session: &Session) -> NodeSpec<SnackNode> {
        use SnackNode::*;

        match id {
            Q1 => NodeSpec::line("P_Q1", Outcome::Options(vec![Self::repeat_please(Q1_1, 1)])),

            Q1_1 => NodeSpec::line("P_Q1.1", Outcome::Options(Self::yes_or_no(Q1_2, 2))),

            Q1_2 => NodeSpec::line("P_Q1.2", Outcome::Options(Self::yes_or_no(Q1_2, 4))),

            Q3 => NodeSpec::line(
                "P_Q3",
                Outcome::Options(vec![
                    Self::snack("r3_1", "Slow croissant", "P_R3.1"),
                    Self::snack("r3_2", "Bamboo croissant", "P_R3.2"),
                    Self::snack("r3_3", "Black eye croissant", "P_R3.3"),
                ]),
            ),

            Q3_R2 => match session.table() {
                Some(table) => NodeSpec::new(
                    vec![Cue::Line("P_Q3.R2"), Cue::SentBack(table), Cue::Line("D_empty")],
                    Outcome::Options(vec![
                        OptionSpec::choice("try_again", "Try Again", "B_tryagain", Q1),
                        OptionSpec::choice("quit", "Quit", "B_quit", Done),
                    ]),
                )
                .with_finish_delta(-1),
                None => NodeSpec::line("P_Q3.R2", Outcome::Chain(Done)),
            },

            Q4 => NodeSpec::line(
                "P_Q4",
                Outcome::Options(vec![
                    OptionSpec::text("text_input", "P_R4.Blank", Q5_3),
                    Self::didnt_catch(Q5_1),
                ]),
            ),

            Q5_1 => NodeSpec::line(
                "P_Q5.1",
                Outcome::Options(vec![Self::dining_field(3), Self::didnt_catch(Q5_2)]),
            ),

            Q5_2 => NodeSpec::line("P_Q5.2", Outcome::Options(vec![Self::dining_field(4)])),

            Q5_3 => NodeSpec::line(
                "P_Q5.3",
                Outcome::Options(vec![
                    OptionSpec::text("text_input", "P_R4.Blank", Q6).keep(Keepsake::OrderName)
                ]),
            ),

            Q6 => NodeSpec::line("P_Q6", Outcome::Leave),

            Done => NodeSpec::silent(Outcome::Leave),
        }
    }

    fn captions(id: SnackNode, session: &Session) -> Vec<String> {
        if id != SnackNode::Q6 {
            return Vec::new();
        }

        let name = session
            .kept(Keepsake::PlayerName)
            .or_else(|| session.kept(Keepsake::OrderName))
            .unwrap_or_default();
        let snack = session.kept(Keepsake::Snack).unwrap_or(DEFAULT_SNACK);

        vec![format!("Order for: {}", name), format!("Item: {}", snack)]
    }

    fn exit(context: &GlobalContext<GameScene>) -> GameScene {
        if context.anxiety().is_maxed() {
            GameScene::GameOver
        } else {
            GameScene::MiniGame3
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::Table;
    use crate::game::testing::Harness;

    fn at_waiter() -> Harness {
        Harness::at(GameScene::OrderSnack, Some(Table::One))
    }

    /// Asks the waiter to repeat himself `times` times from Q1.
    fn ask_repeats(h: &mut Harness, times: usize) {
        let lines = ["P_Q1", "P_Q1.1", "P_Q1.2", "P_Q1.2", "P_Q1.2"];
        for line in lines.iter().take(times) {
            h.finish_cue(Cue::Line(*line));
            h.click_option(0);
            h.wait_ms(600);
        }
    }

    #[test]
    fn repeats_grow_more_expensive() {
        let mut h = at_waiter();
        ask_repeats(&mut h, 3);
        h.wait_ms(1000);
        assert_eq!(h.anxiety(), 1 + 2 + 4);
    }

    #[test]
    fn full_meter_preempts_the_conversation() {
        let mut h = at_waiter();
        ask_repeats(&mut h, 2);
        h.finish_cue(Cue::Line("P_Q1.2"));
        h.click_option(2);
        h.wait_ms(1100);
        assert_eq!(h.anxiety(), 7, "1 + 2 + 4");

        h.context.raise_anxiety(3);
        h.idle();
        assert_eq!(h.current(), Some(GameScene::GameOver));
    }

    #[test]
    fn exit_routes_to_game_over_when_meter_is_full() {
        let mut context = GlobalContext::headless(crate::settings::GameSettings::default());
        assert_eq!(SnackOrder::exit(&context), GameScene::MiniGame3);

        context.raise_anxiety(10);
        assert_eq!(SnackOrder::exit(&context), GameScene::GameOver);
    }

    #[test]
    fn quitting_after_being_sent_back_continues_to_last_stage() {
        let mut h = at_waiter();
        ask_repeats(&mut h, 1);
        h.finish_cue(Cue::Line("P_Q1.1"));
        h.click_option(2);
        h.wait_ms(1100);
        assert_eq!(h.anxiety(), 5);

        h.finish_cue(Cue::Line("P_Q3.R2"));
        h.finish_cue(Cue::SentBack(Table::One));
        h.finish_cue(Cue::Line("D_empty"));
        assert_eq!(h.anxiety(), 4, "Sent-back relief");

        h.click_option(1);
        h.wait_ms(600);
        h.run_until(GameScene::MiniGame3, 5);
    }

    #[test]
    fn dining_answer_must_name_here_or_to_go() {
        let mut h = at_waiter();
        ask_repeats(&mut h, 1);
        h.finish_cue(Cue::Line("P_Q1.1"));
        h.click_option(1);
        h.wait_ms(600);
        h.finish_cue(Cue::Line("P_Q3"));
        h.click_option(0);
        h.wait_ms(600);
        h.finish_cue(Cue::Line("P_Q4"));
        h.click_option(1);
        h.wait_ms(600);
        h.finish_cue(Cue::Line("P_Q5.1"));

        h.type_text("abc");
        h.press_enter();
        h.wait_ms(600);
        assert!(!h.context.media.is_playing(Cue::Line("P_Q5.3")), "\"abc\" is not committable");

        h.press_backspace(3);
        h.type_text("HERE");
        h.press_enter();
        h.wait_ms(600);
        assert!(h.context.media.is_playing(Cue::Line("P_Q5.3")));
    }

    #[test]
    fn order_summary_falls_back_to_order_name_and_default_item() {
        let mut session = Session::new();
        session.keep(Keepsake::OrderName, "Pip");
        assert_eq!(
            SnackOrder::captions(SnackNode::Q6, &session),
            vec!["Order for: Pip".to_string(), "Item: Croissant".to_string()]
        );

        session.keep(Keepsake::PlayerName, "Mochi");
        session.keep(Keepsake::Snack, "Bamboo croissant");
        assert_eq!(
            SnackOrder::captions(SnackNode::Q6, &session),
            vec!["Order for: Mochi".to_string(), "Item: Bamboo croissant".to_string()]
        );
        assert!(SnackOrder::captions(SnackNode::Q4, &session).is_empty());
    }
}
