//=========================================================================
// Table Selection
//=========================================================================
//
// The player looks around the cafe and commits to one of three tables.
//
// Focus states (at most one table in focus at a time):
//   Overview ──click table──→ Approaching(t) ──cue end──→ Lingering(t)
//   Lingering(t) ──"look at other tables"──→ Leaving(t) ──cue end──→ Overview
//   Lingering(t) ──"pick this table"──→ Picking(t) ──cue end──→ MiniGame1
//
// Layout is authored in a 1920x1080 design space and scaled to the
// canvas.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{info, trace};

//=== Internal Dependencies ===============================================

use super::draw_or_placeholder;
use crate::core::globals::GlobalContext;
use crate::core::media::{Cue, Sound, TableShot};
use crate::core::render::{Color, Rect, TextStyle, Visual};
use crate::core::scene::Scene;
use crate::core::session::Table;
use crate::game::GameScene;

//=== Layout ==============================================================

const DESIGN_SIZE: (f32, f32) = (1920.0, 1080.0);

const LOOK_BUTTON: Rect = Rect::new(160.0, 850.0, 400.0, 133.0);
const PICK_BUTTON: Rect = Rect::new(160.0, 690.0, 400.0, 133.0);

/// Clickable area of a table, in design space.
fn table_region(table: Table) -> Rect {
    match table {
        Table::One => Rect::new(400.0, 120.0, 525.0, 300.0),
        Table::Two => Rect::new(995.0, 120.0, 525.0, 300.0),
        Table::Three => Rect::new(700.0, 495.0, 525.0, 300.0),
    }
}

fn to_canvas(rect: Rect, (w, h): (f32, f32)) -> Rect {
    rect.scaled(w / DESIGN_SIZE.0, h / DESIGN_SIZE.1)
}

/// Anxiety added by committing to a table.
pub fn pick_delta(table: Table) -> u32 {
    match table {
        Table::One => 2,
        Table::Two => 0,
        Table::Three => 3,
    }
}

//=== Focus ===============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Overview,
    Approaching(Table),
    Lingering(Table),
    Leaving(Table),
    Picking(Table),
}

impl Focus {
    pub fn table(self) -> Option<Table> {
        match self {
            Focus::Overview => None,
            Focus::Approaching(t) | Focus::Lingering(t) | Focus::Leaving(t) | Focus::Picking(t) => Some(t),
        }
    }

    /// Clip on screen in this state.
    fn cue(self) -> Cue {
        match self {
            Focus::Overview => Cue::TableOverview,
            Focus::Approaching(t) => Cue::Table(t, TableShot::Approach),
            Focus::Lingering(t) => Cue::Table(t, TableShot::Linger),
            Focus::Leaving(t) => Cue::Table(t, TableShot::Retreat),
            Focus::Picking(t) => Cue::Table(t, TableShot::Settle),
        }
    }
}

//=== TableSelect =========================================================

pub struct TableSelect {
    focus: Focus,
}

impl TableSelect {
    pub fn new() -> Self {
        Self { focus: Focus::Overview }
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    //--- Internal Helpers -------------------------------------------------

    fn focus_on(&mut self, focus: Focus, context: &mut GlobalContext<GameScene>) {
        trace!("Table focus {:?} -> {:?}", self.focus, focus);
        context.media.stop(self.focus.cue());
        self.focus = focus;

        match focus {
            Focus::Overview | Focus::Lingering(_) => {
                context.media.play_looping(GameScene::TableSelect, focus.cue());
            }
            _ => context.media.play(GameScene::TableSelect, focus.cue()),
        }
    }

    fn handle_click(&mut self, context: &mut GlobalContext<GameScene>) {
        let Some(point) = context.clicked() else { return };
        let canvas = context.canvas();

        match self.focus {
            Focus::Overview => {
                let hit = Table::ALL
                    .into_iter()
                    .find(|&table| to_canvas(table_region(table), canvas).contains(point));
                if let Some(table) = hit {
                    context.media.play_sound(Sound::Click, 1.0);
                    self.focus_on(Focus::Approaching(table), context);
                }
            }
            Focus::Lingering(table) => {
                if to_canvas(LOOK_BUTTON, canvas).contains(point) {
                    context.media.play_sound(Sound::Click, 1.0);
                    self.focus_on(Focus::Leaving(table), context);
                } else if to_canvas(PICK_BUTTON, canvas).contains(point) {
                    context.media.play_sound(Sound::Click, 1.0);
                    context.raise_anxiety(pick_delta(table));
                    self.focus_on(Focus::Picking(table), context);
                }
            }
            Focus::Approaching(_) | Focus::Leaving(_) | Focus::Picking(_) => {}
        }
    }
}

impl Default for TableSelect {
    fn default() -> Self {
        Self::new()
    }
}

//=== Scene Implementation ================================================

impl Scene<GameScene> for TableSelect {
    fn on_enter(&mut self, context: &mut GlobalContext<GameScene>) {
        self.focus = Focus::Overview;
        context.media.play_looping(GameScene::TableSelect, Cue::TableOverview);
    }

    fn update(&mut self, context: &mut GlobalContext<GameScene>) {
        self.handle_click(context);
    }

    fn on_media_complete(&mut self, cue: Cue, context: &mut GlobalContext<GameScene>) {
        if cue != self.focus.cue() {
            trace!("Ignoring end of {:?} while {:?}", cue, self.focus);
            return;
        }

        match self.focus {
            Focus::Approaching(table) => self.focus_on(Focus::Lingering(table), context),
            Focus::Leaving(_) => self.focus_on(Focus::Overview, context),
            Focus::Picking(table) => {
                info!("Table {} chosen", table.number());
                context.session.select_table(table);
                context.scene_transitions.push(GameScene::MiniGame1);
            }
            Focus::Overview | Focus::Lingering(_) => {}
        }
    }

    fn render(&self, context: &mut GlobalContext<GameScene>) {
        let canvas = context.canvas();
        let screen = Rect::new(0.0, 0.0, canvas.0, canvas.1);
        context.renderer.clear(Color::BLACK);
        draw_or_placeholder(context.renderer.as_mut(), &Visual::Frame(self.focus.cue()), screen, Color::PLUM);

        if let Focus::Lingering(table) = self.focus {
            let buttons = [
                (LOOK_BUTTON, "lookAtOtherTables".to_string(), "Look at other tables"),
                (PICK_BUTTON, format!("pickThisTable{}", table.number()), "Pick this table"),
            ];
            for (rect, image, label) in buttons {
                let rect = to_canvas(rect, canvas);
                if !context.renderer.draw_visual(&Visual::image(image), rect) {
                    context.renderer.draw_rect(rect, Some(Color::CREAM), Some(Color::PLUM));
                    context.renderer.draw_text(label, rect.center(), TextStyle::new(24.0, Color::PLUM).centered());
                }
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::testing::Harness;

    fn click_table(h: &mut Harness, table: Table) {
        let center = table_region(table).center();
        h.click_design(center.x, center.y);
    }

    fn approach(h: &mut Harness, table: Table) {
        click_table(h, table);
        h.finish_cue(Cue::Table(table, TableShot::Approach));
    }

    #[test]
    fn pick_deltas_are_exact() {
        for table in Table::ALL {
            let mut h = Harness::at(GameScene::TableSelect, None);
            approach(&mut h, table);
            assert!(h.context.media.is_playing(Cue::Table(table, TableShot::Linger)));

            let pick = PICK_BUTTON.center();
            h.click_design(pick.x, pick.y);
            assert_eq!(h.anxiety() as u32, pick_delta(table), "Picking table {}", table.number());

            h.finish_cue(Cue::Table(table, TableShot::Settle));
            h.run_until(GameScene::MiniGame1, 5);
            assert_eq!(h.context.session.table(), Some(table));
        }
        assert_eq!((pick_delta(Table::One), pick_delta(Table::Two), pick_delta(Table::Three)), (2, 0, 3));
    }

    #[test]
    fn looking_elsewhere_returns_to_overview() {
        let mut h = Harness::at(GameScene::TableSelect, None);
        approach(&mut h, Table::Three);
        assert!(h.frame().contains_visual("pickThisTable3"));

        let look = LOOK_BUTTON.center();
        h.click_design(look.x, look.y);
        assert!(!h.context.media.is_playing(Cue::Table(Table::Three, TableShot::Linger)));
        h.finish_cue(Cue::Table(Table::Three, TableShot::Retreat));

        assert!(h.context.media.is_playing(Cue::TableOverview));
        assert_eq!(h.anxiety(), 0);
        assert_eq!(h.context.session.table(), None);
    }

    #[test]
    fn other_tables_ignored_while_approaching() {
        let mut h = Harness::at(GameScene::TableSelect, None);
        click_table(&mut h, Table::One);
        click_table(&mut h, Table::Two);

        assert!(h.context.media.is_playing(Cue::Table(Table::One, TableShot::Approach)));
        assert!(!h.context.media.is_playing(Cue::Table(Table::Two, TableShot::Approach)));
    }

    #[test]
    fn regions_scale_with_canvas() {
        let small = to_canvas(table_region(Table::Two), (960.0, 540.0));
        assert_eq!(small, Rect::new(497.5, 60.0, 262.5, 150.0));
    }

    #[test]
    fn focus_names_one_table_at_most() {
        assert_eq!(Focus::Overview.table(), None);
        assert_eq!(Focus::Picking(Table::Two).table(), Some(Table::Two));
    }
}
