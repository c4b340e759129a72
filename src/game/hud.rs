//=========================================================================
// HUD Overlay
//=========================================================================
//
// Drawn over every scene:
// - the anxiety meter, with pulse / shake / warning feedback driven by
//   the `AnxietyCue`s published on the message bus
// - the quit button and its confirmation dialog
//
// The confirmation dialog is modal. Opening it suspends the current
// scene; the dialog is considered open exactly while the scene manager
// reports a suspended scene.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::f32::consts::PI;

use log::info;

//=== Internal Dependencies ===============================================

use super::GameScene;
use crate::core::anxiety::{AnxietyCue, Direction, Shake, Warning, MAX_ANXIETY};
use crate::core::globals::{GlobalContext, Overlay, OverlayFrame, OverlayResponse};
use crate::core::media::Sound;
use crate::core::render::{Color, Point, Rect, TextStyle, Visual};

//=== Layout ==============================================================

const QUIT_BUTTON: Rect = Rect::new(20.0, 20.0, 40.0, 40.0);
const DIALOG_SIZE: (f32, f32) = (400.0, 200.0);
const DIALOG_BUTTON_SIZE: (f32, f32) = (120.0, 40.0);

const PULSE_ALPHA: f32 = 150.0;
const WARNING_ALPHA: f32 = 100.0;
const CLICK_VOLUME: f32 = 1.0;
const WARNING_VOLUME: f32 = 1.0;

fn meter_rect(w: f32) -> Rect {
    Rect::new(w - 200.0, 10.0, 180.0, 50.0)
}

fn dialog_rect(w: f32, h: f32) -> Rect {
    let (dw, dh) = DIALOG_SIZE;
    Rect::new(w / 2.0 - dw / 2.0, h / 2.0 - dh / 2.0, dw, dh)
}

fn yes_rect(w: f32, h: f32) -> Rect {
    let dialog = dialog_rect(w, h);
    Rect::new(dialog.x + 50.0, dialog.y + 150.0, DIALOG_BUTTON_SIZE.0, DIALOG_BUTTON_SIZE.1)
}

fn no_rect(w: f32, h: f32) -> Rect {
    let dialog = dialog_rect(w, h);
    Rect::new(dialog.x + 230.0, dialog.y + 150.0, DIALOG_BUTTON_SIZE.0, DIALOG_BUTTON_SIZE.1)
}

//=== Effects =============================================================

/// A time-boxed effect, measured on the game clock from `started`.
#[derive(Debug, Clone, Copy)]
struct Timed<T> {
    started: u64,
    duration_ms: u64,
    params: T,
}

impl<T> Timed<T> {
    fn new(started: u64, duration_ms: u64, params: T) -> Self {
        Self { started, duration_ms, params }
    }

    fn elapsed_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.started)
    }

    /// Progress in `[0, 1)`, or `None` once the effect is over.
    fn progress(&self, now_ms: u64) -> Option<f32> {
        let elapsed = self.elapsed_ms(now_ms);
        (elapsed < self.duration_ms).then(|| elapsed as f32 / self.duration_ms as f32)
    }
}

//=== Hud =================================================================

#[derive(Debug, Default)]
pub struct Hud {
    pulse: Option<Timed<Color>>,
    shake: Option<Timed<Shake>>,
    warning: Option<Timed<Warning>>,
    /// Tick and game clock of the last pre-pass, for `render`.
    now: (u64, u64),
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Internal Helpers -------------------------------------------------

    fn absorb(&mut self, cue: &AnxietyCue, context: &mut GlobalContext<GameScene>) {
        let started = context.clock_ms();
        let color = match cue.direction {
            Direction::Rising => Color::ALARM,
            Direction::Easing => Color::CALM,
        };
        self.pulse = Some(Timed::new(started, cue.pulse_ms, color));

        if let Some(shake) = cue.shake {
            self.shake = Some(Timed::new(started, shake.duration_ms, shake));
        }
        if let Some(volume) = cue.sound_volume {
            let sound = match cue.direction {
                Direction::Rising => Sound::AnxietyUp,
                Direction::Easing => Sound::AnxietyDown,
            };
            context.media.play_sound(sound, volume);
        }
        if let Some(warning) = cue.warning {
            self.warning = Some(Timed::new(started, warning.duration_ms, warning));
            context.media.play_sound(Sound::Warning, WARNING_VOLUME);
        }
    }

    /// Fading jitter; deterministic in the tick so frames are reproducible.
    fn shake_offset(&self, tick: u64, now_ms: u64) -> (f32, f32) {
        let Some(shake) = self.shake else { return (0.0, 0.0) };
        let Some(progress) = shake.progress(now_ms) else { return (0.0, 0.0) };

        let intensity = shake.params.intensity * (1.0 - progress);
        let phase = tick as f32;
        (intensity * (phase * 1.7).sin(), intensity * (phase * 2.3).cos())
    }

    fn draw_effects(&self, context: &mut GlobalContext<GameScene>) {
        let (_, now_ms) = self.now;
        let (w, h) = context.canvas();
        let screen = Rect::new(0.0, 0.0, w, h);

        if let Some(pulse) = self.pulse {
            if let Some(progress) = pulse.progress(now_ms) {
                let alpha = ((progress * PI).sin() * PULSE_ALPHA) as u8;
                context.renderer.draw_rect(screen, Some(pulse.params.with_alpha(alpha)), None);
            }
        }

        if let Some(warning) = self.warning {
            if warning.progress(now_ms).is_some() {
                let interval = warning.params.pulse_interval_ms.max(1);
                let within = warning.elapsed_ms(now_ms) % interval;
                let alpha = ((within as f32 / interval as f32 * PI).sin() * WARNING_ALPHA) as u8;
                context.renderer.draw_rect(screen, None, Some(Color::ALARM.with_alpha(alpha)));
            }
        }
    }

    fn draw_meter(&self, context: &mut GlobalContext<GameScene>) {
        let (w, _) = context.canvas();
        let level = context.anxiety().level();
        let meter = Visual::image(format!("anxiety{}", level));

        if !context.renderer.draw_visual(&meter, meter_rect(w)) {
            context.renderer.draw_text(
                &format!("Anxiety: {}/{}", level, MAX_ANXIETY),
                Point::new(w - 20.0, 20.0),
                TextStyle::new(16.0, Color::WHITE).right(),
            );
        }
    }

    fn draw_quit_button(&self, context: &mut GlobalContext<GameScene>) {
        if !context.renderer.draw_visual(&Visual::image("B_quit"), QUIT_BUTTON) {
            context.renderer.draw_rect(QUIT_BUTTON, Some(Color::CREAM), Some(Color::PLUM));
            context.renderer.draw_text(
                "X",
                QUIT_BUTTON.center(),
                TextStyle::new(20.0, Color::PLUM).centered(),
            );
        }
    }

    fn draw_confirmation(&self, context: &mut GlobalContext<GameScene>) {
        let (w, h) = context.canvas();
        context.renderer.draw_rect(Rect::new(0.0, 0.0, w, h), Some(Color::SHADE), None);

        let dialog = dialog_rect(w, h);
        if !context.renderer.draw_visual(&Visual::image("A_surequit"), dialog) {
            context.renderer.draw_rect(dialog, Some(Color::CREAM), Some(Color::PLUM));
            context.renderer.draw_text(
                "Are you sure you want to quit?",
                Point::new(dialog.center().x, dialog.y + 60.0),
                TextStyle::new(22.0, Color::PLUM).centered(),
            );
        }

        for (image, label, rect) in [("B_yesquit", "Yes", yes_rect(w, h)), ("B_noquit", "No", no_rect(w, h))] {
            if !context.renderer.draw_visual(&Visual::image(image), rect) {
                context.renderer.draw_rect(rect, Some(Color::WHITE), Some(Color::PLUM));
                context.renderer.draw_text(label, rect.center(), TextStyle::new(18.0, Color::PLUM).centered());
            }
        }
    }
}

impl Overlay<GameScene> for Hud {
    fn handle_input(
        &mut self,
        frame: OverlayFrame<GameScene>,
        context: &mut GlobalContext<GameScene>,
    ) -> OverlayResponse {
        let Some(scene) = frame.scene else { return OverlayResponse::Pass };
        let click = context.clicked();

        if click.is_some() && scene != GameScene::Loading {
            context.media.play_sound(Sound::ButtonPress, CLICK_VOLUME);
        }

        let (w, h) = context.canvas();
        if frame.suspended {
            return match click {
                Some(point) if yes_rect(w, h).contains(point) => {
                    info!("Quit confirmed in {:?}", scene);
                    context.scene_transitions.push(GameScene::GameOver);
                    OverlayResponse::Abandon
                }
                Some(point) if no_rect(w, h).contains(point) => OverlayResponse::Resume,
                _ => OverlayResponse::Consumed,
            };
        }

        match click {
            Some(point) if scene.can_quit() && QUIT_BUTTON.contains(point) => {
                info!("Quit requested in {:?}", scene);
                OverlayResponse::Suspend
            }
            _ => OverlayResponse::Pass,
        }
    }

    fn before_render(&mut self, _frame: OverlayFrame<GameScene>, context: &mut GlobalContext<GameScene>) {
        let cues: Vec<AnxietyCue> = context.message_bus.read::<AnxietyCue>().to_vec();
        for cue in &cues {
            self.absorb(cue, context);
        }

        self.now = (context.tick(), context.clock_ms());
        let (dx, dy) = self.shake_offset(self.now.0, self.now.1);
        context.renderer.set_offset(dx, dy);
    }

    fn render(&self, frame: OverlayFrame<GameScene>, context: &mut GlobalContext<GameScene>) {
        context.renderer.set_offset(0.0, 0.0);

        self.draw_effects(context);
        self.draw_meter(context);

        let Some(scene) = frame.scene else { return };
        if scene.can_quit() {
            self.draw_quit_button(context);
        }
        if frame.suspended {
            self.draw_confirmation(context);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::media::{Cue, HeadlessMedia, TableShot};
    use crate::core::render::DrawCommand;
    use crate::core::session::{Stage, Table};
    use crate::game::testing::Harness;
    use crate::settings::GameSettings;

    fn frame_at(scene: GameScene) -> OverlayFrame<GameScene> {
        OverlayFrame { scene: Some(scene), suspended: false }
    }

    fn answer_quit(h: &mut Harness, confirm: bool) {
        let (w, hgt) = h.context.canvas();
        let button = if confirm { yes_rect(w, hgt) } else { no_rect(w, hgt) };
        h.click_at(button.center());
    }

    /// Stage 1 finished and its outro playing.
    fn at_stage_one_outro() -> Harness {
        let mut h = Harness::at(GameScene::MiniGame1, Some(Table::Two));
        h.finish_cue(Cue::MiniGameIntro(Stage::One, Table::Two));
        h.scribble();
        h.click_check();
        h.finish_cue(Cue::ThoughtBubble);
        assert!(h.context.media.is_playing(Cue::MiniGameOutro(Stage::One, Table::Two)));
        h
    }

    //--- Meter ------------------------------------------------------------

    #[test]
    fn meter_shows_current_level() {
        let mut h = Harness::at(GameScene::MiniGame1, Some(Table::One));
        h.context.raise_anxiety(3);
        h.idle();
        assert!(h.frame().contains_visual("anxiety3"));
    }

    #[test]
    fn missing_meter_falls_back_to_text() {
        let mut h = Harness::with_missing_visuals(&["anxiety0"]);
        h.idle();
        assert!(h.frame().contains_text("Anxiety: 0/10"));
    }

    //--- Anxiety Feedback -------------------------------------------------

    #[test]
    fn rising_anxiety_pulses_and_plays_sound() {
        let mut h = Harness::at(GameScene::MiniGame1, Some(Table::One));
        h.context.raise_anxiety(3);
        h.idle();

        assert!(h.sounds().contains(&Sound::AnxietyUp));
        let pulsed = h.frame().commands().iter().any(|c| {
            matches!(c, DrawCommand::Rect { fill: Some(color), .. } if color.r == Color::ALARM.r && color.g == Color::ALARM.g)
        });
        assert!(pulsed, "Red pulse drawn over the scene");
    }

    #[test]
    fn crossing_into_warning_band_plays_warning() {
        let mut h = Harness::at(GameScene::MiniGame1, Some(Table::One));
        h.context.raise_anxiety(8);
        h.idle();
        assert!(h.sounds().contains(&Sound::Warning));
    }

    #[test]
    fn shake_fades_out() {
        let mut hud = Hud::new();
        let mut context = GlobalContext::headless(GameSettings::default());
        context.raise_anxiety(4);
        hud.before_render(frame_at(GameScene::MiniGame1), &mut context);

        let settings = context.settings.clone();
        let mut moved = false;
        for tick in 0..10 {
            let (dx, dy) = hud.shake_offset(tick, settings.elapsed_ms(tick));
            moved |= dx != 0.0 || dy != 0.0;
            assert!(dx.abs() <= 8.0 && dy.abs() <= 8.0, "Jitter bounded by intensity");
        }
        assert!(moved, "A rise of 4 shakes the screen");
        assert_eq!(hud.shake_offset(1000, settings.elapsed_ms(1000)), (0.0, 0.0), "Shake ends after its duration");
    }

    #[test]
    fn small_rise_does_not_shake() {
        let mut hud = Hud::new();
        let mut context = GlobalContext::headless(GameSettings::default());
        context.raise_anxiety(1);
        hud.before_render(frame_at(GameScene::MiniGame1), &mut context);
        assert_eq!(hud.shake_offset(2, 33), (0.0, 0.0));
    }

    //--- Quit Confirmation ------------------------------------------------

    #[test]
    fn quit_button_hidden_before_the_game_starts() {
        let mut h = Harness::at(GameScene::Intro, None);
        h.click_at(QUIT_BUTTON.center());
        assert!(!h.systems.scene_manager.is_suspended());
        assert!(!h.frame().contains_visual("B_quit"));
    }

    #[test]
    fn declining_quit_resumes_scene() {
        let mut h = Harness::at(GameScene::OrderDrink, Some(Table::One));
        h.click_at(QUIT_BUTTON.center());
        assert!(h.systems.scene_manager.is_suspended());
        assert!(h.frame().contains_visual("A_surequit"));

        h.click_option(0);
        assert!(h.systems.scene_manager.is_suspended(), "Clicks outside the dialog are swallowed");

        let (w, hgt) = h.context.canvas();
        h.click_at(no_rect(w, hgt).center());
        assert!(!h.systems.scene_manager.is_suspended());
        assert_eq!(h.current(), Some(GameScene::OrderDrink));
    }

    #[test]
    fn confirming_quit_ends_the_game() {
        let mut h = Harness::at(GameScene::MiniGame2, Some(Table::Two));
        h.click_at(QUIT_BUTTON.center());

        let (w, hgt) = h.context.canvas();
        h.click_at(yes_rect(w, hgt).center());
        assert_eq!(h.current(), Some(GameScene::GameOver));
        assert!(!h.systems.scene_manager.is_suspended());
    }

    #[test]
    fn confirming_quit_drops_media_that_ended_meanwhile() {
        let mut h = at_stage_one_outro();
        h.click_at(QUIT_BUTTON.center());
        h.context.media.notify_ended(Cue::MiniGameOutro(Stage::One, Table::Two));
        h.idle();

        answer_quit(&mut h, true);
        assert_eq!(h.current(), Some(GameScene::GameOver));
        h.wait_ms(1000);
        assert_eq!(h.current(), Some(GameScene::GameOver), "The held outro never reaches the mini-game");
    }

    #[test]
    fn confirming_quit_while_sitting_down_ends_the_game() {
        let mut h = Harness::at(GameScene::TableSelect, None);
        h.click_design(1200.0, 250.0);
        h.finish_cue(Cue::Table(Table::Two, TableShot::Approach));
        h.click_design(300.0, 750.0);
        assert!(h.context.media.is_playing(Cue::Table(Table::Two, TableShot::Settle)));

        h.click_at(QUIT_BUTTON.center());
        h.context.media.notify_ended(Cue::Table(Table::Two, TableShot::Settle));
        h.idle();

        answer_quit(&mut h, true);
        assert_eq!(h.current(), Some(GameScene::GameOver));
        assert_eq!(h.context.session.table(), None, "The pick never completed");
        h.wait_ms(1000);
        assert_eq!(h.current(), Some(GameScene::GameOver));
    }

    #[test]
    fn declining_quit_delivers_held_media() {
        let mut h = at_stage_one_outro();
        h.click_at(QUIT_BUTTON.center());
        h.context.media.notify_ended(Cue::MiniGameOutro(Stage::One, Table::Two));
        h.idle();
        assert_eq!(h.current(), Some(GameScene::MiniGame1), "Held while the dialog is open");

        answer_quit(&mut h, false);
        h.run_until(GameScene::OrderDrink, 5);
    }

    #[test]
    fn end_screens_have_no_quit_button() {
        for scene in [GameScene::Success, GameScene::GameOver] {
            let mut h = Harness::at(scene, None);
            h.click_at(QUIT_BUTTON.center());
            assert!(!h.systems.scene_manager.is_suspended(), "{:?} offers no quit", scene);
            assert!(!h.frame().contains_visual("B_quit"));
        }
    }

    #[test]
    fn clicks_play_button_press_except_while_loading() {
        let mut loading =
            Harness::with_media(|settings| HeadlessMedia::new(&settings.media).with_load_progress(1, 10));
        loading.click_at(Point::new(300.0, 300.0));
        assert!(loading.sounds().is_empty());

        let mut h = Harness::at(GameScene::Intro, None);
        h.click_at(Point::new(300.0, 300.0));
        assert_eq!(h.sounds(), vec![Sound::ButtonPress]);
    }
}
