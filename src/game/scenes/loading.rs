//=========================================================================
// Loading Screen
//=========================================================================
//
// Waits for the media backend to finish preloading.
//
// Exits to Intro on whichever comes first:
// - everything loaded
// - the watchdog fires with most assets in (≥ watchdog_threshold)
// - the hard timeout fires (missing assets degrade to placeholders)
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{info, warn};

//=== Internal Dependencies ===============================================

use crate::core::globals::GlobalContext;
use crate::core::render::{Color, Point, Rect, TextStyle};
use crate::core::scene::Scene;
use crate::core::schedule::DeadlineId;
use crate::game::GameScene;

//=== Constants ===========================================================

const BAR_WIDTH: f32 = 200.0;
const BAR_HEIGHT: f32 = 20.0;

//=== LoadingScene ========================================================

#[derive(Debug, Default)]
pub struct LoadingScene {
    watchdog: Option<DeadlineId>,
    timeout: Option<DeadlineId>,
    done: bool,
}

impl LoadingScene {
    pub fn new() -> Self {
        Self::default()
    }

    fn proceed(&mut self, reason: &str, context: &mut GlobalContext<GameScene>) {
        if self.done {
            return;
        }
        self.done = true;
        info!("Loading finished: {}", reason);
        context.scene_transitions.push(GameScene::Intro);
    }
}

impl Scene<GameScene> for LoadingScene {
    fn on_enter(&mut self, context: &mut GlobalContext<GameScene>) {
        let timing = context.settings.timing.clone();
        self.done = false;
        self.watchdog = Some(context.schedule_after(GameScene::Loading, timing.loading_watchdog_ms));
        self.timeout = Some(context.schedule_after(GameScene::Loading, timing.loading_timeout_ms));
    }

    fn update(&mut self, context: &mut GlobalContext<GameScene>) {
        if context.media.load_progress().is_complete() {
            self.proceed("all assets loaded", context);
        }
    }

    fn on_deadline(&mut self, id: DeadlineId, context: &mut GlobalContext<GameScene>) {
        let progress = context.media.load_progress();

        if self.watchdog == Some(id) {
            self.watchdog = None;
            if progress.fraction() >= context.settings.timing.watchdog_threshold {
                self.proceed("watchdog, enough assets loaded", context);
            } else {
                warn!("Still loading: {}/{} assets", progress.loaded, progress.total);
            }
        } else if self.timeout == Some(id) {
            self.timeout = None;
            warn!(
                "Loading timed out with {}/{} assets, starting anyway",
                progress.loaded, progress.total
            );
            self.proceed("timeout", context);
        }
    }

    fn render(&self, context: &mut GlobalContext<GameScene>) {
        let (w, h) = context.canvas();
        let progress = context.media.load_progress();
        let percent = (progress.fraction() * 100.0).round();

        context.renderer.clear(Color::BLACK);
        context.renderer.draw_text(
            "Loading...",
            Point::new(w / 2.0, h / 2.0),
            TextStyle::new(32.0, Color::WHITE).centered(),
        );
        context.renderer.draw_text(
            &format!("{}%", percent),
            Point::new(w / 2.0, h / 2.0 + 40.0),
            TextStyle::new(20.0, Color::WHITE).centered(),
        );

        let bar = Rect::new(w / 2.0 - BAR_WIDTH / 2.0, h / 2.0 + 60.0, BAR_WIDTH, BAR_HEIGHT);
        context.renderer.draw_rect(bar, None, Some(Color::WHITE));
        let filled = Rect::new(bar.x, bar.y, BAR_WIDTH * progress.fraction(), BAR_HEIGHT);
        context.renderer.draw_rect(filled, Some(Color::WHITE), None);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
