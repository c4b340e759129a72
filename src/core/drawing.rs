//=========================================================================
// Drawing Surface
//=========================================================================
//
// Freehand draw/erase canvas contract used by the mini-games, plus a
// headless stroke-list implementation.
//
// Architecture:
//   MiniGame ─ pointer drag/up ─→ DrawingSurface (trait)
//                                   └─ StrokeCanvas (strokes + undo/redo)
//            ←─ snapshot() ──────── DrawingSnapshot (immutable, Arc)
//
// A snapshot shares its strokes behind an `Arc<[Stroke]>`, so handing it
// from one mini-game to the next never copies or mutates it.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::render::{Point, Rect};

//=== Constants ===========================================================

const HISTORY_LIMIT: usize = 20;

//=== DrawMode ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    #[default]
    Draw,
    Erase,
}

//=== Stroke ==============================================================

/// One continuous pointer drag, in surface-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub mode: DrawMode,
    pub points: Vec<Point>,
}

//=== DrawingSnapshot =====================================================

/// Immutable capture of a surface's strokes.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingSnapshot {
    strokes: Arc<[Stroke]>,
}

impl DrawingSnapshot {
    pub fn empty() -> Self {
        Self { strokes: Arc::from(Vec::new()) }
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    /// True when at least one drawn (not erased) stroke exists.
    pub fn has_ink(&self) -> bool {
        self.strokes.iter().any(|s| s.mode == DrawMode::Draw)
    }
}

//=== DrawingSurface ======================================================

/// Freehand canvas collaborator.
pub trait DrawingSurface: Send {
    /// Sets the on-screen area that accepts strokes.
    fn set_bounds(&mut self, bounds: Rect);

    fn bounds(&self) -> Rect;

    fn clear(&mut self);

    fn set_mode(&mut self, mode: DrawMode);

    fn mode(&self) -> DrawMode;

    fn handle_pointer_drag(&mut self, point: Point);

    fn handle_pointer_up(&mut self);

    fn has_content(&self) -> bool;

    fn snapshot(&self) -> DrawingSnapshot;

    /// Replaces the surface content with a snapshot.
    fn restore(&mut self, snapshot: &DrawingSnapshot);

    /// Removes the latest stroke. Returns `false` when there is nothing to undo.
    fn undo(&mut self) -> bool;

    /// Re-applies the latest undone stroke.
    fn redo(&mut self) -> bool;
}

//=== StrokeCanvas ========================================================

/// Headless surface that keeps strokes as point lists.
#[derive(Debug, Clone)]
pub struct StrokeCanvas {
    bounds: Rect,
    mode: DrawMode,
    settled: Vec<Stroke>,
    strokes: Vec<Stroke>,
    active: Option<Stroke>,
    undone: Vec<Stroke>,
    has_content: bool,
}

impl StrokeCanvas {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            mode: DrawMode::Draw,
            settled: Vec::new(),
            strokes: Vec::new(),
            active: None,
            undone: Vec::new(),
            has_content: false,
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn finish_stroke(&mut self) {
        if let Some(stroke) = self.active.take() {
            trace!("Stroke finished with {} points", stroke.points.len());
            self.strokes.push(stroke);
            if self.strokes.len() > HISTORY_LIMIT {
                // The oldest stroke leaves the undo history but stays drawn.
                let oldest = self.strokes.remove(0);
                self.settled.push(oldest);
            }
            self.undone.clear();
        }
    }

    fn recompute_content(&mut self) {
        self.has_content = self
            .settled
            .iter()
            .chain(self.strokes.iter())
            .any(|s| s.mode == DrawMode::Draw);
    }
}

impl Default for StrokeCanvas {
    fn default() -> Self {
        Self::new(Rect::default())
    }
}

impl DrawingSurface for StrokeCanvas {
    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn clear(&mut self) {
        self.settled.clear();
        self.strokes.clear();
        self.undone.clear();
        self.active = None;
        self.has_content = false;
    }

    fn set_mode(&mut self, mode: DrawMode) {
        self.finish_stroke();
        self.mode = mode;
    }

    fn mode(&self) -> DrawMode {
        self.mode
    }

    fn handle_pointer_drag(&mut self, point: Point) {
        if !self.bounds.contains(point) {
            // Leaving the canvas ends the stroke in progress.
            self.finish_stroke();
            return;
        }

        let local = Point::new(point.x - self.bounds.x, point.y - self.bounds.y);
        let mode = self.mode;
        self.active
            .get_or_insert_with(|| Stroke { mode, points: Vec::new() })
            .points
            .push(local);

        if mode == DrawMode::Draw {
            self.has_content = true;
        }
    }

    fn handle_pointer_up(&mut self) {
        self.finish_stroke();
    }

    fn has_content(&self) -> bool {
        self.has_content
    }

    fn snapshot(&self) -> DrawingSnapshot {
        let mut strokes = self.settled.clone();
        strokes.extend(self.strokes.iter().cloned());
        if let Some(active) = &self.active {
            strokes.push(active.clone());
        }
        DrawingSnapshot { strokes: Arc::from(strokes) }
    }

    fn restore(&mut self, snapshot: &DrawingSnapshot) {
        self.settled = snapshot.strokes().to_vec();
        self.strokes.clear();
        self.active = None;
        self.undone.clear();
        self.has_content = snapshot.has_ink();
    }

    fn undo(&mut self) -> bool {
        self.finish_stroke();
        match self.strokes.pop() {
            Some(stroke) => {
                self.undone.push(stroke);
                self.recompute_content();
                true
            }
            None => false,
        }
    }

    fn redo(&mut self) -> bool {
        match self.undone.pop() {
            Some(stroke) => {
                self.strokes.push(stroke);
                self.recompute_content();
                true
            }
            None => false,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
