//=========================================================================
// Render Interface
//=========================================================================
//
// Geometry primitives and the renderer contract scenes draw through.
//
// Architecture:
//   Scene::render() → Renderer (trait)
//                       ├─ host renderer (outside this crate)
//                       └─ RecordingRenderer (headless, command log)
//
// The core never rasterizes anything itself. It asks the renderer to
// place named visuals in rectangles and only does rectangle containment
// for hit testing. `draw_visual` reports a missing asset so callers can
// draw a text fallback instead.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

//=== Internal Dependencies ===============================================

use crate::core::drawing::DrawingSnapshot;
use crate::core::media::Cue;

//=== Point ===============================================================

/// Canvas position (pixels, top-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

//=== Rect ================================================================

/// Axis-aligned rectangle used for layout and hit boxes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Edge-inclusive containment test.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Scales position and size by independent factors.
    pub fn scaled(&self, sx: f32, sy: f32) -> Self {
        Self::new(self.x * sx, self.y * sy, self.w * sx, self.h * sy)
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w, self.h)
    }
}

//=== Color ===============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const CREAM: Self = Self::rgb(245, 235, 220);
    pub const PLUM: Self = Self::rgb(60, 20, 60);
    pub const ALARM: Self = Self::rgb(220, 40, 40);
    pub const CALM: Self = Self::rgb(40, 180, 90);
    pub const SHADE: Self = Self::rgba(0, 0, 0, 160);

    /// Same color with a new alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }
}

//=== Text ================================================================

/// Font family selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    /// The game's pixel font.
    Pixel,
    /// Host default font, used when the pixel font is unavailable.
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub size: f32,
    pub color: Color,
    pub align: Align,
}

impl TextStyle {
    pub const fn new(size: f32, color: Color) -> Self {
        Self {
            font: Font::Pixel,
            size,
            color,
            align: Align::Left,
        }
    }

    pub const fn centered(self) -> Self {
        Self { align: Align::Center, ..self }
    }

    pub const fn right(self) -> Self {
        Self { align: Align::Right, ..self }
    }

    pub const fn font(self, font: Font) -> Self {
        Self { font, ..self }
    }
}

//=== Visual ==============================================================

/// Something that can be placed in a rectangle.
#[derive(Debug, Clone, PartialEq)]
pub enum Visual {
    /// Current frame of a media cue.
    Frame(Cue),
    /// Static image by catalog name.
    Image(Cow<'static, str>),
}

impl Visual {
    pub fn image(name: impl Into<Cow<'static, str>>) -> Self {
        Visual::Image(name.into())
    }

    pub fn catalog_name(&self) -> Cow<'_, str> {
        match self {
            Visual::Frame(cue) => Cow::Owned(cue.catalog_name()),
            Visual::Image(name) => Cow::Borrowed(name.as_ref()),
        }
    }
}

//=== Renderer ============================================================

/// Drawing collaborator consumed by scenes and the HUD.
pub trait Renderer: Send {
    /// Called once before any drawing in a frame.
    fn begin_frame(&mut self) {}

    /// Translates everything drawn afterwards (screen shake).
    fn set_offset(&mut self, dx: f32, dy: f32);

    fn clear(&mut self, color: Color);

    /// Draws a visual; returns `false` when the asset is missing.
    fn draw_visual(&mut self, visual: &Visual, rect: Rect) -> bool;

    fn draw_rect(&mut self, rect: Rect, fill: Option<Color>, stroke: Option<Color>);

    fn draw_text(&mut self, text: &str, at: Point, style: TextStyle);

    /// Width of `text` in pixels at `size`.
    fn measure_text(&self, text: &str, size: f32) -> f32;

    /// Composites a captured drawing into `bounds`.
    fn draw_snapshot(&mut self, snapshot: &DrawingSnapshot, bounds: Rect);

    fn end_frame(&mut self) {}
}

//=== RecordingRenderer ===================================================

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Visual { visual: Visual, rect: Rect },
    Rect { rect: Rect, fill: Option<Color>, stroke: Option<Color> },
    Text { text: String, at: Point, style: TextStyle },
    Snapshot { strokes: usize, bounds: Rect },
}

/// Shared handle onto the commands of the last frame.
#[derive(Debug, Clone, Default)]
pub struct FrameLog(Arc<Mutex<Vec<DrawCommand>>>);

impl FrameLog {
    fn record(&self, command: DrawCommand) {
        if let Ok(mut commands) = self.0.lock() {
            commands.push(command);
        }
    }

    fn reset(&self) {
        if let Ok(mut commands) = self.0.lock() {
            commands.clear();
        }
    }

    pub fn commands(&self) -> Vec<DrawCommand> {
        self.0.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn texts(&self) -> Vec<String> {
        self.commands()
            .into_iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| t.contains(needle))
    }

    /// Catalog names of every visual drawn, in order.
    pub fn visuals(&self) -> Vec<String> {
        self.commands()
            .into_iter()
            .filter_map(|c| match c {
                DrawCommand::Visual { visual, .. } => Some(visual.catalog_name().into_owned()),
                _ => None,
            })
            .collect()
    }

    pub fn contains_visual(&self, name: &str) -> bool {
        self.visuals().iter().any(|v| v == name)
    }

    pub fn snapshots_drawn(&self) -> usize {
        self.commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Snapshot { .. }))
            .count()
    }
}

/// Headless renderer that records draw calls for inspection.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    log: FrameLog,
    missing: HashSet<String>,
    offset: (f32, f32),
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks catalog names that should report as missing.
    pub fn with_missing<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.missing.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn log(&self) -> FrameLog {
        self.log.clone()
    }

    fn shifted(&self, rect: Rect) -> Rect {
        rect.offset(self.offset.0, self.offset.1)
    }
}

impl Renderer for RecordingRenderer {
    fn begin_frame(&mut self) {
        self.log.reset();
        self.offset = (0.0, 0.0);
    }

    fn set_offset(&mut self, dx: f32, dy: f32) {
        self.offset = (dx, dy);
    }

    fn clear(&mut self, color: Color) {
        self.log.record(DrawCommand::Clear(color));
    }

    fn draw_visual(&mut self, visual: &Visual, rect: Rect) -> bool {
        if self.missing.contains(visual.catalog_name().as_ref()) {
            return false;
        }
        let rect = self.shifted(rect);
        self.log.record(DrawCommand::Visual { visual: visual.clone(), rect });
        true
    }

    fn draw_rect(&mut self, rect: Rect, fill: Option<Color>, stroke: Option<Color>) {
        let rect = self.shifted(rect);
        self.log.record(DrawCommand::Rect { rect, fill, stroke });
    }

    fn draw_text(&mut self, text: &str, at: Point, style: TextStyle) {
        let at = Point::new(at.x + self.offset.0, at.y + self.offset.1);
        self.log.record(DrawCommand::Text { text: text.to_string(), at, style });
    }

    fn measure_text(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * 0.5
    }

    fn draw_snapshot(&mut self, snapshot: &DrawingSnapshot, bounds: Rect) {
        let bounds = self.shifted(bounds);
        self.log.record(DrawCommand::Snapshot { strokes: snapshot.stroke_count(), bounds });
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
