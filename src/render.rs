//! Rendering: draws the full scene plus the in-flight preview to a surface.
//!
//! [`draw`] receives read-only views of the scene, interaction state, and
//! configuration and produces draw calls on a [`DrawSurface`]. It never
//! mutates application state, and it always repaints from scratch: clear,
//! background, every object in paint order, then the transient preview on
//! top. Two calls with the same inputs issue the same calls.
//!
//! Two surfaces ship with the crate: the browser's
//! [`web_sys::CanvasRenderingContext2d`] and [`DisplayList`], which records
//! calls for headless use and tests.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::convert::Infallible;
use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::config::EngineConfig;
use crate::consts::{TEXT_LINE_GAP, TEXT_OUTLINE_WIDTH, TEXT_PADDING};
use crate::doc::{Scene, Shape};
use crate::geom::Point;
use crate::input::{InputState, UiState};

/// Horizontal advance per character, relative to font size, used by
/// [`DisplayList`] in place of real font metrics.
const DISPLAY_LIST_ADVANCE: f64 = 0.6;

/// Size of the drawable area in surface units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// The drawing primitives the pipeline needs from a raster surface.
///
/// Calls mirror the HTML canvas 2D context. `set_font` also selects a top
/// text baseline, so `fill_text` positions the top of the line.
pub trait DrawSurface {
    type Error;

    fn save(&mut self);
    fn restore(&mut self);
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn set_fill_color(&mut self, color: &str);
    fn set_stroke_color(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn close_path(&mut self);
    /// Add an arc around `(x, y)` to the current path.
    ///
    /// # Errors
    ///
    /// Surface-specific; the browser rejects negative radii.
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), Self::Error>;
    fn stroke(&mut self);
    /// Restrict later drawing to a rectangle until the next `restore`.
    fn clip_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn set_font(&mut self, size_px: f64, family: &str);
    /// Width of `text` in the current font.
    ///
    /// # Errors
    ///
    /// Surface-specific measurement failure.
    fn measure_text(&mut self, text: &str) -> Result<f64, Self::Error>;
    /// # Errors
    ///
    /// Surface-specific draw failure.
    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), Self::Error>;
}

/// Draw the full frame: background, scene objects, then the preview.
///
/// # Errors
///
/// Returns the first error raised by the surface.
pub fn draw<S: DrawSurface>(
    surface: &mut S,
    scene: &Scene,
    ui: &UiState,
    input: &InputState,
    config: &EngineConfig,
    viewport: Viewport,
) -> Result<(), S::Error> {
    // Layer 1: background.
    surface.clear_rect(0.0, 0.0, viewport.width, viewport.height);
    surface.set_fill_color(&config.background);
    surface.fill_rect(0.0, 0.0, viewport.width, viewport.height);

    // Layer 2: committed objects in paint order.
    for obj in scene.iter() {
        let selected = ui.selection.contains(&obj.id);
        surface.save();
        draw_shape(surface, &obj.shape, selected, config)?;
        surface.restore();
    }

    // Layer 3: the gesture in flight.
    surface.save();
    draw_preview(surface, ui, input, config)?;
    surface.restore();
    Ok(())
}

// =============================================================
// Object dispatch
// =============================================================

fn draw_shape<S: DrawSurface>(
    surface: &mut S,
    shape: &Shape,
    selected: bool,
    config: &EngineConfig,
) -> Result<(), S::Error> {
    let outline = |own: &str| if selected { config.highlight.clone() } else { own.to_owned() };

    match shape {
        Shape::Stroke { points, color, thickness } => {
            apply_stroke_style(surface, &outline(color), *thickness);
            stroke_polyline(surface, points);
        }
        Shape::Rect { x, y, width, height, color, thickness } => {
            apply_stroke_style(surface, &outline(color), *thickness);
            surface.stroke_rect(*x, *y, *width, *height);
        }
        Shape::Circle { x, y, radius, color, thickness } => {
            apply_stroke_style(surface, &outline(color), *thickness);
            surface.begin_path();
            surface.arc(*x, *y, radius.max(0.0), 0.0, 2.0 * PI)?;
            surface.stroke();
        }
        Shape::Triangle { x, y, size, color, thickness } => {
            apply_stroke_style(surface, &outline(color), *thickness);
            surface.begin_path();
            surface.move_to(*x, y - size);
            surface.line_to(x - size, y + size);
            surface.line_to(x + size, y + size);
            surface.close_path();
            surface.stroke();
        }
        Shape::Line { x1, y1, x2, y2, color, thickness } => {
            apply_stroke_style(surface, &outline(color), *thickness);
            surface.begin_path();
            surface.move_to(*x1, *y1);
            surface.line_to(*x2, *y2);
            surface.stroke();
        }
        Shape::Text { x, y, width, height, text, font_size } => {
            apply_stroke_style(surface, &outline(&config.text_color), TEXT_OUTLINE_WIDTH);
            surface.stroke_rect(*x, *y, *width, *height);
            draw_text_body(surface, text, *x, *y, *width, *height, *font_size, config)?;
        }
    }
    Ok(())
}

fn draw_preview<S: DrawSurface>(
    surface: &mut S,
    ui: &UiState,
    input: &InputState,
    config: &EngineConfig,
) -> Result<(), S::Error> {
    let style = &ui.style;
    match input {
        InputState::Drawing { points, .. } if !points.is_empty() => {
            apply_stroke_style(surface, &style.color, style.thickness);
            stroke_polyline(surface, points);
        }
        InputState::PlacingShape { kind, anchor, current } => {
            let shape = kind.build(*anchor, *current, &style.color, style.thickness);
            draw_shape(surface, &shape, false, config)?;
        }
        InputState::PlacingText { anchor, current, .. } => {
            apply_stroke_style(surface, &config.highlight, TEXT_OUTLINE_WIDTH);
            surface.stroke_rect(anchor.x, anchor.y, current.x - anchor.x, current.y - anchor.y);
        }
        _ => {}
    }
    if let Some(bounds) = ui.pending_text {
        apply_stroke_style(surface, &config.highlight, TEXT_OUTLINE_WIDTH);
        surface.stroke_rect(bounds.x, bounds.y, bounds.width, bounds.height);
    }
    Ok(())
}

// =============================================================
// Text
// =============================================================

#[allow(clippy::too_many_arguments)]
fn draw_text_body<S: DrawSurface>(
    surface: &mut S,
    text: &str,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    font_size: f64,
    config: &EngineConfig,
) -> Result<(), S::Error> {
    surface.save();
    surface.clip_rect(x, y, width, height);
    surface.set_font(font_size, &config.font_family);
    surface.set_fill_color(&config.text_color);

    let max_w = width - TEXT_PADDING * 2.0;
    let line_height = font_size + TEXT_LINE_GAP;
    let mut line_y = y + TEXT_PADDING;
    for line in wrap_text(surface, text, max_w)? {
        surface.fill_text(&line, x + TEXT_PADDING, line_y)?;
        line_y += line_height;
    }

    surface.restore();
    Ok(())
}

/// Break `text` into lines no wider than `max_w`, breaking at the last word
/// boundary that fits. Explicit newlines always break. A word wider than
/// `max_w` on its own stays on one line.
///
/// # Errors
///
/// Returns the first text-measurement error from the surface.
pub fn wrap_text<S: DrawSurface>(surface: &mut S, text: &str, max_w: f64) -> Result<Vec<String>, S::Error> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for (n, word) in paragraph.split(' ').enumerate() {
            let candidate = format!("{current}{word} ");
            if n > 0 && surface.measure_text(&candidate)? > max_w {
                lines.push(current.trim_end().to_owned());
                current = format!("{word} ");
            } else {
                current = candidate;
            }
        }
        lines.push(current.trim_end().to_owned());
    }
    Ok(lines)
}

// =============================================================
// Helpers
// =============================================================

fn apply_stroke_style<S: DrawSurface>(surface: &mut S, color: &str, width: f64) {
    surface.set_stroke_color(color);
    surface.set_line_width(width);
}

fn stroke_polyline<S: DrawSurface>(surface: &mut S, points: &[Point]) {
    surface.begin_path();
    for (i, p) in points.iter().enumerate() {
        if i == 0 {
            surface.move_to(p.x, p.y);
        } else {
            surface.line_to(p.x, p.y);
        }
    }
    surface.stroke();
}

// =============================================================
// Display list surface
// =============================================================

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    ClearRect { x: f64, y: f64, width: f64, height: f64 },
    FillColor(String),
    StrokeColor(String),
    LineWidth(f64),
    FillRect { x: f64, y: f64, width: f64, height: f64 },
    StrokeRect { x: f64, y: f64, width: f64, height: f64 },
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    ClosePath,
    Arc { center: Point, radius: f64, start: f64, end: f64 },
    Stroke,
    Clip { x: f64, y: f64, width: f64, height: f64 },
    Font { size: f64, family: String },
    FillText { text: String, at: Point },
}

/// Surface that records draw calls instead of rasterizing them.
///
/// Text is measured with a fixed per-character advance, so layouts are
/// deterministic across platforms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
    font_size: f64,
}

impl DisplayList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded calls in issue order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop every recorded call.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

impl DrawSurface for DisplayList {
    type Error = Infallible;

    fn save(&mut self) {
        self.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.push(DrawCommand::Restore);
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.push(DrawCommand::ClearRect { x, y, width, height });
    }

    fn set_fill_color(&mut self, color: &str) {
        self.push(DrawCommand::FillColor(color.to_owned()));
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.push(DrawCommand::StrokeColor(color.to_owned()));
    }

    fn set_line_width(&mut self, width: f64) {
        self.push(DrawCommand::LineWidth(width));
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.push(DrawCommand::FillRect { x, y, width, height });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.push(DrawCommand::StrokeRect { x, y, width, height });
    }

    fn begin_path(&mut self) {
        self.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.push(DrawCommand::MoveTo(Point::new(x, y)));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.push(DrawCommand::LineTo(Point::new(x, y)));
    }

    fn close_path(&mut self) {
        self.push(DrawCommand::ClosePath);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), Infallible> {
        self.push(DrawCommand::Arc { center: Point::new(x, y), radius, start, end });
        Ok(())
    }

    fn stroke(&mut self) {
        self.push(DrawCommand::Stroke);
    }

    fn clip_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.push(DrawCommand::Clip { x, y, width, height });
    }

    fn set_font(&mut self, size_px: f64, family: &str) {
        self.font_size = size_px;
        self.push(DrawCommand::Font { size: size_px, family: family.to_owned() });
    }

    #[allow(clippy::cast_precision_loss)]
    fn measure_text(&mut self, text: &str) -> Result<f64, Infallible> {
        Ok(text.chars().count() as f64 * self.font_size * DISPLAY_LIST_ADVANCE)
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), Infallible> {
        self.push(DrawCommand::FillText { text: text.to_owned(), at: Point::new(x, y) });
        Ok(())
    }
}

// =============================================================
// Browser canvas surface
// =============================================================

impl DrawSurface for CanvasRenderingContext2d {
    type Error = JsValue;

    fn save(&mut self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&mut self) {
        CanvasRenderingContext2d::restore(self);
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        CanvasRenderingContext2d::clear_rect(self, x, y, width, height);
    }

    fn set_fill_color(&mut self, color: &str) {
        self.set_fill_style_str(color);
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.set_stroke_style_str(color);
    }

    fn set_line_width(&mut self, width: f64) {
        CanvasRenderingContext2d::set_line_width(self, width);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        CanvasRenderingContext2d::fill_rect(self, x, y, width, height);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        CanvasRenderingContext2d::stroke_rect(self, x, y, width, height);
    }

    fn begin_path(&mut self) {
        CanvasRenderingContext2d::begin_path(self);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        CanvasRenderingContext2d::move_to(self, x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        CanvasRenderingContext2d::line_to(self, x, y);
    }

    fn close_path(&mut self) {
        CanvasRenderingContext2d::close_path(self);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::arc(self, x, y, radius, start, end)
    }

    fn stroke(&mut self) {
        CanvasRenderingContext2d::stroke(self);
    }

    fn clip_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        CanvasRenderingContext2d::begin_path(self);
        self.rect(x, y, width, height);
        self.clip();
    }

    fn set_font(&mut self, size_px: f64, family: &str) {
        CanvasRenderingContext2d::set_font(self, &format!("{size_px}px {family}"));
        self.set_text_baseline("top");
    }

    fn measure_text(&mut self, text: &str) -> Result<f64, JsValue> {
        Ok(CanvasRenderingContext2d::measure_text(self, text)?.width())
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::fill_text(self, text, x, y)
    }
}
