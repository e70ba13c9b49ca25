use std::collections::HashSet;
use std::mem;

use tracing::{debug, info, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::config::EngineConfig;
use crate::consts::{DEFAULT_TEXT_HEIGHT, DEFAULT_TEXT_WIDTH, FONT_CONTROL_OFFSET};
use crate::doc::{ObjectId, Scene, SceneObject, Shape, clamp_font_size};
use crate::geom::{Bounds, Point, normalize_rect};
use crate::hit::{hit_test, hit_test_erase};
use crate::input::{Button, InputEvent, InputState, Key, Modifiers, ShapeTool, Style, Tool, UiState, clamp_thickness};
use crate::render::{self, DrawSurface, Viewport};
use crate::selection::Selection;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ObjectCreated(SceneObject),
    ObjectUpdated(SceneObject),
    ObjectsDeleted(Vec<ObjectId>),
    /// Show a text-entry region over `bounds`; answer with
    /// [`InputEvent::TextSubmitted`].
    TextEntryRequested { bounds: Bounds, font_size: f64 },
    /// Show the font-size control for the selected text box at `(left, top)`.
    FontSizeControl { font_size: f64, left: f64, top: f64 },
    HideFontSizeControl,
    RenderNeeded,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
#[derive(Debug, Default)]
pub struct EngineCore {
    pub scene: Scene,
    pub config: EngineConfig,
    pub ui: UiState,
    pub input: InputState,
    pub viewport: Viewport,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with a custom configuration; the active style starts from the
    /// configured defaults.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        let ui = UiState { style: Style::from_config(&config), ..UiState::default() };
        Self { ui, config, ..Self::default() }
    }

    /// Dispatch one input event.
    pub fn handle(&mut self, event: InputEvent) -> Vec<Action> {
        match event {
            InputEvent::PointerDown { point, button, modifiers } => self.on_pointer_down(point, button, modifiers),
            InputEvent::PointerMove { point, primary_held } => self.on_pointer_move(point, primary_held),
            InputEvent::PointerUp { point, button } => self.on_pointer_up(point, button),
            InputEvent::PointerLeave => self.on_pointer_leave(),
            InputEvent::TouchStart { point } => self.on_touch_start(point),
            InputEvent::TouchMove { point } => self.on_touch_move(point),
            InputEvent::TouchEnd => self.on_touch_end(),
            InputEvent::KeyDown { key } => self.on_key_down(&key),
            InputEvent::KeyUp { key } => self.on_key_up(&key),
            InputEvent::Resize { width, height } => self.set_viewport(width, height),
            InputEvent::TextSubmitted { text } => self.submit_text(&text),
        }
    }

    // --- Style / tool ---

    /// Switch tools. Any gesture in flight and any pending text box are
    /// dropped without committing.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        let discarded = !matches!(self.input, InputState::Idle) || self.ui.pending_text.is_some();
        self.input = InputState::Idle;
        self.ui.pending_text = None;
        self.ui.tool = tool;
        info!(tool = ?tool, discarded, "tool selected");
        vec![Action::RenderNeeded]
    }

    pub fn set_shape_kind(&mut self, kind: ShapeTool) {
        self.ui.style.shape = kind;
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.ui.style.color = color.into();
    }

    /// Set the stroke thickness for new objects, clamped to its range.
    pub fn set_thickness(&mut self, thickness: f64) {
        self.ui.style.thickness = clamp_thickness(thickness);
    }

    /// Set the font size (clamped). With the Select tool active and a text
    /// box as the active selection, that box is resized in place.
    pub fn set_font_size(&mut self, size: f64) -> Vec<Action> {
        let size = clamp_font_size(size);
        self.ui.style.font_size = size;
        if self.ui.tool != Tool::Select {
            return Vec::new();
        }
        let Some(id) = self.ui.selection.active() else {
            return Vec::new();
        };
        let Some(index) = self.scene.index_of(&id) else {
            return Vec::new();
        };
        let Some(resized) = self.scene.get(index).and_then(|obj| obj.shape.with_font_size(size)) else {
            return Vec::new();
        };
        self.replace(index, resized)
    }

    // --- Viewport ---

    /// Update the drawable area.
    pub fn set_viewport(&mut self, width: f64, height: f64) -> Vec<Action> {
        self.viewport = Viewport { width, height };
        vec![Action::RenderNeeded]
    }

    // --- Pointer ---

    pub fn on_pointer_down(&mut self, point: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }

        match self.ui.tool {
            Tool::Draw => self.begin_stroke(point),
            Tool::Shapes => {
                self.input = InputState::PlacingShape { kind: self.ui.style.shape, anchor: point, current: point };
                vec![Action::RenderNeeded]
            }
            Tool::Text => {
                self.input = InputState::PlacingText { anchor: point, current: point, font_size: self.ui.style.font_size };
                vec![Action::RenderNeeded]
            }
            Tool::Select => self.select_at(point, self.ui.additive || modifiers.ctrl),
            Tool::Eraser => {
                self.input = InputState::Erasing;
                self.erase_at(point)
            }
            Tool::Image => Vec::new(),
        }
    }

    pub fn on_pointer_move(&mut self, point: Point, primary_held: bool) -> Vec<Action> {
        if !primary_held {
            return Vec::new();
        }
        match &mut self.input {
            InputState::Drawing { points, .. } => {
                points.push(point);
                vec![Action::RenderNeeded]
            }
            InputState::PlacingShape { current, .. } | InputState::PlacingText { current, .. } => {
                *current = point;
                vec![Action::RenderNeeded]
            }
            InputState::DraggingObject { id, offset } => {
                let (id, offset) = (*id, *offset);
                self.move_object(id, Point::new(point.x - offset.x, point.y - offset.y))
            }
            InputState::Erasing => self.erase_at(point),
            InputState::Idle => Vec::new(),
        }
    }

    pub fn on_pointer_up(&mut self, point: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        match mem::take(&mut self.input) {
            InputState::Drawing { points, color, thickness } => self.finish_stroke(points, color, thickness),
            InputState::PlacingShape { kind, anchor, .. } => {
                let shape = kind.build(anchor, point, &self.ui.style.color, self.ui.style.thickness);
                self.create(shape)
            }
            InputState::PlacingText { anchor, font_size, .. } => {
                let bounds = normalize_rect(anchor, point);
                self.ui.pending_text = Some(bounds);
                vec![Action::TextEntryRequested { bounds, font_size }, Action::RenderNeeded]
            }
            InputState::DraggingObject { .. } | InputState::Erasing | InputState::Idle => Vec::new(),
        }
    }

    /// The pointer left the surface: an open stroke is finished as if
    /// released.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        match mem::take(&mut self.input) {
            InputState::Drawing { points, color, thickness } => self.finish_stroke(points, color, thickness),
            other => {
                self.input = other;
                Vec::new()
            }
        }
    }

    // --- Touch (Draw tool only) ---

    pub fn on_touch_start(&mut self, point: Point) -> Vec<Action> {
        if self.ui.tool != Tool::Draw {
            return Vec::new();
        }
        self.begin_stroke(point)
    }

    pub fn on_touch_move(&mut self, point: Point) -> Vec<Action> {
        if self.ui.tool != Tool::Draw {
            return Vec::new();
        }
        self.on_pointer_move(point, true)
    }

    pub fn on_touch_end(&mut self) -> Vec<Action> {
        if self.ui.tool != Tool::Draw {
            return Vec::new();
        }
        self.on_pointer_leave()
    }

    // --- Keyboard ---

    pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
        if key.is_additive_modifier() {
            self.ui.additive = true;
            return Vec::new();
        }
        if key.is_delete() && self.ui.tool == Tool::Select && !self.ui.selection.is_empty() {
            return self.delete_selected();
        }
        Vec::new()
    }

    pub fn on_key_up(&mut self, key: &Key) -> Vec<Action> {
        if key.is_additive_modifier() {
            self.ui.additive = false;
        }
        Vec::new()
    }

    // --- Text entry ---

    /// Commit the text entered for the pending text box. Blank text drops
    /// the placement. Gestures started since the box was placed are not
    /// affected.
    pub fn submit_text(&mut self, text: &str) -> Vec<Action> {
        let Some(bounds) = self.ui.pending_text.take() else {
            return Vec::new();
        };
        if text.trim().is_empty() {
            debug!("blank text discarded");
            return vec![Action::RenderNeeded];
        }
        let shape = Shape::Text {
            x: bounds.x,
            y: bounds.y,
            width: if bounds.width > 0.0 { bounds.width } else { DEFAULT_TEXT_WIDTH },
            height: if bounds.height > 0.0 { bounds.height } else { DEFAULT_TEXT_HEIGHT },
            text: text.to_owned(),
            font_size: self.ui.style.font_size,
        };
        self.create(shape)
    }

    // --- Queries ---

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.ui.selection
    }

    #[must_use]
    pub fn tool(&self) -> Tool {
        self.ui.tool
    }

    #[must_use]
    pub fn object(&self, id: &ObjectId) -> Option<&SceneObject> {
        self.scene.get_by_id(id)
    }

    // --- Render ---

    /// Draw the current state to `surface`.
    ///
    /// # Errors
    ///
    /// Propagates the first surface error.
    pub fn render<S: DrawSurface>(&self, surface: &mut S) -> Result<(), S::Error> {
        render::draw(surface, &self.scene, &self.ui, &self.input, &self.config, self.viewport)
    }

    // =============================================================
    // Mutation operators
    // =============================================================

    fn begin_stroke(&mut self, point: Point) -> Vec<Action> {
        self.input = InputState::Drawing {
            points: vec![point],
            color: self.ui.style.color.clone(),
            thickness: self.ui.style.thickness,
        };
        vec![Action::RenderNeeded]
    }

    fn finish_stroke(&mut self, points: Vec<Point>, color: String, thickness: f64) -> Vec<Action> {
        if points.len() < 2 {
            debug!(points = points.len(), "stroke too short, discarded");
            return vec![Action::RenderNeeded];
        }
        self.create(Shape::Stroke { points, color, thickness })
    }

    fn create(&mut self, shape: Shape) -> Vec<Action> {
        let kind = shape.kind();
        let id = self.scene.append(shape);
        debug!(%id, kind = ?kind, "object created");
        match self.scene.get_by_id(&id) {
            Some(obj) => vec![Action::ObjectCreated(obj.clone()), Action::RenderNeeded],
            None => vec![Action::RenderNeeded],
        }
    }

    fn replace(&mut self, index: usize, shape: Shape) -> Vec<Action> {
        if let Err(err) = self.scene.replace_at(index, shape) {
            warn!(error = %err, "object update dropped");
            return Vec::new();
        }
        let Some(obj) = self.scene.get(index) else {
            return Vec::new();
        };
        let mut actions = vec![Action::ObjectUpdated(obj.clone())];
        if let Some(control) = font_size_control(&obj.shape) {
            actions.push(control);
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    fn select_at(&mut self, point: Point, additive: bool) -> Vec<Action> {
        let hit = hit_test(&self.scene, point, self.config.hit_policy, self.config.hit_slop);
        let Some(obj) = hit.and_then(|index| self.scene.get(index)) else {
            if !additive {
                self.ui.selection.clear();
            }
            return vec![Action::HideFontSizeControl, Action::RenderNeeded];
        };

        let id = obj.id;
        let control = font_size_control(&obj.shape);
        if let Shape::Text { font_size, .. } = obj.shape {
            self.ui.style.font_size = font_size;
        }

        if additive {
            self.ui.selection.add(id);
        } else {
            self.ui.selection.select_only(id);
        }
        debug!(%id, additive, selected = self.ui.selection.len(), "object selected");

        // Only the active member follows the pointer, even when the click
        // landed on another selected object.
        let target = self
            .ui
            .selection
            .active()
            .and_then(|active| self.scene.get_by_id(&active))
            .map(|obj| (obj.id, obj.shape.anchor()));
        if let Some((drag_id, anchor)) = target {
            self.input =
                InputState::DraggingObject { id: drag_id, offset: Point::new(point.x - anchor.x, point.y - anchor.y) };
        }

        vec![control.unwrap_or(Action::HideFontSizeControl), Action::RenderNeeded]
    }

    fn move_object(&mut self, id: ObjectId, to: Point) -> Vec<Action> {
        let Some(index) = self.scene.index_of(&id) else {
            warn!(%id, "dragged object no longer in scene");
            self.input = InputState::Idle;
            return Vec::new();
        };
        let Some(moved) = self.scene.get(index).map(|obj| obj.shape.moved_to(to)) else {
            return Vec::new();
        };
        debug!(%id, x = to.x, y = to.y, "object moved");
        self.replace(index, moved)
    }

    fn erase_at(&mut self, point: Point) -> Vec<Action> {
        let hits = hit_test_erase(&self.scene, point, self.config.eraser_radius, self.config.hit_slop);
        if hits.is_empty() {
            return Vec::new();
        }
        let ids: Vec<ObjectId> = hits.iter().filter_map(|&i| self.scene.get(i)).map(|obj| obj.id).collect();
        let indices: HashSet<usize> = hits.into_iter().collect();
        let count = self.scene.remove_indices(&indices);
        debug!(count, "objects erased");

        let mut actions = Vec::new();
        if ids.iter().any(|id| self.ui.selection.contains(id)) {
            self.ui.selection.clear();
            actions.push(Action::HideFontSizeControl);
        }
        actions.push(Action::ObjectsDeleted(ids));
        actions.push(Action::RenderNeeded);
        actions
    }

    fn delete_selected(&mut self) -> Vec<Action> {
        let selected: Vec<ObjectId> = self.ui.selection.ids().to_vec();
        let ids: Vec<ObjectId> = selected.iter().copied().filter(|id| self.scene.index_of(id).is_some()).collect();
        let count = self.scene.remove_where(|obj| selected.contains(&obj.id));
        self.ui.selection.clear();
        if let InputState::DraggingObject { .. } = self.input {
            self.input = InputState::Idle;
        }
        debug!(count, "selection deleted");
        vec![Action::ObjectsDeleted(ids), Action::HideFontSizeControl, Action::RenderNeeded]
    }
}

/// Font-size control placement below a text box; `None` for other shapes.
fn font_size_control(shape: &Shape) -> Option<Action> {
    match shape {
        Shape::Text { x, y, height, font_size, .. } => {
            Some(Action::FontSizeControl { font_size: *font_size, left: *x, top: y + height + FONT_CONTROL_OFFSET })
        }
        _ => None,
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    ///
    /// # Errors
    ///
    /// Fails if the canvas cannot provide a 2D rendering context.
    pub fn new(canvas: HtmlCanvasElement, config: EngineConfig) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)?;
        let mut core = EngineCore::with_config(config);
        core.set_viewport(f64::from(canvas.width()), f64::from(canvas.height()));
        Ok(Self { canvas, ctx, core })
    }

    /// Resize the backing store to `width` x `height` surface units.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn resize(&mut self, width: f64, height: f64) -> Vec<Action> {
        self.canvas.set_width(width.max(0.0).round() as u32);
        self.canvas.set_height(height.max(0.0).round() as u32);
        self.core.set_viewport(width, height)
    }

    pub fn handle(&mut self, event: InputEvent) -> Vec<Action> {
        match event {
            InputEvent::Resize { width, height } => self.resize(width, height),
            other => self.core.handle(other),
        }
    }

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Propagates canvas API failures.
    pub fn render(&mut self) -> Result<(), JsValue> {
        self.core.render(&mut self.ctx)
    }

    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}
