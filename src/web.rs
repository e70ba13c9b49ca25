//! Browser input binding: DOM listeners feeding [`InputEvent`]s to an [`Engine`].
//!
//! Pointer and touch listeners go on the canvas, keyboard and resize
//! listeners on the window. Client coordinates are translated to
//! canvas-local ones before they reach the engine. After each event the
//! engine is re-rendered if it asked for it, and the actions are handed to
//! the host sink.
//!
//! Listeners live exactly as long as the [`InputBinding`]; dropping it
//! removes every one of them.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Event, EventTarget, HtmlCanvasElement, KeyboardEvent, PointerEvent, TouchEvent};

use crate::engine::{Action, Engine};
use crate::geom::Point;
use crate::input::{Button, InputEvent, Key, Modifiers};

/// Receives the actions produced by each handled event.
pub type ActionSink = Rc<dyn Fn(&[Action])>;

type Translate = fn(&Event, &HtmlCanvasElement) -> Option<InputEvent>;

struct Listener {
    target: EventTarget,
    name: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// Scoped set of DOM listeners driving one engine.
pub struct InputBinding {
    listeners: Vec<Listener>,
}

impl InputBinding {
    /// Register all listeners for `engine`.
    ///
    /// # Errors
    ///
    /// Fails if there is no window or a listener cannot be registered.
    /// Listeners registered before the failure are removed again.
    pub fn attach(engine: &Rc<RefCell<Engine>>, sink: &ActionSink) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let window: EventTarget = window.into();
        let canvas: EventTarget = engine.borrow().canvas().clone().into();

        let table: [(&EventTarget, &'static str, Translate); 11] = [
            (&canvas, "pointerdown", pointer_down),
            (&canvas, "pointermove", pointer_move),
            (&canvas, "pointerup", pointer_up),
            (&canvas, "pointerleave", pointer_leave),
            (&canvas, "touchstart", touch_start),
            (&canvas, "touchmove", touch_move),
            (&canvas, "touchend", touch_end),
            (&canvas, "touchcancel", touch_end),
            (&window, "keydown", key_down),
            (&window, "keyup", key_up),
            (&window, "resize", resize),
        ];

        let mut binding = Self { listeners: Vec::with_capacity(table.len()) };
        for (target, name, translate) in table {
            binding.listen(target, name, engine, sink, translate)?;
        }
        Ok(binding)
    }

    fn listen(
        &mut self,
        target: &EventTarget,
        name: &'static str,
        engine: &Rc<RefCell<Engine>>,
        sink: &ActionSink,
        translate: Translate,
    ) -> Result<(), JsValue> {
        let engine = Rc::clone(engine);
        let sink = Rc::clone(sink);
        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            dispatch(&engine, &sink, &event, translate);
        });
        target.add_event_listener_with_callback(name, callback.as_ref().unchecked_ref())?;
        self.listeners.push(Listener { target: target.clone(), name, callback });
        Ok(())
    }
}

impl Drop for InputBinding {
    fn drop(&mut self) {
        for listener in self.listeners.drain(..) {
            let callback = listener.callback.as_ref().unchecked_ref();
            if let Err(err) = listener.target.remove_event_listener_with_callback(listener.name, callback) {
                warn!(event = listener.name, error = ?err, "failed to remove listener");
            }
        }
    }
}

fn dispatch(engine: &Rc<RefCell<Engine>>, sink: &ActionSink, event: &Event, translate: Translate) {
    let Ok(mut engine) = engine.try_borrow_mut() else {
        warn!(event = %event.type_(), "engine busy, event dropped");
        return;
    };
    let Some(input) = translate(event, engine.canvas()) else {
        return;
    };
    let actions = engine.handle(input);
    if actions.contains(&Action::RenderNeeded) {
        if let Err(err) = engine.render() {
            warn!(error = ?err, "render failed");
        }
    }
    drop(engine);
    if !actions.is_empty() {
        sink(&actions);
    }
}

// =============================================================
// Event translation
// =============================================================

fn local_point(canvas: &HtmlCanvasElement, client_x: f64, client_y: f64) -> Point {
    let rect = canvas.get_bounding_client_rect();
    Point::new(client_x - rect.left(), client_y - rect.top())
}

/// Mouse/pen pointer event; touch pointers are handled by the touch listeners.
fn mouse_pointer(event: &Event) -> Option<&PointerEvent> {
    event.dyn_ref::<PointerEvent>().filter(|ev| ev.pointer_type() != "touch")
}

fn pointer_position(ev: &PointerEvent, canvas: &HtmlCanvasElement) -> Point {
    local_point(canvas, f64::from(ev.client_x()), f64::from(ev.client_y()))
}

fn button(ev: &PointerEvent) -> Button {
    match ev.button() {
        1 => Button::Middle,
        2 => Button::Secondary,
        _ => Button::Primary,
    }
}

fn modifiers(ev: &PointerEvent) -> Modifiers {
    Modifiers { shift: ev.shift_key(), ctrl: ev.ctrl_key(), alt: ev.alt_key(), meta: ev.meta_key() }
}

fn pointer_down(event: &Event, canvas: &HtmlCanvasElement) -> Option<InputEvent> {
    let ev = mouse_pointer(event)?;
    Some(InputEvent::PointerDown { point: pointer_position(ev, canvas), button: button(ev), modifiers: modifiers(ev) })
}

fn pointer_move(event: &Event, canvas: &HtmlCanvasElement) -> Option<InputEvent> {
    let ev = mouse_pointer(event)?;
    Some(InputEvent::PointerMove {
        point: pointer_position(ev, canvas),
        primary_held: ev.buttons() & 1 != 0,
    })
}

fn pointer_up(event: &Event, canvas: &HtmlCanvasElement) -> Option<InputEvent> {
    let ev = mouse_pointer(event)?;
    Some(InputEvent::PointerUp { point: pointer_position(ev, canvas), button: button(ev) })
}

fn pointer_leave(event: &Event, _canvas: &HtmlCanvasElement) -> Option<InputEvent> {
    mouse_pointer(event).map(|_| InputEvent::PointerLeave)
}

fn first_touch(event: &Event, canvas: &HtmlCanvasElement) -> Option<Point> {
    let ev = event.dyn_ref::<TouchEvent>()?;
    ev.prevent_default();
    let touch = ev.touches().get(0)?;
    Some(local_point(canvas, f64::from(touch.client_x()), f64::from(touch.client_y())))
}

fn touch_start(event: &Event, canvas: &HtmlCanvasElement) -> Option<InputEvent> {
    first_touch(event, canvas).map(|point| InputEvent::TouchStart { point })
}

fn touch_move(event: &Event, canvas: &HtmlCanvasElement) -> Option<InputEvent> {
    first_touch(event, canvas).map(|point| InputEvent::TouchMove { point })
}

fn touch_end(event: &Event, _canvas: &HtmlCanvasElement) -> Option<InputEvent> {
    event.dyn_ref::<TouchEvent>().map(|_| InputEvent::TouchEnd)
}

fn key_down(event: &Event, _canvas: &HtmlCanvasElement) -> Option<InputEvent> {
    event.dyn_ref::<KeyboardEvent>().map(|ev| InputEvent::KeyDown { key: Key(ev.key()) })
}

fn key_up(event: &Event, _canvas: &HtmlCanvasElement) -> Option<InputEvent> {
    event.dyn_ref::<KeyboardEvent>().map(|ev| InputEvent::KeyUp { key: Key(ev.key()) })
}

fn resize(_event: &Event, canvas: &HtmlCanvasElement) -> Option<InputEvent> {
    let rect = canvas.get_bounding_client_rect();
    Some(InputEvent::Resize { width: rect.width(), height: rect.height() })
}
