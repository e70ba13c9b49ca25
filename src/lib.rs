//! Whiteboard core: scene model, hit-testing, rendering, and tool handling.
//!
//! The crate holds everything a single-user drawing board needs apart from
//! the page around it. Input arrives as [`input::InputEvent`]s, the
//! [`engine::EngineCore`] turns them into scene mutations and transient
//! previews, and [`render::draw`] repaints the whole frame onto any
//! [`render::DrawSurface`]. In the browser, [`web::InputBinding`] wires DOM
//! listeners to an [`engine::Engine`] that owns the canvas; the host page
//! handles the returned [`engine::Action`]s (text entry, font-size control).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Shape types and the ordered scene store |
//! | [`selection`] | Selected object ids and the active selection |
//! | [`geom`] | Points, bounds, and containment predicates |
//! | [`hit`] | Hit-testing for selection and erasing |
//! | [`input`] | Tools, style, input events, and gesture state |
//! | [`render`] | Frame rendering and draw surfaces |
//! | [`web`] | DOM listener binding for the browser |
//! | [`config`] | Engine configuration loaded from JSON |
//! | [`consts`] | Shared defaults (colors, sizes, tolerances) |

pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod geom;
pub mod hit;
pub mod input;
pub mod render;
pub mod selection;
pub mod web;
