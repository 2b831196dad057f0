//! Spatial presentation engine for the storyboard canvas.
//!
//! Frames (slides) are placed freely on an infinite, zoomable canvas and
//! linked into an ordered presentation path. The engine owns the scene
//! model, the camera and its animated transitions, hit-testing, autofit, the
//! minimap and path navigation. It never draws: the render projector emits a
//! backend-independent scene description and a [`scene::Scene`] backend turns
//! it into pixels. The host wires raw input into the session and reacts to
//! the returned [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::EditorSession`]: owned state and the full mutation surface |
//! | [`doc`] | Frames, elements, the in-memory store and the persisted document |
//! | [`path`] | Presentation path and its list-editing operations |
//! | [`camera`] | Pan/zoom camera and coordinate conversions |
//! | [`anim`] | Easing, camera transitions and the tick scheduler seam |
//! | [`fit`] | Autofit of one frame or the whole scene |
//! | [`minimap`] | Minimap projection and click mapping |
//! | [`hit`] | Hit-testing against frames and elements |
//! | [`input`] | Input event types, selection and the gesture state machine |
//! | [`render`] | Pure projector to a scene description |
//! | [`scene`] | Drawing backend trait and an in-memory backend |
//! | [`history`] | Snapshot undo/redo |
//! | [`config`] | Engine tunables and environment overrides |
//! | [`error`] | Errors for document and config input |
//! | [`consts`] | Shared numeric constants (zoom limits, fit cap, etc.) |

pub mod anim;
pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod error;
pub mod fit;
pub mod hit;
pub mod history;
pub mod input;
pub mod minimap;
pub mod path;
pub mod render;
pub mod scene;
