//! Editor session: the single owner of all canvas state.
//!
//! [`EditorSession`] holds the frame store, the presentation path, the camera,
//! the current frame, the selection, the in-progress gesture and the undo
//! history. Every mutation goes through its methods, so every pointer field is
//! repaired in one place when a frame disappears. Independent sessions share
//! nothing.
//!
//! Programmatic operations follow the store's convention: a stale id is a
//! no-op reported as `false` / `None`. Input handlers (`on_*`) return the
//! [`Action`]s the host should react to.
//!
//! Camera transitions are driven by the host: navigation asks the session's
//! [`Scheduler`] for a tick, and the host calls [`EditorSession::tick`] when
//! it fires.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::{debug, info, warn};

use crate::anim::{Animator, CameraAnimation, ManualScheduler, Scheduler, TickHandle, TickOutcome};
use crate::camera::{Camera, Point, Viewport};
use crate::config::EngineConfig;
use crate::consts::ANIMATION_TICK_MS;
use crate::doc::{
    Document, ElementId, ElementSpec, Frame, FrameId, FrameSpec, FrameStore, LayerStep, PartialElement, PartialFrame,
};
use crate::error::EngineError;
use crate::fit;
use crate::hit;
use crate::history::{History, Snapshot};
use crate::input::{Button, InputState, Key, Modifiers, Selection, SelectionMode, WheelDelta};
use crate::minimap::Minimap;
use crate::path::Path;
use crate::render::{self, RenderInput, SceneDescription};
use crate::scene::SceneEvent;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Something visible changed; re-project and redraw.
    RenderNeeded,
    /// The camera moved outside an animation.
    CameraChanged(Camera),
    /// A transition committed its exact target.
    AnimationFinished(Camera),
    SelectionChanged,
    CurrentFrameChanged(Option<FrameId>),
    FrameCreated(FrameId),
    FrameUpdated(FrameId),
    FrameDeleted(FrameId),
    ElementDeleted { frame_id: FrameId, element_id: ElementId },
    /// The host should open its editor for one element.
    EditElementRequested { frame_id: FrameId, element_id: ElementId },
    /// The host should enter element-level editing for a frame.
    EditFrameRequested { frame_id: FrameId },
    PresentationChanged(bool),
    /// Undo or redo replaced the document state.
    HistoryRestored,
}

/// Owned editing state for one document.
pub struct EditorSession<S: Scheduler = ManualScheduler> {
    store: FrameStore,
    path: Path,
    camera: Camera,
    current: Option<FrameId>,
    selection: Selection,
    input: InputState,
    viewport: Viewport,
    config: EngineConfig,
    history: History,
    animator: Animator,
    scheduler: S,
    clock_ms: f64,
    presenting: bool,
    path_visible: bool,
}

impl Default for EditorSession<ManualScheduler> {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl EditorSession<ManualScheduler> {
    /// Session driven by a [`ManualScheduler`].
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self::with_scheduler(config, ManualScheduler::new())
    }
}

impl<S: Scheduler> EditorSession<S> {
    #[must_use]
    pub fn with_scheduler(config: EngineConfig, scheduler: S) -> Self {
        Self {
            store: FrameStore::new(),
            path: Path::new(),
            camera: Camera::default(),
            current: None,
            selection: Selection::default(),
            input: InputState::Idle,
            viewport: Viewport::default(),
            history: History::new(config.history_limit),
            config,
            animator: Animator::new(ANIMATION_TICK_MS),
            scheduler,
            clock_ms: 0.0,
            presenting: false,
            path_visible: true,
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn store(&self) -> &FrameStore {
        &self.store
    }

    #[must_use]
    pub fn frame(&self, id: &FrameId) -> Option<&Frame> {
        self.store.get(id)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[must_use]
    pub fn current_frame_id(&self) -> Option<FrameId> {
        self.current
    }

    /// Position of the current frame in the path. `None` when there is no
    /// current frame or it is off-path.
    #[must_use]
    pub fn current_path_index(&self) -> Option<usize> {
        self.current.and_then(|id| self.path.index_of(&id))
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn selected_frame_id(&self) -> Option<FrameId> {
        self.selection.primary()
    }

    #[must_use]
    pub fn selected_element_id(&self) -> Option<ElementId> {
        self.selection.element_id
    }

    #[must_use]
    pub fn input_state(&self) -> &InputState {
        &self.input
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn is_presenting(&self) -> bool {
        self.presenting
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animator.is_running()
    }

    /// Target of the transition in flight.
    #[must_use]
    pub fn animation_target(&self) -> Option<Camera> {
        self.animator.active().map(|a| a.to)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    // --- Host wiring ---

    /// Update the viewport size in screen pixels.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = Viewport::new(width.max(0.0), height.max(0.0));
    }

    /// Tell the session what time it is. New transitions start at this time.
    pub fn set_clock(&mut self, now_ms: f64) {
        self.clock_ms = now_ms;
    }

    #[must_use]
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    #[must_use]
    pub fn path_visible(&self) -> bool {
        self.path_visible
    }

    pub fn set_path_visible(&mut self, visible: bool) {
        self.path_visible = visible;
    }

    // --- Document ---

    /// Replace the whole document. Path entries naming missing frames are
    /// dropped, as is a dangling current frame. History, selection and any
    /// gesture are reset and the camera fits the scene.
    ///
    /// # Errors
    ///
    /// Returns the [`Document::validate`] error; the session is unchanged then.
    pub fn load_document(&mut self, doc: Document) -> Result<(), EngineError> {
        doc.validate()?;
        self.animator.cancel(&mut self.scheduler);
        self.store.load(doc.frames);
        let store = &self.store;
        self.path.set(doc.path, |id| store.contains(id));
        self.current = doc.current_frame_id.filter(|id| self.store.contains(id));
        self.selection.clear();
        self.input = InputState::Idle;
        self.history.clear();
        self.presenting = false;
        if let Some(cam) = fit::fit_all(&self.store, self.viewport, &self.config) {
            self.camera = cam;
        }
        info!(frames = self.store.len(), path = self.path.len(), "document loaded");
        Ok(())
    }

    /// Parse and load a document from JSON.
    ///
    /// # Errors
    ///
    /// Returns the parse or validation error; the session is unchanged then.
    pub fn load_json(&mut self, json: &str) -> Result<(), EngineError> {
        self.load_document(Document::from_json(json)?)
    }

    /// Export the current document.
    #[must_use]
    pub fn document(&self) -> Document {
        Document {
            frames: self.store.frames().to_vec(),
            path: self.path.ids().to_vec(),
            current_frame_id: self.current,
        }
    }

    /// Export the current document as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, EngineError> {
        self.document().to_json()
    }

    // --- History ---

    fn snapshot(&self) -> Snapshot {
        Snapshot { store: self.store.clone(), path: self.path.clone() }
    }

    fn record(&mut self) {
        let before = self.snapshot();
        self.history.push(before);
    }

    fn restore(&mut self, snap: Snapshot) {
        self.store = snap.store;
        self.path = snap.path;
        self.repair_pointers();
    }

    /// Drop every pointer into the store that no longer resolves.
    fn repair_pointers(&mut self) {
        if self.current.is_some_and(|id| !self.store.contains(&id)) {
            self.current = None;
        }
        let store = &self.store;
        let dropped = self.path.retain_existing(|id| store.contains(id));
        if !dropped.is_empty() {
            debug!(count = dropped.len(), "dangling path entries dropped");
        }
        self.selection.frame_ids.retain(|id| store.contains(id));
        let element_ok = match (self.selection.primary(), self.selection.element_id) {
            (Some(fid), Some(eid)) => self.store.get(&fid).is_some_and(|f| f.element(&eid).is_some()),
            (_, None) => true,
            (None, Some(_)) => false,
        };
        if !element_ok {
            self.selection.element_id = None;
        }
        if let Some((id, _)) = self.input.drag_preview()
            && !self.store.contains(&id)
        {
            self.input = InputState::Idle;
        }
    }

    /// Restore the state before the last committed edit.
    pub fn undo(&mut self) -> bool {
        let current = self.snapshot();
        let Some(prev) = self.history.undo(current) else {
            return false;
        };
        self.restore(prev);
        debug!("undo");
        true
    }

    /// Re-apply the last undone edit.
    pub fn redo(&mut self) -> bool {
        let current = self.snapshot();
        let Some(next) = self.history.redo(current) else {
            return false;
        };
        self.restore(next);
        debug!("redo");
        true
    }

    // --- Frames ---

    /// Create a frame on top of the paint order.
    pub fn add_frame(&mut self, spec: FrameSpec) -> FrameId {
        self.record();
        self.store.add_frame(spec)
    }

    /// Apply a partial update to a frame.
    pub fn update_frame(&mut self, id: &FrameId, partial: &PartialFrame) -> bool {
        if !self.store.contains(id) {
            debug!(%id, "update on missing frame ignored");
            return false;
        }
        self.record();
        self.store.update_frame(id, partial)
    }

    /// Delete a frame and its elements, removing it from the path, the
    /// selection and any gesture. If it was current, current moves to the
    /// path entry that followed it, or the one before if it was last; an
    /// off-path current frame becomes `None`.
    pub fn delete_frame(&mut self, id: &FrameId) -> bool {
        if !self.store.contains(id) {
            debug!(%id, "delete on missing frame ignored");
            return false;
        }
        self.record();
        self.cascade_delete(id);
        true
    }

    /// Remove a frame and every pointer into it without recording history.
    fn cascade_delete(&mut self, id: &FrameId) {
        if self.current == Some(*id) {
            self.current = self.path.index_of(id).and_then(|i| {
                self.path.get(i + 1).or_else(|| i.checked_sub(1).and_then(|p| self.path.get(p)))
            });
        }
        self.store.remove_frame(id);
        self.path.remove(id);
        self.selection.remove_frame(id);
        if self.input.drag_preview().is_some_and(|(drag, _)| drag == *id) {
            self.input = InputState::Idle;
        }
        debug!(%id, current = ?self.current, "frame deleted");
    }

    /// Copy a frame offset by the configured distance. The copy is not added
    /// to the path.
    pub fn duplicate_frame(&mut self, id: &FrameId) -> Option<FrameId> {
        if !self.store.contains(id) {
            return None;
        }
        self.record();
        self.store.duplicate_frame(id, self.config.duplicate_offset)
    }

    /// Swap a frame with the one drawn just above it.
    pub fn bring_frame_forward(&mut self, id: &FrameId) -> bool {
        self.step_frame(id, LayerStep::Forward)
    }

    /// Swap a frame with the one drawn just below it.
    pub fn send_frame_backward(&mut self, id: &FrameId) -> bool {
        self.step_frame(id, LayerStep::Backward)
    }

    fn step_frame(&mut self, id: &FrameId, step: LayerStep) -> bool {
        let before = self.snapshot();
        if !self.store.step_frame(id, step) {
            return false;
        }
        self.history.push(before);
        true
    }

    // --- Elements ---

    pub fn add_element(&mut self, frame_id: &FrameId, spec: ElementSpec) -> Option<ElementId> {
        if !self.store.contains(frame_id) {
            return None;
        }
        self.record();
        self.store.add_element(frame_id, spec)
    }

    pub fn update_element(&mut self, frame_id: &FrameId, element_id: &ElementId, partial: &PartialElement) -> bool {
        let exists = self.store.get(frame_id).is_some_and(|f| f.element(element_id).is_some());
        if !exists {
            debug!(%frame_id, %element_id, "update on missing element ignored");
            return false;
        }
        self.record();
        self.store.update_element(frame_id, element_id, partial)
    }

    /// Delete an element, clearing it from the selection.
    pub fn delete_element(&mut self, frame_id: &FrameId, element_id: &ElementId) -> bool {
        let before = self.snapshot();
        if self.store.delete_element(frame_id, element_id).is_none() {
            return false;
        }
        self.history.push(before);
        if self.selection.element_id == Some(*element_id) {
            self.selection.element_id = None;
        }
        true
    }

    pub fn duplicate_element(&mut self, frame_id: &FrameId, element_id: &ElementId) -> Option<ElementId> {
        let before = self.snapshot();
        let copy = self.store.duplicate_element(frame_id, element_id, self.config.duplicate_offset)?;
        self.history.push(before);
        Some(copy)
    }

    /// Swap an element with its neighbour just above. One position only.
    pub fn bring_element_forward(&mut self, frame_id: &FrameId, element_id: &ElementId) -> bool {
        self.step_element(frame_id, element_id, LayerStep::Forward)
    }

    /// Swap an element with its neighbour just below. One position only.
    pub fn send_element_backward(&mut self, frame_id: &FrameId, element_id: &ElementId) -> bool {
        self.step_element(frame_id, element_id, LayerStep::Backward)
    }

    fn step_element(&mut self, frame_id: &FrameId, element_id: &ElementId, step: LayerStep) -> bool {
        let before = self.snapshot();
        if !self.store.step_element(frame_id, element_id, step) {
            return false;
        }
        self.history.push(before);
        true
    }

    // --- Path ---

    /// Replace the path. Unknown and repeated ids are dropped.
    pub fn set_path(&mut self, ids: impl IntoIterator<Item = FrameId>) {
        self.record();
        let store = &self.store;
        self.path.set(ids, |id| store.contains(id));
    }

    /// Append a frame to the path. No-op for a missing frame or one already
    /// on the path.
    pub fn add_frame_to_path(&mut self, id: &FrameId) -> bool {
        if !self.store.contains(id) || self.path.contains(id) {
            debug!(%id, "path append ignored");
            return false;
        }
        self.record();
        self.path.add(*id)
    }

    pub fn remove_frame_from_path(&mut self, id: &FrameId) -> bool {
        if !self.path.contains(id) {
            return false;
        }
        self.record();
        self.path.remove(id)
    }

    /// Remove the path entry at `index`.
    pub fn remove_path_at(&mut self, index: usize) -> Option<FrameId> {
        self.path.get(index)?;
        self.record();
        self.path.remove_at(index)
    }

    /// Move the path entry at `from` to `to`.
    pub fn reorder_path(&mut self, from: usize, to: usize) -> bool {
        let len = self.path.len();
        if from >= len || to >= len {
            return false;
        }
        if from != to {
            self.record();
        }
        self.path.reorder(from, to)
    }

    /// Replace the path with every frame in paint order.
    pub fn add_all_frames_to_path(&mut self) {
        let ids: Vec<FrameId> = self.store.frames().iter().map(|f| f.id).collect();
        self.set_path(ids);
    }

    // --- Camera ---

    pub fn zoom_in(&mut self) {
        self.stop_animation();
        self.camera.zoom_in(self.config.zoom_step, self.viewport, self.config.zoom_limits());
    }

    pub fn zoom_out(&mut self) {
        self.stop_animation();
        self.camera.zoom_out(self.config.zoom_step, self.viewport, self.config.zoom_limits());
    }

    /// Translate the view by a screen-space delta.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.stop_animation();
        self.camera.pan(dx, dy);
    }

    /// Anchor-preserving zoom at a screen point.
    pub fn zoom_to_point(&mut self, screen: Point, target_zoom: f64) {
        self.stop_animation();
        self.camera.zoom_to_point(screen, target_zoom, self.config.zoom_limits());
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.stop_animation();
        self.camera.set_zoom(zoom, self.config.zoom_limits());
    }

    pub fn set_pan(&mut self, pan_x: f64, pan_y: f64) {
        self.stop_animation();
        self.camera.set_pan(pan_x, pan_y);
    }

    fn stop_animation(&mut self) {
        self.animator.cancel(&mut self.scheduler);
    }

    /// Start an eased transition to `target`, replacing any transition in
    /// flight. A zero duration, or a scheduler that cannot provide a tick,
    /// commits the target at once; returns `false` in that case.
    pub fn animate_to(&mut self, target: Camera, duration_ms: f64) -> bool {
        let target = target.sanitized(self.config.zoom_limits());
        if duration_ms <= 0.0 {
            self.stop_animation();
            self.camera = target;
            return false;
        }
        let anim = CameraAnimation::new(self.camera, target, self.clock_ms, duration_ms);
        if self.animator.start(anim, &mut self.scheduler) {
            return true;
        }
        warn!("no scheduler tick available; jumping camera to target");
        self.camera = target;
        false
    }

    /// Deliver a fired scheduler tick.
    pub fn tick(&mut self, handle: TickHandle, now_ms: f64) -> Vec<Action> {
        self.clock_ms = now_ms;
        match self.animator.tick(handle, now_ms, &mut self.scheduler) {
            TickOutcome::Stale => Vec::new(),
            TickOutcome::Running(cam) => {
                self.camera = cam;
                vec![Action::CameraChanged(cam), Action::RenderNeeded]
            }
            TickOutcome::Finished(cam) => {
                self.camera = cam;
                vec![Action::AnimationFinished(cam), Action::RenderNeeded]
            }
        }
    }

    /// Animate to a view of every frame.
    pub fn fit_all(&mut self) -> bool {
        let Some(target) = fit::fit_all(&self.store, self.viewport, &self.config) else {
            return false;
        };
        self.animate_to(target, self.config.animation_ms);
        true
    }

    /// Animate to a single frame without changing the current frame.
    pub fn fit_frame(&mut self, id: &FrameId) -> bool {
        let Some(target) = self.store.get(id).and_then(|f| fit::fit_frame(f, self.viewport, &self.config)) else {
            return false;
        };
        self.animate_to(target, self.config.animation_ms);
        true
    }

    // --- Navigation ---

    /// Make `id` the current frame and animate the camera to fit it. The
    /// frame need not be on the path.
    pub fn go_to_frame(&mut self, id: &FrameId) -> bool {
        if !self.store.contains(id) {
            debug!(%id, "navigation to missing frame ignored");
            return false;
        }
        self.current = Some(*id);
        self.fit_frame(id);
        info!(%id, index = ?self.current_path_index(), "navigated to frame");
        true
    }

    /// Step forward along the path, stopping at the last entry. Off-path,
    /// steps onto the first entry.
    pub fn go_to_next_frame(&mut self) -> Option<FrameId> {
        let idx = self.path.next_index(self.current_path_index())?;
        self.go_to_path_index(idx)
    }

    /// Step backward along the path, stopping at the first entry.
    pub fn go_to_previous_frame(&mut self) -> Option<FrameId> {
        let idx = self.path.previous_index(self.current_path_index())?;
        self.go_to_path_index(idx)
    }

    fn go_to_path_index(&mut self, idx: usize) -> Option<FrameId> {
        let id = self.path.get(idx)?;
        self.go_to_frame(&id).then_some(id)
    }

    // --- Selection ---

    /// Select a single frame. External selections also move the camera to
    /// the frame; canvas selections leave it alone.
    pub fn select_frame(&mut self, id: &FrameId, mode: SelectionMode) -> bool {
        if !self.store.contains(id) {
            return false;
        }
        self.selection.select_only(*id, mode);
        if mode == SelectionMode::External {
            self.fit_frame(id);
        }
        true
    }

    /// Select an element and its frame.
    pub fn select_element(&mut self, frame_id: &FrameId, element_id: &ElementId, mode: SelectionMode) -> bool {
        if !self.store.get(frame_id).is_some_and(|f| f.element(element_id).is_some()) {
            return false;
        }
        self.select_frame(frame_id, mode);
        self.selection.element_id = Some(*element_id);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // --- Presentation ---

    /// Enter presentation mode at the first path entry.
    pub fn start_presentation(&mut self) -> bool {
        let Some(first) = self.path.first() else {
            debug!("presentation needs a non-empty path");
            return false;
        };
        self.presenting = true;
        self.input = InputState::Idle;
        self.selection.clear();
        info!(frames = self.path.len(), "presentation started");
        self.go_to_frame(&first)
    }

    /// Leave presentation mode and show the whole scene.
    pub fn stop_presentation(&mut self) -> bool {
        if !self.presenting {
            return false;
        }
        self.presenting = false;
        self.fit_all();
        info!("presentation stopped");
        true
    }

    // --- Minimap ---

    #[must_use]
    pub fn minimap(&self) -> Option<Minimap> {
        Minimap::project(&self.store, self.current, &self.camera, self.viewport, &self.config)
    }

    /// Jump to the frame under (or nearest to) a minimap click.
    pub fn minimap_click(&mut self, p: Point) -> Option<FrameId> {
        let id = self.minimap()?.frame_at(&self.store, p)?;
        self.go_to_frame(&id).then_some(id)
    }

    // --- Render ---

    /// Project the current state into a scene description.
    #[must_use]
    pub fn render(&self) -> SceneDescription {
        render::project(&RenderInput {
            store: &self.store,
            camera: &self.camera,
            selection: &self.selection,
            current: self.current,
            path: &self.path,
            path_visible: self.path_visible,
            presenting: self.presenting,
            drag: self.input.drag_preview(),
        })
    }

    // --- Input events ---

    /// Route a backend event to its handler.
    pub fn handle_event(&mut self, event: &SceneEvent) -> Vec<Action> {
        match event {
            SceneEvent::PointerDown { screen, button, modifiers } => self.on_pointer_down(*screen, *button, *modifiers),
            SceneEvent::PointerMove { screen, modifiers } => self.on_pointer_move(*screen, *modifiers),
            SceneEvent::PointerUp { screen, button, modifiers } => self.on_pointer_up(*screen, *button, *modifiers),
            SceneEvent::DoubleClick { screen } => self.on_double_click(*screen),
            SceneEvent::Wheel { screen, delta, modifiers } => self.on_wheel(*screen, *delta, *modifiers),
            SceneEvent::KeyDown { key, modifiers } => self.on_key_down(key, *modifiers),
        }
    }

    pub fn on_pointer_down(&mut self, screen: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        if self.presenting {
            return Vec::new();
        }
        match button {
            Button::Middle => {
                self.input = InputState::Panning { last_screen: screen };
                Vec::new()
            }
            Button::Secondary => Vec::new(),
            Button::Primary => self.primary_down(screen, modifiers),
        }
    }

    fn primary_down(&mut self, screen: Point, modifiers: Modifiers) -> Vec<Action> {
        let world = self.camera.screen_to_world(screen);
        let Some(hit) = hit::hit_test(world, &self.store) else {
            self.input = InputState::Panning { last_screen: screen };
            if modifiers.shift || self.selection.is_empty() {
                return Vec::new();
            }
            self.selection.clear();
            return vec![Action::SelectionChanged, Action::RenderNeeded];
        };

        if modifiers.shift {
            self.selection.toggle(hit.frame_id);
            return vec![Action::SelectionChanged, Action::RenderNeeded];
        }

        self.selection.select_only(hit.frame_id, SelectionMode::Canvas);
        self.selection.element_id = hit.element_id();
        if let Some(frame) = self.store.get(&hit.frame_id)
            && !frame.locked
        {
            self.input = InputState::DraggingFrame {
                id: frame.id,
                start_world: world,
                orig: frame.position,
                preview: frame.position,
            };
        }
        vec![Action::SelectionChanged, Action::RenderNeeded]
    }

    pub fn on_pointer_move(&mut self, screen: Point, _modifiers: Modifiers) -> Vec<Action> {
        match self.input {
            InputState::Idle => Vec::new(),
            InputState::Panning { last_screen } => {
                self.stop_animation();
                self.camera.pan(screen.x - last_screen.x, screen.y - last_screen.y);
                self.input = InputState::Panning { last_screen: screen };
                vec![Action::CameraChanged(self.camera), Action::RenderNeeded]
            }
            InputState::DraggingFrame { id, start_world, orig, .. } => {
                if !self.store.contains(&id) {
                    debug!(%id, "dragged frame vanished; drag discarded");
                    self.input = InputState::Idle;
                    return vec![Action::RenderNeeded];
                }
                let world = self.camera.screen_to_world(screen);
                let preview = Point::new(orig.x + world.x - start_world.x, orig.y + world.y - start_world.y);
                self.input = InputState::DraggingFrame { id, start_world, orig, preview };
                vec![Action::RenderNeeded]
            }
        }
    }

    pub fn on_pointer_up(&mut self, _screen: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        match std::mem::take(&mut self.input) {
            InputState::DraggingFrame { id, orig, preview, .. } => self.commit_drag(id, orig, preview),
            InputState::Idle | InputState::Panning { .. } => Vec::new(),
        }
    }

    /// Write a finished drag to the store as one mutation and one undo step.
    fn commit_drag(&mut self, id: FrameId, orig: Point, preview: Point) -> Vec<Action> {
        let Some(frame) = self.store.get(&id) else {
            debug!(%id, "dragged frame vanished before release");
            return vec![Action::RenderNeeded];
        };
        if frame.locked {
            debug!(%id, "frame locked during drag; move dropped");
            return vec![Action::RenderNeeded];
        }
        if preview == orig {
            return Vec::new();
        }
        self.record();
        self.store.update_frame(&id, &PartialFrame::moved_to(preview));
        vec![Action::FrameUpdated(id), Action::RenderNeeded]
    }

    /// Enter element-level editing on the frame under the pointer.
    pub fn on_double_click(&mut self, screen: Point) -> Vec<Action> {
        if self.presenting {
            return Vec::new();
        }
        let world = self.camera.screen_to_world(screen);
        let Some(hit) = hit::hit_test(world, &self.store) else {
            return Vec::new();
        };
        self.input = InputState::Idle;
        self.selection.select_only(hit.frame_id, SelectionMode::Canvas);
        self.selection.element_id = hit.element_id();
        let edit = match hit.element_id() {
            Some(element_id) => Action::EditElementRequested { frame_id: hit.frame_id, element_id },
            None => Action::EditFrameRequested { frame_id: hit.frame_id },
        };
        vec![Action::SelectionChanged, edit, Action::RenderNeeded]
    }

    /// One zoom step per notch, anchored at the pointer.
    pub fn on_wheel(&mut self, screen: Point, delta: WheelDelta, _modifiers: Modifiers) -> Vec<Action> {
        if !delta.dy.is_finite() || delta.dy.abs() < f64::EPSILON {
            return Vec::new();
        }
        let target = if delta.dy < 0.0 {
            self.camera.zoom * self.config.zoom_step
        } else {
            self.camera.zoom / self.config.zoom_step
        };
        self.zoom_to_point(screen, target);
        vec![Action::CameraChanged(self.camera), Action::RenderNeeded]
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if modifiers.command() {
            return self.command_key(key, modifiers);
        }
        match key.0.as_str() {
            "ArrowRight" | "PageDown" | " " => self.navigate(Self::go_to_next_frame),
            "ArrowLeft" | "PageUp" => self.navigate(Self::go_to_previous_frame),
            "Delete" | "Backspace" => self.delete_selection(),
            "Escape" => self.escape(),
            "+" | "=" => {
                self.zoom_in();
                vec![Action::CameraChanged(self.camera), Action::RenderNeeded]
            }
            "-" => {
                self.zoom_out();
                vec![Action::CameraChanged(self.camera), Action::RenderNeeded]
            }
            "0" | "Home" => {
                if self.fit_all() {
                    vec![Action::RenderNeeded]
                } else {
                    Vec::new()
                }
            }
            _ => Vec::new(),
        }
    }

    fn command_key(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if self.presenting {
            return Vec::new();
        }
        let restored = if key.is("z") && !modifiers.shift {
            self.undo()
        } else if key.is("z") || key.is("y") {
            self.redo()
        } else if key.is("d") {
            return self.duplicate_selection();
        } else {
            return Vec::new();
        };
        if restored {
            vec![Action::HistoryRestored, Action::SelectionChanged, Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    fn navigate(&mut self, step: fn(&mut Self) -> Option<FrameId>) -> Vec<Action> {
        let before = self.current;
        match step(self) {
            Some(id) if before != Some(id) => vec![Action::CurrentFrameChanged(Some(id)), Action::RenderNeeded],
            Some(_) => vec![Action::RenderNeeded],
            None => Vec::new(),
        }
    }

    fn delete_selection(&mut self) -> Vec<Action> {
        if self.presenting {
            return Vec::new();
        }
        if let (Some(frame_id), Some(element_id)) = (self.selection.primary(), self.selection.element_id) {
            if self.delete_element(&frame_id, &element_id) {
                return vec![Action::ElementDeleted { frame_id, element_id }, Action::RenderNeeded];
            }
            return Vec::new();
        }
        let doomed: Vec<FrameId> =
            self.selection.frame_ids.iter().copied().filter(|id| self.store.contains(id)).collect();
        if doomed.is_empty() {
            return Vec::new();
        }
        let before = self.current;
        self.record();
        for id in &doomed {
            self.cascade_delete(id);
        }
        let mut actions: Vec<Action> = doomed.into_iter().map(Action::FrameDeleted).collect();
        if self.current != before {
            actions.push(Action::CurrentFrameChanged(self.current));
        }
        actions.push(Action::SelectionChanged);
        actions.push(Action::RenderNeeded);
        actions
    }

    fn duplicate_selection(&mut self) -> Vec<Action> {
        let Some(id) = self.selection.primary() else {
            return Vec::new();
        };
        let Some(copy) = self.duplicate_frame(&id) else {
            return Vec::new();
        };
        self.selection.select_only(copy, SelectionMode::Canvas);
        vec![Action::FrameCreated(copy), Action::SelectionChanged, Action::RenderNeeded]
    }

    fn escape(&mut self) -> Vec<Action> {
        if matches!(self.input, InputState::DraggingFrame { .. }) {
            self.input = InputState::Idle;
            return vec![Action::RenderNeeded];
        }
        if self.presenting {
            self.stop_presentation();
            return vec![Action::PresentationChanged(false), Action::RenderNeeded];
        }
        if self.selection.is_empty() {
            return Vec::new();
        }
        self.selection.clear();
        vec![Action::SelectionChanged, Action::RenderNeeded]
    }
}
