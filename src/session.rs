//! Editor session: one document, one view transform, one interaction state,
//! at most one selected node.
//!
//! The session is an explicit, serializable state object. Nothing here is
//! ambient or singleton, so several instances (say, the policy editor and the
//! read-only posture viewer) coexist without sharing state. All mutations run
//! synchronously on the caller's thread; pointer-up is the only commit point
//! for the sequence invariant.

use crate::document::{NodeEdit, PolicyEdit};
use crate::events::EditorEvent;
use crate::interaction::{InteractionState, PointerEvent, PointerTarget};
use crate::transform::ViewTransform;
use crate::types::{LogicNode, PolicyDocument};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use uuid::Uuid;

/// Which center pane is showing. Wheel zoom is captured only in visual view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewMode {
    #[default]
    Visual,
    Code,
}

/// What the side panel should show: policy settings, or the selected node.
#[derive(Debug)]
pub enum InspectorView<'a> {
    Policy(&'a PolicyDocument),
    Node(&'a LogicNode),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorSession {
    document: PolicyDocument,
    transform: ViewTransform,
    interaction: InteractionState,
    selection: Option<Uuid>,
    view_mode: ViewMode,
    events: Vec<EditorEvent>,
}

impl EditorSession {
    pub fn new(document: PolicyDocument) -> Self {
        let mut session = Self {
            document,
            transform: ViewTransform::default(),
            interaction: InteractionState::Idle,
            selection: None,
            view_mode: ViewMode::Visual,
            events: Vec::new(),
        };
        session.push_event(EditorEvent::DocumentOpened {
            policy_id: session.document.id,
        });
        session
    }

    /// Switch to a different document. Resets the transform, selection and
    /// interaction state; the previous document is returned to the caller,
    /// whole, as the unit of change for the library.
    pub fn open(&mut self, document: PolicyDocument) -> PolicyDocument {
        let previous = std::mem::replace(&mut self.document, document);
        self.transform.reset();
        self.selection = None;
        self.interaction = InteractionState::Idle;
        self.push_event(EditorEvent::DocumentOpened {
            policy_id: self.document.id,
        });
        previous
    }

    // ── Read surface ──

    pub fn document(&self) -> &PolicyDocument {
        &self.document
    }

    pub fn transform(&self) -> &ViewTransform {
        &self.transform
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn selection(&self) -> Option<Uuid> {
        self.selection
    }

    pub fn selected_node(&self) -> Option<&LogicNode> {
        self.selection.and_then(|id| self.document.node(id))
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Current side-panel binding: node editing while a node is selected,
    /// policy settings otherwise.
    pub fn inspector(&self) -> InspectorView<'_> {
        match self.selected_node() {
            Some(node) => InspectorView::Node(node),
            None => InspectorView::Policy(&self.document),
        }
    }

    pub fn events(&self) -> &[EditorEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Pointer routing ──

    /// Route a pointer event per the interaction state machine.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down(target) => self.pointer_down(target),
            PointerEvent::Move { dx, dy } => self.pointer_move(dx, dy),
            PointerEvent::Up | PointerEvent::Leave => self.pointer_up(),
        }
    }

    fn pointer_down(&mut self, target: PointerTarget) {
        if self.view_mode == ViewMode::Code {
            return;
        }
        match target {
            PointerTarget::Canvas => {
                self.set_selection(None);
                self.interaction = InteractionState::PanningView;
            }
            PointerTarget::Node(id) => {
                // Stale id from a removed node: ignore.
                if self.document.node(id).is_none() {
                    return;
                }
                self.set_selection(Some(id));
                self.interaction = InteractionState::DraggingNode(id);
                self.push_event(EditorEvent::DragStarted { node_id: id });
            }
        }
    }

    fn pointer_move(&mut self, dx: f64, dy: f64) {
        match self.interaction {
            InteractionState::Idle => {}
            InteractionState::PanningView => {
                // Camera move: raw screen pixels.
                self.transform.pan(dx, dy);
            }
            InteractionState::DraggingNode(id) => {
                // Content move: scale-compensated. No re-sort until drop.
                let (ddx, ddy) = self.transform.to_document_delta(dx, dy);
                self.document.move_node_by(id, ddx, ddy);
                trace!(node = %id, ddx, ddy, "node drag");
            }
        }
    }

    fn pointer_up(&mut self) {
        if let InteractionState::DraggingNode(id) = self.interaction {
            let order_changed = self.document.restore_order();
            debug!(node = %id, order_changed, "drag committed");
            self.push_event(EditorEvent::DragCommitted {
                node_id: id,
                order_changed,
            });
        }
        self.interaction = InteractionState::Idle;
    }

    /// Wheel zoom — a continuously-active listener outside the pointer state
    /// machine, live only while the visual view is shown.
    pub fn handle_wheel(&mut self, delta_y: f64) {
        if self.view_mode == ViewMode::Code {
            return;
        }
        self.transform.zoom_wheel(delta_y);
    }

    // ── View controls ──

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn zoom_in(&mut self) {
        self.transform.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.transform.zoom_out();
    }

    pub fn reset_view(&mut self) {
        self.transform.reset();
        self.push_event(EditorEvent::ViewReset);
    }

    // ── Selection ──

    /// Select a node for inspector editing. No-op for unknown ids.
    pub fn select_node(&mut self, id: Uuid) {
        if self.document.node(id).is_some() {
            self.set_selection(Some(id));
        }
    }

    /// Back to policy-level settings.
    pub fn clear_selection(&mut self) {
        self.set_selection(None);
    }

    fn set_selection(&mut self, selection: Option<Uuid>) {
        if self.selection != selection {
            self.selection = selection;
            self.push_event(EditorEvent::SelectionChanged { node_id: selection });
        }
    }

    // ── Document mutations ──

    /// Insert a block after array index `index` (`None` appends).
    pub fn insert_node_after(&mut self, index: Option<usize>) -> Uuid {
        let id = self.document.insert_after(index);
        debug!(node = %id, ?index, "node inserted");
        self.push_event(EditorEvent::NodeInserted {
            node_id: id,
            after: index,
        });
        id
    }

    /// Remove the currently selected node and fall back to policy settings.
    pub fn remove_selected(&mut self) -> bool {
        let Some(id) = self.selection else {
            return false;
        };
        let removed = self.document.remove_node(id);
        if removed {
            self.push_event(EditorEvent::NodeRemoved { node_id: id });
        }
        self.set_selection(None);
        removed
    }

    /// Edit a field of the selected node only. No-op without a selection or
    /// when the selected node vanished under a pending callback.
    pub fn edit_selected(&mut self, edit: NodeEdit) -> bool {
        let Some(id) = self.selection else {
            return false;
        };
        let field = edit.field_name().to_string();
        let applied = self.document.update_node(id, edit);
        if applied {
            self.push_event(EditorEvent::NodeFieldUpdated { node_id: id, field });
        }
        applied
    }

    /// Edit a document-level field.
    pub fn edit_policy(&mut self, edit: PolicyEdit) {
        let field = edit.field_name().to_string();
        self.document.update_policy(edit);
        self.push_event(EditorEvent::PolicyFieldUpdated { field });
    }

    fn push_event(&mut self, event: EditorEvent) {
        self.events.push(event);
    }
}
