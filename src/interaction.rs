//! Pointer interaction state — the single source of truth for what the
//! pointer is currently doing on a canvas.
//!
//! Transient by construction: every pointer-up or pointer-leave lands back in
//! `Idle`. Wheel zoom is not part of this state machine; it is a separate,
//! continuously-active path on the session.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What the pointer is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionState {
    #[default]
    Idle,
    /// Background drag: moving the camera.
    PanningView,
    /// Node drag: moving document-space content.
    DraggingNode(Uuid),
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }

    /// The node being dragged, if any.
    pub fn dragging(&self) -> Option<Uuid> {
        match self {
            InteractionState::DraggingNode(id) => Some(*id),
            _ => None,
        }
    }
}

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerTarget {
    /// Empty canvas background.
    Canvas,
    /// A node body.
    Node(Uuid),
}

/// A pointer event with screen-space deltas, as delivered by the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down(PointerTarget),
    Move { dx: f64, dy: f64 },
    Up,
    /// Pointer left the canvas; treated as a drop.
    Leave,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        assert!(InteractionState::default().is_idle());
    }

    #[test]
    fn test_dragging_accessor() {
        let id = Uuid::now_v7();
        assert_eq!(InteractionState::DraggingNode(id).dragging(), Some(id));
        assert_eq!(InteractionState::PanningView.dragging(), None);
        assert_eq!(InteractionState::Idle.dragging(), None);
    }
}
