//! Editor events — the serializable audit trail of a session.
//!
//! Appended by the session on every committed mutation. Embedders drain the
//! log to drive saves, undo surfaces or telemetry; the core only appends.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EditorEvent {
    DocumentOpened {
        policy_id: Uuid,
    },
    NodeInserted {
        node_id: Uuid,
        /// Requested insertion index; `None` for an append.
        after: Option<usize>,
    },
    NodeRemoved {
        node_id: Uuid,
    },
    NodeFieldUpdated {
        node_id: Uuid,
        field: String,
    },
    PolicyFieldUpdated {
        field: String,
    },
    SelectionChanged {
        node_id: Option<Uuid>,
    },
    DragStarted {
        node_id: Uuid,
    },
    /// Drop checkpoint: the sequence invariant was restored.
    DragCommitted {
        node_id: Uuid,
        order_changed: bool,
    },
    ViewReset,
}
