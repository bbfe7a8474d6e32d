//! Beacon Canvas — visual policy graph editor core.
//!
//! A security policy is a directed chain of logic blocks on an infinite
//! pannable/zoomable canvas. This crate keeps the free-form 2D node positions
//! (dragging, rendering, curved connectors) and the strict evaluation order
//! (compiling the chain into a rule) in sync under live pointer manipulation.
//!
//! ## Architecture
//!
//! Pointer events flow through one state machine per editor instance:
//! events → `EditorSession` → { `ViewTransform` | `PolicyDocument` } →
//! re-render → `geometry` recomputes connector paths from node positions.
//!
//! The sequence invariant — ascending `x` defines evaluation order — is
//! restored at checkpoints (drop, insert), never continuously, so a drag
//! gesture stays stable even when it crosses a neighbor.
//!
//! ## Quick start
//!
//! ```
//! use beacon_canvas::{EditorSession, PolicyDocument, PointerEvent, PointerTarget};
//!
//! let mut session = EditorSession::new(PolicyDocument::new_draft());
//! let node = session.insert_node_after(None);
//! session.handle_pointer(PointerEvent::Down(PointerTarget::Node(node)));
//! session.handle_pointer(PointerEvent::Move { dx: 25.0, dy: 0.0 });
//! session.handle_pointer(PointerEvent::Up);
//! assert!(session.interaction().is_idle());
//! ```

// Connector curves and insertion midpoints — pure, stateless
pub mod geometry;

// Pan/zoom state per canvas instance
pub mod transform;

// Policy documents, logic nodes, history
pub mod types;

// Graph document operations (insert, remove, mutate, order checkpoint)
pub mod document;

// Pointer interaction state machine types
pub mod interaction;

// Editor session: event routing, selection, inspector binding
pub mod session;

// Derived Rego-like source projection (one-way, visual → text)
pub mod source;

// Checkpoint validation of a document at rest
pub mod validate;

// Editor audit events
pub mod events;

// Policy library: async store boundary
pub mod library;

// Read-only attack-path scenario viewer
pub mod viewer;

pub use document::{ChainAffordance, EdgeLayout, NodeEdit, PolicyEdit};
pub use events::EditorEvent;
pub use geometry::{connector_path, midpoint, ConnectorPath, Point, NODE_HEIGHT, NODE_WIDTH};
pub use interaction::{InteractionState, PointerEvent, PointerTarget};
pub use library::{folder_groups, LibraryError, MemoryPolicyStore, PolicyStore, UNCATEGORIZED};
pub use session::{EditorSession, InspectorView, ViewMode};
pub use transform::{ViewTransform, MAX_SCALE, MIN_SCALE};
pub use types::{
    Accent, AccentColor, HistoryEntry, IconToken, ImpactLevel, LogicNode, NodeKind,
    PolicyDocument, PolicyStatus,
};
pub use validate::{validate_document, ValidationError};
pub use viewer::{ScenarioGraph, ScenarioNode, ScenarioViewer};
