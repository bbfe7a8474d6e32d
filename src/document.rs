//! Graph document operations: insertion, removal, field mutation and the
//! x-order checkpoint that keeps the drawn chain and the compiled sequence in
//! sync.
//!
//! Edges are never stored. For an ordered node sequence, edge `i` connects
//! array node `i` to node `i + 1`, and connector layout is recomputed from the
//! endpoint positions on every render. During a drag the array order is left
//! alone, so edges can visibly cross until the drop restores the invariant.

use crate::geometry::{self, ConnectorPath, Point, NODE_HEIGHT, NODE_WIDTH};
use crate::source;
use crate::types::{ImpactLevel, LogicNode, NodeKind, PolicyDocument, PolicyStatus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// X position of the first node in an empty document.
pub const FIRST_NODE_X: f64 = 100.0;
/// Horizontal gap between an appended node and the previous last node.
pub const APPEND_GAP: f64 = 350.0;
/// Y position for freshly spawned nodes.
pub const SPAWN_Y: f64 = 300.0;

/// One mutable attribute of a logic node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeEdit {
    Label(String),
    Selector(String),
    Kind(NodeKind),
    Terminal(bool),
}

impl NodeEdit {
    pub fn field_name(&self) -> &'static str {
        match self {
            NodeEdit::Label(_) => "label",
            NodeEdit::Selector(_) => "selector",
            NodeEdit::Kind(_) => "kind",
            NodeEdit::Terminal(_) => "terminal",
        }
    }
}

/// One mutable document-level attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PolicyEdit {
    Name(String),
    Folder(String),
    Status(PolicyStatus),
    Impact(ImpactLevel),
    Description(String),
    /// Code-view edit. Stored verbatim; never parsed back into nodes.
    SourceText(String),
}

impl PolicyEdit {
    pub fn field_name(&self) -> &'static str {
        match self {
            PolicyEdit::Name(_) => "name",
            PolicyEdit::Folder(_) => "folder",
            PolicyEdit::Status(_) => "status",
            PolicyEdit::Impact(_) => "impact",
            PolicyEdit::Description(_) => "description",
            PolicyEdit::SourceText(_) => "source_text",
        }
    }
}

/// Layout of one derived edge, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeLayout {
    /// Index of the source node in the array; the insert-between target.
    pub index: usize,
    pub from: Uuid,
    pub to: Uuid,
    pub path: ConnectorPath,
    /// Anchor midpoint — edge label placement and the insert hit target.
    pub insert_point: Point,
}

/// Where to offer the "add block" affordance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChainAffordance {
    /// Empty document: a distinct start-chain target instead of connectors.
    StartChain(Point),
    /// Non-empty document: append target to the right of the last node.
    Append(Point),
}

impl PolicyDocument {
    /// Insert a fresh filter node after array position `index` (`None`
    /// appends after the current last node), then restore the x-order.
    ///
    /// The new node's x always derives from the *last* node (`last.x + 350`),
    /// regardless of the requested index, so a mid-chain insert can land at
    /// the visual end once re-sorted. Inherited placement behavior; kept
    /// as-is deliberately.
    pub fn insert_after(&mut self, index: Option<usize>) -> Uuid {
        let x = match self.nodes.last() {
            Some(last) => last.position.x + APPEND_GAP,
            None => FIRST_NODE_X,
        };
        let node = LogicNode::new(
            NodeKind::Filter,
            "Logic Block",
            "Configure...",
            Point::new(x, SPAWN_Y),
        );
        let id = node.id;

        match index {
            None => self.nodes.push(node),
            Some(i) => {
                let at = (i + 1).min(self.nodes.len());
                self.nodes.insert(at, node);
            }
        }
        self.restore_order();
        id
    }

    /// Remove a node. Neighbor positions are left untouched. No-op for an
    /// unknown id (e.g. a stale callback after removal).
    pub fn remove_node(&mut self, id: Uuid) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.id != id);
        let removed = self.nodes.len() != before;
        if removed {
            self.refresh_source();
        }
        removed
    }

    /// Mutate one node attribute. A kind change also refreshes the derived
    /// accent. Returns false (no-op) when the node no longer exists.
    pub fn update_node(&mut self, id: Uuid, edit: NodeEdit) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        match edit {
            NodeEdit::Label(label) => node.label = label,
            NodeEdit::Selector(selector) => node.selector = selector,
            NodeEdit::Kind(kind) => node.set_kind(kind),
            NodeEdit::Terminal(terminal) => node.terminal = terminal,
        }
        self.refresh_source();
        true
    }

    /// Mutate one document-level attribute. Last writer wins.
    pub fn update_policy(&mut self, edit: PolicyEdit) {
        match edit {
            PolicyEdit::Name(name) => {
                self.name = name;
                // The projection header carries the name.
                self.refresh_source();
            }
            PolicyEdit::Folder(folder) => self.folder = folder,
            PolicyEdit::Status(status) => self.status = status,
            PolicyEdit::Impact(impact) => self.impact = impact,
            PolicyEdit::Description(description) => self.description = description,
            PolicyEdit::SourceText(text) => self.source_text = text,
        }
    }

    /// Move a node by a document-space delta. Does NOT re-sort: the array
    /// order is reconciled once, at drop, so the gesture stays stable.
    pub fn move_node_by(&mut self, id: Uuid, dx: f64, dy: f64) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.position.x += dx;
                node.position.y += dy;
                true
            }
            None => false,
        }
    }

    /// Restore the sequence invariant: stable sort ascending by x. Idempotent
    /// on an already-ordered chain. Returns whether the order changed.
    pub fn restore_order(&mut self) -> bool {
        let before: Vec<Uuid> = self.nodes.iter().map(|n| n.id).collect();
        self.nodes
            .sort_by(|a, b| a.position.x.total_cmp(&b.position.x));
        let changed = self.nodes.iter().map(|n| n.id).ne(before.into_iter());
        self.refresh_source();
        changed
    }

    /// Derived edges in array order (edge `i`: node `i` → node `i + 1`).
    pub fn edges(&self) -> impl Iterator<Item = (&LogicNode, &LogicNode)> {
        self.nodes.windows(2).map(|pair| (&pair[0], &pair[1]))
    }

    /// Connector layout for every derived edge, drawn by array order — not by
    /// x-order, so a mid-drag chain renders its crossing lines faithfully.
    pub fn connector_layout(&self) -> Vec<EdgeLayout> {
        self.edges()
            .enumerate()
            .map(|(index, (from, to))| EdgeLayout {
                index,
                from: from.id,
                to: to.id,
                path: geometry::connector_path(from.position, to.position),
                insert_point: geometry::midpoint(from.position, to.position),
            })
            .collect()
    }

    /// Where to render the add-block affordance for this chain.
    pub fn chain_affordance(&self) -> ChainAffordance {
        match self.nodes.last() {
            None => ChainAffordance::StartChain(Point::new(FIRST_NODE_X, SPAWN_Y - 20.0)),
            Some(last) => ChainAffordance::Append(Point::new(
                last.position.x + NODE_WIDTH + 60.0,
                last.position.y + NODE_HEIGHT / 2.0 - 16.0,
            )),
        }
    }

    pub(crate) fn refresh_source(&mut self) {
        self.source_text = source::render_source(&self.name, &self.nodes);
    }
}
