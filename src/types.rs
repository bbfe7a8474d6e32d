//! Core data model for policy documents and logic nodes.

use crate::geometry::Point;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Node kinds and accents ───────────────────────────────────

/// What role a block plays in the evaluation chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Identity,
    Action,
    Resource,
    Filter,
    Decision,
}

/// Color token rendered as the node's accent strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccentColor {
    Blue,
    Amber,
    Purple,
    Gray,
    Red,
}

/// Icon token rendered next to the node label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconToken {
    Server,
    Zap,
    Globe,
    Box,
    Shield,
}

/// Display accent — a pure function of the node kind, cached on the node so
/// renderers never recompute it per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accent {
    pub color: AccentColor,
    pub icon: IconToken,
}

impl NodeKind {
    /// Derived accent for this kind. The only source of truth for the
    /// denormalized `LogicNode::accent` cache.
    pub fn accent(self) -> Accent {
        match self {
            NodeKind::Identity => Accent {
                color: AccentColor::Blue,
                icon: IconToken::Server,
            },
            NodeKind::Action => Accent {
                color: AccentColor::Amber,
                icon: IconToken::Zap,
            },
            NodeKind::Resource => Accent {
                color: AccentColor::Purple,
                icon: IconToken::Globe,
            },
            NodeKind::Filter => Accent {
                color: AccentColor::Gray,
                icon: IconToken::Box,
            },
            NodeKind::Decision => Accent {
                color: AccentColor::Red,
                icon: IconToken::Shield,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Identity => "Identity",
            NodeKind::Action => "Action",
            NodeKind::Resource => "Resource",
            NodeKind::Filter => "Filter",
            NodeKind::Decision => "Decision",
        }
    }
}

// ─── Logic node ───────────────────────────────────────────────

/// One block in the visual chain.
///
/// The ascending order of `position.x` across a document's nodes defines the
/// evaluation sequence. That invariant is restored at checkpoints (drop,
/// insert), not continuously; see the document operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicNode {
    /// Stable id, assigned at creation, never reused.
    pub id: Uuid,
    pub kind: NodeKind,
    /// Short display text.
    pub label: String,
    /// Operand or condition expression (a field path or literal).
    pub selector: String,
    /// Document-space position of the node's top-left corner.
    pub position: Point,
    /// True only for the final decision block of a chain (ALLOW / DENY).
    pub terminal: bool,
    /// Denormalized accent cache; refreshed on every kind change.
    pub accent: Accent,
}

impl LogicNode {
    pub fn new(
        kind: NodeKind,
        label: impl Into<String>,
        selector: impl Into<String>,
        position: Point,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            kind,
            label: label.into(),
            selector: selector.into(),
            position,
            terminal: false,
            accent: kind.accent(),
        }
    }

    /// Change the kind and refresh the accent cache in the same step.
    pub(crate) fn set_kind(&mut self, kind: NodeKind) {
        self.kind = kind;
        self.accent = kind.accent();
    }
}

// ─── Policy metadata ──────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyStatus {
    Active,
    Draft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ImpactLevel {
    Critical,
    High,
    Medium,
    Low,
}

/// Immutable version record. The history sequence is append-only and written
/// only through `PolicyDocument::record_version` at library checkpoints; the
/// editor session never touches it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub version: String,
    pub author: String,
    pub action: String,
    pub at: DateTime<Utc>,
}

// ─── Policy document ──────────────────────────────────────────

/// A whole policy: metadata, the ordered node chain, the derived source text
/// and the version history. The full document is the unit of change at the
/// library boundary — no partial patches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyDocument {
    pub id: Uuid,
    pub name: String,
    pub folder: String,
    pub status: PolicyStatus,
    pub impact: ImpactLevel,
    pub description: String,
    pub nodes: Vec<LogicNode>,
    /// Rego-like textual projection. Regenerated from the chain on visual
    /// mutations; editable independently in code view; never parsed back.
    pub source_text: String,
    pub history: Vec<HistoryEntry>,
}

impl PolicyDocument {
    /// A freshly created policy: unique id, empty chain, draft status.
    pub fn new_draft() -> Self {
        Self {
            id: Uuid::now_v7(),
            name: "New Policy".to_string(),
            folder: crate::library::UNCATEGORIZED.to_string(),
            status: PolicyStatus::Draft,
            impact: ImpactLevel::Low,
            description: String::new(),
            nodes: Vec::new(),
            source_text: String::new(),
            history: Vec::new(),
        }
    }

    pub fn node(&self, id: Uuid) -> Option<&LogicNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub(crate) fn node_mut(&mut self, id: Uuid) -> Option<&mut LogicNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// The decision block, if the chain has one.
    pub fn terminal_node(&self) -> Option<&LogicNode> {
        self.nodes.iter().find(|n| n.terminal)
    }

    /// Append a version record. Version tags are sequential (`v1`, `v2`, …).
    pub fn record_version(&mut self, author: impl Into<String>, action: impl Into<String>) {
        let version = format!("v{}", self.history.len() + 1);
        self.history.push(HistoryEntry {
            version,
            author: author.into(),
            action: action.into(),
            at: Utc::now(),
        });
    }
}
