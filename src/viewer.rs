//! Read-only attack-path scenario viewer.
//!
//! A second consumer of the canvas primitives: same `ViewTransform`, same
//! S-curve connectors, but no node mutation — nodes are fixed and edges are
//! explicit, labeled relations rather than a derived chain. Each viewer owns
//! its transform, so it coexists with any number of editor sessions.

use crate::geometry::{ConnectorPath, Point};
use crate::transform::ViewTransform;
use serde::{Deserialize, Serialize};

/// Attack-path node diameter in document-space pixels.
pub const SCENARIO_NODE_SIZE: f64 = 56.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioNodeStatus {
    Critical,
    Warning,
    Secure,
    Neutral,
}

impl ScenarioNodeStatus {
    /// Display color token for the node ring.
    pub fn color(self) -> &'static str {
        match self {
            ScenarioNodeStatus::Critical => "#EF4444",
            ScenarioNodeStatus::Warning => "#F59E0B",
            ScenarioNodeStatus::Secure => "#10B981",
            ScenarioNodeStatus::Neutral => "#6B7280",
        }
    }
}

/// One asset in an attack path (workload, database, bucket, network).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioNode {
    pub id: String,
    /// Asset category shown above the name ("AI Agent", "Database", …).
    pub category: String,
    pub name: String,
    pub status: ScenarioNodeStatus,
    pub position: Point,
}

/// A labeled relation between two assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioEdge {
    pub from: String,
    pub to: String,
    /// Relation label ("Read / Write", "Public Exposure", …).
    pub relation: String,
    /// Marks the risky hop of the path.
    pub danger: bool,
}

/// A complete attack-path scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioGraph {
    pub id: String,
    pub title: String,
    pub description: String,
    pub nodes: Vec<ScenarioNode>,
    pub edges: Vec<ScenarioEdge>,
}

impl ScenarioGraph {
    pub fn node(&self, id: &str) -> Option<&ScenarioNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// Center-to-center connector between two scenario nodes: control points at
/// the horizontal midpoint, pinned to each endpoint's y.
pub fn scenario_connector(a: &ScenarioNode, b: &ScenarioNode) -> ConnectorPath {
    let radius = SCENARIO_NODE_SIZE / 2.0;
    let start = Point::new(a.position.x + radius, a.position.y + radius);
    let end = Point::new(b.position.x + radius, b.position.y + radius);
    let mid_x = (start.x + end.x) / 2.0;
    ConnectorPath {
        start,
        control1: Point::new(mid_x, start.y),
        control2: Point::new(mid_x, end.y),
        end,
    }
}

/// Read-only viewer state: a transform, the open scenario and an optional
/// selected asset for the detail panel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioViewer {
    transform: ViewTransform,
    scenario: Option<ScenarioGraph>,
    selection: Option<String>,
    panning: bool,
}

impl ScenarioViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a scenario. The transform resets whenever the viewed scenario
    /// changes.
    pub fn open(&mut self, scenario: ScenarioGraph) {
        self.transform.reset();
        self.selection = None;
        self.panning = false;
        self.scenario = Some(scenario);
    }

    pub fn scenario(&self) -> Option<&ScenarioGraph> {
        self.scenario.as_ref()
    }

    pub fn transform(&self) -> &ViewTransform {
        &self.transform
    }

    pub fn selection(&self) -> Option<&ScenarioNode> {
        let scenario = self.scenario.as_ref()?;
        self.selection.as_deref().and_then(|id| scenario.node(id))
    }

    /// Select an asset for the detail panel. No-op for unknown ids.
    pub fn select(&mut self, id: &str) {
        if let Some(scenario) = &self.scenario {
            if scenario.node(id).is_some() {
                self.selection = Some(id.to_string());
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    // ── Pan/zoom (no node dragging in the read-only variant) ──

    pub fn begin_pan(&mut self) {
        self.clear_selection();
        self.panning = true;
    }

    pub fn pointer_move(&mut self, dx: f64, dy: f64) {
        if self.panning {
            self.transform.pan(dx, dy);
        }
    }

    pub fn end_pan(&mut self) {
        self.panning = false;
    }

    pub fn handle_wheel(&mut self, delta_y: f64) {
        self.transform.zoom_wheel(delta_y);
    }

    pub fn reset_view(&mut self) {
        self.transform.reset();
    }

    /// Connector layout for every edge whose endpoints both exist; edges with
    /// a missing endpoint are skipped, not errors.
    pub fn connectors(&self) -> Vec<(&ScenarioEdge, ConnectorPath)> {
        let Some(scenario) = &self.scenario else {
            return Vec::new();
        };
        scenario
            .edges
            .iter()
            .filter_map(|edge| {
                let from = scenario.node(&edge.from)?;
                let to = scenario.node(&edge.to)?;
                Some((edge, scenario_connector(from, to)))
            })
            .collect()
    }
}
