//! Connector geometry for the policy canvas.
//!
//! Pure functions from node positions to curve descriptions. No state, no
//! side effects; every function is total over finite inputs. Callers that
//! cannot name both endpoints (end of chain, node removed mid-callback) skip
//! the connector instead of calling in with a placeholder.

use serde::{Deserialize, Serialize};

/// Logic block width in document-space pixels.
pub const NODE_WIDTH: f64 = 220.0;
/// Logic block height in document-space pixels.
pub const NODE_HEIGHT: f64 = 90.0;

/// A point in either document or screen space. Which space is in play is a
/// property of the call site, not the type; see `ViewTransform` for the
/// conversions between the two.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A cubic Bezier connector between two node anchors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConnectorPath {
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

impl ConnectorPath {
    /// Render as an SVG path string (`M … C …`).
    pub fn to_svg(&self) -> String {
        format!(
            "M {} {} C {} {}, {} {}, {} {}",
            self.start.x,
            self.start.y,
            self.control1.x,
            self.control1.y,
            self.control2.x,
            self.control2.y,
            self.end.x,
            self.end.y
        )
    }
}

/// Outgoing anchor: right-center of the node box.
pub fn out_anchor(position: Point) -> Point {
    Point::new(position.x + NODE_WIDTH, position.y + NODE_HEIGHT / 2.0)
}

/// Incoming anchor: left-center of the node box.
pub fn in_anchor(position: Point) -> Point {
    Point::new(position.x, position.y + NODE_HEIGHT / 2.0)
}

/// Horizontal S-curve between the out-anchor of `a` and the in-anchor of `b`.
///
/// Control points sit at the horizontal midpoint between the anchors, pinned
/// to each endpoint's own y, so the curve leaves and arrives horizontally
/// regardless of vertical offset. Degenerate inputs (`a.x == b.x`, zero
/// distance) collapse the control points onto the endpoints and still yield a
/// renderable path.
pub fn connector_path(a: Point, b: Point) -> ConnectorPath {
    let start = out_anchor(a);
    let end = in_anchor(b);
    let dist = (end.x - start.x).abs();

    ConnectorPath {
        start,
        control1: Point::new(start.x + dist * 0.5, start.y),
        control2: Point::new(end.x - dist * 0.5, end.y),
        end,
    }
}

/// Arithmetic mean of the two connector anchors. Used for edge labels and as
/// the hit target for "insert a node between these two".
pub fn midpoint(a: Point, b: Point) -> Point {
    let start = out_anchor(a);
    let end = in_anchor(b);
    Point::new((start.x + end.x) / 2.0, (start.y + end.y) / 2.0)
}
