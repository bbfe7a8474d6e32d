//! View transform for a single canvas instance.
//!
//! Owns the pan offset and zoom scale, and converts screen-space pointer
//! deltas into transform updates. Panning and node dragging deliberately use
//! different unit conversions: a pan moves the camera and applies the raw
//! screen delta to the offset, while a drag moves document-space content and
//! must divide the screen delta by the current scale. Unifying the two makes
//! drags visibly too fast or too slow at any zoom other than 1.0.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Lower zoom bound.
pub const MIN_SCALE: f64 = 0.5;
/// Upper zoom bound.
pub const MAX_SCALE: f64 = 3.0;
/// Toolbar zoom button step.
pub const ZOOM_STEP: f64 = 0.1;

/// Wheel delta to scale conversion. Negative so that scrolling up zooms in.
const WHEEL_ZOOM_FACTOR: f64 = -0.001;

/// Pan offset (screen pixels) and zoom scale for one canvas.
///
/// Owned per canvas instance; the editor and the read-only scenario viewer
/// each hold their own. Resets to identity on explicit reset and whenever the
/// document or scenario being viewed changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub offset: Point,
    pub scale: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            offset: Point::new(0.0, 0.0),
            scale: 1.0,
        }
    }
}

impl ViewTransform {
    /// Apply a raw screen-space delta to the pan offset. Not scale-compensated.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.offset.x += dx;
        self.offset.y += dy;
    }

    /// Apply a wheel delta. Zoom is anchored at the canvas origin; there is no
    /// zoom-to-cursor compensation, and that is intentional.
    pub fn zoom_wheel(&mut self, delta_y: f64) {
        self.set_scale(self.scale + delta_y * WHEEL_ZOOM_FACTOR);
    }

    /// Toolbar zoom-in step.
    pub fn zoom_in(&mut self) {
        self.set_scale(self.scale + ZOOM_STEP);
    }

    /// Toolbar zoom-out step.
    pub fn zoom_out(&mut self) {
        self.set_scale(self.scale - ZOOM_STEP);
    }

    fn set_scale(&mut self, scale: f64) {
        self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
    }

    /// Reset to identity: no offset, scale 1.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Convert a screen-space delta into a document-space delta at the current
    /// zoom. Required for node drags; never applied to pans.
    pub fn to_document_delta(&self, dx: f64, dy: f64) -> (f64, f64) {
        (dx / self.scale, dy / self.scale)
    }
}
