//! Precision model of a [`GeometryFactory`](crate::GeometryFactory).

use serde::{Deserialize, Serialize};

/// Index of the X axis.
pub const X: usize = 0;
/// Index of the Y axis.
pub const Y: usize = 1;
/// Index of the Z axis.
pub const Z: usize = 2;
/// Index of the M (measure) axis.
pub const M: usize = 3;

/// Rounding rules applied to every coordinate when a geometry is constructed.
///
/// Each scale defines the grid the values of the axis are snapped to: a scale of `1000.0` rounds
/// values to three decimal places, a scale of `0.5` rounds to multiples of two. A scale of `0.0`
/// (or any non-positive value) means the axis is *floating* and values are stored as given.
///
/// X and Y axes always share the same scale.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrecisionModel {
    scale_xy: f64,
    scale_z: f64,
    scale_m: f64,
}

impl PrecisionModel {
    /// Precision model that does not round any values.
    pub const FLOATING: PrecisionModel = PrecisionModel {
        scale_xy: 0.0,
        scale_z: 0.0,
        scale_m: 0.0,
    };

    /// Creates a new precision model. Non-positive scales are stored as `0.0` (floating).
    pub fn new(scale_xy: f64, scale_z: f64, scale_m: f64) -> Self {
        Self {
            scale_xy: normalize_scale(scale_xy),
            scale_z: normalize_scale(scale_z),
            scale_m: normalize_scale(scale_m),
        }
    }

    /// Creates a precision model with a fixed X/Y scale and floating Z and M axes.
    pub fn fixed_xy(scale_xy: f64) -> Self {
        Self::new(scale_xy, 0.0, 0.0)
    }

    /// Scale of the given axis. Axes beyond M are always floating.
    pub fn scale(&self, axis_index: usize) -> f64 {
        match axis_index {
            X | Y => self.scale_xy,
            Z => self.scale_z,
            M => self.scale_m,
            _ => 0.0,
        }
    }

    pub fn scale_xy(&self) -> f64 {
        self.scale_xy
    }

    pub fn scale_z(&self) -> f64 {
        self.scale_z
    }

    pub fn scale_m(&self) -> f64 {
        self.scale_m
    }

    /// Smallest representable difference between two values of the axis, or `0.0` for floating
    /// axes.
    pub fn resolution(&self, axis_index: usize) -> f64 {
        let scale = self.scale(axis_index);
        if scale > 0.0 {
            1.0 / scale
        } else {
            0.0
        }
    }

    /// Returns true if no axis is rounded.
    pub fn is_floating(&self) -> bool {
        self.scale_xy <= 0.0 && self.scale_z <= 0.0 && self.scale_m <= 0.0
    }

    /// Rounds the value to the grid of the axis.
    ///
    /// Non-finite values (`NaN` padding of missing axes in particular) are returned unchanged.
    pub fn make_precise(&self, axis_index: usize, value: f64) -> f64 {
        let scale = self.scale(axis_index);
        if scale > 0.0 && value.is_finite() {
            (value * scale).round() / scale
        } else {
            value
        }
    }
}

fn normalize_scale(scale: f64) -> f64 {
    if scale > 0.0 && scale.is_finite() {
        scale
    } else {
        0.0
    }
}
