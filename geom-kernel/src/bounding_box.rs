//! Axis aligned envelope of geometries.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::cartesian::CartesianPoint2d;
use crate::coordinates::CoordinateSequence;
use crate::precision::{X, Y};

/// Minimum and maximum value of every axis of a geometry.
///
/// An empty box (the envelope of an empty geometry) has no axes at all and is different from a
/// degenerate box of a single point, which has equal minimum and maximum values. Axes that have no
/// values in the geometry (`NaN` padding) have `NaN` bounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    min: Vec<f64>,
    max: Vec<f64>,
}

impl BoundingBox {
    /// Creates a 2d box. The bounds are reordered if the minimum is greater than the maximum.
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            min: vec![x_min.min(x_max), y_min.min(y_max)],
            max: vec![x_min.max(x_max), y_min.max(y_max)],
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Envelope of all vertices of the sequence.
    pub fn from_sequence(sequence: &impl CoordinateSequence) -> Self {
        let mut bbox = Self::empty();
        bbox.include_sequence(sequence);
        bbox
    }

    /// Degenerate box of a single position.
    pub fn from_point(point: &impl CartesianPoint2d<Num = f64>) -> Self {
        Self::new(point.x(), point.y(), point.x(), point.y())
    }

    /// Returns true if the box does not contain any position.
    pub fn is_empty(&self) -> bool {
        self.min.is_empty()
    }

    /// Number of axes of the box. `0` for empty boxes.
    pub fn axis_count(&self) -> usize {
        self.min.len()
    }

    /// Minimum value of the axis, or `NaN` if the box does not have the axis.
    pub fn min(&self, axis_index: usize) -> f64 {
        self.min.get(axis_index).copied().unwrap_or(f64::NAN)
    }

    /// Maximum value of the axis, or `NaN` if the box does not have the axis.
    pub fn max(&self, axis_index: usize) -> f64 {
        self.max.get(axis_index).copied().unwrap_or(f64::NAN)
    }

    pub fn x_min(&self) -> f64 {
        self.min(X)
    }

    pub fn y_min(&self) -> f64 {
        self.min(Y)
    }

    pub fn x_max(&self) -> f64 {
        self.max(X)
    }

    pub fn y_max(&self) -> f64 {
        self.max(Y)
    }

    /// Size of the box along X. `0.0` for empty boxes.
    pub fn width(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.x_max() - self.x_min()
        }
    }

    /// Size of the box along Y. `0.0` for empty boxes.
    pub fn height(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.y_max() - self.y_min()
        }
    }

    /// Planar area of the box.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Center of the box in X/Y.
    pub fn center(&self) -> Option<Point2<f64>> {
        if self.is_empty() {
            return None;
        }

        Some(Point2::new(
            (self.x_min() + self.x_max()) / 2.0,
            (self.y_min() + self.y_max()) / 2.0,
        ))
    }

    /// Returns a box covering both this and the `other` box.
    pub fn expand_to_include(&self, other: &BoundingBox) -> Self {
        let mut result = self.clone();
        result.include_box(other);
        result
    }

    /// Returns a box covering this box and the given position.
    pub fn expand_to_include_point(&self, point: &impl CartesianPoint2d<Num = f64>) -> Self {
        let mut result = self.clone();
        result.include_values(&[point.x(), point.y()]);
        result
    }

    /// Returns a box with the X/Y bounds moved outwards by `delta`. Empty boxes stay empty.
    pub fn expand(&self, delta: f64) -> Self {
        let mut result = self.clone();
        for axis in [X, Y] {
            if let (Some(min), Some(max)) = (result.min.get_mut(axis), result.max.get_mut(axis)) {
                *min -= delta;
                *max += delta;
            }
        }
        result
    }

    /// Returns true if the boxes share at least one position in X/Y.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }

        other.x_min() <= self.x_max()
            && other.x_max() >= self.x_min()
            && other.y_min() <= self.y_max()
            && other.y_max() >= self.y_min()
    }

    /// Returns true if the position is inside the box or on its edge.
    pub fn intersects_point(&self, point: &impl CartesianPoint2d<Num = f64>) -> bool {
        !self.is_empty()
            && self.x_min() <= point.x()
            && self.x_max() >= point.x()
            && self.y_min() <= point.y()
            && self.y_max() >= point.y()
    }

    /// Returns true if every position of the `other` box is inside this box.
    pub fn covers(&self, other: &BoundingBox) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }

        other.x_min() >= self.x_min()
            && other.x_max() <= self.x_max()
            && other.y_min() >= self.y_min()
            && other.y_max() <= self.y_max()
    }

    /// X/Y area shared by both boxes. Empty if the boxes do not intersect.
    pub fn intersection(&self, other: &BoundingBox) -> Self {
        if !self.intersects(other) {
            return Self::empty();
        }

        Self::new(
            self.x_min().max(other.x_min()),
            self.y_min().max(other.y_min()),
            self.x_max().min(other.x_max()),
            self.y_max().min(other.y_max()),
        )
    }

    pub(crate) fn include_box(&mut self, other: &BoundingBox) {
        if other.is_empty() {
            return;
        }
        self.include_values(&other.min);
        self.include_values(&other.max);
    }

    pub(crate) fn include_sequence(&mut self, sequence: &impl CoordinateSequence) {
        let axis_count = sequence.axis_count();
        let mut values = vec![f64::NAN; axis_count];
        for vertex_index in 0..sequence.vertex_count() {
            for (axis, value) in values.iter_mut().enumerate() {
                *value = sequence.coordinate(vertex_index as isize, axis);
            }
            self.include_values(&values);
        }
    }

    pub(crate) fn include_values(&mut self, values: &[f64]) {
        if self.min.len() < values.len() {
            self.min.resize(values.len(), f64::NAN);
            self.max.resize(values.len(), f64::NAN);
        }

        for (axis, &value) in values.iter().enumerate() {
            if value.is_nan() {
                continue;
            }
            if self.min[axis].is_nan() || value < self.min[axis] {
                self.min[axis] = value;
            }
            if self.max[axis].is_nan() || value > self.max[axis] {
                self.max[axis] = value;
            }
        }
    }
}

impl FromIterator<BoundingBox> for BoundingBox {
    fn from_iter<T: IntoIterator<Item = BoundingBox>>(iter: T) -> Self {
        let mut result = Self::empty();
        for bbox in iter {
            result.include_box(&bbox);
        }

        result
    }
}
