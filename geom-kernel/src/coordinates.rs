//! Flat coordinate storage shared by all geometry types.
//!
//! Coordinates of a geometry are stored in a single `f64` buffer, vertex after vertex: the value of
//! axis `a` of vertex `v` is at `v * axis_count + a`. Axes a geometry does not have (e.g. Z of a
//! point created from X/Y values by a 3d factory) are stored as `NaN`.

use std::cmp::Ordering;

use crate::error::GeometryError;
use crate::precision::{M, X, Y, Z};

/// Read access to a sequence of vertices with the same number of axes.
///
/// All the coordinate based algorithms of the crate (orientation, area, length, comparison) are
/// written against this trait, so they work equally for lines, rings, single points and cursor
/// vertices.
pub trait CoordinateSequence {
    /// Number of values stored for each vertex.
    fn axis_count(&self) -> usize;

    /// Number of vertices in the sequence.
    fn vertex_count(&self) -> usize;

    /// Value of the axis of the vertex.
    ///
    /// Negative vertex indices are counted from the end of the sequence (`-1` is the last vertex).
    /// Indices beyond the last vertex, and axes the sequence does not have, give `NaN`.
    fn coordinate(&self, vertex_index: isize, axis_index: usize) -> f64;

    fn x(&self, vertex_index: isize) -> f64 {
        self.coordinate(vertex_index, X)
    }

    fn y(&self, vertex_index: isize) -> f64 {
        self.coordinate(vertex_index, Y)
    }

    fn z(&self, vertex_index: isize) -> f64 {
        self.coordinate(vertex_index, Z)
    }

    fn m(&self, vertex_index: isize) -> f64 {
        self.coordinate(vertex_index, M)
    }

    /// Returns true if the sequence has no vertices.
    fn is_empty(&self) -> bool {
        self.vertex_count() == 0
    }

    /// All values of the vertex, or an empty vector if the vertex does not exist.
    fn vertex_coordinates(&self, vertex_index: isize) -> Vec<f64> {
        match resolve_index(vertex_index, self.vertex_count()) {
            Some(index) => (0..self.axis_count())
                .map(|axis| self.coordinate(index as isize, axis))
                .collect(),
            None => vec![],
        }
    }

    /// Returns true if both vertices exist and have the same X and Y values.
    fn equals_vertex_2d(&self, vertex_index1: isize, vertex_index2: isize) -> bool {
        let count = self.vertex_count();
        if resolve_index(vertex_index1, count).is_none()
            || resolve_index(vertex_index2, count).is_none()
        {
            return false;
        }

        self.x(vertex_index1) == self.x(vertex_index2)
            && self.y(vertex_index1) == self.y(vertex_index2)
    }

    /// Returns true if the vertex exists and has the given X and Y values.
    fn equals_vertex_xy(&self, vertex_index: isize, x: f64, y: f64) -> bool {
        self.x(vertex_index) == x && self.y(vertex_index) == y
    }
}

/// Resolves a possibly negative vertex index against the number of vertices.
///
/// Negative indices wrap around modulo `count`; non-negative indices must be less than `count`.
pub fn resolve_index(index: isize, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }

    if index < 0 {
        Some(index.rem_euclid(count as isize) as usize)
    } else if (index as usize) < count {
        Some(index as usize)
    } else {
        None
    }
}

/// Compares two values treating `NaN` as equal to `NaN`.
pub fn values_equal(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

/// Orders two vertices of (possibly different) sequences by X, then by Y.
pub fn compare_vertices(
    a: &impl CoordinateSequence,
    a_index: isize,
    b: &impl CoordinateSequence,
    b_index: isize,
) -> Ordering {
    compare_xy(a.x(a_index), a.y(a_index), b.x(b_index), b.y(b_index))
}

/// Orders two positions by X, then by Y. Incomparable (`NaN`) values are considered equal.
pub fn compare_xy(x1: f64, y1: f64, x2: f64, y2: f64) -> Ordering {
    match x1.partial_cmp(&x2).unwrap_or(Ordering::Equal) {
        Ordering::Equal => y1.partial_cmp(&y2).unwrap_or(Ordering::Equal),
        ordering => ordering,
    }
}

/// Owned, immutable coordinate buffer of a geometry.
///
/// A buffer always contains at least one vertex and has at least two axes. Empty geometries do not
/// have a buffer at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinates {
    axis_count: usize,
    values: Box<[f64]>,
}

impl Coordinates {
    /// Wraps the values into a buffer.
    ///
    /// Fails if the axis count is less than 2, if the number of values is not a multiple of the
    /// axis count, or if there are no values.
    pub fn new(axis_count: usize, values: Vec<f64>) -> Result<Self, GeometryError> {
        if axis_count < 2 {
            return Err(GeometryError::InvalidAxisCount(axis_count));
        }
        if values.is_empty() {
            return Err(GeometryError::invalid("coordinate buffer has no vertices"));
        }
        if values.len() % axis_count != 0 {
            return Err(GeometryError::invalid(format!(
                "{} values cannot be split into vertices of {axis_count} axes",
                values.len()
            )));
        }

        Ok(Self {
            axis_count,
            values: values.into_boxed_slice(),
        })
    }

    /// Wraps values that are already known to form complete vertices. Returns `None` for an empty
    /// value list.
    pub(crate) fn from_values(axis_count: usize, values: Vec<f64>) -> Option<Self> {
        if values.is_empty() || axis_count < 2 {
            return None;
        }
        debug_assert_eq!(values.len() % axis_count, 0);

        Some(Self {
            axis_count,
            values: values.into_boxed_slice(),
        })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Values of one vertex.
    pub fn vertex(&self, vertex_index: usize) -> Option<&[f64]> {
        let start = vertex_index.checked_mul(self.axis_count)?;
        self.values.get(start..start + self.axis_count)
    }

    /// New buffer with the vertices in reversed order.
    pub fn reversed(&self) -> Self {
        let values = self
            .values
            .chunks_exact(self.axis_count)
            .rev()
            .flatten()
            .copied()
            .collect::<Vec<_>>();
        Self {
            axis_count: self.axis_count,
            values: values.into_boxed_slice(),
        }
    }

    /// New buffer with every value of an axis shifted by the corresponding delta.
    pub fn moved(&self, deltas: &[f64]) -> Self {
        let mut values = self.values.to_vec();
        for vertex in values.chunks_exact_mut(self.axis_count) {
            for (value, delta) in vertex.iter_mut().zip(deltas) {
                *value += delta;
            }
        }
        Self {
            axis_count: self.axis_count,
            values: values.into_boxed_slice(),
        }
    }
}

impl CoordinateSequence for Coordinates {
    fn axis_count(&self) -> usize {
        self.axis_count
    }

    fn vertex_count(&self) -> usize {
        self.values.len() / self.axis_count
    }

    fn coordinate(&self, vertex_index: isize, axis_index: usize) -> f64 {
        if axis_index >= self.axis_count {
            return f64::NAN;
        }
        match resolve_index(vertex_index, self.vertex_count()) {
            Some(index) => self.values[index * self.axis_count + axis_index],
            None => f64::NAN,
        }
    }
}

impl<T: CoordinateSequence> CoordinateSequence for Option<T> {
    fn axis_count(&self) -> usize {
        self.as_ref().map_or(0, T::axis_count)
    }

    fn vertex_count(&self) -> usize {
        self.as_ref().map_or(0, T::vertex_count)
    }

    fn coordinate(&self, vertex_index: isize, axis_index: usize) -> f64 {
        match self {
            Some(sequence) => sequence.coordinate(vertex_index, axis_index),
            None => f64::NAN,
        }
    }
}

/// Helper to assemble a new coordinate buffer out of vertices of existing sequences.
#[derive(Debug, Clone)]
pub(crate) struct CoordinatesBuilder {
    axis_count: usize,
    values: Vec<f64>,
}

impl CoordinatesBuilder {
    pub(crate) fn new(axis_count: usize, vertex_capacity: usize) -> Self {
        Self {
            axis_count,
            values: Vec::with_capacity(axis_count * vertex_capacity),
        }
    }

    pub(crate) fn vertex_count(&self) -> usize {
        if self.axis_count == 0 {
            0
        } else {
            self.values.len() / self.axis_count
        }
    }

    /// Appends one vertex of the source, padding missing axes with `NaN`.
    pub(crate) fn push_vertex(&mut self, source: &impl CoordinateSequence, vertex_index: usize) {
        for axis in 0..self.axis_count {
            let value = source.coordinate(vertex_index as isize, axis);
            self.values.push(value);
        }
    }

    /// Appends a vertex given by its values, padding missing axes with `NaN`.
    pub(crate) fn push_values(&mut self, values: &[f64]) {
        for axis in 0..self.axis_count {
            let value = values.get(axis).copied().unwrap_or(f64::NAN);
            self.values.push(value);
        }
    }

    /// Appends `count` vertices of the source starting from `from`.
    pub(crate) fn append(&mut self, source: &impl CoordinateSequence, from: usize, count: usize) {
        for vertex_index in from..from + count {
            self.push_vertex(source, vertex_index);
        }
    }

    /// Appends `count` vertices of the reversed source starting from the reversed index `from`.
    pub(crate) fn append_reverse(
        &mut self,
        source: &impl CoordinateSequence,
        from: usize,
        count: usize,
    ) {
        let last = source.vertex_count().saturating_sub(1);
        for offset in from..from + count {
            if let Some(vertex_index) = last.checked_sub(offset) {
                self.push_vertex(source, vertex_index);
            }
        }
    }

    pub(crate) fn into_values(self) -> Vec<f64> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer() -> Coordinates {
        let values = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        Coordinates::new(3, values).expect("valid buffer")
    }

    #[test]
    fn resolve_negative_index() {
        assert_eq!(resolve_index(-1, 5), Some(4));
        assert_eq!(resolve_index(-6, 5), Some(4));
        assert_eq!(resolve_index(4, 5), Some(4));
        assert_eq!(resolve_index(5, 5), None);
        assert_eq!(resolve_index(0, 0), None);
    }

    #[test]
    fn coordinate_access() {
        let coords = buffer();
        assert_eq!(coords.vertex_count(), 3);
        assert_eq!(coords.axis_count(), 3);
        assert_eq!(coords.coordinate(1, 2), 5.0);
        assert_eq!(coords.coordinate(-1, 0), 6.0);
        assert_eq!(coords.z(0), 2.0);
        assert!(coords.coordinate(3, 0).is_nan());
        assert!(coords.coordinate(0, 3).is_nan());
        assert!(coords.m(0).is_nan());
    }

    #[test]
    fn invalid_buffers() {
        assert_eq!(
            Coordinates::new(1, vec![1.0]),
            Err(GeometryError::InvalidAxisCount(1))
        );
        assert!(Coordinates::new(2, vec![]).is_err());
        assert!(Coordinates::new(2, vec![1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn reversed_and_moved() {
        let coords = buffer();
        let reversed = [6.0, 7.0, 8.0, 3.0, 4.0, 5.0, 0.0, 1.0, 2.0];
        assert_eq!(coords.reversed().values(), &reversed);

        let moved = coords.moved(&[10.0, 20.0]);
        assert_eq!(moved.vertex(0), Some(&[10.0, 21.0, 2.0][..]));
    }

    #[test]
    fn builder_pads_missing_axes() {
        let source = Coordinates::new(2, vec![1.0, 2.0, 3.0, 4.0]).expect("valid buffer");
        let mut builder = CoordinatesBuilder::new(3, 2);
        builder.append_reverse(&source, 0, 2);
        let values = builder.into_values();
        assert_eq!(&values[0..2], &[3.0, 4.0]);
        assert!(values[2].is_nan());
        assert_eq!(&values[3..5], &[1.0, 2.0]);
    }

    #[test]
    fn compare_by_x_then_y() {
        assert_eq!(compare_xy(0.0, 5.0, 1.0, 0.0), Ordering::Less);
        assert_eq!(compare_xy(1.0, 5.0, 1.0, 0.0), Ordering::Greater);
        assert_eq!(compare_xy(1.0, 0.0, 1.0, 0.0), Ordering::Equal);
    }
}
