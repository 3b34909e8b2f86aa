use std::cmp::Ordering;
use std::ops::Deref;

use crate::algorithm::signed_ring_area;
use crate::bounding_box::BoundingBox;
use crate::coordinates::{compare_vertices, resolve_index, CoordinateSequence, CoordinatesBuilder};
use crate::cursor::Vertices;
use crate::error::GeometryError;
use crate::factory::{validate_ring, GeometryFactory};
use crate::geom::Geom;
use crate::geometry::line_string::set_vertex;
use crate::geometry::{impl_equality, Geometry, LineString, UserData};
use crate::geometry_type::{Dimension, GeometryType};

/// A closed line with at least 4 vertices, used as the shell or a hole of a
/// [`Polygon`](crate::Polygon).
///
/// All the read-only methods of [`LineString`] are available through `Deref`. Editing methods that
/// keep the ring closed return a `LinearRing` and are implemented on the ring itself.
#[derive(Debug, Clone)]
pub struct LinearRing(LineString);

impl LinearRing {
    pub(crate) fn from_line(line: LineString) -> Self {
        Self(line)
    }

    fn checked(line: LineString) -> Result<Self, GeometryError> {
        validate_ring(line.sequence())?;
        Ok(Self(line))
    }

    /// The ring as a line.
    pub fn as_line(&self) -> &LineString {
        &self.0
    }

    /// Converts the ring into a line.
    pub fn into_line(self) -> LineString {
        self.0
    }

    /// Attaches the value to the ring.
    pub fn with_user_data(self, user_data: UserData) -> Self {
        Self(self.0.with_user_data(user_data))
    }

    /// Signed area enclosed by the ring. Positive for counterclockwise rings.
    pub fn signed_area(&self) -> f64 {
        signed_ring_area(self.0.sequence())
    }

    /// Index of the smallest vertex (by X, then Y). The closing vertex is not considered.
    pub fn min_vertex_index(&self) -> Option<usize> {
        let sequence = self.0.sequence();
        let distinct_count = sequence.vertex_count().checked_sub(1)?;
        if distinct_count == 0 {
            return None;
        }

        let mut min_index = 0;
        for i in 1..distinct_count {
            let order = compare_vertices(sequence, i as isize, sequence, min_index as isize);
            if order == Ordering::Less {
                min_index = i;
            }
        }

        Some(min_index)
    }

    /// Ring with the same vertices starting from `vertex_index`.
    pub fn scroll(&self, vertex_index: isize) -> LinearRing {
        let sequence = self.0.sequence();
        let vertex_count = sequence.vertex_count();
        let Some(index) = resolve_index(vertex_index, vertex_count) else {
            return self.clone();
        };
        if index == 0 || index == vertex_count - 1 {
            return self.clone();
        }

        let mut builder = CoordinatesBuilder::new(self.axis_count(), vertex_count);
        builder.append(sequence, index, vertex_count - 1 - index);
        builder.append(sequence, 0, index);
        builder.push_vertex(sequence, index);

        Self(self.0.derived_from_values(&builder.into_values()))
    }

    /// Canonical form of the ring: starts at its smallest vertex and goes clockwise (`clockwise ==
    /// true`) or counterclockwise.
    pub fn normalize_oriented(&self, clockwise: bool) -> LinearRing {
        let Some(min_index) = self.min_vertex_index() else {
            return self.clone();
        };

        let scrolled = self.scroll(min_index as isize);
        if scrolled.is_counter_clockwise() == clockwise {
            scrolled.reverse()
        } else {
            scrolled
        }
    }

    /// Canonical form of a shell: see [`normalize_oriented`](Self::normalize_oriented).
    pub fn normalize(&self) -> LinearRing {
        self.normalize_oriented(true)
    }

    /// Ring with the vertices in the opposite order.
    pub fn reverse(&self) -> LinearRing {
        Self(self.0.reverse())
    }

    /// Ring oriented clockwise.
    pub fn to_clockwise(&self) -> LinearRing {
        if self.is_clockwise() {
            self.clone()
        } else {
            self.reverse()
        }
    }

    /// Ring oriented counterclockwise.
    pub fn to_counter_clockwise(&self) -> LinearRing {
        if self.is_counter_clockwise() {
            self.clone()
        } else {
            self.reverse()
        }
    }

    /// Ring moved by the given delta of each axis.
    pub fn move_by(&self, deltas: &[f64]) -> LinearRing {
        Self(self.0.move_by(deltas))
    }

    /// Ring with the vertex moved. Moving the first or the last vertex moves both, so that the ring
    /// stays closed.
    pub fn move_vertex(
        &self,
        vertex_index: isize,
        values: &[f64],
    ) -> Result<LinearRing, GeometryError> {
        let index = self.0.resolve_vertex(vertex_index)?;
        let axis_count = self.axis_count();
        let last = self.0.sequence().vertex_count() - 1;

        let mut new_values = self.coordinates();
        if index == 0 || index == last {
            set_vertex(&mut new_values, axis_count, 0, values);
            set_vertex(&mut new_values, axis_count, last, values);
        } else {
            set_vertex(&mut new_values, axis_count, index, values);
        }

        Self::checked(self.0.derived_from_values(&new_values))
    }

    /// Ring with a new vertex inserted before `vertex_index`. The index must be between `1` and the
    /// index of the closing vertex.
    pub fn insert_vertex(
        &self,
        vertex_index: usize,
        values: &[f64],
    ) -> Result<LinearRing, GeometryError> {
        let vertex_count = self.0.sequence().vertex_count();
        if vertex_index == 0 || vertex_index >= vertex_count {
            return Err(GeometryError::VertexOutOfRange(format!(
                "cannot insert vertex at {vertex_index} into ring with {vertex_count} vertices"
            )));
        }

        Self::checked(self.0.insert_vertex(vertex_index, values)?)
    }

    /// Ring without the vertex. Deleting the first or the last vertex removes both and closes the
    /// ring at the next vertex.
    pub fn delete_vertex(&self, vertex_index: isize) -> Result<LinearRing, GeometryError> {
        let index = self.0.resolve_vertex(vertex_index)?;
        let vertex_count = self.0.sequence().vertex_count();
        if vertex_count <= 4 {
            return Err(GeometryError::invalid(format!(
                "cannot delete a vertex from a ring with {vertex_count} vertices"
            )));
        }

        if index == 0 || index == vertex_count - 1 {
            let sequence = self.0.sequence();
            let mut builder = CoordinatesBuilder::new(self.axis_count(), vertex_count - 1);
            builder.append(sequence, 1, vertex_count - 2);
            builder.push_vertex(sequence, 1);
            Self::checked(self.0.derived_from_values(&builder.into_values()))
        } else {
            Self::checked(self.0.delete_vertex(vertex_index)?)
        }
    }

    /// Copies the ring into the factory. Fails if the transformation of coordinates opens the ring.
    pub fn copy(&self, factory: &GeometryFactory) -> Result<LinearRing, GeometryError> {
        Self::checked(self.0.copy(factory)?)
    }

    /// See [`LineString::compare`].
    pub fn compare(&self, other: &LinearRing) -> Ordering {
        self.0.compare(&other.0)
    }

    /// See [`LineString::equals`].
    pub fn equals(&self, axis_count: usize, other: &LinearRing) -> bool {
        self.0.equals(axis_count, &other.0)
    }

    /// See [`LineString::equals_exact`].
    pub fn equals_exact(&self, other: &LinearRing, tolerance: f64) -> bool {
        self.0.equals_exact(&other.0, tolerance)
    }
}

impl Deref for LinearRing {
    type Target = LineString;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl_equality!(LinearRing);

impl Geometry for LinearRing {
    fn factory(&self) -> &GeometryFactory {
        self.0.factory()
    }

    fn geometry_type(&self) -> GeometryType {
        GeometryType::LinearRing
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn vertices(&self) -> Vertices<'_> {
        self.0.vertices()
    }

    fn bounding_box(&self) -> &BoundingBox {
        self.0.bounding_box()
    }

    fn user_data(&self) -> Option<&UserData> {
        self.0.user_data()
    }

    fn boundary(&self) -> Geom {
        Geom::MultiPoint(self.factory().empty_multi_point())
    }

    fn boundary_dimension(&self) -> Dimension {
        Dimension::False
    }

    fn length(&self) -> f64 {
        self.0.length()
    }
}
