//! Geometry types and the [`Geometry`] trait they all implement.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, OnceLock};

use crate::bounding_box::BoundingBox;
use crate::coordinates::{values_equal, CoordinateSequence, Coordinates};
use crate::cursor::{Segment, SegmentId, Segments, Vertex, VertexId, Vertices};
use crate::error::GeometryError;
use crate::factory::GeometryFactory;
use crate::geom::Geom;
use crate::geometry_type::{Dimension, GeometryType};
use crate::precision::{M, X, Y, Z};

mod collection;
pub use collection::GeometryCollection;

mod line_string;
pub use line_string::{ClosestComponent, End, LineString};

mod linear_ring;
pub use linear_ring::LinearRing;

mod multi_line_string;
pub use multi_line_string::MultiLineString;

mod multi_point;
pub use multi_point::MultiPoint;

mod multi_polygon;
pub use multi_polygon::MultiPolygon;

mod point;
pub use point::Point;

mod polygon;
pub use polygon::Polygon;

/// Opaque value attached to a geometry by the application.
///
/// The kernel never inspects the value. It is carried over to geometries derived by reversing,
/// moving, merging or otherwise editing the original one.
pub type UserData = Arc<dyn Any + Send + Sync>;

/// Common interface of all geometry types.
///
/// Geometries are immutable. Every editing operation creates a new geometry.
pub trait Geometry {
    /// Factory that created the geometry.
    fn factory(&self) -> &GeometryFactory;

    /// Kind of the geometry.
    fn geometry_type(&self) -> GeometryType;

    /// Returns true if the geometry has no vertices.
    fn is_empty(&self) -> bool;

    /// Iterator over all vertices.
    fn vertices(&self) -> Vertices<'_>;

    /// Envelope of the geometry. Computed on the first call and cached afterwards.
    fn bounding_box(&self) -> &BoundingBox;

    /// Value attached by the application.
    fn user_data(&self) -> Option<&UserData>;

    /// Topological boundary of the geometry.
    fn boundary(&self) -> Geom;

    /// Dimension of the [`boundary`](Geometry::boundary).
    fn boundary_dimension(&self) -> Dimension;

    /// Topological dimension.
    fn dimension(&self) -> Dimension {
        self.geometry_type().dimension()
    }

    /// Number of axes of every vertex. Same as the factory's.
    fn axis_count(&self) -> usize {
        self.factory().axis_count()
    }

    /// Coordinate system id.
    fn srid(&self) -> u32 {
        self.factory().srid()
    }

    /// Total number of vertices in all parts.
    fn vertex_count(&self) -> usize {
        self.vertices().len()
    }

    /// Iterator over all segments.
    fn segments(&self) -> Segments<'_> {
        self.vertices().segments()
    }

    /// Vertex with the given address.
    fn vertex(&self, id: VertexId) -> Option<Vertex<'_>> {
        self.vertices().get(id)
    }

    /// Segment with the given address.
    fn segment(&self, id: SegmentId) -> Option<Segment<'_>> {
        self.segments().get(id)
    }

    /// Value of the axis of the vertex at the position in [`vertices`](Geometry::vertices) order.
    ///
    /// Negative positions are counted from the end. Out of range positions and axes give `NaN`.
    fn coordinate(&self, vertex_index: isize, axis_index: usize) -> f64 {
        self.vertices()
            .get_flat(vertex_index)
            .map_or(f64::NAN, |vertex| vertex.coordinate(axis_index))
    }

    /// X of the vertex at the position. See [`coordinate`](Geometry::coordinate).
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

    /// Copy of the values of all vertices in [`vertices`](Geometry::vertices) order.
    fn coordinates(&self) -> Vec<f64> {
        self.vertices()
            .flat_map(|vertex| vertex.coordinates())
            .collect()
    }

    /// Total length of all lines and ring perimeters.
    fn length(&self) -> f64 {
        0.0
    }

    /// Planar area. Zero for points and lines.
    fn area(&self) -> f64 {
        0.0
    }
}

/// State shared by all geometry types.
#[derive(Clone)]
pub(crate) struct Properties {
    factory: GeometryFactory,
    user_data: Option<UserData>,
    bounding_box: OnceLock<BoundingBox>,
}

impl Properties {
    pub(crate) fn new(factory: GeometryFactory, user_data: Option<UserData>) -> Self {
        Self {
            factory,
            user_data,
            bounding_box: OnceLock::new(),
        }
    }

    pub(crate) fn factory(&self) -> &GeometryFactory {
        &self.factory
    }

    pub(crate) fn user_data(&self) -> Option<&UserData> {
        self.user_data.as_ref()
    }

    pub(crate) fn set_user_data(&mut self, user_data: UserData) {
        self.user_data = Some(user_data);
    }

    /// Properties of a geometry derived from this one: same factory and user data, no cached
    /// values.
    pub(crate) fn derive(&self) -> Self {
        Self::new(self.factory.clone(), self.user_data.clone())
    }

    /// Same as [`derive`](Self::derive) with a different factory.
    pub(crate) fn derive_with(&self, factory: &GeometryFactory) -> Self {
        Self::new(factory.clone(), self.user_data.clone())
    }

    pub(crate) fn bounding_box<'a>(
        &'a self,
        vertices: impl FnOnce() -> Vertices<'a>,
    ) -> &'a BoundingBox {
        self.bounding_box.get_or_init(|| {
            let mut bbox = BoundingBox::empty();
            for component in vertices().components() {
                bbox.include_sequence(component.coordinates);
            }
            log::trace!("Computed bounding box {bbox:?}");
            bbox
        })
    }
}

impl Debug for Properties {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Properties")
            .field("factory", &self.factory)
            .field("has_user_data", &self.user_data.is_some())
            .finish()
    }
}

/// Compares two optional buffers value by value.
///
/// Only the first `axis_count` axes are compared. Values match if they differ by no more than
/// `tolerance`; `NaN` matches `NaN`.
pub(crate) fn sequences_match(
    a: &Option<Coordinates>,
    b: &Option<Coordinates>,
    axis_count: usize,
    tolerance: f64,
) -> bool {
    let vertex_count = a.vertex_count();
    if vertex_count != b.vertex_count() {
        return false;
    }

    let axis_count = axis_count.min(a.axis_count().max(b.axis_count()));
    for vertex_index in 0..vertex_count as isize {
        for axis in 0..axis_count {
            let va = a.coordinate(vertex_index, axis);
            let vb = b.coordinate(vertex_index, axis);
            if !(values_equal(va, vb) || (va - vb).abs() <= tolerance) {
                return false;
            }
        }
    }

    true
}

/// Lexicographic order of two lists, shorter list first if one is a prefix of the other.
pub(crate) fn compare_lists<T>(
    a: &[T],
    b: &[T],
    compare: impl Fn(&T, &T) -> Ordering,
) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        match compare(x, y) {
            Ordering::Equal => {}
            ordering => return ordering,
        }
    }

    a.len().cmp(&b.len())
}

/// Order of two lists that ignores the order of their elements.
pub(crate) fn compare_sorted<T>(
    a: &[T],
    b: &[T],
    compare: impl Fn(&T, &T) -> Ordering,
) -> Ordering {
    let mut a: Vec<&T> = a.iter().collect();
    let mut b: Vec<&T> = b.iter().collect();
    a.sort_by(|x, y| compare(*x, *y));
    b.sort_by(|x, y| compare(*x, *y));

    compare_lists(&a, &b, |x, y| compare(*x, *y))
}

/// Copies an optional buffer of the `source` factory into the `target` factory.
pub(crate) fn copy_sequence(
    target: &GeometryFactory,
    source: &GeometryFactory,
    coordinates: &Option<Coordinates>,
) -> Option<Coordinates> {
    coordinates
        .as_ref()
        .map(|values| target.convert_coordinates(source, values))
}

/// Shifts every vertex of the buffer by `deltas` and rounds the result to the factory's precision.
pub(crate) fn move_sequence(
    factory: &GeometryFactory,
    coordinates: &Option<Coordinates>,
    deltas: &[f64],
) -> Option<Coordinates> {
    let moved = coordinates.as_ref()?.moved(deltas);
    factory.precise_coordinates(moved.axis_count(), moved.values())
}

/// Values of a new vertex: given values for the first axes, `NaN` for the rest.
pub(crate) fn vertex_values(axis_count: usize, values: &[f64]) -> Vec<f64> {
    (0..axis_count)
        .map(|axis| values.get(axis).copied().unwrap_or(f64::NAN))
        .collect()
}

pub(crate) fn part_out_of_range(part_index: usize, part_count: usize) -> GeometryError {
    let message = format!("part {part_index} of geometry with {part_count} parts");
    GeometryError::VertexOutOfRange(message)
}

/// Implements `PartialEq` (exact match of all axes) and `approx::AbsDiffEq` (match within
/// tolerance) through the `equals` and `equals_exact` methods of the type.
macro_rules! impl_equality {
    ($type:ty) => {
        impl PartialEq for $type {
            fn eq(&self, other: &Self) -> bool {
                self.equals(usize::MAX, other)
            }
        }

        impl approx::AbsDiffEq for $type {
            type Epsilon = f64;

            fn default_epsilon() -> Self::Epsilon {
                f64::EPSILON
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
                self.equals_exact(other, epsilon)
            }
        }
    };
}

pub(crate) use impl_equality;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequences_match_with_nan() {
        let a = Coordinates::new(3, vec![0.0, 0.0, f64::NAN, 1.0, 1.0, f64::NAN]).ok();
        let b = Coordinates::new(3, vec![0.0, 0.0, f64::NAN, 1.0, 1.0 + 1e-9, f64::NAN]).ok();
        assert!(!sequences_match(&a, &b, usize::MAX, 0.0));
        assert!(sequences_match(&a, &b, usize::MAX, 1e-6));
        assert!(sequences_match(&a, &a, usize::MAX, 0.0));
        assert!(sequences_match(&None, &None, 2, 0.0));
        assert!(!sequences_match(&a, &None, 2, 0.0));
    }

    #[test]
    fn sorted_comparison_ignores_order() {
        let cmp = |a: &i32, b: &i32| a.cmp(b);
        let shuffled = [3, 1, 2];
        let sorted = [1, 2, 3];
        assert_eq!(compare_sorted(&shuffled, &sorted, cmp), Ordering::Equal);
        assert_eq!(compare_lists(&shuffled, &sorted, cmp), Ordering::Greater);
        assert_eq!(compare_lists(&[1, 2], &[1, 2, 3], cmp), Ordering::Less);
    }
}
