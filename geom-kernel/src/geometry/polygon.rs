use std::cmp::Ordering;

use crate::algorithm::ring_area;
use crate::bounding_box::BoundingBox;
use crate::coordinates::CoordinateSequence;
use crate::cursor::{Component, Prefix, Vertices};
use crate::error::GeometryError;
use crate::factory::GeometryFactory;
use crate::geom::Geom;
use crate::geometry::{
    compare_lists, impl_equality, Geometry, LinearRing, MultiLineString, Properties, UserData,
};
use crate::geometry_type::{Dimension, GeometryType};
use crate::precision::{X, Y};

/// An area bounded by a shell ring, with optional holes.
///
/// Ring `0` is the shell, the rest are holes. An empty polygon has no rings at all.
#[derive(Debug, Clone)]
pub struct Polygon {
    rings: Vec<LinearRing>,
    properties: Properties,
}

impl Polygon {
    pub(crate) fn from_parts(
        factory: GeometryFactory,
        rings: Vec<LinearRing>,
        user_data: Option<UserData>,
    ) -> Self {
        Self {
            rings,
            properties: Properties::new(factory, user_data),
        }
    }

    fn derived(&self, rings: Vec<LinearRing>) -> Self {
        Self {
            rings,
            properties: self.properties.derive(),
        }
    }

    /// Attaches the value to the polygon.
    pub fn with_user_data(mut self, user_data: UserData) -> Self {
        self.properties.set_user_data(user_data);
        self
    }

    /// Outer ring. `None` for an empty polygon.
    pub fn shell(&self) -> Option<&LinearRing> {
        self.rings.first()
    }

    /// Hole with the index, counting from `0`.
    pub fn hole(&self, hole_index: usize) -> Option<&LinearRing> {
        self.rings.get(hole_index + 1)
    }

    pub fn hole_count(&self) -> usize {
        self.rings.len().saturating_sub(1)
    }

    /// Ring with the index. Ring `0` is the shell.
    pub fn ring(&self, ring_index: usize) -> Option<&LinearRing> {
        self.rings.get(ring_index)
    }

    /// Number of rings, shell included.
    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }

    /// All rings, shell first.
    pub fn rings(&self) -> &[LinearRing] {
        &self.rings
    }

    /// Returns true if the polygon is an axis-aligned rectangle without holes.
    pub fn is_rectangle(&self) -> bool {
        let Some(shell) = self.shell() else {
            return false;
        };
        if self.hole_count() != 0 || shell.vertex_count() != 5 {
            return false;
        }

        let bbox = self.bounding_box();
        let sequence = shell.sequence();
        let on_corners = (0..5).all(|i| {
            let x = sequence.coordinate(i, X);
            let y = sequence.coordinate(i, Y);
            (x == bbox.x_min() || x == bbox.x_max()) && (y == bbox.y_min() || y == bbox.y_max())
        });

        on_corners
            && (1..5).all(|i| {
                let x_changed = sequence.coordinate(i, X) != sequence.coordinate(i - 1, X);
                let y_changed = sequence.coordinate(i, Y) != sequence.coordinate(i - 1, Y);
                x_changed != y_changed
            })
    }

    /// Polygon with the same shell and no holes.
    pub fn without_holes(&self) -> Polygon {
        self.derived(self.rings.iter().take(1).cloned().collect())
    }

    /// Polygon with a clockwise shell and counterclockwise holes.
    pub fn to_clockwise(&self) -> Polygon {
        self.derived(
            self.rings
                .iter()
                .enumerate()
                .map(|(i, ring)| {
                    if i == 0 {
                        ring.to_clockwise()
                    } else {
                        ring.to_counter_clockwise()
                    }
                })
                .collect(),
        )
    }

    /// Polygon with a counterclockwise shell and clockwise holes.
    pub fn to_counter_clockwise(&self) -> Polygon {
        self.derived(
            self.rings
                .iter()
                .enumerate()
                .map(|(i, ring)| {
                    if i == 0 {
                        ring.to_counter_clockwise()
                    } else {
                        ring.to_clockwise()
                    }
                })
                .collect(),
        )
    }

    /// Polygon with every ring reversed. The order of the rings is kept.
    pub fn reverse(&self) -> Polygon {
        self.derived(self.rings.iter().map(LinearRing::reverse).collect())
    }

    /// Canonical form: clockwise shell starting at its smallest vertex, followed by the holes
    /// normalized counterclockwise and sorted.
    pub fn normalize(&self) -> Polygon {
        let Some((shell, holes)) = self.rings.split_first() else {
            return self.clone();
        };

        let mut holes: Vec<LinearRing> = holes
            .iter()
            .map(|hole| hole.normalize_oriented(false))
            .collect();
        holes.sort_by(|a, b| a.compare(b));

        let mut rings = Vec::with_capacity(holes.len() + 1);
        rings.push(shell.normalize_oriented(true));
        rings.extend(holes);

        self.derived(rings)
    }

    /// Polygon moved by the given delta of each axis.
    pub fn move_by(&self, deltas: &[f64]) -> Polygon {
        self.derived(self.rings.iter().map(|ring| ring.move_by(deltas)).collect())
    }

    /// Polygon with a vertex inserted into the ring. See [`LinearRing::insert_vertex`].
    pub fn insert_vertex(
        &self,
        ring_index: usize,
        vertex_index: usize,
        values: &[f64],
    ) -> Result<Polygon, GeometryError> {
        self.edit_ring(ring_index, |ring| ring.insert_vertex(vertex_index, values))
    }

    /// Polygon with a vertex of the ring moved. See [`LinearRing::move_vertex`].
    pub fn move_vertex(
        &self,
        ring_index: usize,
        vertex_index: isize,
        values: &[f64],
    ) -> Result<Polygon, GeometryError> {
        self.edit_ring(ring_index, |ring| ring.move_vertex(vertex_index, values))
    }

    /// Polygon with a vertex of the ring deleted. See [`LinearRing::delete_vertex`].
    pub fn delete_vertex(
        &self,
        ring_index: usize,
        vertex_index: isize,
    ) -> Result<Polygon, GeometryError> {
        self.edit_ring(ring_index, |ring| ring.delete_vertex(vertex_index))
    }

    fn edit_ring(
        &self,
        ring_index: usize,
        edit: impl FnOnce(&LinearRing) -> Result<LinearRing, GeometryError>,
    ) -> Result<Polygon, GeometryError> {
        let ring = self.rings.get(ring_index).ok_or_else(|| {
            GeometryError::VertexOutOfRange(format!(
                "ring {ring_index} of polygon with {} rings",
                self.rings.len()
            ))
        })?;

        let mut rings = self.rings.clone();
        rings[ring_index] = edit(ring)?;
        Ok(self.derived(rings))
    }

    /// Copies the polygon into the factory.
    pub fn copy(&self, factory: &GeometryFactory) -> Result<Polygon, GeometryError> {
        let rings = self
            .rings
            .iter()
            .map(|ring| ring.copy(factory))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            rings,
            properties: self.properties.derive_with(factory),
        })
    }

    /// Orders polygons by their shells, then by their holes. Empty polygons come first.
    pub fn compare(&self, other: &Polygon) -> Ordering {
        compare_lists(&self.rings, &other.rings, LinearRing::compare)
    }

    /// Returns true if the polygons have equal rings in the same order, comparing the first
    /// `axis_count` values.
    pub fn equals(&self, axis_count: usize, other: &Polygon) -> bool {
        self.rings.len() == other.rings.len()
            && self
                .rings
                .iter()
                .zip(&other.rings)
                .all(|(a, b)| a.equals(axis_count, b))
    }

    /// Returns true if the rings of the polygons match within the `tolerance`.
    pub fn equals_exact(&self, other: &Polygon, tolerance: f64) -> bool {
        self.rings.len() == other.rings.len()
            && self
                .rings
                .iter()
                .zip(&other.rings)
                .all(|(a, b)| a.equals_exact(b, tolerance))
    }
}

impl_equality!(Polygon);

impl Geometry for Polygon {
    fn factory(&self) -> &GeometryFactory {
        self.properties.factory()
    }

    fn geometry_type(&self) -> GeometryType {
        GeometryType::Polygon
    }

    fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    fn vertices(&self) -> Vertices<'_> {
        let components = self
            .rings
            .iter()
            .enumerate()
            .filter_map(|(i, ring)| {
                ring.sequence()
                    .as_ref()
                    .map(|coordinates| Component::new(coordinates, Prefix::Ring(i)))
            })
            .collect();
        Vertices::new(self.factory(), components)
    }

    fn bounding_box(&self) -> &BoundingBox {
        self.properties.bounding_box(|| self.vertices())
    }

    fn user_data(&self) -> Option<&UserData> {
        self.properties.user_data()
    }

    /// Shell of a polygon without holes, or a multilinestring of all rings.
    fn boundary(&self) -> Geom {
        let factory = self.factory();
        match self.rings.as_slice() {
            [] => Geom::MultiLineString(factory.empty_multi_line_string()),
            [shell] => Geom::LinearRing(shell.clone()),
            rings => Geom::MultiLineString(MultiLineString::from_parts(
                factory.clone(),
                rings.iter().map(|ring| ring.as_line().clone()).collect(),
                None,
            )),
        }
    }

    fn boundary_dimension(&self) -> Dimension {
        if self.is_empty() {
            Dimension::False
        } else {
            Dimension::Curve
        }
    }

    fn length(&self) -> f64 {
        self.rings.iter().map(|ring| ring.length()).sum()
    }

    /// Area of the shell minus the areas of the holes.
    fn area(&self) -> f64 {
        let Some((shell, holes)) = self.rings.split_first() else {
            return 0.0;
        };

        let shell_area = ring_area(shell.sequence());
        holes
            .iter()
            .fold(shell_area, |area, hole| area - ring_area(hole.sequence()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    const SQUARE: [[f64; 2]; 5] = [[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [0.0, 0.0]];
    const OUTER: [[f64; 2]; 5] = [
        [0.0, 0.0],
        [10.0, 0.0],
        [10.0, 10.0],
        [0.0, 10.0],
        [0.0, 0.0],
    ];
    const HOLE: [[f64; 2]; 4] = [[1.0, 1.0], [2.0, 1.0], [1.0, 2.0], [1.0, 1.0]];

    fn polygon(rings: &[&[[f64; 2]]]) -> Polygon {
        GeometryFactory::default()
            .polygon_from_rings(rings)
            .expect("valid polygon")
    }

    #[test]
    fn square_area() {
        let p = polygon(&[&SQUARE]);
        assert_eq!(p.area(), 16.0);
        assert_eq!(p.reverse().area(), 16.0);
        assert_eq!(p.length(), 16.0);
        assert_eq!(p.dimension(), Dimension::Surface);
    }

    #[test]
    fn holes_are_subtracted() {
        let p = polygon(&[&OUTER, &HOLE]);
        assert_abs_diff_eq!(p.area(), 99.5);
        assert_eq!(p.hole_count(), 1);
        assert_eq!(p.ring_count(), 2);
        assert_eq!(p.hole(0).expect("has hole").vertex_count(), 4);
        assert!(p.hole(1).is_none());
        assert_abs_diff_eq!(p.without_holes().area(), 100.0);
    }

    #[test]
    fn empty_polygon() {
        let factory = GeometryFactory::default();
        let p = factory.empty_polygon();
        assert!(p.is_empty());
        assert!(p.shell().is_none());
        assert_eq!(p.area(), 0.0);
        assert_eq!(p.boundary().geometry_type(), GeometryType::MultiLineString);
        assert_eq!(p.boundary_dimension(), Dimension::False);
        assert_eq!(p.normalize(), p);

        let single_empty = factory
            .polygon(vec![factory.empty_linear_ring()])
            .expect("valid polygon");
        assert!(single_empty.is_empty());
    }

    #[test]
    fn rejects_empty_shell_with_holes() {
        let factory = GeometryFactory::default();
        let hole = factory.linear_ring(&HOLE).expect("valid ring");
        assert_matches!(
            factory.polygon(vec![factory.empty_linear_ring(), hole.clone()]),
            Err(GeometryError::InvalidGeometry(_))
        );

        let shell = factory.linear_ring(&OUTER).expect("valid ring");
        assert_matches!(
            factory.polygon(vec![shell, factory.empty_linear_ring()]),
            Err(GeometryError::InvalidGeometry(_))
        );
    }

    #[test]
    fn rectangles() {
        assert!(polygon(&[&SQUARE]).is_rectangle());
        assert!(!polygon(&[&OUTER, &HOLE]).is_rectangle());

        let diamond = [[0.0, 2.0], [2.0, 0.0], [4.0, 2.0], [2.0, 4.0], [0.0, 2.0]];
        assert!(!polygon(&[&diamond]).is_rectangle());
        let bow_tie = [[0.0, 0.0], [4.0, 4.0], [4.0, 0.0], [0.0, 4.0], [0.0, 0.0]];
        assert!(!polygon(&[&bow_tie]).is_rectangle());
    }

    #[test]
    fn normalize_polygon() {
        let p = polygon(&[&OUTER, &HOLE]);
        let normalized = p.normalize();
        let shell = normalized.shell().expect("not empty");
        assert!(shell.is_clockwise());
        let first = shell.vertex_at(0).expect("exists");
        assert_eq!(first.coordinates(), vec![0.0, 0.0]);
        assert!(normalized.hole(0).expect("has hole").is_counter_clockwise());
        assert_eq!(normalized.normalize(), normalized);
        assert_abs_diff_eq!(normalized.area(), p.area());
    }

    #[test]
    fn orientation_of_rings() {
        let p = polygon(&[&OUTER, &HOLE]);
        let cw = p.to_clockwise();
        assert!(cw.shell().expect("not empty").is_clockwise());
        assert!(cw.hole(0).expect("has hole").is_counter_clockwise());

        let ccw = p.to_counter_clockwise();
        assert!(ccw.shell().expect("not empty").is_counter_clockwise());
        assert!(ccw.hole(0).expect("has hole").is_clockwise());
    }

    #[test]
    fn boundary_of_polygon() {
        let single = polygon(&[&SQUARE]).boundary();
        assert_eq!(single.geometry_type(), GeometryType::LinearRing);
        assert_eq!(single.vertex_count(), 5);

        let with_hole = polygon(&[&OUTER, &HOLE]).boundary();
        assert_eq!(with_hole.geometry_type(), GeometryType::MultiLineString);
        assert_eq!(with_hole.vertex_count(), 9);
    }

    #[test]
    fn ring_edits() {
        let p = polygon(&[&OUTER, &HOLE]);
        let moved = p.move_vertex(0, 0, &[-1.0, -1.0]).expect("in range");
        let shell = moved.shell().expect("not empty");
        assert_eq!(shell.coordinates()[8..], [-1.0, -1.0]);
        assert_eq!(moved.hole(0), p.hole(0));

        let inserted = p.insert_vertex(1, 1, &[1.5, 0.5]).expect("in range");
        assert_eq!(inserted.vertex_count(), 10);

        assert_matches!(
            p.delete_vertex(1, 1),
            Err(GeometryError::InvalidGeometry(_))
        );
        assert_matches!(
            p.delete_vertex(2, 0),
            Err(GeometryError::VertexOutOfRange(_))
        );
        let deleted = p.delete_vertex(0, 1).expect("enough vertices");
        assert_eq!(deleted.vertex_count(), 8);
    }

    #[test]
    fn compare_polygons() {
        let small = polygon(&[&SQUARE]);
        let large = polygon(&[&OUTER]);
        let with_hole = polygon(&[&OUTER, &HOLE]);
        assert_eq!(small.compare(&large), Ordering::Less);
        assert_eq!(large.compare(&with_hole), Ordering::Less);
        assert_eq!(with_hole.compare(&with_hole.clone()), Ordering::Equal);
        assert_eq!(
            GeometryFactory::default().empty_polygon().compare(&small),
            Ordering::Less
        );
    }
}
