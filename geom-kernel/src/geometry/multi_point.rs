use std::cmp::Ordering;

use crate::bounding_box::BoundingBox;
use crate::cursor::{Component, Prefix, Vertices};
use crate::error::GeometryError;
use crate::factory::GeometryFactory;
use crate::geom::Geom;
use crate::geometry::{
    compare_sorted, impl_equality, part_out_of_range, Geometry, Point, Properties, UserData,
};
use crate::geometry_type::{Dimension, GeometryType};

/// A set of points.
#[derive(Debug, Clone)]
pub struct MultiPoint {
    points: Vec<Point>,
    properties: Properties,
}

impl MultiPoint {
    pub(crate) fn from_parts(
        factory: GeometryFactory,
        points: Vec<Point>,
        user_data: Option<UserData>,
    ) -> Self {
        Self {
            points,
            properties: Properties::new(factory, user_data),
        }
    }

    fn derived(&self, points: Vec<Point>) -> Self {
        Self {
            points,
            properties: self.properties.derive(),
        }
    }

    /// Attaches the value to the multipoint.
    pub fn with_user_data(mut self, user_data: UserData) -> Self {
        self.properties.set_user_data(user_data);
        self
    }

    /// Point with the index.
    pub fn geometry(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    /// Same as [`geometry`](Self::geometry).
    pub fn point(&self, index: usize) -> Option<&Point> {
        self.geometry(index)
    }

    /// Number of points.
    pub fn geometry_count(&self) -> usize {
        self.points.len()
    }

    /// All points.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Reverses every point. The order of the points is kept.
    pub fn reverse(&self) -> MultiPoint {
        self.derived(self.points.iter().map(Point::reverse).collect())
    }

    /// Points sorted by X, then by Y.
    pub fn normalize(&self) -> MultiPoint {
        let mut points: Vec<Point> = self.points.iter().map(Point::normalize).collect();
        points.sort_by(|a, b| a.compare(b));
        self.derived(points)
    }

    /// Multipoint moved by the given delta of each axis.
    pub fn move_by(&self, deltas: &[f64]) -> MultiPoint {
        let moved = self.points.iter().map(|point| point.move_by(deltas));
        self.derived(moved.collect())
    }

    /// Multipoint with a new point inserted before `part_index`. An index equal to the number of
    /// points appends it.
    pub fn insert_vertex(
        &self,
        part_index: usize,
        values: &[f64],
    ) -> Result<MultiPoint, GeometryError> {
        if part_index > self.points.len() {
            return Err(part_out_of_range(part_index, self.points.len()));
        }

        let point = self.factory().point(values)?;
        let mut points = self.points.clone();
        points.insert(part_index, point);
        Ok(self.derived(points))
    }

    /// Multipoint with the point moved.
    pub fn move_vertex(
        &self,
        part_index: usize,
        values: &[f64],
    ) -> Result<MultiPoint, GeometryError> {
        let point = self
            .points
            .get(part_index)
            .ok_or_else(|| part_out_of_range(part_index, self.points.len()))?;

        let mut points = self.points.clone();
        points[part_index] = point.move_vertex(values)?;
        Ok(self.derived(points))
    }

    /// Multipoint without the point.
    pub fn delete_vertex(&self, part_index: usize) -> Result<MultiPoint, GeometryError> {
        if part_index >= self.points.len() {
            return Err(part_out_of_range(part_index, self.points.len()));
        }

        let mut points = self.points.clone();
        points.remove(part_index);
        Ok(self.derived(points))
    }

    /// Copies the multipoint into the factory.
    pub fn copy(&self, factory: &GeometryFactory) -> Result<MultiPoint, GeometryError> {
        let points = self
            .points
            .iter()
            .map(|point| point.copy(factory))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            points,
            properties: self.properties.derive_with(factory),
        })
    }

    /// Compares the sorted points of both multipoints.
    pub fn compare(&self, other: &MultiPoint) -> Ordering {
        compare_sorted(&self.points, &other.points, Point::compare)
    }

    /// Returns true if the multipoints have equal points in the same order, comparing the first
    /// `axis_count` values.
    pub fn equals(&self, axis_count: usize, other: &MultiPoint) -> bool {
        self.points.len() == other.points.len()
            && self
                .points
                .iter()
                .zip(&other.points)
                .all(|(a, b)| a.equals(axis_count, b))
    }

    /// Returns true if the points match within the `tolerance`.
    pub fn equals_exact(&self, other: &MultiPoint, tolerance: f64) -> bool {
        self.points.len() == other.points.len()
            && self
                .points
                .iter()
                .zip(&other.points)
                .all(|(a, b)| a.equals_exact(b, tolerance))
    }
}

impl_equality!(MultiPoint);

impl Geometry for MultiPoint {
    fn factory(&self) -> &GeometryFactory {
        self.properties.factory()
    }

    fn geometry_type(&self) -> GeometryType {
        GeometryType::MultiPoint
    }

    fn is_empty(&self) -> bool {
        self.points.iter().all(|point| point.is_empty())
    }

    fn vertices(&self) -> Vertices<'_> {
        let components = self
            .points
            .iter()
            .enumerate()
            .filter_map(|(i, point)| {
                point
                    .sequence()
                    .as_ref()
                    .map(|coordinates| Component::new(coordinates, Prefix::Part(i)))
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

    fn boundary(&self) -> Geom {
        Geom::GeometryCollection(self.factory().empty_geometry_collection())
    }

    fn boundary_dimension(&self) -> Dimension {
        Dimension::False
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VertexId;
    use assert_matches::assert_matches;

    fn multi_point(vertices: &[[f64; 2]]) -> MultiPoint {
        GeometryFactory::default()
            .multi_point_from_vertices(vertices)
            .expect("valid multipoint")
    }

    #[test]
    fn parts_and_vertices() {
        let mp = multi_point(&[[3.0, 3.0], [1.0, 1.0], [2.0, 2.0]]);
        assert_eq!(mp.geometry_count(), 3);
        assert_eq!(mp.point(1).expect("exists").x(), 1.0);
        assert!(mp.geometry(3).is_none());
        assert_eq!(mp.vertex_count(), 3);

        let id = VertexId::PartVertex {
            part: 2,
            vertex: 0,
        };
        let vertex = mp.vertex(id).expect("exists");
        assert_eq!(vertex.coordinates(), vec![2.0, 2.0]);
        assert_eq!(mp.bounding_box(), &BoundingBox::new(1.0, 1.0, 3.0, 3.0));
        assert_eq!(mp.boundary_dimension(), Dimension::False);
        assert!(mp.boundary().is_empty());
    }

    #[test]
    fn normalize_sorts_points() {
        let mp = multi_point(&[[3.0, 3.0], [1.0, 1.0], [2.0, 2.0]]);
        let normalized = mp.normalize();
        let sorted = multi_point(&[[1.0, 1.0], [2.0, 2.0], [3.0, 3.0]]);
        assert_eq!(normalized, sorted);
        assert_eq!(normalized.normalize(), normalized);
        assert_eq!(mp.compare(&normalized), Ordering::Equal);
        assert_eq!(mp.reverse(), mp);
    }

    #[test]
    fn point_edits() {
        let mp = multi_point(&[[1.0, 1.0], [2.0, 2.0]]);
        assert_eq!(
            mp.insert_vertex(2, &[3.0, 3.0]).expect("in range"),
            multi_point(&[[1.0, 1.0], [2.0, 2.0], [3.0, 3.0]])
        );
        assert_eq!(
            mp.move_vertex(0, &[0.0, 0.0]).expect("in range"),
            multi_point(&[[0.0, 0.0], [2.0, 2.0]])
        );
        let deleted = mp.delete_vertex(0).expect("in range");
        assert_eq!(deleted, multi_point(&[[2.0, 2.0]]));
        assert_matches!(mp.delete_vertex(2), Err(GeometryError::VertexOutOfRange(_)));
        assert_matches!(
            mp.insert_vertex(3, &[0.0, 0.0]),
            Err(GeometryError::VertexOutOfRange(_))
        );
    }
}
