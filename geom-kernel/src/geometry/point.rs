use std::cmp::Ordering;

use crate::bounding_box::BoundingBox;
use crate::cartesian::{CartesianPoint2d, CartesianPoint2dFloat};
use crate::coordinates::{compare_vertices, CoordinateSequence, Coordinates};
use crate::cursor::{Component, Prefix, Vertices};
use crate::error::GeometryError;
use crate::factory::GeometryFactory;
use crate::geom::Geom;
use crate::geometry::{
    copy_sequence, impl_equality, move_sequence, sequences_match, Geometry, Properties, UserData,
};
use crate::geometry_type::{Dimension, GeometryType};
use crate::precision::{M, X, Y, Z};

/// A single position.
#[derive(Debug, Clone)]
pub struct Point {
    coordinates: Option<Coordinates>,
    properties: Properties,
}

impl Point {
    pub(crate) fn from_parts(
        factory: GeometryFactory,
        coordinates: Option<Coordinates>,
        user_data: Option<UserData>,
    ) -> Self {
        Self {
            coordinates,
            properties: Properties::new(factory, user_data),
        }
    }

    pub(crate) fn sequence(&self) -> &Option<Coordinates> {
        &self.coordinates
    }

    /// Attaches the value to the point.
    pub fn with_user_data(mut self, user_data: UserData) -> Self {
        self.properties.set_user_data(user_data);
        self
    }

    /// X coordinate, `NaN` for an empty point.
    pub fn x(&self) -> f64 {
        self.coordinates.coordinate(0, X)
    }

    /// Y coordinate, `NaN` for an empty point.
    pub fn y(&self) -> f64 {
        self.coordinates.coordinate(0, Y)
    }

    pub fn z(&self) -> f64 {
        self.coordinates.coordinate(0, Z)
    }

    pub fn m(&self) -> f64 {
        self.coordinates.coordinate(0, M)
    }

    /// Planar distance to the other point. `0.0` if either point is empty.
    pub fn distance(&self, other: &Point) -> f64 {
        if self.is_empty() || other.is_empty() {
            return 0.0;
        }

        CartesianPoint2dFloat::distance(self, other)
    }

    /// Orders points by X, then by Y. Z and M are not compared. Empty points come first.
    pub fn compare(&self, other: &Point) -> Ordering {
        match (self.is_empty(), other.is_empty()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => compare_vertices(&self.coordinates, 0, &other.coordinates, 0),
        }
    }

    /// Point moved by the given delta of each axis.
    pub fn move_by(&self, deltas: &[f64]) -> Point {
        Self {
            coordinates: move_sequence(self.factory(), &self.coordinates, deltas),
            properties: self.properties.derive(),
        }
    }

    /// Point with its only vertex replaced. Axes not given keep their values.
    pub fn move_vertex(&self, values: &[f64]) -> Result<Point, GeometryError> {
        let Some(coordinates) = &self.coordinates else {
            return Err(GeometryError::VertexOutOfRange("point is empty".into()));
        };

        let mut current = coordinates.values().to_vec();
        for (value, new_value) in current.iter_mut().zip(values) {
            *value = *new_value;
        }

        let coordinates = self.factory().precise_coordinates(current.len(), &current);
        Ok(Self {
            coordinates,
            properties: self.properties.derive(),
        })
    }

    /// A point is its own reverse.
    pub fn reverse(&self) -> Point {
        self.clone()
    }

    /// A point is always in normal form.
    pub fn normalize(&self) -> Point {
        self.clone()
    }

    /// Copies the point into the factory.
    pub fn copy(&self, factory: &GeometryFactory) -> Result<Point, GeometryError> {
        Ok(Self {
            coordinates: copy_sequence(factory, self.factory(), &self.coordinates),
            properties: self.properties.derive_with(factory),
        })
    }

    /// Returns true if the first `axis_count` values of the points are equal.
    pub fn equals(&self, axis_count: usize, other: &Point) -> bool {
        sequences_match(&self.coordinates, &other.coordinates, axis_count, 0.0)
    }

    /// Returns true if all the values of the points differ by no more than `tolerance`.
    pub fn equals_exact(&self, other: &Point, tolerance: f64) -> bool {
        sequences_match(&self.coordinates, &other.coordinates, usize::MAX, tolerance)
    }
}

impl_equality!(Point);

impl Geometry for Point {
    fn factory(&self) -> &GeometryFactory {
        self.properties.factory()
    }

    fn geometry_type(&self) -> GeometryType {
        GeometryType::Point
    }

    fn is_empty(&self) -> bool {
        self.coordinates.is_none()
    }

    fn vertices(&self) -> Vertices<'_> {
        let components = self
            .coordinates
            .iter()
            .map(|coordinates| Component::new(coordinates, Prefix::None))
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

impl CartesianPoint2d for Point {
    type Num = f64;

    fn x(&self) -> f64 {
        self.coordinates.coordinate(0, X)
    }

    fn y(&self) -> f64 {
        self.coordinates.coordinate(0, Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    #[test]
    fn point_accessors() {
        let factory = GeometryFactory::new(4).expect("valid factory");
        let point = factory.point(&[1.0, 2.0, 3.0]).expect("valid point");
        assert_eq!((point.x(), point.y(), point.z()), (1.0, 2.0, 3.0));
        assert!(point.m().is_nan());
        assert_eq!(point.vertex_count(), 1);
        assert_eq!(point.coordinate(0, 1), 2.0);
        assert!(point.coordinate(1, 1).is_nan());
        assert!(point.coordinate(0, 7).is_nan());
    }

    #[test]
    fn empty_point() {
        let factory = GeometryFactory::default();
        let point = factory.empty_point();
        assert!(point.is_empty());
        assert!(point.x().is_nan());
        assert!(point.bounding_box().is_empty());
        assert_eq!(point.distance(&factory.point_xy(1.0, 1.0)), 0.0);
        assert_matches!(
            point.move_vertex(&[1.0, 1.0]),
            Err(GeometryError::VertexOutOfRange(_))
        );
    }

    #[test]
    fn compare_points() {
        let factory = GeometryFactory::default();
        let a = factory.point_xy(0.0, 5.0);
        let b = factory.point_xy(1.0, 0.0);
        assert_eq!(a.compare(&b), Ordering::Less);
        assert_eq!(b.compare(&a), Ordering::Greater);
        assert_eq!(factory.empty_point().compare(&a), Ordering::Less);
        assert_eq!(a.compare(&a.clone()), Ordering::Equal);
    }

    #[test]
    fn compare_ignores_z_and_m() {
        let factory = GeometryFactory::new(4).expect("valid factory");
        let low = factory.point(&[1.0, 2.0, 0.0, 5.0]).expect("valid point");
        let high = factory.point(&[1.0, 2.0, 9.0, 1.0]).expect("valid point");
        assert_eq!(low.compare(&high), Ordering::Equal);
        assert_eq!(high.compare(&low), Ordering::Equal);
        assert_ne!(low, high);

        let right = factory.point(&[1.5, 0.0, 0.0, 0.0]).expect("valid point");
        assert_eq!(high.compare(&right), Ordering::Less);
    }

    #[test]
    fn move_and_distance() {
        let factory = GeometryFactory::default();
        let point = factory.point_xy(1.0, 1.0).move_by(&[2.0, 3.0]);
        assert_eq!(point.coordinates(), vec![3.0, 4.0]);
        assert_abs_diff_eq!(point.distance(&factory.point_xy(0.0, 0.0)), 5.0);

        let moved = point.move_vertex(&[10.0]).expect("point is not empty");
        assert_eq!(moved.coordinates(), vec![10.0, 4.0]);
    }

    #[test]
    fn point_boundary_is_empty() {
        let factory = GeometryFactory::default();
        let boundary = factory.point_xy(1.0, 1.0).boundary();
        assert!(boundary.is_empty());
        assert_eq!(boundary.geometry_type(), GeometryType::GeometryCollection);
    }

    #[test]
    fn bounding_box_is_cached() {
        let factory = GeometryFactory::default();
        let point = factory.point_xy(1.0, 2.0);
        let first = point.bounding_box() as *const BoundingBox;
        let second = point.bounding_box() as *const BoundingBox;
        assert_eq!(first, second);
        assert_eq!(point.bounding_box(), &BoundingBox::new(1.0, 2.0, 1.0, 2.0));
    }

    #[test]
    fn equality() {
        let factory = GeometryFactory::new(3).expect("valid factory");
        let a = factory.point(&[1.0, 2.0, 3.0]).expect("valid point");
        let b = factory.point(&[1.0, 2.0, 4.0]).expect("valid point");
        assert!(a.equals(2, &b));
        assert!(!a.equals(3, &b));
        assert_ne!(a, b);
        assert_abs_diff_eq!(a, b, epsilon = 1.0);
    }
}
