use geo_types::{coord, Coord};

use crate::cartesian::CartesianPoint2d;
use crate::factory::GeometryFactory;
use crate::geometry::Point;

impl CartesianPoint2d for Coord<f64> {
    type Num = f64;

    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }
}

impl CartesianPoint2d for geo_types::Point<f64> {
    type Num = f64;

    fn x(&self) -> f64 {
        self.0.x
    }

    fn y(&self) -> f64 {
        self.0.y
    }
}

/// Empty points are converted into a point with `NaN` coordinates.
impl From<&Point> for geo_types::Point<f64> {
    fn from(value: &Point) -> Self {
        geo_types::Point(coord!(x: value.x(), y: value.y()))
    }
}

impl GeometryFactory {
    /// Creates a point from a [`geo_types::Point`]. A point with a `NaN` coordinate becomes an
    /// empty point.
    pub fn from_geo_point(&self, point: &geo_types::Point<f64>) -> Point {
        if point.0.x.is_nan() || point.0.y.is_nan() {
            return self.empty_point();
        }

        self.point_xy(point.0.x, point.0.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartesian::CartesianPoint2dFloat;
    use crate::geometry::Geometry;

    #[test]
    fn point_conversion() {
        let factory = GeometryFactory::default();
        let point = factory.point_xy(1.0, 2.0);
        let geo: geo_types::Point<f64> = (&point).into();
        assert_eq!(geo, geo_types::Point::new(1.0, 2.0));
        assert_eq!(factory.from_geo_point(&geo), point);

        let empty: geo_types::Point<f64> = (&factory.empty_point()).into();
        assert!(empty.0.x.is_nan());
        assert!(factory.from_geo_point(&empty).is_empty());
    }

    #[test]
    fn geo_types_are_cartesian_points() {
        let coord = coord!(x: 3.0, y: 4.0);
        assert_eq!(coord.distance(&[0.0, 0.0]), 5.0);
        assert_eq!(geo_types::Point(coord).distance(&[3.0, 0.0]), 4.0);
    }
}
