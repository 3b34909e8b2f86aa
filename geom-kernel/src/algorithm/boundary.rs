use std::fmt::Debug;

use ahash::AHashMap;

use crate::coordinates::CoordinateSequence;
use crate::factory::GeometryFactory;
use crate::geom::Geom;
use crate::geometry::{Geometry, LineString, MultiPoint, Point};

/// Computes the boundary of lineal geometries.
pub trait BoundaryOperator: Debug {
    /// Boundary of the union of the lines, created by the `factory`.
    fn line_boundary(&self, factory: &GeometryFactory, lines: &[&LineString]) -> Geom;
}

/// Boundary rule of OGC simple features: an end point belongs to the boundary if an odd number of
/// line ends meet at it. Closed lines therefore have an empty boundary.
///
/// The result is always a [`MultiPoint`] with the points sorted by X, then Y.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Mod2BoundaryOperator;

impl BoundaryOperator for Mod2BoundaryOperator {
    fn line_boundary(&self, factory: &GeometryFactory, lines: &[&LineString]) -> Geom {
        let mut endpoints: AHashMap<(u64, u64), (Vec<f64>, usize)> = AHashMap::new();
        for line in lines.iter().filter(|line| !line.is_empty()) {
            let sequence = line.sequence();
            for vertex_index in [0, -1] {
                let key = (
                    (sequence.x(vertex_index) + 0.0).to_bits(),
                    (sequence.y(vertex_index) + 0.0).to_bits(),
                );
                endpoints
                    .entry(key)
                    .or_insert_with(|| (sequence.vertex_coordinates(vertex_index), 0))
                    .1 += 1;
            }
        }

        let mut points: Vec<Point> = endpoints
            .into_values()
            .filter(|(_, incidence)| incidence % 2 == 1)
            .map(|(values, _)| {
                let coordinates = factory.precise_coordinates(values.len(), &values);
                Point::from_parts(factory.clone(), coordinates, None)
            })
            .collect();
        points.sort_by(|a, b| a.compare(b));

        let count = points.len();
        log::trace!("Boundary of {} lines has {count} points", lines.len());
        Geom::MultiPoint(MultiPoint::from_parts(factory.clone(), points, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_line_boundary_is_its_ends() {
        let factory = GeometryFactory::default();
        let line = factory
            .line_string(&[[2.0, 2.0], [0.0, 0.0], [1.0, 5.0]])
            .expect("valid line");
        let boundary = Mod2BoundaryOperator.line_boundary(&factory, &[&line]);
        let Geom::MultiPoint(points) = boundary else {
            panic!("boundary must be a multipoint");
        };
        assert_eq!(points.geometry_count(), 2);
        assert_eq!(points.coordinates(), vec![1.0, 5.0, 2.0, 2.0]);
    }

    #[test]
    fn shared_end_is_interior() {
        let factory = GeometryFactory::default();
        let a = factory
            .line_string(&[[0.0, 0.0], [1.0, 1.0]])
            .expect("valid line");
        let b = factory
            .line_string(&[[1.0, 1.0], [2.0, 0.0]])
            .expect("valid line");
        let c = factory
            .line_string(&[[1.0, 1.0], [1.0, 3.0]])
            .expect("valid line");

        let two = Mod2BoundaryOperator.line_boundary(&factory, &[&a, &b]);
        assert_eq!(two.coordinates(), vec![0.0, 0.0, 2.0, 0.0]);

        let three = Mod2BoundaryOperator.line_boundary(&factory, &[&a, &b, &c]);
        assert_eq!(three.vertex_count(), 4);
    }

    #[test]
    fn closed_line_has_empty_boundary() {
        let factory = GeometryFactory::default();
        let line = factory
            .line_string(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]])
            .expect("valid line");
        let boundary = Mod2BoundaryOperator.line_boundary(&factory, &[&line]);
        assert!(boundary.is_empty());
        assert!(Mod2BoundaryOperator.line_boundary(&factory, &[]).is_empty());
    }
}
