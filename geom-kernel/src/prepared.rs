//! See documentation for [`PreparedGeometry`].

use crate::bounding_box::BoundingBox;
use crate::cartesian::{CartesianPoint2d, CartesianPoint2dFloat};
use crate::geom::Geom;
use crate::geometry::Geometry;

/// Geometry wrapped for repeated queries.
///
/// The bounding box is computed once when the geometry is prepared, so the queries do not touch the
/// geometry when the bounding box is enough to answer them.
#[derive(Debug, Clone)]
pub struct PreparedGeometry {
    geometry: Geom,
    bounding_box: BoundingBox,
}

impl PreparedGeometry {
    pub(crate) fn new(geometry: Geom) -> Self {
        let bounding_box = geometry.bounding_box().clone();
        Self {
            geometry,
            bounding_box,
        }
    }

    /// The wrapped geometry.
    pub fn geometry(&self) -> &Geom {
        &self.geometry
    }

    /// Envelope of the wrapped geometry.
    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    pub fn into_inner(self) -> Geom {
        self.geometry
    }

    /// Returns true if the envelope of the geometry intersects the box.
    pub fn intersects_bounding_box(&self, other: &BoundingBox) -> bool {
        self.bounding_box.intersects(other)
    }

    /// Smallest planar distance from the position to a vertex or a segment of the geometry. `0.0`
    /// for empty geometries.
    pub fn distance_to_point(&self, point: &impl CartesianPoint2d<Num = f64>) -> f64 {
        if self.geometry.is_empty() {
            return 0.0;
        }

        let to_vertices = self
            .geometry
            .vertices()
            .map(|vertex| vertex.distance(point));
        let to_segments = self
            .geometry
            .segments()
            .map(|segment| segment.distance_to_point(point));

        to_vertices.chain(to_segments).fold(f64::INFINITY, f64::min)
    }
}

impl From<Geom> for PreparedGeometry {
    fn from(value: Geom) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeometryFactory;

    #[test]
    fn prepared_queries() {
        let factory = GeometryFactory::default();
        let line = factory
            .line_string(&[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0]])
            .expect("valid line");
        let prepared = Geom::from(line).prepare();

        let envelope = BoundingBox::new(0.0, 0.0, 4.0, 4.0);
        assert_eq!(prepared.bounding_box(), &envelope);
        let corner = BoundingBox::new(3.0, 3.0, 5.0, 5.0);
        assert!(prepared.intersects_bounding_box(&corner));
        let outside = BoundingBox::new(5.0, 5.0, 6.0, 6.0);
        assert!(!prepared.intersects_bounding_box(&outside));
        assert_eq!(prepared.distance_to_point(&[2.0, 1.0]), 1.0);
        assert_eq!(prepared.distance_to_point(&[5.0, 4.0]), 1.0);
        assert_eq!(prepared.geometry().vertex_count(), 3);
    }

    #[test]
    fn points_use_vertex_distance() {
        let factory = GeometryFactory::default();
        let prepared = PreparedGeometry::from(Geom::from(factory.point_xy(3.0, 4.0)));
        assert_eq!(prepared.distance_to_point(&[0.0, 0.0]), 5.0);

        let empty = PreparedGeometry::from(Geom::from(factory.empty_point()));
        assert_eq!(empty.distance_to_point(&[0.0, 0.0]), 0.0);
        assert!(empty.into_inner().is_empty());
    }
}
