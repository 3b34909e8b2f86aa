use crate::error::GeometryError;
use crate::factory::GeometryFactory;
use crate::geo_types::line_string::flat_values;
use crate::geometry::{LinearRing, Polygon};

impl From<&Polygon> for geo_types::Polygon<f64> {
    fn from(value: &Polygon) -> Self {
        let exterior = value
            .shell()
            .map(|shell| shell.as_line().into())
            .unwrap_or_else(|| geo_types::LineString::new(vec![]));
        let interiors = value
            .rings()
            .iter()
            .skip(1)
            .map(|hole| hole.as_line().into())
            .collect();

        geo_types::Polygon::new(exterior, interiors)
    }
}

impl GeometryFactory {
    /// Creates a polygon from a [`geo_types::Polygon`]. A polygon with an empty exterior becomes an
    /// empty polygon.
    pub fn from_geo_polygon(
        &self,
        polygon: &geo_types::Polygon<f64>,
    ) -> Result<Polygon, GeometryError> {
        if polygon.exterior().0.is_empty() {
            return Ok(self.empty_polygon());
        }

        let rings = std::iter::once(polygon.exterior())
            .chain(polygon.interiors())
            .map(|ring| self.linear_ring_flat(2, &flat_values(ring)))
            .collect::<Result<Vec<LinearRing>, _>>()?;
        self.polygon(rings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Geometry;
    use geo_types::polygon;

    #[test]
    fn polygon_conversion() {
        let factory = GeometryFactory::default();
        let polygon = factory
            .polygon_from_rings(&[
                &[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [0.0, 0.0]],
                &[[1.0, 1.0], [2.0, 1.0], [1.0, 2.0], [1.0, 1.0]],
            ])
            .expect("valid polygon");

        let geo: geo_types::Polygon<f64> = (&polygon).into();
        assert_eq!(geo.exterior().0.len(), 5);
        assert_eq!(geo.interiors().len(), 1);

        let back = factory.from_geo_polygon(&geo).expect("valid polygon");
        assert_eq!(back, polygon);
        assert_eq!(back.area(), 15.5);
    }

    #[test]
    fn unclosed_exterior_is_closed_by_geo_types() {
        let factory = GeometryFactory::default();
        let geo = polygon![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0), (x: 2.0, y: 2.0)];
        let polygon = factory.from_geo_polygon(&geo).expect("valid polygon");
        assert_eq!(polygon.vertex_count(), 4);
        assert_eq!(polygon.area(), 2.0);

        let empty = geo_types::Polygon::new(geo_types::LineString::new(vec![]), vec![]);
        assert!(factory.from_geo_polygon(&empty).expect("empty").is_empty());
    }
}
