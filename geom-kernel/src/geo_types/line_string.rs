use geo_types::{coord, Coord};

use crate::error::GeometryError;
use crate::factory::GeometryFactory;
use crate::geometry::{Geometry, LineString};

impl From<&LineString> for geo_types::LineString<f64> {
    fn from(value: &LineString) -> Self {
        value
            .vertices()
            .map(|vertex| coord!(x: vertex.x(), y: vertex.y()))
            .collect::<Vec<Coord<f64>>>()
            .into()
    }
}

impl GeometryFactory {
    /// Creates a line from a [`geo_types::LineString`]. A line without coordinates becomes an empty
    /// line.
    pub fn from_geo_line_string(
        &self,
        line: &geo_types::LineString<f64>,
    ) -> Result<LineString, GeometryError> {
        self.line_string_flat(2, &flat_values(line))
    }
}

pub(super) fn flat_values(line: &geo_types::LineString<f64>) -> Vec<f64> {
    line.coords().flat_map(|c| [c.x, c.y]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn line_conversion() {
        let factory = GeometryFactory::default();
        let line = factory
            .line_string(&[[0.0, 0.0], [1.0, 1.0], [2.0, 0.0]])
            .expect("valid line");

        let geo: geo_types::LineString<f64> = (&line).into();
        assert_eq!(geo.0.len(), 3);
        assert_eq!(geo.0[1], coord!(x: 1.0, y: 1.0));

        let restored = factory.from_geo_line_string(&geo).expect("valid line");
        assert_eq!(restored, line);
    }

    #[test]
    fn empty_and_invalid_lines() {
        let factory = GeometryFactory::default();
        let empty = factory
            .from_geo_line_string(&geo_types::LineString::new(vec![]))
            .expect("empty line");
        assert!(empty.is_empty());

        let single = geo_types::LineString::new(vec![coord!(x: 1.0, y: 1.0)]);
        assert_matches!(
            factory.from_geo_line_string(&single),
            Err(GeometryError::InvalidGeometry(_))
        );
    }
}
