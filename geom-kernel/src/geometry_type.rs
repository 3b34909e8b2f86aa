//! See documentation for [`GeometryType`] enum.
use serde::{Deserialize, Serialize};

/// Kind of a geometry.
///
/// The declaration order of the variants is the order used to sort geometries of different kinds:
/// all points before all multipoints, before all lines and so on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Deserialize, Serialize)]
pub enum GeometryType {
    /// [`Point`](crate::Point)
    Point,
    /// [`MultiPoint`](crate::MultiPoint)
    MultiPoint,
    /// [`LineString`](crate::LineString)
    LineString,
    /// [`LinearRing`](crate::LinearRing)
    LinearRing,
    /// [`MultiLineString`](crate::MultiLineString)
    MultiLineString,
    /// [`Polygon`](crate::Polygon)
    Polygon,
    /// [`MultiPolygon`](crate::MultiPolygon)
    MultiPolygon,
    /// [`GeometryCollection`](crate::GeometryCollection)
    GeometryCollection,
}

/// Topological dimension of a geometry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Deserialize, Serialize)]
pub enum Dimension {
    /// Empty geometries and boundaries of points.
    False,
    /// Points.
    Point,
    /// Lines and rings.
    Curve,
    /// Polygons.
    Surface,
}

impl GeometryType {
    /// Name of the type as used by OGC simple features.
    pub fn name(&self) -> &'static str {
        match self {
            GeometryType::Point => "Point",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::LineString => "LineString",
            GeometryType::LinearRing => "LinearRing",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPolygon => "MultiPolygon",
            GeometryType::GeometryCollection => "GeometryCollection",
        }
    }

    /// Dimension of non-empty geometries of this kind. Geometry collections report the largest
    /// dimension of their children, so this method returns [`Dimension::False`] for them.
    pub fn dimension(&self) -> Dimension {
        match self {
            Self::Point | Self::MultiPoint => Dimension::Point,
            Self::LineString | Self::LinearRing | Self::MultiLineString => Dimension::Curve,
            Self::Polygon | Self::MultiPolygon => Dimension::Surface,
            Self::GeometryCollection => Dimension::False,
        }
    }
}

impl std::fmt::Display for GeometryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn types_are_ranked() {
        assert!(GeometryType::Point < GeometryType::MultiPoint);
        assert!(GeometryType::LinearRing < GeometryType::MultiLineString);
        assert!(GeometryType::Polygon < GeometryType::GeometryCollection);
    }

    #[test]
    fn serialize_type() {
        let json = serde_json::to_string(&GeometryType::MultiPolygon).expect("serializable");
        assert_eq!(json, r#""MultiPolygon""#);
        assert_eq!(GeometryType::LinearRing.to_string(), "LinearRing");
    }
}
