//! See documentation for [`Geom`] enum.

use std::cmp::Ordering;

use crate::algorithm::BoundaryOperator;
use crate::bounding_box::BoundingBox;
use crate::cursor::{VertexId, Vertices};
use crate::error::GeometryError;
use crate::factory::GeometryFactory;
use crate::geometry::{
    impl_equality, Geometry, GeometryCollection, LineString, LinearRing, MultiLineString,
    MultiPoint, MultiPolygon, Point, Polygon, UserData,
};
use crate::geometry_type::{Dimension, GeometryType};
use crate::prepared::PreparedGeometry;

/// Geometry of any kind.
#[derive(Debug, Clone)]
pub enum Geom {
    /// See [`Point`].
    Point(Point),
    /// See [`LineString`].
    LineString(LineString),
    /// See [`LinearRing`].
    LinearRing(LinearRing),
    /// See [`Polygon`].
    Polygon(Polygon),
    /// See [`MultiPoint`].
    MultiPoint(MultiPoint),
    /// See [`MultiLineString`].
    MultiLineString(MultiLineString),
    /// See [`MultiPolygon`].
    MultiPolygon(MultiPolygon),
    /// See [`GeometryCollection`].
    GeometryCollection(GeometryCollection),
}

/// Applies the same expression to the geometry held by any variant.
macro_rules! dispatch {
    ($geom:expr, $v:ident => $body:expr) => {
        match $geom {
            Geom::Point($v) => $body,
            Geom::LineString($v) => $body,
            Geom::LinearRing($v) => $body,
            Geom::Polygon($v) => $body,
            Geom::MultiPoint($v) => $body,
            Geom::MultiLineString($v) => $body,
            Geom::MultiPolygon($v) => $body,
            Geom::GeometryCollection($v) => $body,
        }
    };
}

/// Same as [`dispatch`] for operations producing a geometry of the same kind.
macro_rules! map_variant {
    ($geom:expr, $v:ident => $body:expr) => {
        match $geom {
            Geom::Point($v) => Geom::Point($body),
            Geom::LineString($v) => Geom::LineString($body),
            Geom::LinearRing($v) => Geom::LinearRing($body),
            Geom::Polygon($v) => Geom::Polygon($body),
            Geom::MultiPoint($v) => Geom::MultiPoint($body),
            Geom::MultiLineString($v) => Geom::MultiLineString($body),
            Geom::MultiPolygon($v) => Geom::MultiPolygon($body),
            Geom::GeometryCollection($v) => Geom::GeometryCollection($body),
        }
    };
}

impl Geom {
    /// Geometry with the order of vertices reversed. See the `reverse` method of each geometry
    /// type.
    pub fn reverse(&self) -> Geom {
        map_variant!(self, v => v.reverse())
    }

    /// Canonical form of the geometry. Two geometries with the same canonical form describe the
    /// same set of positions.
    pub fn normalize(&self) -> Geom {
        map_variant!(self, v => v.normalize())
    }

    /// Geometry moved by the given delta of each axis.
    pub fn move_by(&self, deltas: &[f64]) -> Geom {
        map_variant!(self, v => v.move_by(deltas))
    }

    /// Copies the geometry into the factory.
    ///
    /// If the factories have different coordinate systems, the coordinates are transformed by the
    /// operation the target factory provides. Fails if the transformation breaks the invariants of
    /// the geometry.
    pub fn copy(&self, factory: &GeometryFactory) -> Result<Geom, GeometryError> {
        Ok(map_variant!(self, v => v.copy(factory)?))
    }

    /// Copy of the geometry with the given number of axes.
    pub fn convert(&self, axis_count: usize) -> Result<Geom, GeometryError> {
        if axis_count == self.axis_count() {
            return Ok(self.clone());
        }

        let factory = self.factory().convert_axis_count(axis_count)?;
        self.copy(&factory)
    }

    /// Total order of geometries.
    ///
    /// Empty geometries come first. Geometries of different kinds are ordered by [`GeometryType`],
    /// geometries of the same kind by their vertices.
    pub fn compare(&self, other: &Geom) -> Ordering {
        match (self.is_empty(), other.is_empty()) {
            (true, true) => return self.geometry_type().cmp(&other.geometry_type()),
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }

        match (self, other) {
            (Geom::Point(a), Geom::Point(b)) => a.compare(b),
            (Geom::LineString(a), Geom::LineString(b)) => a.compare(b),
            (Geom::LinearRing(a), Geom::LinearRing(b)) => a.compare(b),
            (Geom::Polygon(a), Geom::Polygon(b)) => a.compare(b),
            (Geom::MultiPoint(a), Geom::MultiPoint(b)) => a.compare(b),
            (Geom::MultiLineString(a), Geom::MultiLineString(b)) => a.compare(b),
            (Geom::MultiPolygon(a), Geom::MultiPolygon(b)) => a.compare(b),
            (Geom::GeometryCollection(a), Geom::GeometryCollection(b)) => a.compare(b),
            _ => self.geometry_type().cmp(&other.geometry_type()),
        }
    }

    /// Returns true if the geometries are of the same kind and have equal vertices, comparing the
    /// first `axis_count` values.
    pub fn equals(&self, axis_count: usize, other: &Geom) -> bool {
        match (self, other) {
            (Geom::Point(a), Geom::Point(b)) => a.equals(axis_count, b),
            (Geom::LineString(a), Geom::LineString(b)) => a.equals(axis_count, b),
            (Geom::LinearRing(a), Geom::LinearRing(b)) => a.equals(axis_count, b),
            (Geom::Polygon(a), Geom::Polygon(b)) => a.equals(axis_count, b),
            (Geom::MultiPoint(a), Geom::MultiPoint(b)) => a.equals(axis_count, b),
            (Geom::MultiLineString(a), Geom::MultiLineString(b)) => a.equals(axis_count, b),
            (Geom::MultiPolygon(a), Geom::MultiPolygon(b)) => a.equals(axis_count, b),
            (Geom::GeometryCollection(a), Geom::GeometryCollection(b)) => a.equals(axis_count, b),
            _ => false,
        }
    }

    /// Returns true if the geometries are of the same kind and their values differ by no more than
    /// `tolerance`.
    pub fn equals_exact(&self, other: &Geom, tolerance: f64) -> bool {
        match (self, other) {
            (Geom::Point(a), Geom::Point(b)) => a.equals_exact(b, tolerance),
            (Geom::LineString(a), Geom::LineString(b)) => a.equals_exact(b, tolerance),
            (Geom::LinearRing(a), Geom::LinearRing(b)) => a.equals_exact(b, tolerance),
            (Geom::Polygon(a), Geom::Polygon(b)) => a.equals_exact(b, tolerance),
            (Geom::MultiPoint(a), Geom::MultiPoint(b)) => a.equals_exact(b, tolerance),
            (Geom::MultiLineString(a), Geom::MultiLineString(b)) => a.equals_exact(b, tolerance),
            (Geom::MultiPolygon(a), Geom::MultiPolygon(b)) => a.equals_exact(b, tolerance),
            (Geom::GeometryCollection(a), Geom::GeometryCollection(b)) => {
                a.equals_exact(b, tolerance)
            }
            _ => false,
        }
    }

    /// Geometry with a new vertex inserted before the addressed one.
    ///
    /// The shape of the id must match the kind of the geometry. For multipoints the new point is
    /// inserted before the addressed part.
    pub fn insert_vertex(&self, id: VertexId, values: &[f64]) -> Result<Geom, GeometryError> {
        match (self, id) {
            (Geom::LineString(v), VertexId::Vertex(vertex)) => {
                let index = insert_index(id, vertex)?;
                Ok(Geom::LineString(v.insert_vertex(index, values)?))
            }
            (Geom::LinearRing(v), VertexId::Vertex(vertex)) => {
                let index = insert_index(id, vertex)?;
                Ok(Geom::LinearRing(v.insert_vertex(index, values)?))
            }
            (Geom::Polygon(v), VertexId::RingVertex { ring, vertex }) => {
                let index = insert_index(id, vertex)?;
                Ok(Geom::Polygon(v.insert_vertex(ring, index, values)?))
            }
            (Geom::MultiPoint(v), VertexId::PartVertex { part, .. }) => {
                Ok(Geom::MultiPoint(v.insert_vertex(part, values)?))
            }
            (Geom::MultiLineString(v), VertexId::PartVertex { part, vertex }) => {
                let index = insert_index(id, vertex)?;
                let edited = v.insert_vertex(part, index, values)?;
                Ok(Geom::MultiLineString(edited))
            }
            (Geom::MultiPolygon(v), VertexId::PartRingVertex { part, ring, vertex }) => {
                let index = insert_index(id, vertex)?;
                let edited = v.insert_vertex(part, ring, index, values)?;
                Ok(Geom::MultiPolygon(edited))
            }
            (Geom::GeometryCollection(v), _) => {
                Ok(Geom::GeometryCollection(v.insert_vertex(id, values)?))
            }
            (Geom::Point(_), VertexId::Vertex(_)) => {
                let message = "cannot insert a vertex into a point";
                Err(GeometryError::invalid(message))
            }
            _ => Err(self.id_mismatch(id)),
        }
    }

    /// Geometry with the addressed vertex moved. Axes not given keep their values.
    pub fn move_vertex(&self, id: VertexId, values: &[f64]) -> Result<Geom, GeometryError> {
        match (self, id) {
            (Geom::Point(v), VertexId::Vertex(0 | -1)) => Ok(Geom::Point(v.move_vertex(values)?)),
            (Geom::LineString(v), VertexId::Vertex(vertex)) => {
                Ok(Geom::LineString(v.move_vertex(vertex, values)?))
            }
            (Geom::LinearRing(v), VertexId::Vertex(vertex)) => {
                Ok(Geom::LinearRing(v.move_vertex(vertex, values)?))
            }
            (Geom::Polygon(v), VertexId::RingVertex { ring, vertex }) => {
                Ok(Geom::Polygon(v.move_vertex(ring, vertex, values)?))
            }
            (
                Geom::MultiPoint(v),
                VertexId::PartVertex {
                    part,
                    vertex: 0 | -1,
                },
            ) => Ok(Geom::MultiPoint(v.move_vertex(part, values)?)),
            (Geom::MultiLineString(v), VertexId::PartVertex { part, vertex }) => {
                Ok(Geom::MultiLineString(v.move_vertex(part, vertex, values)?))
            }
            (Geom::MultiPolygon(v), VertexId::PartRingVertex { part, ring, vertex }) => {
                let edited = v.move_vertex(part, ring, vertex, values)?;
                Ok(Geom::MultiPolygon(edited))
            }
            (Geom::GeometryCollection(v), _) => {
                Ok(Geom::GeometryCollection(v.move_vertex(id, values)?))
            }
            _ => Err(self.id_mismatch(id)),
        }
    }

    /// Geometry without the addressed vertex. Deleting the vertex of a point gives an empty point.
    pub fn delete_vertex(&self, id: VertexId) -> Result<Geom, GeometryError> {
        match (self, id) {
            (Geom::Point(v), VertexId::Vertex(0 | -1)) if !v.is_empty() => {
                Ok(Geom::Point(v.factory().empty_point()))
            }
            (Geom::LineString(v), VertexId::Vertex(vertex)) => {
                Ok(Geom::LineString(v.delete_vertex(vertex)?))
            }
            (Geom::LinearRing(v), VertexId::Vertex(vertex)) => {
                Ok(Geom::LinearRing(v.delete_vertex(vertex)?))
            }
            (Geom::Polygon(v), VertexId::RingVertex { ring, vertex }) => {
                Ok(Geom::Polygon(v.delete_vertex(ring, vertex)?))
            }
            (
                Geom::MultiPoint(v),
                VertexId::PartVertex {
                    part,
                    vertex: 0 | -1,
                },
            ) => Ok(Geom::MultiPoint(v.delete_vertex(part)?)),
            (Geom::MultiLineString(v), VertexId::PartVertex { part, vertex }) => {
                Ok(Geom::MultiLineString(v.delete_vertex(part, vertex)?))
            }
            (Geom::MultiPolygon(v), VertexId::PartRingVertex { part, ring, vertex }) => {
                Ok(Geom::MultiPolygon(v.delete_vertex(part, ring, vertex)?))
            }
            (Geom::GeometryCollection(v), _) => {
                Ok(Geom::GeometryCollection(v.delete_vertex(id)?))
            }
            _ => Err(self.id_mismatch(id)),
        }
    }

    fn id_mismatch(&self, id: VertexId) -> GeometryError {
        let kind = self.geometry_type();
        GeometryError::VertexOutOfRange(format!("{id:?} does not address a vertex of a {kind}"))
    }

    /// Boundary of the geometry with lines handled by the given operator.
    pub fn boundary_with(&self, operator: &dyn BoundaryOperator) -> Geom {
        match self {
            Geom::LineString(v) => operator.line_boundary(v.factory(), &[v]),
            Geom::LinearRing(v) => operator.line_boundary(v.factory(), &[v.as_line()]),
            Geom::MultiLineString(v) => v.boundary_with(operator),
            _ => self.boundary(),
        }
    }

    /// Wraps the geometry for repeated queries.
    pub fn prepare(self) -> PreparedGeometry {
        PreparedGeometry::new(self)
    }
}

fn insert_index(id: VertexId, vertex: isize) -> Result<usize, GeometryError> {
    usize::try_from(vertex).map_err(|_| {
        let message = format!("cannot insert a vertex at {id:?}");
        GeometryError::VertexOutOfRange(message)
    })
}

impl_equality!(Geom);

impl Geometry for Geom {
    fn factory(&self) -> &GeometryFactory {
        dispatch!(self, v => v.factory())
    }

    fn geometry_type(&self) -> GeometryType {
        dispatch!(self, v => v.geometry_type())
    }

    fn is_empty(&self) -> bool {
        dispatch!(self, v => v.is_empty())
    }

    fn vertices(&self) -> Vertices<'_> {
        dispatch!(self, v => v.vertices())
    }

    fn bounding_box(&self) -> &BoundingBox {
        dispatch!(self, v => v.bounding_box())
    }

    fn user_data(&self) -> Option<&UserData> {
        dispatch!(self, v => v.user_data())
    }

    fn boundary(&self) -> Geom {
        dispatch!(self, v => v.boundary())
    }

    fn boundary_dimension(&self) -> Dimension {
        dispatch!(self, v => v.boundary_dimension())
    }

    fn dimension(&self) -> Dimension {
        dispatch!(self, v => v.dimension())
    }

    fn length(&self) -> f64 {
        dispatch!(self, v => v.length())
    }

    fn area(&self) -> f64 {
        dispatch!(self, v => v.area())
    }
}

impl From<Point> for Geom {
    fn from(value: Point) -> Self {
        Self::Point(value)
    }
}

impl From<LineString> for Geom {
    fn from(value: LineString) -> Self {
        Self::LineString(value)
    }
}

impl From<LinearRing> for Geom {
    fn from(value: LinearRing) -> Self {
        Self::LinearRing(value)
    }
}

impl From<Polygon> for Geom {
    fn from(value: Polygon) -> Self {
        Self::Polygon(value)
    }
}

impl From<MultiPoint> for Geom {
    fn from(value: MultiPoint) -> Self {
        Self::MultiPoint(value)
    }
}

impl From<MultiLineString> for Geom {
    fn from(value: MultiLineString) -> Self {
        Self::MultiLineString(value)
    }
}

impl From<MultiPolygon> for Geom {
    fn from(value: MultiPolygon) -> Self {
        Self::MultiPolygon(value)
    }
}

impl From<GeometryCollection> for Geom {
    fn from(value: GeometryCollection) -> Self {
        Self::GeometryCollection(value)
    }
}
