//! Geometry kernel for planar vector geometries.
//!
//! The crate provides an immutable geometry model ([`Point`], [`LineString`], [`LinearRing`],
//! [`Polygon`], [`MultiPoint`], [`MultiLineString`], [`MultiPolygon`] and [`GeometryCollection`])
//! over flat coordinate buffers with 2 to 4 axes, plus the planar algorithms needed to work with
//! them: lengths, areas, orientation, boundaries, normalization, ordering and merging of lines.
//!
//! # Factories
//!
//! All geometries are created by a [`GeometryFactory`]. The factory defines the spatial reference
//! id, the number of axes and the [`PrecisionModel`] of its geometries. Every value stored in a
//! geometry is rounded to the precision of its factory, and copying a geometry into another factory
//! converts axis count, precision and, when a
//! [`CoordinatesOperation`](operation::CoordinatesOperation) is registered for the pair of ids, the
//! coordinate values themselves.
//!
//! ```
//! use geom_kernel::{Geometry, GeometryFactory};
//!
//! let factory = GeometryFactory::default();
//! let square = factory
//!     .polygon_from_rings(&[&[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [0.0, 0.0]]])
//!     .unwrap();
//!
//! assert_eq!(square.area(), 16.0);
//! assert_eq!(square.length(), 16.0);
//! assert_eq!(square.vertex_count(), 5);
//! ```
//!
//! # Immutability
//!
//! Geometries never change after creation. Reversing, moving, normalizing or editing vertices
//! returns a new geometry that keeps the factory and user data of the original one. All geometry
//! types are `Send + Sync` and cheap to share.
//!
//! # Traversal
//!
//! [`Geometry::vertices`] and [`Geometry::segments`] iterate over any geometry in a uniform way.
//! Each vertex and segment carries an id ([`VertexId`], [`SegmentId`]) that addresses it directly.
//!
//! ```
//! use geom_kernel::{Geometry, GeometryFactory, VertexId};
//!
//! let factory = GeometryFactory::default();
//! let line = factory.line_string(&[[0.0, 0.0], [3.0, 4.0], [3.0, 0.0]]).unwrap();
//!
//! let ids: Vec<VertexId> = line.vertices().map(|v| v.id()).collect();
//! assert_eq!(ids, vec![VertexId::Vertex(0), VertexId::Vertex(1), VertexId::Vertex(2)]);
//! assert_eq!(line.segments().map(|s| s.length()).sum::<f64>(), 9.0);
//! ```

pub mod algorithm;

mod bounding_box;
pub use bounding_box::BoundingBox;

mod cartesian;
pub use cartesian::{CartesianPoint2d, CartesianPoint2dFloat};

mod coordinates;
pub use coordinates::{CoordinateSequence, Coordinates};

mod cursor;
pub use cursor::{Segment, SegmentId, Segments, Vertex, VertexId, Vertices};

mod error;
pub use error::GeometryError;

mod factory;
pub use factory::{FactoryConfig, GeometryFactory, GeometryFactoryBuilder};

mod geom;
pub use geom::Geom;

mod geometry;
pub use geometry::{
    ClosestComponent, End, Geometry, GeometryCollection, LineString, LinearRing, MultiLineString,
    MultiPoint, MultiPolygon, Point, Polygon, UserData,
};

mod geometry_type;
pub use geometry_type::{Dimension, GeometryType};

pub mod operation;

mod precision;
pub use precision::{PrecisionModel, M, X, Y, Z};

mod prepared;
pub use prepared::PreparedGeometry;

#[cfg(feature = "geo-types")]
mod geo_types;
