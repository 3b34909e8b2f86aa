//! Uniform traversal of vertices and segments of any geometry.
//!
//! [`Vertices`] and [`Segments`] are lazy, finite iterators borrowing the geometry they were
//! obtained from. Calling [`Geometry::vertices`](crate::Geometry::vertices) again starts a new
//! traversal; traversals never share state.
//!
//! Every vertex and segment has an id ([`VertexId`], [`SegmentId`]) whose shape matches how deeply
//! it is nested in the geometry. An id can be used to address the vertex directly with
//! [`Vertices::get`].

use serde::{Deserialize, Serialize};

use crate::coordinates::Coordinates;

mod segment;
pub use segment::{Segment, Segments};

mod vertex;
pub use vertex::{Vertex, Vertices};

/// Address of a vertex inside a geometry.
///
/// A negative `vertex` index is counted from the end of its line or ring.
///
/// For children of a [`GeometryCollection`](crate::GeometryCollection) that consist of several
/// parts themselves (polygons and multi geometries), `ring` is the position of the part or ring in
/// the child's own vertex order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VertexId {
    /// Vertex of a point or a line.
    Vertex(isize),
    /// Vertex of a polygon ring. Ring `0` is the shell.
    RingVertex {
        /// Ring index.
        ring: usize,
        /// Vertex index inside the ring.
        vertex: isize,
    },
    /// Vertex of a part of a multipoint, multilinestring or collection.
    PartVertex {
        /// Part index.
        part: usize,
        /// Vertex index inside the part.
        vertex: isize,
    },
    /// Vertex of a ring of a multipolygon part.
    PartRingVertex {
        /// Part index.
        part: usize,
        /// Ring index inside the part.
        ring: usize,
        /// Vertex index inside the ring.
        vertex: isize,
    },
}

/// Address of a segment inside a geometry. Segment `i` goes from vertex `i` to vertex `i + 1`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentId {
    /// Segment of a line.
    Segment(isize),
    /// Segment of a polygon ring.
    RingSegment {
        /// Ring index.
        ring: usize,
        /// Segment index inside the ring.
        segment: isize,
    },
    /// Segment of a part of a multilinestring or collection.
    PartSegment {
        /// Part index.
        part: usize,
        /// Segment index inside the part.
        segment: isize,
    },
    /// Segment of a ring of a multipolygon part.
    PartRingSegment {
        /// Part index.
        part: usize,
        /// Ring index inside the part.
        ring: usize,
        /// Segment index inside the ring.
        segment: isize,
    },
}

impl VertexId {
    /// Index of the vertex inside its line or ring.
    pub fn vertex_index(&self) -> isize {
        self.split().1
    }

    pub(crate) fn split(self) -> (Prefix, isize) {
        match self {
            Self::Vertex(vertex) => (Prefix::None, vertex),
            Self::RingVertex { ring, vertex } => (Prefix::Ring(ring), vertex),
            Self::PartVertex { part, vertex } => (Prefix::Part(part), vertex),
            Self::PartRingVertex { part, ring, vertex } => (Prefix::PartRing(part, ring), vertex),
        }
    }
}

impl SegmentId {
    /// Index of the segment inside its line or ring.
    pub fn segment_index(&self) -> isize {
        self.split().1
    }

    pub(crate) fn split(self) -> (Prefix, isize) {
        match self {
            Self::Segment(segment) => (Prefix::None, segment),
            Self::RingSegment { ring, segment } => (Prefix::Ring(ring), segment),
            Self::PartSegment { part, segment } => (Prefix::Part(part), segment),
            Self::PartRingSegment {
                part,
                ring,
                segment,
            } => (Prefix::PartRing(part, ring), segment),
        }
    }
}

/// Position of a coordinate buffer inside a geometry.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Prefix {
    None,
    Ring(usize),
    Part(usize),
    PartRing(usize, usize),
}

impl Prefix {
    pub(crate) fn vertex_id(self, vertex: isize) -> VertexId {
        match self {
            Prefix::None => VertexId::Vertex(vertex),
            Prefix::Ring(ring) => VertexId::RingVertex { ring, vertex },
            Prefix::Part(part) => VertexId::PartVertex { part, vertex },
            Prefix::PartRing(part, ring) => VertexId::PartRingVertex { part, ring, vertex },
        }
    }

    pub(crate) fn segment_id(self, segment: isize) -> SegmentId {
        match self {
            Prefix::None => SegmentId::Segment(segment),
            Prefix::Ring(ring) => SegmentId::RingSegment { ring, segment },
            Prefix::Part(part) => SegmentId::PartSegment { part, segment },
            Prefix::PartRing(part, ring) => SegmentId::PartRingSegment {
                part,
                ring,
                segment,
            },
        }
    }

    /// Prefix of a component of the `part`-th child of a collection, `index` being the position of
    /// the component in the child's own traversal.
    pub(crate) fn nested(self, part: usize, index: usize) -> Prefix {
        match self {
            Prefix::None => Prefix::Part(part),
            _ => Prefix::PartRing(part, index),
        }
    }
}

/// One coordinate buffer of a geometry with its position.
#[derive(Debug, Copy, Clone)]
pub(crate) struct Component<'a> {
    pub(crate) coordinates: &'a Coordinates,
    pub(crate) prefix: Prefix,
}

impl<'a> Component<'a> {
    pub(crate) fn new(coordinates: &'a Coordinates, prefix: Prefix) -> Self {
        Self {
            coordinates,
            prefix,
        }
    }
}
