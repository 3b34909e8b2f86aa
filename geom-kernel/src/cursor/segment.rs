use nalgebra::Point2;

use crate::algorithm::orientation_index;
use crate::bounding_box::BoundingBox;
use crate::cartesian::{CartesianPoint2d, CartesianPoint2dFloat};
use crate::coordinates::{resolve_index, CoordinateSequence, Coordinates};
use crate::cursor::{Component, Prefix, SegmentId, Vertex};
use crate::factory::GeometryFactory;

/// A straight segment between two consecutive vertices of a line or ring.
#[derive(Debug, Copy, Clone)]
pub struct Segment<'a> {
    factory: &'a GeometryFactory,
    coordinates: &'a Coordinates,
    index: usize,
    prefix: Prefix,
}

impl<'a> Segment<'a> {
    pub(crate) fn new(
        factory: &'a GeometryFactory,
        coordinates: &'a Coordinates,
        index: usize,
        prefix: Prefix,
    ) -> Self {
        Self {
            factory,
            coordinates,
            index,
            prefix,
        }
    }

    /// Address of the segment in its geometry.
    pub fn id(&self) -> SegmentId {
        self.prefix.segment_id(self.index as isize)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Start vertex.
    pub fn from(&self) -> Vertex<'a> {
        Vertex::new(self.factory, self.coordinates, self.index, self.prefix)
    }

    /// End vertex.
    pub fn to(&self) -> Vertex<'a> {
        Vertex::new(self.factory, self.coordinates, self.index + 1, self.prefix)
    }

    /// Value of the axis at the start (`end_index == 0`) or the end (`end_index == 1`) of the
    /// segment.
    pub fn coordinate(&self, end_index: usize, axis_index: usize) -> f64 {
        if end_index > 1 {
            return f64::NAN;
        }
        self.coordinates
            .coordinate((self.index + end_index) as isize, axis_index)
    }

    /// Euclidean length in X/Y.
    pub fn length(&self) -> f64 {
        self.from().distance(&self.to())
    }

    /// Returns true if both ends have the same X and Y.
    pub fn is_zero_length(&self) -> bool {
        self.from().equal(&self.to())
    }

    /// Returns true if the segment starts at the first vertex of its line or ring.
    pub fn is_line_start(&self) -> bool {
        self.index == 0
    }

    /// Returns true if the segment ends at the last vertex of its line or ring.
    pub fn is_line_end(&self) -> bool {
        self.index + 2 == self.coordinates.vertex_count()
    }

    /// Shortest euclidean distance (squared) between a point and the segment:
    ///
    /// * if the normal from the point to the segment ends inside the segment, the returned value is
    ///   the squared length of the normal
    /// * if the normal from the point to the segment ends outside of the segment, the returned
    ///   value is the smaller one of the distances between the point and the segment's endpoints
    pub fn distance_to_point_sq(&self, point: &impl CartesianPoint2d<Num = f64>) -> f64 {
        let from = self.from();
        let to = self.to();
        if from.equal(&to) {
            return from.distance_sq(point);
        }

        let ds = to.sub(&from);
        let dp = point.sub(&from);
        let ds_len = ds.x * ds.x + ds.y * ds.y;

        let r = (dp.x * ds.x + dp.y * ds.y) / ds_len;
        if r <= 0.0 {
            from.distance_sq(point)
        } else if r >= 1.0 {
            to.distance_sq(point)
        } else {
            let s = (dp.y * ds.x - dp.x * ds.y) / ds_len;
            (s * s) * ds_len
        }
    }

    /// Shortest euclidean distance between a point and the segment.
    pub fn distance_to_point(&self, point: &impl CartesianPoint2d<Num = f64>) -> f64 {
        self.distance_to_point_sq(point).sqrt()
    }

    /// Position of the projection of the point onto the line through the segment: `0` at the start,
    /// `1` at the end.
    pub fn projection_factor(&self, point: &impl CartesianPoint2d<Num = f64>) -> f64 {
        let from = self.from();
        let ds = self.to().sub(&from);
        let dp = point.sub(&from);
        let ds_len = ds.x * ds.x + ds.y * ds.y;
        if ds_len == 0.0 {
            return 0.0;
        }

        (dp.x * ds.x + dp.y * ds.y) / ds_len
    }

    /// Closest position to the point on the segment.
    pub fn project(&self, point: &impl CartesianPoint2d<Num = f64>) -> Point2<f64> {
        let factor = self.projection_factor(point).clamp(0.0, 1.0);
        let from = self.from();
        from.add(self.to().sub(&from) * factor)
    }

    /// See [`orientation_index`].
    pub fn orientation_index(&self, point: &impl CartesianPoint2d<Num = f64>) -> i32 {
        orientation_index(&self.from(), &self.to(), point)
    }

    /// Envelope of the segment.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(
            self.coordinate(0, 0),
            self.coordinate(0, 1),
            self.coordinate(1, 0),
            self.coordinate(1, 1),
        )
    }
}

/// Iterator over all segments of a geometry, in the same order as [`Vertices`](crate::Vertices).
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    factory: &'a GeometryFactory,
    components: Vec<Component<'a>>,
    component_index: usize,
    segment_index: usize,
}

impl<'a> Segments<'a> {
    pub(crate) fn new(factory: &'a GeometryFactory, components: Vec<Component<'a>>) -> Self {
        Self {
            factory,
            components,
            component_index: 0,
            segment_index: 0,
        }
    }

    /// Returns the segment with the given address, if it exists.
    pub fn get(&self, id: SegmentId) -> Option<Segment<'a>> {
        let (prefix, segment_index) = id.split();
        let component = self.components.iter().find(|c| c.prefix == prefix)?;
        let index = resolve_index(segment_index, segment_count(component))?;
        let segment = Segment::new(self.factory, component.coordinates, index, prefix);
        Some(segment)
    }
}

fn segment_count(component: &Component) -> usize {
    component.coordinates.vertex_count().saturating_sub(1)
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let component = self.components.get(self.component_index)?;
            if self.segment_index < segment_count(component) {
                let segment = Segment::new(
                    self.factory,
                    component.coordinates,
                    self.segment_index,
                    component.prefix,
                );
                self.segment_index += 1;
                return Some(segment);
            }

            self.component_index += 1;
            self.segment_index = 0;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .components
            .iter()
            .skip(self.component_index)
            .map(segment_count)
            .sum::<usize>()
            .saturating_sub(self.segment_index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Segments<'_> {}
