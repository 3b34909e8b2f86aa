use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::algorithm::{
    compare_sequences, is_counter_clockwise, sequence_length, BoundaryOperator,
    Mod2BoundaryOperator,
};
use crate::bounding_box::BoundingBox;
use crate::cartesian::{CartesianPoint2d, CartesianPoint2dFloat};
use crate::coordinates::{
    compare_vertices, resolve_index, CoordinateSequence, Coordinates, CoordinatesBuilder,
};
use crate::cursor::{Component, Prefix, Segment, SegmentId, Vertex, VertexId, Vertices};
use crate::error::GeometryError;
use crate::factory::{validate_line, GeometryFactory};
use crate::geom::Geom;
use crate::geometry::{
    copy_sequence, impl_equality, move_sequence, sequences_match, vertex_values, Geometry, Point,
    Properties, UserData,
};
use crate::geometry_type::{Dimension, GeometryType};
use crate::precision::{X, Y};

/// A sequence of connected straight segments.
///
/// A line has either no vertices or at least two.
#[derive(Debug, Clone)]
pub struct LineString {
    coordinates: Option<Coordinates>,
    properties: Properties,
}

/// One of the two ends of a line.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum End {
    /// First vertex.
    From,
    /// Last vertex.
    To,
}

/// Part of a line closest to a position, see [`LineString::closest_component`].
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClosestComponent {
    /// A vertex is at least as close as any segment.
    Vertex {
        /// Vertex index.
        index: usize,
        /// Distance to the vertex.
        distance: f64,
    },
    /// The interior of a segment is closer than any vertex.
    Segment {
        /// Segment index.
        index: usize,
        /// Distance to the segment.
        distance: f64,
    },
}

#[derive(Debug, Copy, Clone)]
enum Junction {
    OtherThenThis,
    ThisThenOther,
    ReversedOtherThenThis,
    ThisThenReversedOther,
}

impl LineString {
    pub(crate) fn from_parts(
        factory: GeometryFactory,
        coordinates: Option<Coordinates>,
        user_data: Option<UserData>,
    ) -> Self {
        Self {
            coordinates,
            properties: Properties::new(factory, user_data),
        }
    }

    pub(crate) fn sequence(&self) -> &Option<Coordinates> {
        &self.coordinates
    }

    /// Line of the same factory and user data with other vertices.
    fn derived(&self, coordinates: Option<Coordinates>) -> Self {
        Self {
            coordinates,
            properties: self.properties.derive(),
        }
    }

    /// Same as [`derived`](Self::derived) for values with the line's axis count. Values are rounded
    /// to the factory's precision and fewer than 2 vertices give an empty line.
    pub(crate) fn derived_from_values(&self, values: &[f64]) -> Self {
        let axis_count = self.axis_count();
        if values.len() < 2 * axis_count {
            return self.derived(None);
        }

        self.derived(self.factory().precise_coordinates(axis_count, values))
    }

    fn values(&self) -> Vec<f64> {
        self.coordinates
            .as_ref()
            .map(|coordinates| coordinates.values().to_vec())
            .unwrap_or_default()
    }

    /// Attaches the value to the line.
    pub fn with_user_data(mut self, user_data: UserData) -> Self {
        self.properties.set_user_data(user_data);
        self
    }

    /// Returns true if the line is empty or its first and last vertices have the same X and Y.
    pub fn is_closed(&self) -> bool {
        self.is_empty() || self.coordinates.equals_vertex_2d(0, -1)
    }

    /// Returns true if the line can be used as a [`LinearRing`](crate::LinearRing): it is closed
    /// and has at least 4 vertices.
    pub fn is_ring_shape(&self) -> bool {
        !self.is_empty() && self.is_closed() && self.coordinates.vertex_count() >= 4
    }

    /// First vertex as a point.
    pub fn from_point(&self) -> Option<Point> {
        self.point(0)
    }

    /// Last vertex as a point.
    pub fn to_point(&self) -> Option<Point> {
        self.point(-1)
    }

    /// Vertex as a point. Negative indices are counted from the end.
    pub fn point(&self, vertex_index: isize) -> Option<Point> {
        self.vertex_at(vertex_index).map(|vertex| vertex.to_point())
    }

    /// Vertex at the index. Negative indices are counted from the end.
    pub fn vertex_at(&self, vertex_index: isize) -> Option<Vertex<'_>> {
        self.vertex(VertexId::Vertex(vertex_index))
    }

    /// Segment at the index. Negative indices are counted from the end.
    pub fn segment_at(&self, segment_index: isize) -> Option<Segment<'_>> {
        self.segment(SegmentId::Segment(segment_index))
    }

    pub fn segment_count(&self) -> usize {
        self.coordinates.vertex_count().saturating_sub(1)
    }

    /// Returns true if some vertex has the given X and Y.
    pub fn has_vertex(&self, x: f64, y: f64) -> bool {
        let vertex_count = self.coordinates.vertex_count() as isize;
        (0..vertex_count).any(|i| self.coordinates.equals_vertex_xy(i, x, y))
    }

    /// Returns the end of the line at the given position, if any. `From` is returned for closed
    /// lines.
    pub fn touching_end(&self, x: f64, y: f64) -> Option<End> {
        if self.is_empty() {
            None
        } else if self.coordinates.equals_vertex_xy(0, x, y) {
            Some(End::From)
        } else if self.coordinates.equals_vertex_xy(-1, x, y) {
            Some(End::To)
        } else {
            None
        }
    }

    /// Returns true if the vertices have the same X and Y.
    pub fn equals_vertex(&self, vertex_index1: isize, vertex_index2: isize) -> bool {
        self.coordinates
            .equals_vertex_2d(vertex_index1, vertex_index2)
    }

    /// See [`orientation_index`](crate::algorithm::orientation_index). `0` if any of the vertices
    /// does not exist.
    pub fn orientation_index(
        &self,
        vertex_index1: isize,
        vertex_index2: isize,
        vertex_index: isize,
    ) -> i32 {
        match (
            self.vertex_at(vertex_index1),
            self.vertex_at(vertex_index2),
            self.vertex_at(vertex_index),
        ) {
            (Some(p1), Some(p2), Some(p)) => crate::algorithm::orientation_index(&p1, &p2, &p),
            _ => 0,
        }
    }

    /// Part of the line of `vertex_count` vertices starting from `from_index`.
    ///
    /// The result is clipped to the vertices the line has, and is empty if fewer than two vertices
    /// remain.
    pub fn sub_line(&self, from_index: usize, vertex_count: usize) -> LineString {
        self.sub_line_with(None, from_index, vertex_count, None)
    }

    fn sub_line_with(
        &self,
        from_point: Option<&[f64]>,
        from_index: usize,
        vertex_count: usize,
        to_point: Option<&[f64]>,
    ) -> LineString {
        let available = self.coordinates.vertex_count().saturating_sub(from_index);
        let vertex_count = vertex_count.min(available);

        let mut builder = CoordinatesBuilder::new(self.axis_count(), vertex_count + 2);
        if let Some(values) = from_point {
            builder.push_values(values);
        }
        builder.append(&self.coordinates, from_index, vertex_count);
        if let Some(values) = to_point {
            builder.push_values(values);
        }

        self.derived_from_values(&builder.into_values())
    }

    /// Line with a new vertex inserted before `vertex_index`. An index equal to the vertex count
    /// appends the vertex.
    pub fn insert_vertex(
        &self,
        vertex_index: usize,
        values: &[f64],
    ) -> Result<LineString, GeometryError> {
        let vertex_count = self.coordinates.vertex_count();
        if self.is_empty() {
            let message = "cannot insert a single vertex into an empty line";
            return Err(GeometryError::invalid(message));
        }
        if vertex_index > vertex_count {
            return Err(GeometryError::VertexOutOfRange(format!(
                "cannot insert vertex at {vertex_index} into line with {vertex_count} vertices"
            )));
        }

        let axis_count = self.axis_count();
        let mut new_values = self.values();
        let position = vertex_index * axis_count;
        new_values.splice(position..position, vertex_values(axis_count, values));

        Ok(self.derived_from_values(&new_values))
    }

    /// Line with a new last vertex.
    pub fn append_vertex(&self, values: &[f64]) -> Result<LineString, GeometryError> {
        self.insert_vertex(self.coordinates.vertex_count(), values)
    }

    /// Line with the vertex moved to a new position. Axes not given keep their values.
    pub fn move_vertex(
        &self,
        vertex_index: isize,
        values: &[f64],
    ) -> Result<LineString, GeometryError> {
        let index = self.resolve_vertex(vertex_index)?;
        let mut new_values = self.values();
        set_vertex(&mut new_values, self.axis_count(), index, values);

        Ok(self.derived_from_values(&new_values))
    }

    /// Line without the vertex. Removing a vertex of a two vertex line gives an empty line.
    pub fn delete_vertex(&self, vertex_index: isize) -> Result<LineString, GeometryError> {
        let index = self.resolve_vertex(vertex_index)?;
        let axis_count = self.axis_count();
        let mut new_values = self.values();
        new_values.drain(index * axis_count..(index + 1) * axis_count);

        Ok(self.derived_from_values(&new_values))
    }

    pub(crate) fn resolve_vertex(&self, vertex_index: isize) -> Result<usize, GeometryError> {
        let vertex_count = self.coordinates.vertex_count();
        resolve_index(vertex_index, vertex_count).ok_or_else(|| {
            GeometryError::VertexOutOfRange(format!(
                "vertex {vertex_index} of line with {vertex_count} vertices"
            ))
        })
    }

    /// Line moved by the given delta of each axis.
    pub fn move_by(&self, deltas: &[f64]) -> LineString {
        self.derived(move_sequence(self.factory(), &self.coordinates, deltas))
    }

    /// Line without consecutive vertices with the same X and Y.
    ///
    /// If less than two distinct vertices would remain, the line is returned unchanged.
    pub fn remove_duplicate_points(&self) -> LineString {
        let vertex_count = self.coordinates.vertex_count();
        let mut builder = CoordinatesBuilder::new(self.axis_count(), vertex_count);
        let coordinates = &self.coordinates;
        let mut last_kept: Option<usize> = None;
        for index in 0..vertex_count {
            let duplicate = match last_kept {
                Some(last) => coordinates.equals_vertex_2d(last as isize, index as isize),
                None => false,
            };
            if !duplicate {
                builder.push_vertex(coordinates, index);
                last_kept = Some(index);
            }
        }

        if builder.vertex_count() < 2 || builder.vertex_count() == vertex_count {
            return self.clone();
        }

        self.derived_from_values(&builder.into_values())
    }

    /// Smallest planar distance from the point to the line. `0.0` if either is empty.
    pub fn distance(&self, point: &Point) -> f64 {
        if self.is_empty() || point.is_empty() {
            return 0.0;
        }

        self.segments()
            .map(|segment| segment.distance_to_point(point))
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
            .unwrap_or(0.0)
    }

    /// Vertex or segment of the line closest to the position.
    ///
    /// A vertex wins over a segment at the same distance, and the first of several equally close
    /// vertices or segments wins. Returns `None` for empty lines and positions with `NaN` values.
    pub fn closest_component(
        &self,
        point: &impl CartesianPoint2d<Num = f64>,
    ) -> Option<ClosestComponent> {
        if point.x().is_nan() || point.y().is_nan() {
            return None;
        }

        let mut closest_vertex: Option<(usize, f64)> = None;
        for vertex in self.vertices() {
            let distance = vertex.distance(point);
            if closest_vertex.map_or(true, |(_, closest)| distance < closest) {
                closest_vertex = Some((vertex.index(), distance));
            }
        }

        let mut closest_segment: Option<(usize, f64)> = None;
        for segment in self.segments() {
            let distance = segment.distance_to_point(point);
            if closest_segment.map_or(true, |(_, closest)| distance < closest) {
                closest_segment = Some((segment.index(), distance));
            }
        }

        match (closest_vertex, closest_segment) {
            (Some((_, vertex_distance)), Some((index, distance))) if distance < vertex_distance => {
                Some(ClosestComponent::Segment { index, distance })
            }
            (Some((index, distance)), _) => Some(ClosestComponent::Vertex { index, distance }),
            _ => None,
        }
    }

    /// Splits the line at the vertex or segment closest to the point.
    ///
    /// * an interior vertex at the point: two lines sharing that vertex,
    /// * an interior vertex closest to the point: two lines, both ending at the point after the
    ///   vertex,
    /// * a segment closest to the point: two lines with the point inserted as their common end,
    /// * the first or last vertex closest to the point, or nothing closest: the line itself.
    pub fn split(&self, point: &Point) -> Vec<LineString> {
        let vertex_count = self.coordinates.vertex_count();
        let values = vertex_values(self.axis_count(), &point.coordinates());
        let is_end = |index: usize| index == 0 || index + 1 == vertex_count;

        match self.closest_component(point) {
            Some(ClosestComponent::Vertex { index, .. }) if is_end(index) => {
                log::debug!("Split point is closest to an end, line is not split");
                vec![self.clone()]
            }
            Some(ClosestComponent::Vertex { index, distance }) if distance == 0.0 => {
                log::debug!("Splitting line at vertex {index}");
                vec![
                    self.sub_line(0, index + 1),
                    self.sub_line(index, vertex_count - index),
                ]
            }
            Some(ClosestComponent::Vertex { index, .. }) => {
                log::debug!("Splitting line at vertex {index}, inserting split point");
                vec![
                    self.sub_line_with(None, 0, index + 1, Some(&values)),
                    self.sub_line_with(Some(&values), index, vertex_count - index, None),
                ]
            }
            Some(ClosestComponent::Segment { index, .. }) => {
                log::debug!("Splitting line at segment {index}");
                vec![
                    self.sub_line_with(None, 0, index + 1, Some(&values)),
                    self.sub_line_with(Some(&values), index + 1, vertex_count - index - 1, None),
                ]
            }
            None => vec![self.clone()],
        }
    }

    /// Joins the lines at a shared end vertex.
    ///
    /// The pairings are tried in this order: this line's start at the other's end, the other's
    /// start at this line's end, both starts (the other line is reversed), both ends (the other
    /// line is reversed). The result has as many axes as the line with more axes and the user data
    /// of this line.
    pub fn merge(&self, other: &LineString) -> Result<LineString, GeometryError> {
        if self.is_empty() || other.is_empty() {
            return Err(GeometryError::DisjointLines);
        }

        let a = &self.coordinates;
        let b = &other.coordinates;
        let junction = if same_xy(a, 0, b, -1) {
            Junction::OtherThenThis
        } else if same_xy(b, 0, a, -1) {
            Junction::ThisThenOther
        } else if same_xy(a, 0, b, 0) {
            Junction::ReversedOtherThenThis
        } else if same_xy(a, -1, b, -1) {
            Junction::ThisThenReversedOther
        } else {
            return Err(GeometryError::DisjointLines);
        };

        self.join(other, junction)
    }

    /// Joins the lines at the given point, which must be an end of both lines.
    pub fn merge_at(&self, point: &Point, other: &LineString) -> Result<LineString, GeometryError> {
        if point.is_empty() {
            return Err(GeometryError::DisjointLines);
        }

        let (x, y) = (point.x(), point.y());
        let junction = match (self.touching_end_all(x, y), other.touching_end_all(x, y)) {
            ((_, true), (true, _)) => Junction::ThisThenOther,
            ((true, _), (_, true)) => Junction::OtherThenThis,
            ((true, _), (true, _)) => Junction::ReversedOtherThenThis,
            ((_, true), (_, true)) => Junction::ThisThenReversedOther,
            _ => return Err(GeometryError::DisjointLines),
        };

        self.join(other, junction)
    }

    /// Whether the start and the end of the line are at the position.
    fn touching_end_all(&self, x: f64, y: f64) -> (bool, bool) {
        if self.is_empty() {
            return (false, false);
        }

        (
            self.coordinates.equals_vertex_xy(0, x, y),
            self.coordinates.equals_vertex_xy(-1, x, y),
        )
    }

    fn join(&self, other: &LineString, junction: Junction) -> Result<LineString, GeometryError> {
        log::debug!("Merging lines: {junction:?}");

        let axis_count = self.axis_count().max(other.axis_count());
        let factory = self.factory().convert_axis_count(axis_count)?;

        let a = &self.coordinates;
        let b = &other.coordinates;
        let n1 = a.vertex_count();
        let n2 = b.vertex_count();

        let mut builder = CoordinatesBuilder::new(axis_count, n1 + n2 - 1);
        match junction {
            Junction::OtherThenThis => {
                builder.append(b, 0, n2);
                builder.append(a, 1, n1 - 1);
            }
            Junction::ThisThenOther => {
                builder.append(a, 0, n1);
                builder.append(b, 1, n2 - 1);
            }
            Junction::ReversedOtherThenThis => {
                builder.append_reverse(b, 0, n2);
                builder.append(a, 1, n1 - 1);
            }
            Junction::ThisThenReversedOther => {
                builder.append(a, 0, n1);
                builder.append_reverse(b, 1, n2 - 1);
            }
        }

        let coordinates = factory.precise_coordinates(axis_count, &builder.into_values());
        let user_data = self.user_data().cloned();
        Ok(LineString::from_parts(factory, coordinates, user_data))
    }

    /// Returns true if the vertices of the closed line go counterclockwise.
    pub fn is_counter_clockwise(&self) -> bool {
        is_counter_clockwise(&self.coordinates)
    }

    /// Returns true if the vertices of the closed line do not go counterclockwise.
    pub fn is_clockwise(&self) -> bool {
        !self.is_counter_clockwise()
    }

    pub fn to_clockwise(&self) -> LineString {
        if self.is_clockwise() {
            self.clone()
        } else {
            self.reverse()
        }
    }

    pub fn to_counter_clockwise(&self) -> LineString {
        if self.is_counter_clockwise() {
            self.clone()
        } else {
            self.reverse()
        }
    }

    /// Line with the vertices in the opposite order.
    pub fn reverse(&self) -> LineString {
        self.derived(self.coordinates.as_ref().map(Coordinates::reversed))
    }

    /// Canonical form of the line: the direction in which the first differing pair of mirrored
    /// vertices is ascending.
    pub fn normalize(&self) -> LineString {
        let coordinates = &self.coordinates;
        let vertex_count = coordinates.vertex_count();
        for i in 0..vertex_count / 2 {
            let j = vertex_count - 1 - i;
            match compare_vertices(coordinates, i as isize, coordinates, j as isize) {
                Ordering::Equal => {}
                Ordering::Greater => return self.reverse(),
                Ordering::Less => return self.clone(),
            }
        }

        self.clone()
    }

    /// Orders lines vertex by vertex. Empty lines come first.
    pub fn compare(&self, other: &LineString) -> Ordering {
        compare_sequences(&self.coordinates, &other.coordinates)
    }

    /// Copies the line into the factory.
    pub fn copy(&self, factory: &GeometryFactory) -> Result<LineString, GeometryError> {
        let coordinates = copy_sequence(factory, self.factory(), &self.coordinates);
        validate_line(&coordinates)?;

        Ok(Self {
            coordinates,
            properties: self.properties.derive_with(factory),
        })
    }

    /// Returns true if the lines have the same vertices, comparing the first `axis_count` values.
    pub fn equals(&self, axis_count: usize, other: &LineString) -> bool {
        sequences_match(&self.coordinates, &other.coordinates, axis_count, 0.0)
    }

    /// Returns true if the lines have the same number of vertices and their values differ by no
    /// more than `tolerance`.
    pub fn equals_exact(&self, other: &LineString, tolerance: f64) -> bool {
        sequences_match(&self.coordinates, &other.coordinates, usize::MAX, tolerance)
    }
}

fn same_xy(
    a: &Option<Coordinates>,
    a_index: isize,
    b: &Option<Coordinates>,
    b_index: isize,
) -> bool {
    a.coordinate(a_index, X) == b.coordinate(b_index, X)
        && a.coordinate(a_index, Y) == b.coordinate(b_index, Y)
}

/// Overwrites the values of the vertex given in `values`.
pub(crate) fn set_vertex(
    buffer: &mut [f64],
    axis_count: usize,
    vertex_index: usize,
    values: &[f64],
) {
    let start = vertex_index * axis_count;
    for (value, new_value) in buffer[start..start + axis_count].iter_mut().zip(values) {
        *value = *new_value;
    }
}

impl_equality!(LineString);

impl Geometry for LineString {
    fn factory(&self) -> &GeometryFactory {
        self.properties.factory()
    }

    fn geometry_type(&self) -> GeometryType {
        GeometryType::LineString
    }

    fn is_empty(&self) -> bool {
        self.coordinates.is_none()
    }

    fn vertices(&self) -> Vertices<'_> {
        let components = self
            .coordinates
            .iter()
            .map(|coordinates| Component::new(coordinates, Prefix::None))
            .collect();
        Vertices::new(self.factory(), components)
    }

    fn bounding_box(&self) -> &BoundingBox {
        self.properties.bounding_box(|| self.vertices())
    }

    fn user_data(&self) -> Option<&UserData> {
        self.properties.user_data()
    }

    fn boundary(&self) -> Geom {
        Mod2BoundaryOperator.line_boundary(self.factory(), &[self])
    }

    fn boundary_dimension(&self) -> Dimension {
        if self.is_closed() {
            Dimension::False
        } else {
            Dimension::Point
        }
    }

    fn length(&self) -> f64 {
        sequence_length(&self.coordinates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::sync::Arc;

    fn line(vertices: &[[f64; 2]]) -> LineString {
        GeometryFactory::default()
            .line_string(vertices)
            .expect("valid line")
    }

    #[test]
    fn closed_lines() {
        let back_and_forth = line(&[[0.0, 0.0], [1.0, 0.0], [0.0, 0.0]]);
        assert!(back_and_forth.is_closed());
        assert!(!back_and_forth.is_ring_shape());
        assert!(!line(&[[0.0, 0.0], [1.0, 0.0]]).is_closed());
        assert!(GeometryFactory::default().empty_line_string().is_closed());

        let ring = line(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]);
        assert!(ring.is_ring_shape());
    }

    #[test]
    fn end_points() {
        let l = line(&[[0.0, 0.0], [1.0, 0.0], [2.0, 2.0]]);
        let from = l.from_point().expect("not empty");
        assert_eq!(from.coordinates(), vec![0.0, 0.0]);
        let to = l.to_point().expect("not empty");
        assert_eq!(to.coordinates(), vec![2.0, 2.0]);
        assert_eq!(l.point(-2).expect("exists").x(), 1.0);
        assert!(l.point(3).is_none());
        assert_eq!(l.touching_end(2.0, 2.0), Some(End::To));
        assert_eq!(l.touching_end(1.0, 0.0), None);
        assert!(l.has_vertex(1.0, 0.0));
        assert_eq!(l.segment_count(), 2);
        assert_eq!(l.coordinate(-1, 0), 2.0);
        assert!(l.coordinate(3, 0).is_nan());
    }

    #[test]
    fn reverse_keeps_user_data() {
        let data: UserData = Arc::new("road".to_string());
        let l = line(&[[0.0, 0.0], [1.0, 0.0], [2.0, 2.0]]).with_user_data(data);
        let reversed = l.reverse();
        assert_eq!(reversed.coordinates(), vec![2.0, 2.0, 1.0, 0.0, 0.0, 0.0]);
        assert_eq!(reversed.reverse(), l);
        let value = reversed
            .user_data()
            .and_then(|data| data.downcast_ref::<String>())
            .expect("user data is kept");
        assert_eq!(value, "road");
    }

    #[test]
    fn merge_pairings() {
        let a = line(&[[0.0, 0.0], [1.0, 1.0]]);
        let b = line(&[[1.0, 1.0], [2.0, 2.0]]);
        let merged = a.merge(&b).expect("lines touch");
        assert_eq!(merged, line(&[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]]));

        let merged = b.merge(&a).expect("lines touch");
        assert_eq!(merged, line(&[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]]));

        let c = line(&[[0.0, 0.0], [-1.0, 0.0]]);
        let merged = a.merge(&c).expect("lines touch");
        assert_eq!(merged, line(&[[-1.0, 0.0], [0.0, 0.0], [1.0, 1.0]]));

        let d = line(&[[5.0, 5.0], [1.0, 1.0]]);
        let merged = a.merge(&d).expect("lines touch");
        assert_eq!(merged, line(&[[0.0, 0.0], [1.0, 1.0], [5.0, 5.0]]));

        assert_matches!(
            a.merge(&line(&[[5.0, 5.0], [6.0, 6.0]])),
            Err(GeometryError::DisjointLines)
        );
        assert_matches!(
            a.merge(&GeometryFactory::default().empty_line_string()),
            Err(GeometryError::DisjointLines)
        );
    }

    #[test]
    fn merge_uses_more_axes() {
        let factory_3d = GeometryFactory::new(3).expect("valid factory");
        let a = line(&[[0.0, 0.0], [1.0, 1.0]]);
        let b = factory_3d
            .line_string(&[[1.0, 1.0, 5.0], [2.0, 2.0, 6.0]])
            .expect("valid line");
        let merged = a.merge(&b).expect("lines touch");
        assert_eq!(merged.axis_count(), 3);
        assert_eq!(merged.vertex_count(), 3);
        assert!(merged.coordinate(1, 2).is_nan());
        assert_eq!(merged.coordinate(2, 2), 6.0);
    }

    #[test]
    fn merge_at_point() {
        let factory = GeometryFactory::default();
        let a = line(&[[0.0, 0.0], [1.0, 1.0]]);
        let b = line(&[[2.0, 2.0], [1.0, 1.0]]);
        let junction = factory.point_xy(1.0, 1.0);
        let merged = a.merge_at(&junction, &b).expect("lines touch");
        assert_eq!(merged, line(&[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]]));
        assert_matches!(
            a.merge_at(&factory.point_xy(0.0, 0.0), &b),
            Err(GeometryError::DisjointLines)
        );
    }

    #[test]
    fn split_at_interior_vertex() {
        let factory = GeometryFactory::default();
        let l = line(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [3.0, 0.0]]);
        let parts = l.split(&factory.point_xy(1.0, 0.0));
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0], line(&[[0.0, 0.0], [1.0, 0.0]]));
        assert_eq!(parts[1], line(&[[1.0, 0.0], [2.0, 0.0], [3.0, 0.0]]));
    }

    #[test]
    fn split_near_vertex_inserts_point() {
        let factory = GeometryFactory::default();
        let l = line(&[[0.0, 0.0], [2.0, 0.0], [2.0, 2.0]]);
        let parts = l.split(&factory.point_xy(3.0, -1.0));
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0], line(&[[0.0, 0.0], [2.0, 0.0], [3.0, -1.0]]));
        assert_eq!(parts[1], line(&[[3.0, -1.0], [2.0, 0.0], [2.0, 2.0]]));
    }

    #[test]
    fn split_on_segment() {
        let factory = GeometryFactory::default();
        let l = line(&[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0]]);
        let parts = l.split(&factory.point_xy(2.0, 0.0));
        assert_eq!(parts[0], line(&[[0.0, 0.0], [2.0, 0.0]]));
        assert_eq!(parts[1], line(&[[2.0, 0.0], [4.0, 0.0], [4.0, 4.0]]));
    }

    #[test]
    fn split_at_end_returns_line() {
        let factory = GeometryFactory::default();
        let l = line(&[[0.0, 0.0], [4.0, 0.0]]);
        assert_eq!(l.split(&factory.point_xy(5.0, 0.0)), vec![l.clone()]);
        assert_eq!(l.split(&factory.point_xy(0.0, 0.0)), vec![l.clone()]);
        assert_eq!(l.split(&factory.empty_point()), vec![l.clone()]);
    }

    #[test]
    fn vertex_edits() {
        let l = line(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]]);
        assert_eq!(
            l.insert_vertex(1, &[0.5, 1.0]).expect("in range"),
            line(&[[0.0, 0.0], [0.5, 1.0], [1.0, 0.0], [2.0, 0.0]])
        );
        let appended = l.append_vertex(&[3.0, 3.0]).expect("in range");
        assert_eq!(appended.vertex_count(), 4);
        assert_eq!(
            l.move_vertex(-1, &[5.0]).expect("in range"),
            line(&[[0.0, 0.0], [1.0, 0.0], [5.0, 0.0]])
        );
        assert_eq!(
            l.delete_vertex(1).expect("in range"),
            line(&[[0.0, 0.0], [2.0, 0.0]])
        );
        let short = line(&[[0.0, 0.0], [1.0, 0.0]]);
        assert!(short.delete_vertex(0).expect("in range").is_empty());

        assert_matches!(
            l.insert_vertex(4, &[1.0, 1.0]),
            Err(GeometryError::VertexOutOfRange(_))
        );
        assert_matches!(
            l.move_vertex(3, &[1.0, 1.0]),
            Err(GeometryError::VertexOutOfRange(_))
        );
        assert_matches!(l.delete_vertex(3), Err(GeometryError::VertexOutOfRange(_)));
    }

    #[test]
    fn sub_line_is_clipped() {
        let l = line(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]]);
        assert_eq!(l.sub_line(1, 10), line(&[[1.0, 0.0], [2.0, 0.0]]));
        assert!(l.sub_line(2, 1).is_empty());
    }

    #[test]
    fn duplicate_points() {
        let vertices = [[0.0, 0.0], [0.0, 0.0], [1.0, 0.0], [1.0, 0.0], [2.0, 0.0]];
        let l = line(&vertices);
        assert_eq!(
            l.remove_duplicate_points(),
            line(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]])
        );
        let single = line(&[[0.0, 0.0], [0.0, 0.0]]);
        assert_eq!(single.remove_duplicate_points(), single);
    }

    #[test]
    fn normalize_direction() {
        let l = line(&[[2.0, 2.0], [1.0, 1.0], [0.0, 0.0]]);
        let normalized = l.normalize();
        assert_eq!(normalized, line(&[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]]));
        assert_eq!(normalized.normalize(), normalized);

        let symmetric = line(&[[0.0, 0.0], [1.0, 1.0], [0.0, 0.0]]);
        assert_eq!(symmetric.normalize(), symmetric);
    }

    #[test]
    fn distance_and_closest_component() {
        let factory = GeometryFactory::default();
        let l = line(&[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0]]);
        assert_eq!(l.distance(&factory.point_xy(2.0, 1.0)), 1.0);

        let on_segment = ClosestComponent::Segment {
            index: 0,
            distance: 1.0,
        };
        assert_eq!(l.closest_component(&[2.0, 1.0]), Some(on_segment));

        let at_vertex = ClosestComponent::Vertex {
            index: 1,
            distance: 2.0_f64.sqrt(),
        };
        assert_eq!(l.closest_component(&[5.0, -1.0]), Some(at_vertex));
        assert_eq!(l.closest_component(&[f64::NAN, 0.0]), None);
    }

    #[test]
    fn orientation() {
        let ccw = line(&[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 0.0]]);
        assert!(ccw.is_counter_clockwise());
        assert!(ccw.to_clockwise().is_clockwise());
        assert_eq!(ccw.to_counter_clockwise(), ccw);
        assert_eq!(ccw.orientation_index(0, 1, 2), 1);
        assert_eq!(ccw.orientation_index(0, 2, 1), -1);
        assert_eq!(ccw.orientation_index(0, 1, 7), 0);
        assert!(ccw.equals_vertex(0, -1));
    }

    #[test]
    fn boundary_of_line() {
        let open = line(&[[0.0, 0.0], [4.0, 0.0]]);
        assert_eq!(open.boundary().vertex_count(), 2);
        assert_eq!(open.boundary_dimension(), Dimension::Point);

        let closed = line(&[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 0.0]]);
        assert!(closed.boundary().is_empty());
        assert_eq!(closed.boundary_dimension(), Dimension::False);
    }

    #[test]
    fn length_and_bounding_box() {
        let l = line(&[[0.0, 0.0], [3.0, 4.0], [3.0, 0.0]]);
        assert_eq!(l.length(), 9.0);
        assert_eq!(l.bounding_box(), &BoundingBox::new(0.0, 0.0, 3.0, 4.0));

        let moved = l.move_by(&[1.0, 1.0]);
        assert_eq!(moved.bounding_box(), &BoundingBox::new(1.0, 1.0, 4.0, 5.0));
    }
}
