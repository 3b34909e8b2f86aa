use std::cmp::Ordering;

use crate::cartesian::CartesianPoint2d;
use crate::coordinates::{compare_vertices, resolve_index, CoordinateSequence, Coordinates};
use crate::cursor::{Component, Prefix, Segments, VertexId};
use crate::factory::GeometryFactory;
use crate::geometry::Point;
use crate::precision::{M, X, Y, Z};

/// A vertex of a geometry.
#[derive(Debug, Copy, Clone)]
pub struct Vertex<'a> {
    factory: &'a GeometryFactory,
    coordinates: &'a Coordinates,
    index: usize,
    prefix: Prefix,
}

impl<'a> Vertex<'a> {
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

    /// Address of the vertex in its geometry.
    pub fn id(&self) -> VertexId {
        self.prefix.vertex_id(self.index as isize)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of axes.
    pub fn axis_count(&self) -> usize {
        self.coordinates.axis_count()
    }

    /// Value of the axis, `NaN` if the vertex does not have it.
    pub fn coordinate(&self, axis_index: usize) -> f64 {
        self.coordinates.coordinate(self.index as isize, axis_index)
    }

    pub fn x(&self) -> f64 {
        self.coordinate(X)
    }

    pub fn y(&self) -> f64 {
        self.coordinate(Y)
    }

    pub fn z(&self) -> f64 {
        self.coordinate(Z)
    }

    pub fn m(&self) -> f64 {
        self.coordinate(M)
    }

    /// Copy of all values of the vertex.
    pub fn coordinates(&self) -> Vec<f64> {
        self.coordinates.vertex_coordinates(self.index as isize)
    }

    /// Returns true if this is the first vertex of its line or ring.
    pub fn is_from(&self) -> bool {
        self.index == 0
    }

    /// Returns true if this is the last vertex of its line or ring.
    pub fn is_to(&self) -> bool {
        self.index + 1 == self.coordinates.vertex_count()
    }

    /// Creates a point at the position of the vertex.
    pub fn to_point(&self) -> Point {
        let values = self.coordinates();
        Point::from_parts(
            self.factory.clone(),
            self.factory.precise_coordinates(values.len(), &values),
            None,
        )
    }

    /// Orders vertices by X, then by Y.
    pub fn compare(&self, other: &Vertex) -> Ordering {
        compare_vertices(
            self.coordinates,
            self.index as isize,
            other.coordinates,
            other.index as isize,
        )
    }
}

impl CartesianPoint2d for Vertex<'_> {
    type Num = f64;

    fn x(&self) -> f64 {
        self.coordinate(X)
    }

    fn y(&self) -> f64 {
        self.coordinate(Y)
    }
}

/// Iterator over all vertices of a geometry.
///
/// Polygons yield the shell first and then the holes; multi geometries and collections yield their
/// parts in order. Empty parts do not yield anything.
#[derive(Debug, Clone)]
pub struct Vertices<'a> {
    factory: &'a GeometryFactory,
    components: Vec<Component<'a>>,
    component_index: usize,
    vertex_index: usize,
}

impl<'a> Vertices<'a> {
    pub(crate) fn new(factory: &'a GeometryFactory, components: Vec<Component<'a>>) -> Self {
        Self {
            factory,
            components,
            component_index: 0,
            vertex_index: 0,
        }
    }

    /// Returns the vertex with the given address, if it exists.
    pub fn get(&self, id: VertexId) -> Option<Vertex<'a>> {
        let (prefix, vertex_index) = id.split();
        let component = self.components.iter().find(|c| c.prefix == prefix)?;
        let index = resolve_index(vertex_index, component.coordinates.vertex_count())?;
        let vertex = Vertex::new(self.factory, component.coordinates, index, prefix);
        Some(vertex)
    }

    /// Returns the vertex at the position in the traversal order. Negative positions are counted
    /// from the end.
    pub fn get_flat(&self, position: isize) -> Option<Vertex<'a>> {
        let total = self.total_count();
        let mut position = resolve_index(position, total)?;
        for component in &self.components {
            let count = component.coordinates.vertex_count();
            if position < count {
                let prefix = component.prefix;
                let vertex = Vertex::new(self.factory, component.coordinates, position, prefix);
                return Some(vertex);
            }
            position -= count;
        }

        None
    }

    /// Segments of the same geometry.
    pub fn segments(&self) -> Segments<'a> {
        Segments::new(self.factory, self.components.clone())
    }

    pub(crate) fn components(&self) -> &[Component<'a>] {
        &self.components
    }

    fn total_count(&self) -> usize {
        self.components
            .iter()
            .map(|c| c.coordinates.vertex_count())
            .sum()
    }
}

impl<'a> Iterator for Vertices<'a> {
    type Item = Vertex<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let component = self.components.get(self.component_index)?;
            if self.vertex_index < component.coordinates.vertex_count() {
                let vertex = Vertex::new(
                    self.factory,
                    component.coordinates,
                    self.vertex_index,
                    component.prefix,
                );
                self.vertex_index += 1;
                return Some(vertex);
            }

            self.component_index += 1;
            self.vertex_index = 0;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .components
            .iter()
            .skip(self.component_index)
            .map(|c| c.coordinates.vertex_count())
            .sum::<usize>()
            .saturating_sub(self.vertex_index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Vertices<'_> {}
