use std::cmp::Ordering;

use crate::bounding_box::BoundingBox;
use crate::cursor::{Component, Prefix, VertexId, Vertices};
use crate::error::GeometryError;
use crate::factory::GeometryFactory;
use crate::geom::Geom;
use crate::geometry::{compare_sorted, impl_equality, Geometry, Properties, UserData};
use crate::geometry_type::{Dimension, GeometryType};

/// An ordered set of geometries of any kind.
///
/// Vertices of children consisting of a single line or point are addressed with
/// [`VertexId::PartVertex`]. Vertices of other children are addressed with
/// [`VertexId::PartRingVertex`], where `ring` is the index of the ring or part in the child's own
/// vertex order.
#[derive(Debug, Clone)]
pub struct GeometryCollection {
    geometries: Vec<Geom>,
    properties: Properties,
}

impl GeometryCollection {
    pub(crate) fn from_parts(
        factory: GeometryFactory,
        geometries: Vec<Geom>,
        user_data: Option<UserData>,
    ) -> Self {
        Self {
            geometries,
            properties: Properties::new(factory, user_data),
        }
    }

    fn derived(&self, geometries: Vec<Geom>) -> Self {
        Self {
            geometries,
            properties: self.properties.derive(),
        }
    }

    /// Attaches the value to the collection.
    pub fn with_user_data(mut self, user_data: UserData) -> Self {
        self.properties.set_user_data(user_data);
        self
    }

    /// Child with the index.
    pub fn geometry(&self, index: usize) -> Option<&Geom> {
        self.geometries.get(index)
    }

    /// Number of children.
    pub fn geometry_count(&self) -> usize {
        self.geometries.len()
    }

    /// All children.
    pub fn geometries(&self) -> &[Geom] {
        &self.geometries
    }

    /// Reverses every child. The order of the children is kept.
    pub fn reverse(&self) -> GeometryCollection {
        self.derived(self.geometries.iter().map(Geom::reverse).collect())
    }

    /// Normalized children sorted by [`Geom::compare`].
    pub fn normalize(&self) -> GeometryCollection {
        let mut geometries: Vec<Geom> = self.geometries.iter().map(Geom::normalize).collect();
        geometries.sort_by(|a, b| a.compare(b));
        self.derived(geometries)
    }

    /// Collection moved by the given delta of each axis.
    pub fn move_by(&self, deltas: &[f64]) -> GeometryCollection {
        let moved = self.geometries.iter().map(|child| child.move_by(deltas));
        self.derived(moved.collect())
    }

    /// Collection with a vertex inserted into a child. See [`Geom::insert_vertex`].
    pub fn insert_vertex(
        &self,
        id: VertexId,
        values: &[f64],
    ) -> Result<GeometryCollection, GeometryError> {
        self.edit_child(id, |geometry, child_id| {
            geometry.insert_vertex(child_id, values)
        })
    }

    /// Collection with a vertex of a child moved. See [`Geom::move_vertex`].
    pub fn move_vertex(
        &self,
        id: VertexId,
        values: &[f64],
    ) -> Result<GeometryCollection, GeometryError> {
        self.edit_child(id, |geometry, child_id| {
            geometry.move_vertex(child_id, values)
        })
    }

    /// Collection with a vertex of a child deleted. See [`Geom::delete_vertex`].
    pub fn delete_vertex(&self, id: VertexId) -> Result<GeometryCollection, GeometryError> {
        self.edit_child(id, |geometry, child_id| geometry.delete_vertex(child_id))
    }

    fn edit_child(
        &self,
        id: VertexId,
        edit: impl FnOnce(&Geom, VertexId) -> Result<Geom, GeometryError>,
    ) -> Result<GeometryCollection, GeometryError> {
        let (part, geometry, child_id) = self.child_vertex(id)?;
        let mut geometries = self.geometries.clone();
        geometries[part] = edit(geometry, child_id)?;
        Ok(self.derived(geometries))
    }

    /// Finds the child addressed by the id and the id of the vertex inside the child.
    fn child_vertex(&self, id: VertexId) -> Result<(usize, &Geom, VertexId), GeometryError> {
        let not_found = || {
            let message = format!("{id:?} does not address a collection vertex");
            GeometryError::VertexOutOfRange(message)
        };
        let (prefix, vertex) = id.split();
        match prefix {
            Prefix::Part(part) => {
                let geometry = self.geometries.get(part).ok_or_else(not_found)?;
                Ok((part, geometry, VertexId::Vertex(vertex)))
            }
            Prefix::PartRing(part, index) => {
                let geometry = self.geometries.get(part).ok_or_else(not_found)?;
                let vertices = geometry.vertices();
                let component = vertices.components().get(index).ok_or_else(not_found)?;
                Ok((part, geometry, component.prefix.vertex_id(vertex)))
            }
            Prefix::None | Prefix::Ring(_) => Err(not_found()),
        }
    }

    /// Copies the collection into the factory.
    pub fn copy(&self, factory: &GeometryFactory) -> Result<GeometryCollection, GeometryError> {
        let geometries = self
            .geometries
            .iter()
            .map(|geometry| geometry.copy(factory))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            geometries,
            properties: self.properties.derive_with(factory),
        })
    }

    /// Compares the sorted children of both collections.
    pub fn compare(&self, other: &GeometryCollection) -> Ordering {
        compare_sorted(&self.geometries, &other.geometries, Geom::compare)
    }

    /// Returns true if the collections have equal children in the same order.
    pub fn equals(&self, axis_count: usize, other: &GeometryCollection) -> bool {
        self.geometries.len() == other.geometries.len()
            && self
                .geometries
                .iter()
                .zip(&other.geometries)
                .all(|(a, b)| a.equals(axis_count, b))
    }

    /// Returns true if the children match within the `tolerance`.
    pub fn equals_exact(&self, other: &GeometryCollection, tolerance: f64) -> bool {
        self.geometries.len() == other.geometries.len()
            && self
                .geometries
                .iter()
                .zip(&other.geometries)
                .all(|(a, b)| a.equals_exact(b, tolerance))
    }
}

impl_equality!(GeometryCollection);

impl Geometry for GeometryCollection {
    fn factory(&self) -> &GeometryFactory {
        self.properties.factory()
    }

    fn geometry_type(&self) -> GeometryType {
        GeometryType::GeometryCollection
    }

    fn is_empty(&self) -> bool {
        self.geometries.iter().all(|geometry| geometry.is_empty())
    }

    fn vertices(&self) -> Vertices<'_> {
        let components = self
            .geometries
            .iter()
            .enumerate()
            .flat_map(|(part, geometry)| {
                geometry
                    .vertices()
                    .components()
                    .iter()
                    .enumerate()
                    .map(|(index, component)| {
                        Component::new(component.coordinates, component.prefix.nested(part, index))
                    })
                    .collect::<Vec<_>>()
            })
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
        Geom::GeometryCollection(self.factory().empty_geometry_collection())
    }

    fn boundary_dimension(&self) -> Dimension {
        self.geometries
            .iter()
            .map(|geometry| geometry.boundary_dimension())
            .max()
            .unwrap_or(Dimension::False)
    }

    /// Largest dimension of the children.
    fn dimension(&self) -> Dimension {
        self.geometries
            .iter()
            .map(|geometry| geometry.dimension())
            .max()
            .unwrap_or(Dimension::False)
    }

    fn length(&self) -> f64 {
        self.geometries
            .iter()
            .map(|geometry| geometry.length())
            .sum()
    }

    fn area(&self) -> f64 {
        self.geometries.iter().map(|geometry| geometry.area()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const FAR_SQUARE: [[f64; 2]; 5] = [
        [10.0, 10.0],
        [12.0, 10.0],
        [12.0, 12.0],
        [10.0, 12.0],
        [10.0, 10.0],
    ];

    fn part_vertex(part: usize, vertex: isize) -> VertexId {
        VertexId::PartVertex { part, vertex }
    }

    fn ring_vertex(part: usize, ring: usize, vertex: isize) -> VertexId {
        VertexId::PartRingVertex { part, ring, vertex }
    }

    fn collection() -> GeometryCollection {
        let factory = GeometryFactory::default();
        let line = factory
            .line_string(&[[0.0, 0.0], [4.0, 0.0], [4.0, 3.0]])
            .expect("valid line");
        let polygon = factory
            .polygon_from_rings(&[&FAR_SQUARE])
            .expect("valid polygon");
        factory
            .geometry_collection(vec![
                factory.point_xy(1.0, 1.0).into(),
                line.into(),
                polygon.into(),
            ])
            .expect("valid collection")
    }

    #[test]
    fn nested_vertex_ids() {
        let gc = collection();
        assert_eq!(gc.vertex_count(), 9);

        let ids: Vec<VertexId> = gc.vertices().map(|v| v.id()).collect();
        assert_eq!(ids[0], part_vertex(0, 0));
        assert_eq!(ids[3], part_vertex(1, 2));
        assert_eq!(ids[4], ring_vertex(2, 0, 0));

        let vertex = gc.vertex(ring_vertex(2, 0, 2)).expect("exists");
        assert_eq!(vertex.coordinates(), vec![12.0, 12.0]);
    }

    #[test]
    fn measures_of_children() {
        let gc = collection();
        assert_eq!(gc.dimension(), Dimension::Surface);
        assert_eq!(gc.boundary_dimension(), Dimension::Curve);
        assert_eq!(gc.area(), 4.0);
        assert_eq!(gc.length(), 7.0 + 8.0);
        assert_eq!(gc.bounding_box(), &BoundingBox::new(0.0, 0.0, 12.0, 12.0));

        let empty = GeometryFactory::default().empty_geometry_collection();
        assert!(empty.is_empty());
        assert_eq!(empty.dimension(), Dimension::False);
    }

    #[test]
    fn edits_reach_children() {
        let gc = collection();
        let moved = gc
            .move_vertex(part_vertex(1, -1), &[4.0, 4.0])
            .expect("in range");
        assert_eq!(moved.geometry(1).expect("exists").coordinate(2, 1), 4.0);

        let moved = gc
            .move_vertex(ring_vertex(2, 0, 0), &[9.0, 9.0])
            .expect("in range");
        let polygon = moved.geometry(2).expect("exists");
        assert_eq!(polygon.coordinate(0, 0), 9.0);
        assert_eq!(polygon.coordinate(4, 0), 9.0);

        assert_matches!(
            gc.delete_vertex(part_vertex(5, 0)),
            Err(GeometryError::VertexOutOfRange(_))
        );
        assert_matches!(
            gc.delete_vertex(VertexId::Vertex(0)),
            Err(GeometryError::VertexOutOfRange(_))
        );
    }

    #[test]
    fn reverse_and_normalize() {
        let gc = collection();
        assert_eq!(gc.reverse().reverse(), gc);

        let normalized = gc.normalize();
        assert_eq!(normalized.normalize(), normalized);
        let first = normalized.geometry(0).expect("exists");
        assert_eq!(first.geometry_type(), GeometryType::Point);
    }
}
