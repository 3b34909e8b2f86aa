use std::cmp::Ordering;

use crate::bounding_box::BoundingBox;
use crate::cursor::{Component, Prefix, Vertices};
use crate::error::GeometryError;
use crate::factory::GeometryFactory;
use crate::geom::Geom;
use crate::geometry::{
    compare_sorted, impl_equality, part_out_of_range, Geometry, MultiLineString, Polygon,
    Properties, UserData,
};
use crate::geometry_type::{Dimension, GeometryType};

/// A set of polygons.
#[derive(Debug, Clone)]
pub struct MultiPolygon {
    polygons: Vec<Polygon>,
    properties: Properties,
}

impl MultiPolygon {
    pub(crate) fn from_parts(
        factory: GeometryFactory,
        polygons: Vec<Polygon>,
        user_data: Option<UserData>,
    ) -> Self {
        Self {
            polygons,
            properties: Properties::new(factory, user_data),
        }
    }

    fn derived(&self, polygons: Vec<Polygon>) -> Self {
        Self {
            polygons,
            properties: self.properties.derive(),
        }
    }

    /// Attaches the value to the multipolygon.
    pub fn with_user_data(mut self, user_data: UserData) -> Self {
        self.properties.set_user_data(user_data);
        self
    }

    /// Polygon with the index.
    pub fn geometry(&self, index: usize) -> Option<&Polygon> {
        self.polygons.get(index)
    }

    /// Same as [`geometry`](Self::geometry).
    pub fn polygon(&self, index: usize) -> Option<&Polygon> {
        self.geometry(index)
    }

    /// Number of polygons.
    pub fn geometry_count(&self) -> usize {
        self.polygons.len()
    }

    /// All polygons.
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Reverses the rings of every polygon. The order of the polygons is kept.
    pub fn reverse(&self) -> MultiPolygon {
        self.derived(self.polygons.iter().map(Polygon::reverse).collect())
    }

    /// Normalized polygons in sorted order.
    pub fn normalize(&self) -> MultiPolygon {
        let mut polygons: Vec<Polygon> = self.polygons.iter().map(Polygon::normalize).collect();
        polygons.sort_by(|a, b| a.compare(b));
        self.derived(polygons)
    }

    /// Multipolygon moved by the given delta of each axis.
    pub fn move_by(&self, deltas: &[f64]) -> MultiPolygon {
        let moved = self.polygons.iter().map(|polygon| polygon.move_by(deltas));
        self.derived(moved.collect())
    }

    /// See [`Polygon::insert_vertex`].
    pub fn insert_vertex(
        &self,
        part_index: usize,
        ring_index: usize,
        vertex_index: usize,
        values: &[f64],
    ) -> Result<MultiPolygon, GeometryError> {
        self.edit_polygon(part_index, |polygon| {
            polygon.insert_vertex(ring_index, vertex_index, values)
        })
    }

    /// See [`Polygon::move_vertex`].
    pub fn move_vertex(
        &self,
        part_index: usize,
        ring_index: usize,
        vertex_index: isize,
        values: &[f64],
    ) -> Result<MultiPolygon, GeometryError> {
        self.edit_polygon(part_index, |polygon| {
            polygon.move_vertex(ring_index, vertex_index, values)
        })
    }

    /// See [`Polygon::delete_vertex`].
    pub fn delete_vertex(
        &self,
        part_index: usize,
        ring_index: usize,
        vertex_index: isize,
    ) -> Result<MultiPolygon, GeometryError> {
        self.edit_polygon(part_index, |polygon| {
            polygon.delete_vertex(ring_index, vertex_index)
        })
    }

    fn edit_polygon(
        &self,
        part_index: usize,
        edit: impl FnOnce(&Polygon) -> Result<Polygon, GeometryError>,
    ) -> Result<MultiPolygon, GeometryError> {
        let polygon = self
            .polygons
            .get(part_index)
            .ok_or_else(|| part_out_of_range(part_index, self.polygons.len()))?;

        let mut polygons = self.polygons.clone();
        polygons[part_index] = edit(polygon)?;
        Ok(self.derived(polygons))
    }

    /// Copies the multipolygon into the factory.
    pub fn copy(&self, factory: &GeometryFactory) -> Result<MultiPolygon, GeometryError> {
        let polygons = self
            .polygons
            .iter()
            .map(|polygon| polygon.copy(factory))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            polygons,
            properties: self.properties.derive_with(factory),
        })
    }

    /// Compares the sorted polygons of both multipolygons.
    pub fn compare(&self, other: &MultiPolygon) -> Ordering {
        compare_sorted(&self.polygons, &other.polygons, Polygon::compare)
    }

    /// Returns true if the multipolygons have equal polygons in the same order.
    pub fn equals(&self, axis_count: usize, other: &MultiPolygon) -> bool {
        self.polygons.len() == other.polygons.len()
            && self
                .polygons
                .iter()
                .zip(&other.polygons)
                .all(|(a, b)| a.equals(axis_count, b))
    }

    /// Returns true if the polygons match within the `tolerance`.
    pub fn equals_exact(&self, other: &MultiPolygon, tolerance: f64) -> bool {
        self.polygons.len() == other.polygons.len()
            && self
                .polygons
                .iter()
                .zip(&other.polygons)
                .all(|(a, b)| a.equals_exact(b, tolerance))
    }
}

impl_equality!(MultiPolygon);

impl Geometry for MultiPolygon {
    fn factory(&self) -> &GeometryFactory {
        self.properties.factory()
    }

    fn geometry_type(&self) -> GeometryType {
        GeometryType::MultiPolygon
    }

    fn is_empty(&self) -> bool {
        self.polygons.iter().all(|polygon| polygon.is_empty())
    }

    fn vertices(&self) -> Vertices<'_> {
        let components = self
            .polygons
            .iter()
            .enumerate()
            .flat_map(|(part, polygon)| {
                let rings = polygon.rings().iter().enumerate();
                rings.filter_map(move |(ring, line)| {
                    let prefix = Prefix::PartRing(part, ring);
                    line.sequence()
                        .as_ref()
                        .map(|coordinates| Component::new(coordinates, prefix))
                })
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

    /// All rings of all polygons as one multilinestring.
    fn boundary(&self) -> Geom {
        let lines = self
            .polygons
            .iter()
            .flat_map(|polygon| polygon.rings())
            .map(|ring| ring.as_line().clone())
            .collect();
        let boundary = MultiLineString::from_parts(self.factory().clone(), lines, None);
        Geom::MultiLineString(boundary)
    }

    fn boundary_dimension(&self) -> Dimension {
        if self.is_empty() {
            Dimension::False
        } else {
            Dimension::Curve
        }
    }

    fn length(&self) -> f64 {
        self.polygons.iter().map(|polygon| polygon.length()).sum()
    }

    fn area(&self) -> f64 {
        self.polygons.iter().map(|polygon| polygon.area()).sum()
    }
}
