use std::cmp::Ordering;

use crate::algorithm::{BoundaryOperator, Mod2BoundaryOperator};
use crate::bounding_box::BoundingBox;
use crate::cursor::{Component, Prefix, Vertices};
use crate::error::GeometryError;
use crate::factory::GeometryFactory;
use crate::geom::Geom;
use crate::geometry::{
    compare_sorted, impl_equality, part_out_of_range, Geometry, LineString, Properties, UserData,
};
use crate::geometry_type::{Dimension, GeometryType};

/// A set of lines.
#[derive(Debug, Clone)]
pub struct MultiLineString {
    lines: Vec<LineString>,
    properties: Properties,
}

impl MultiLineString {
    pub(crate) fn from_parts(
        factory: GeometryFactory,
        lines: Vec<LineString>,
        user_data: Option<UserData>,
    ) -> Self {
        Self {
            lines,
            properties: Properties::new(factory, user_data),
        }
    }

    fn derived(&self, lines: Vec<LineString>) -> Self {
        Self {
            lines,
            properties: self.properties.derive(),
        }
    }

    /// Attaches the value to the multilinestring.
    pub fn with_user_data(mut self, user_data: UserData) -> Self {
        self.properties.set_user_data(user_data);
        self
    }

    /// Line with the index.
    pub fn geometry(&self, index: usize) -> Option<&LineString> {
        self.lines.get(index)
    }

    /// Same as [`geometry`](Self::geometry).
    pub fn line(&self, index: usize) -> Option<&LineString> {
        self.geometry(index)
    }

    /// Number of lines.
    pub fn geometry_count(&self) -> usize {
        self.lines.len()
    }

    /// All lines.
    pub fn lines(&self) -> &[LineString] {
        &self.lines
    }

    /// Returns true if every line is closed.
    pub fn is_closed(&self) -> bool {
        self.lines.iter().all(LineString::is_closed)
    }

    /// Reverses every line. The order of the lines is kept.
    pub fn reverse(&self) -> MultiLineString {
        self.derived(self.lines.iter().map(LineString::reverse).collect())
    }

    /// Normalized lines in sorted order.
    pub fn normalize(&self) -> MultiLineString {
        let mut lines: Vec<LineString> = self.lines.iter().map(LineString::normalize).collect();
        lines.sort_by(|a, b| a.compare(b));
        self.derived(lines)
    }

    /// Multilinestring moved by the given delta of each axis.
    pub fn move_by(&self, deltas: &[f64]) -> MultiLineString {
        self.derived(self.lines.iter().map(|line| line.move_by(deltas)).collect())
    }

    /// See [`LineString::insert_vertex`].
    pub fn insert_vertex(
        &self,
        part_index: usize,
        vertex_index: usize,
        values: &[f64],
    ) -> Result<MultiLineString, GeometryError> {
        self.edit_line(part_index, |line| line.insert_vertex(vertex_index, values))
    }

    /// See [`LineString::move_vertex`].
    pub fn move_vertex(
        &self,
        part_index: usize,
        vertex_index: isize,
        values: &[f64],
    ) -> Result<MultiLineString, GeometryError> {
        self.edit_line(part_index, |line| line.move_vertex(vertex_index, values))
    }

    /// See [`LineString::delete_vertex`].
    pub fn delete_vertex(
        &self,
        part_index: usize,
        vertex_index: isize,
    ) -> Result<MultiLineString, GeometryError> {
        self.edit_line(part_index, |line| line.delete_vertex(vertex_index))
    }

    fn edit_line(
        &self,
        part_index: usize,
        edit: impl FnOnce(&LineString) -> Result<LineString, GeometryError>,
    ) -> Result<MultiLineString, GeometryError> {
        let line = self
            .lines
            .get(part_index)
            .ok_or_else(|| part_out_of_range(part_index, self.lines.len()))?;

        let mut lines = self.lines.clone();
        lines[part_index] = edit(line)?;
        Ok(self.derived(lines))
    }

    /// Copies the multilinestring into the factory.
    pub fn copy(&self, factory: &GeometryFactory) -> Result<MultiLineString, GeometryError> {
        let lines = self
            .lines
            .iter()
            .map(|line| line.copy(factory))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            lines,
            properties: self.properties.derive_with(factory),
        })
    }

    /// Compares the sorted lines of both multilinestrings.
    pub fn compare(&self, other: &MultiLineString) -> Ordering {
        compare_sorted(&self.lines, &other.lines, LineString::compare)
    }

    /// Returns true if the multilinestrings have equal lines in the same order.
    pub fn equals(&self, axis_count: usize, other: &MultiLineString) -> bool {
        self.lines.len() == other.lines.len()
            && self
                .lines
                .iter()
                .zip(&other.lines)
                .all(|(a, b)| a.equals(axis_count, b))
    }

    /// Returns true if the lines match within the `tolerance`.
    pub fn equals_exact(&self, other: &MultiLineString, tolerance: f64) -> bool {
        self.lines.len() == other.lines.len()
            && self
                .lines
                .iter()
                .zip(&other.lines)
                .all(|(a, b)| a.equals_exact(b, tolerance))
    }

    /// Boundary computed by the given operator.
    pub fn boundary_with(&self, operator: &dyn BoundaryOperator) -> Geom {
        let lines: Vec<&LineString> = self.lines.iter().collect();
        operator.line_boundary(self.factory(), &lines)
    }
}

impl_equality!(MultiLineString);

impl Geometry for MultiLineString {
    fn factory(&self) -> &GeometryFactory {
        self.properties.factory()
    }

    fn geometry_type(&self) -> GeometryType {
        GeometryType::MultiLineString
    }

    fn is_empty(&self) -> bool {
        self.lines.iter().all(|line| line.is_empty())
    }

    fn vertices(&self) -> Vertices<'_> {
        let components = self
            .lines
            .iter()
            .enumerate()
            .filter_map(|(i, line)| {
                line.sequence()
                    .as_ref()
                    .map(|coordinates| Component::new(coordinates, Prefix::Part(i)))
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
        self.boundary_with(&Mod2BoundaryOperator)
    }

    fn boundary_dimension(&self) -> Dimension {
        if self.is_closed() {
            Dimension::False
        } else {
            Dimension::Point
        }
    }

    fn length(&self) -> f64 {
        self.lines.iter().map(|line| line.length()).sum()
    }
}
