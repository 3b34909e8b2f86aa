//! [`GeometryFactory`] and its configuration.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::coordinates::{CoordinateSequence, Coordinates};
use crate::error::GeometryError;
use crate::geom::Geom;
use crate::geometry::{
    Geometry, GeometryCollection, LineString, LinearRing, MultiLineString, MultiPoint, MultiPolygon,
    Point, Polygon,
};
use crate::operation::{AxisCountOperation, CoordinatesOperation, OperationProvider};
use crate::precision::{PrecisionModel, X, Y};

/// Constructor of all geometries.
///
/// A factory defines the coordinate system id (`srid`), the number of axes every vertex of its
/// geometries has and the [`PrecisionModel`] applied to every value when a geometry is constructed.
/// Geometries keep a handle to the factory that created them, so the factory is a cheap to clone
/// shared handle.
///
/// ```
/// use geom_kernel::{Geometry, GeometryFactory};
///
/// let factory = GeometryFactory::default();
/// let line = factory.line_string(&[[0.0, 0.0], [3.0, 4.0]]).unwrap();
/// assert_eq!(line.length(), 5.0);
/// ```
#[derive(Clone)]
pub struct GeometryFactory {
    inner: Arc<FactoryInner>,
}

struct FactoryInner {
    srid: u32,
    axis_count: usize,
    precision: PrecisionModel,
    operations: Option<Arc<dyn OperationProvider>>,
}

impl GeometryFactory {
    /// Creates a floating precision factory without a coordinate system.
    pub fn new(axis_count: usize) -> Result<Self, GeometryError> {
        GeometryFactoryBuilder::default()
            .with_axis_count(axis_count)
            .build()
    }

    /// Floating precision factory with the given coordinate system id.
    pub fn floating(srid: u32, axis_count: usize) -> Result<Self, GeometryError> {
        GeometryFactoryBuilder::default()
            .with_srid(srid)
            .with_axis_count(axis_count)
            .build()
    }

    /// Fixed precision factory.
    pub fn fixed(
        srid: u32,
        axis_count: usize,
        precision: PrecisionModel,
    ) -> Result<Self, GeometryError> {
        GeometryFactoryBuilder::default()
            .with_srid(srid)
            .with_axis_count(axis_count)
            .with_precision_model(precision)
            .build()
    }

    /// Returns a builder to configure a new factory.
    pub fn builder() -> GeometryFactoryBuilder {
        GeometryFactoryBuilder::default()
    }

    /// Coordinate system id. `0` means the coordinate system is unknown.
    pub fn srid(&self) -> u32 {
        self.inner.srid
    }

    pub fn axis_count(&self) -> usize {
        self.inner.axis_count
    }

    pub fn precision_model(&self) -> &PrecisionModel {
        &self.inner.precision
    }

    /// See [`PrecisionModel::resolution`].
    pub fn resolution(&self, axis_index: usize) -> f64 {
        self.inner.precision.resolution(axis_index)
    }

    /// Returns true if values are stored without rounding.
    pub fn is_floating(&self) -> bool {
        self.inner.precision.is_floating()
    }

    /// Rounds the value of the axis to the precision model of the factory.
    pub fn make_precise(&self, axis_index: usize, value: f64) -> f64 {
        self.inner.precision.make_precise(axis_index, value)
    }

    /// Rounds all values of a flat buffer with the factory's axis count in place.
    pub fn make_precise_all(&self, values: &mut [f64]) {
        if self.is_floating() {
            return;
        }

        let axis_count = self.axis_count();
        for (index, value) in values.iter_mut().enumerate() {
            *value = self.make_precise(index % axis_count, *value);
        }
    }

    /// Factory with the same coordinate system and precision but a different number of axes.
    pub fn convert_axis_count(&self, axis_count: usize) -> Result<Self, GeometryError> {
        if axis_count == self.axis_count() {
            return Ok(self.clone());
        }

        GeometryFactoryBuilder::from(self)
            .with_axis_count(axis_count)
            .build()
    }

    /// Operation to use when copying geometries of this factory into the `target` factory.
    ///
    /// Returns `None` if either factory has no coordinate system, if both use the same one, or if
    /// the target factory does not know how to transform between them. Values are carried over
    /// unchanged in this case.
    pub fn coordinates_operation(
        &self,
        target: &GeometryFactory,
    ) -> Option<Arc<dyn CoordinatesOperation>> {
        if self.srid() == 0 || target.srid() == 0 || self.srid() == target.srid() {
            return None;
        }

        let operation = target
            .inner
            .operations
            .as_ref()
            .and_then(|provider| provider.operation(self.srid(), target.srid()));
        if operation.is_none() {
            log::debug!(
                "No coordinates operation from {} to {}, values are copied as is",
                self.srid(),
                target.srid()
            );
        }

        operation
    }

    /// Creates a point from its axis values. An empty slice creates an empty point.
    ///
    /// Values beyond the factory's axis count are ignored, missing axes are set to `NaN`.
    pub fn point(&self, values: &[f64]) -> Result<Point, GeometryError> {
        if values.len() == 1 {
            return Err(GeometryError::InvalidAxisCount(1));
        }

        let coordinates = self.make_coordinates(values.len(), values)?;
        Ok(Point::from_parts(self.clone(), coordinates, None))
    }

    pub fn point_xy(&self, x: f64, y: f64) -> Point {
        let coordinates = self.precise_coordinates(2, &[x, y]);
        Point::from_parts(self.clone(), coordinates, None)
    }

    pub fn empty_point(&self) -> Point {
        Point::from_parts(self.clone(), None, None)
    }

    /// Creates a line from its vertices.
    ///
    /// ```
    /// use geom_kernel::{GeometryError, GeometryFactory};
    ///
    /// let factory = GeometryFactory::default();
    /// assert!(factory.line_string(&[[0.0, 0.0], [1.0, 1.0]]).is_ok());
    /// let single = factory.line_string(&[[0.0, 0.0]]);
    /// assert!(matches!(single, Err(GeometryError::InvalidGeometry(_))));
    /// ```
    pub fn line_string<const N: usize>(
        &self,
        vertices: &[[f64; N]],
    ) -> Result<LineString, GeometryError> {
        let values: Vec<f64> = vertices.iter().flatten().copied().collect();
        self.line_string_flat(N, &values)
    }

    /// Creates a line from a flat buffer with `axis_count` values per vertex.
    pub fn line_string_flat(
        &self,
        axis_count: usize,
        values: &[f64],
    ) -> Result<LineString, GeometryError> {
        let coordinates = self.make_coordinates(axis_count, values)?;
        validate_line(&coordinates)?;
        Ok(LineString::from_parts(self.clone(), coordinates, None))
    }

    /// Creates an empty line.
    pub fn empty_line_string(&self) -> LineString {
        LineString::from_parts(self.clone(), None, None)
    }

    /// Creates a closed ring from its vertices. The last vertex must repeat the first one.
    pub fn linear_ring<const N: usize>(
        &self,
        vertices: &[[f64; N]],
    ) -> Result<LinearRing, GeometryError> {
        let values: Vec<f64> = vertices.iter().flatten().copied().collect();
        self.linear_ring_flat(N, &values)
    }

    /// Creates a closed ring from a flat buffer with `axis_count` values per vertex.
    pub fn linear_ring_flat(
        &self,
        axis_count: usize,
        values: &[f64],
    ) -> Result<LinearRing, GeometryError> {
        let coordinates = self.make_coordinates(axis_count, values)?;
        validate_ring(&coordinates)?;
        let line = LineString::from_parts(self.clone(), coordinates, None);
        Ok(LinearRing::from_line(line))
    }

    /// Creates an empty ring.
    pub fn empty_linear_ring(&self) -> LinearRing {
        LinearRing::from_line(self.empty_line_string())
    }

    /// Creates a polygon from its shell (first ring) and holes.
    ///
    /// An empty list or a single empty ring creates an empty polygon. An empty shell with holes and
    /// empty holes are rejected. Rings created by other factories are copied into this one.
    pub fn polygon(&self, rings: Vec<LinearRing>) -> Result<Polygon, GeometryError> {
        let mut adopted = rings
            .into_iter()
            .map(|ring| self.adopt(ring, LinearRing::copy))
            .collect::<Result<Vec<_>, _>>()?;

        if adopted.first().is_some_and(|shell| shell.is_empty()) {
            if adopted.len() > 1 {
                let message = "polygon with an empty shell cannot have holes";
                return Err(GeometryError::invalid(message));
            }
            adopted.clear();
        }
        if adopted.iter().skip(1).any(|hole| hole.is_empty()) {
            return Err(GeometryError::invalid("polygon holes cannot be empty"));
        }

        Ok(Polygon::from_parts(self.clone(), adopted, None))
    }

    /// Creates a polygon from ring vertices, shell first.
    pub fn polygon_from_rings<const N: usize>(
        &self,
        rings: &[&[[f64; N]]],
    ) -> Result<Polygon, GeometryError> {
        let rings = rings
            .iter()
            .map(|ring| self.linear_ring(*ring))
            .collect::<Result<Vec<_>, _>>()?;
        self.polygon(rings)
    }

    /// Creates an empty polygon.
    pub fn empty_polygon(&self) -> Polygon {
        Polygon::from_parts(self.clone(), vec![], None)
    }

    /// Creates a multipoint.
    pub fn multi_point(&self, points: Vec<Point>) -> Result<MultiPoint, GeometryError> {
        let points = points
            .into_iter()
            .map(|point| self.adopt(point, Point::copy))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(MultiPoint::from_parts(self.clone(), points, None))
    }

    /// Creates a multipoint from the values of its points.
    pub fn multi_point_from_vertices<const N: usize>(
        &self,
        vertices: &[[f64; N]],
    ) -> Result<MultiPoint, GeometryError> {
        let points = vertices
            .iter()
            .map(|vertex| self.point(vertex))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(MultiPoint::from_parts(self.clone(), points, None))
    }

    /// Creates a multilinestring.
    pub fn multi_line_string(
        &self,
        lines: Vec<LineString>,
    ) -> Result<MultiLineString, GeometryError> {
        let lines = lines
            .into_iter()
            .map(|line| self.adopt(line, LineString::copy))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(MultiLineString::from_parts(self.clone(), lines, None))
    }

    /// Creates a multipolygon.
    pub fn multi_polygon(&self, polygons: Vec<Polygon>) -> Result<MultiPolygon, GeometryError> {
        let polygons = polygons
            .into_iter()
            .map(|polygon| self.adopt(polygon, Polygon::copy))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(MultiPolygon::from_parts(self.clone(), polygons, None))
    }

    /// Creates a collection of arbitrary geometries.
    pub fn geometry_collection(
        &self,
        geometries: Vec<Geom>,
    ) -> Result<GeometryCollection, GeometryError> {
        let geometries = geometries
            .into_iter()
            .map(|geometry| self.adopt(geometry, Geom::copy))
            .collect::<Result<Vec<_>, _>>()?;
        let collection = GeometryCollection::from_parts(self.clone(), geometries, None);
        Ok(collection)
    }

    /// Creates the most specific geometry holding all the given geometries.
    ///
    /// * no geometries: an empty [`GeometryCollection`],
    /// * one geometry: the geometry itself,
    /// * only points, only lines (rings included) or only polygons: the corresponding multi
    ///   geometry,
    /// * otherwise a [`GeometryCollection`].
    pub fn geometry(&self, mut geometries: Vec<Geom>) -> Result<Geom, GeometryError> {
        if geometries.len() == 1 {
            if let Some(geometry) = geometries.pop() {
                return self.adopt(geometry, Geom::copy);
            }
        }

        if geometries.is_empty() {
            return Ok(Geom::GeometryCollection(self.empty_geometry_collection()));
        }

        if geometries.iter().all(|g| matches!(g, Geom::Point(_))) {
            let points = geometries
                .into_iter()
                .filter_map(|g| match g {
                    Geom::Point(p) => Some(p),
                    _ => None,
                })
                .collect();
            return Ok(Geom::MultiPoint(self.multi_point(points)?));
        }

        if geometries
            .iter()
            .all(|g| matches!(g, Geom::LineString(_) | Geom::LinearRing(_)))
        {
            let lines = geometries
                .into_iter()
                .filter_map(|g| match g {
                    Geom::LineString(l) => Some(l),
                    Geom::LinearRing(r) => Some(r.into_line()),
                    _ => None,
                })
                .collect();
            return Ok(Geom::MultiLineString(self.multi_line_string(lines)?));
        }

        if geometries.iter().all(|g| matches!(g, Geom::Polygon(_))) {
            let polygons = geometries
                .into_iter()
                .filter_map(|g| match g {
                    Geom::Polygon(p) => Some(p),
                    _ => None,
                })
                .collect();
            return Ok(Geom::MultiPolygon(self.multi_polygon(polygons)?));
        }

        let collection = self.geometry_collection(geometries)?;
        Ok(Geom::GeometryCollection(collection))
    }

    pub fn empty_multi_point(&self) -> MultiPoint {
        MultiPoint::from_parts(self.clone(), vec![], None)
    }

    pub fn empty_multi_line_string(&self) -> MultiLineString {
        MultiLineString::from_parts(self.clone(), vec![], None)
    }

    pub fn empty_multi_polygon(&self) -> MultiPolygon {
        MultiPolygon::from_parts(self.clone(), vec![], None)
    }

    /// Creates an empty geometry collection.
    pub fn empty_geometry_collection(&self) -> GeometryCollection {
        GeometryCollection::from_parts(self.clone(), vec![], None)
    }

    /// Copies the geometry into this factory. See [`Geom::copy`].
    pub fn copy(&self, geometry: &Geom) -> Result<Geom, GeometryError> {
        geometry.copy(self)
    }

    fn adopt<T: Geometry>(
        &self,
        geometry: T,
        copy: impl FnOnce(&T, &GeometryFactory) -> Result<T, GeometryError>,
    ) -> Result<T, GeometryError> {
        if geometry.factory() == self {
            Ok(geometry)
        } else {
            copy(&geometry, self)
        }
    }

    /// Converts raw values into a buffer of this factory. Returns `None` for empty input.
    pub(crate) fn make_coordinates(
        &self,
        source_axis_count: usize,
        values: &[f64],
    ) -> Result<Option<Coordinates>, GeometryError> {
        if values.is_empty() {
            return Ok(None);
        }
        if source_axis_count < 2 {
            return Err(GeometryError::InvalidAxisCount(source_axis_count));
        }
        if values.len() % source_axis_count != 0 {
            return Err(GeometryError::invalid(format!(
                "{} values cannot be split into vertices of {source_axis_count} axes",
                values.len()
            )));
        }

        Ok(self.precise_coordinates(source_axis_count, values))
    }

    /// Same as [`make_coordinates`](Self::make_coordinates) for values known to form complete
    /// vertices.
    pub(crate) fn precise_coordinates(
        &self,
        source_axis_count: usize,
        values: &[f64],
    ) -> Option<Coordinates> {
        if source_axis_count == 0 {
            return None;
        }

        let axis_count = self.axis_count();
        let vertex_count = values.len() / source_axis_count;
        let mut result = vec![f64::NAN; vertex_count * axis_count];
        AxisCountOperation.perform(source_axis_count, values, axis_count, &mut result);
        self.make_precise_all(&mut result);

        Coordinates::from_values(axis_count, result)
    }

    /// Copies a buffer created by the `source` factory into this factory.
    pub(crate) fn convert_coordinates(
        &self,
        source: &GeometryFactory,
        coordinates: &Coordinates,
    ) -> Coordinates {
        let axis_count = self.axis_count();
        let mut result = vec![f64::NAN; coordinates.vertex_count() * axis_count];
        let source_axes = coordinates.axis_count();
        let values = coordinates.values();
        match source.coordinates_operation(self) {
            Some(operation) => operation.perform(source_axes, values, axis_count, &mut result),
            None => AxisCountOperation.perform(source_axes, values, axis_count, &mut result),
        }
        self.make_precise_all(&mut result);

        match Coordinates::from_values(axis_count, result) {
            Some(converted) => converted,
            None => coordinates.clone(),
        }
    }
}

pub(crate) fn validate_line(coordinates: &Option<Coordinates>) -> Result<(), GeometryError> {
    if coordinates.vertex_count() == 1 {
        let message = "line string must have 0 or at least 2 vertices";
        return Err(GeometryError::invalid(message));
    }

    Ok(())
}

pub(crate) fn validate_ring(coordinates: &Option<Coordinates>) -> Result<(), GeometryError> {
    let vertex_count = coordinates.vertex_count();
    if vertex_count == 0 {
        return Ok(());
    }
    if vertex_count < 4 {
        return Err(GeometryError::invalid(format!(
            "linear ring must have 0 or at least 4 vertices, got {vertex_count}"
        )));
    }
    if !coordinates.equals_vertex_2d(0, -1) {
        return Err(GeometryError::invalid(format!(
            "linear ring is not closed: ({}, {}) != ({}, {})",
            coordinates.coordinate(0, X),
            coordinates.coordinate(0, Y),
            coordinates.coordinate(-1, X),
            coordinates.coordinate(-1, Y),
        )));
    }

    Ok(())
}

impl Default for GeometryFactory {
    fn default() -> Self {
        Self {
            inner: Arc::new(FactoryInner {
                srid: 0,
                axis_count: 2,
                precision: PrecisionModel::FLOATING,
                operations: None,
            }),
        }
    }
}

impl PartialEq for GeometryFactory {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
            || (self.srid() == other.srid()
                && self.axis_count() == other.axis_count()
                && self.precision_model() == other.precision_model())
    }
}

impl Debug for GeometryFactory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeometryFactory")
            .field("srid", &self.srid())
            .field("axis_count", &self.axis_count())
            .field("precision", self.precision_model())
            .field("has_operations", &self.inner.operations.is_some())
            .finish()
    }
}

/// Builder for [`GeometryFactory`].
///
/// Defaults to a 2d floating factory without a coordinate system.
#[derive(Debug, Clone)]
pub struct GeometryFactoryBuilder {
    srid: u32,
    axis_count: usize,
    precision: PrecisionModel,
    operations: Option<Arc<dyn OperationProvider>>,
}

impl Default for GeometryFactoryBuilder {
    fn default() -> Self {
        Self {
            srid: 0,
            axis_count: 2,
            precision: PrecisionModel::FLOATING,
            operations: None,
        }
    }
}

impl From<&GeometryFactory> for GeometryFactoryBuilder {
    fn from(factory: &GeometryFactory) -> Self {
        Self {
            srid: factory.srid(),
            axis_count: factory.axis_count(),
            precision: *factory.precision_model(),
            operations: factory.inner.operations.clone(),
        }
    }
}

impl GeometryFactoryBuilder {
    pub fn with_srid(mut self, srid: u32) -> Self {
        self.srid = srid;
        self
    }

    /// Sets the number of axes. Must be at least 2.
    pub fn with_axis_count(mut self, axis_count: usize) -> Self {
        self.axis_count = axis_count;
        self
    }

    /// Replaces the precision model.
    pub fn with_precision_model(mut self, precision: PrecisionModel) -> Self {
        self.precision = precision;
        self
    }

    /// Sets the scale of X and Y axes.
    pub fn with_scale_xy(mut self, scale: f64) -> Self {
        let precision = self.precision;
        self.precision = PrecisionModel::new(scale, precision.scale_z(), precision.scale_m());
        self
    }

    /// Sets the scale of the Z axis.
    pub fn with_scale_z(mut self, scale: f64) -> Self {
        let precision = self.precision;
        self.precision = PrecisionModel::new(precision.scale_xy(), scale, precision.scale_m());
        self
    }

    /// Sets the scale of the M axis.
    pub fn with_scale_m(mut self, scale: f64) -> Self {
        let precision = self.precision;
        self.precision = PrecisionModel::new(precision.scale_xy(), precision.scale_z(), scale);
        self
    }

    /// Sets the provider of coordinate operations used when geometries are copied into the factory.
    pub fn with_operations(mut self, operations: Arc<dyn OperationProvider>) -> Self {
        self.operations = Some(operations);
        self
    }

    /// Creates the factory.
    pub fn build(self) -> Result<GeometryFactory, GeometryError> {
        if self.axis_count < 2 {
            return Err(GeometryError::InvalidAxisCount(self.axis_count));
        }

        Ok(GeometryFactory {
            inner: Arc::new(FactoryInner {
                srid: self.srid,
                axis_count: self.axis_count,
                precision: self.precision,
                operations: self.operations,
            }),
        })
    }
}

/// Serializable description of a [`GeometryFactory`].
///
/// ```
/// use geom_kernel::FactoryConfig;
///
/// let json = r#"{"srid": 3857, "axisCount": 3, "scaleXy": 1000.0}"#;
/// let config: FactoryConfig = serde_json::from_str(json).unwrap();
/// let factory = config.build().unwrap();
/// assert_eq!(factory.srid(), 3857);
/// assert_eq!(factory.make_precise(0, 1.23456), 1.235);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FactoryConfig {
    /// Coordinate system id.
    pub srid: u32,
    /// Number of axes.
    pub axis_count: usize,
    /// Scale of X and Y axes, `0` for floating.
    pub scale_xy: f64,
    /// Scale of the Z axis, `0` for floating.
    pub scale_z: f64,
    /// Scale of the M axis, `0` for floating.
    pub scale_m: f64,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            srid: 0,
            axis_count: 2,
            scale_xy: 0.0,
            scale_z: 0.0,
            scale_m: 0.0,
        }
    }
}

impl FactoryConfig {
    /// Creates a factory with this configuration.
    pub fn build(&self) -> Result<GeometryFactory, GeometryError> {
        if self.scale_xy < 0.0 || self.scale_z < 0.0 || self.scale_m < 0.0 {
            return Err(GeometryError::Configuration(format!(
                "scales must not be negative: {}, {}, {}",
                self.scale_xy, self.scale_z, self.scale_m
            )));
        }

        let precision = PrecisionModel::new(self.scale_xy, self.scale_z, self.scale_m);
        GeometryFactoryBuilder::default()
            .with_srid(self.srid)
            .with_axis_count(self.axis_count)
            .with_precision_model(precision)
            .build()
    }
}

impl From<&GeometryFactory> for FactoryConfig {
    fn from(factory: &GeometryFactory) -> Self {
        let precision = factory.precision_model();
        Self {
            srid: factory.srid(),
            axis_count: factory.axis_count(),
            scale_xy: precision.scale_xy(),
            scale_z: precision.scale_z(),
            scale_m: precision.scale_m(),
        }
    }
}
