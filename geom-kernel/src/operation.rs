//! Coordinate transformations applied when geometries are copied between factories.

use std::fmt::Debug;
use std::sync::Arc;

use ahash::AHashMap;
use nalgebra::{Matrix3, Point2, Vector2};

/// Transformation of coordinate values from one coordinate system into another.
///
/// The kernel does not implement reprojection itself. It only calls an operation supplied through
/// the [`OperationProvider`] of the target factory when a geometry is copied into a factory with a
/// different coordinate system id.
pub trait CoordinatesOperation: Send + Sync + Debug {
    /// Transforms all vertices of the `source` buffer into the `target` buffer.
    ///
    /// Both buffers hold the same number of vertices: `source.len() / source_axis_count ==
    /// target.len() / target_axis_count`. Axes of the target that cannot be computed must be set to
    /// `NaN`.
    fn perform(
        &self,
        source_axis_count: usize,
        source: &[f64],
        target_axis_count: usize,
        target: &mut [f64],
    );
}

/// Source of [`CoordinatesOperation`]s between two coordinate systems.
pub trait OperationProvider: Send + Sync + Debug {
    /// Returns an operation transforming coordinates of the `source` coordinate system into the
    /// `target` one, if one is known.
    fn operation(&self, source: u32, target: u32) -> Option<Arc<dyn CoordinatesOperation>>;
}

/// Copies the common axes and sets the rest of the target axes to `NaN`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct AxisCountOperation;

impl CoordinatesOperation for AxisCountOperation {
    fn perform(
        &self,
        source_axis_count: usize,
        source: &[f64],
        target_axis_count: usize,
        target: &mut [f64],
    ) {
        if source_axis_count == 0 || target_axis_count == 0 {
            return;
        }

        for (from, to) in source
            .chunks_exact(source_axis_count)
            .zip(target.chunks_exact_mut(target_axis_count))
        {
            for (axis, value) in to.iter_mut().enumerate() {
                *value = from.get(axis).copied().unwrap_or(f64::NAN);
            }
        }
    }
}

/// 2d affine transformation of X and Y. Other axes are copied unchanged.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AffineOperation {
    matrix: Matrix3<f64>,
}

impl AffineOperation {
    /// Creates an operation from a homogeneous transformation matrix.
    pub fn new(matrix: Matrix3<f64>) -> Self {
        Self { matrix }
    }

    /// Moves every position by `(dx, dy)`.
    pub fn translation(dx: f64, dy: f64) -> Self {
        Self::new(Matrix3::new_translation(&Vector2::new(dx, dy)))
    }

    /// Scales positions relative to the origin.
    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self::new(Matrix3::new_nonuniform_scaling(&Vector2::new(sx, sy)))
    }

    /// Rotates positions around the origin counterclockwise by `angle` radians.
    pub fn rotation(angle: f64) -> Self {
        Self::new(Matrix3::new_rotation(angle))
    }

    /// Operation that first applies `self` and then `next`.
    pub fn then(&self, next: &AffineOperation) -> Self {
        Self::new(next.matrix * self.matrix)
    }

    /// Reverse transformation, if the matrix is invertible.
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(Self::new)
    }

    /// Transformation matrix.
    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }

    /// Transforms a single position.
    pub fn transform(&self, x: f64, y: f64) -> Point2<f64> {
        self.matrix.transform_point(&Point2::new(x, y))
    }
}

impl CoordinatesOperation for AffineOperation {
    fn perform(
        &self,
        source_axis_count: usize,
        source: &[f64],
        target_axis_count: usize,
        target: &mut [f64],
    ) {
        AxisCountOperation.perform(source_axis_count, source, target_axis_count, target);
        if target_axis_count < 2 {
            return;
        }

        for vertex in target.chunks_exact_mut(target_axis_count) {
            let transformed = self.transform(vertex[0], vertex[1]);
            vertex[0] = transformed.x;
            vertex[1] = transformed.y;
        }
    }
}

/// [`OperationProvider`] holding explicitly registered operations.
#[derive(Debug, Default, Clone)]
pub struct OperationRegistry {
    operations: AHashMap<(u32, u32), Arc<dyn CoordinatesOperation>>,
}

impl OperationRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the operation used to copy geometries from `source_srid` to `target_srid`,
    /// replacing the previously registered one.
    pub fn register(
        &mut self,
        source_srid: u32,
        target_srid: u32,
        operation: Arc<dyn CoordinatesOperation>,
    ) {
        let key = (source_srid, target_srid);
        self.operations.insert(key, operation);
    }

    /// Registers an affine operation together with its inverse for the opposite direction.
    ///
    /// Returns false and registers nothing if the operation cannot be inverted.
    pub fn register_affine(
        &mut self,
        source_srid: u32,
        target_srid: u32,
        operation: AffineOperation,
    ) -> bool {
        let Some(inverse) = operation.inverse() else {
            log::debug!("Affine {source_srid} -> {target_srid} is not invertible");
            return false;
        };

        self.register(source_srid, target_srid, Arc::new(operation));
        self.register(target_srid, source_srid, Arc::new(inverse));
        true
    }

    /// Number of registered operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns true if no operation is registered.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl OperationProvider for OperationRegistry {
    fn operation(&self, source: u32, target: u32) -> Option<Arc<dyn CoordinatesOperation>> {
        self.operations.get(&(source, target)).cloned()
    }
}
