//! Planar algorithms shared by all geometry types.
//!
//! The functions of this module work on any [`CoordinateSequence`](crate::CoordinateSequence) and
//! only use X and Y values of the vertices.

mod boundary;
pub use boundary::{BoundaryOperator, Mod2BoundaryOperator};

mod compare;
pub use compare::compare_sequences;

mod measure;
pub use measure::{ring_area, sequence_length, signed_ring_area};

mod orientation;
pub use orientation::{is_counter_clockwise, orientation_index, Orientation};
