use std::cmp::Ordering;

use crate::coordinates::{compare_vertices, CoordinateSequence};

/// Lexicographic order of two sequences: vertex by vertex (X, then Y), shorter sequence first if
/// one is a prefix of the other.
pub fn compare_sequences(a: &impl CoordinateSequence, b: &impl CoordinateSequence) -> Ordering {
    let a_count = a.vertex_count();
    let b_count = b.vertex_count();
    for i in 0..a_count.min(b_count) as isize {
        match compare_vertices(a, i, b, i) {
            Ordering::Equal => {}
            ordering => return ordering,
        }
    }

    a_count.cmp(&b_count)
}
