use crate::coordinates::CoordinateSequence;

/// Signed area of a closed sequence. Positive for counterclockwise rings.
///
/// X values are translated by the X of the first vertex before summing to reduce the loss of
/// precision for rings far from the origin. Sequences with less than 3 vertices have no area.
pub fn signed_ring_area(ring: &impl CoordinateSequence) -> f64 {
    let vertex_count = ring.vertex_count();
    if vertex_count < 3 {
        return 0.0;
    }

    let x0 = ring.x(0);
    let mut sum = 0.0;
    for i in 1..(vertex_count - 1) as isize {
        let x = ring.x(i) - x0;
        let y_prev = ring.y(i - 1);
        let y_next = ring.y(i + 1);
        sum += x * (y_next - y_prev);
    }

    sum / 2.0
}

/// Absolute area of a closed sequence.
pub fn ring_area(ring: &impl CoordinateSequence) -> f64 {
    signed_ring_area(ring).abs()
}

/// Sum of the euclidean lengths of all segments of the sequence.
pub fn sequence_length(sequence: &impl CoordinateSequence) -> f64 {
    let vertex_count = sequence.vertex_count() as isize;
    let mut length = 0.0;
    for i in 1..vertex_count {
        let dx = sequence.x(i) - sequence.x(i - 1);
        let dy = sequence.y(i) - sequence.y(i - 1);
        length += dx.hypot(dy);
    }

    length
}
