use serde::{Deserialize, Serialize};

use crate::cartesian::CartesianPoint2d;
use crate::coordinates::CoordinateSequence;
use crate::precision::X;

/// Orientation of a triplet of points.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Clockwise
    Clockwise,
    /// Counterclockwise
    Counterclockwise,
    /// Collinear
    Collinear,
}

impl Orientation {
    /// Determines orientation of a triplet of points.
    pub fn triplet(
        p: &impl CartesianPoint2d<Num = f64>,
        q: &impl CartesianPoint2d<Num = f64>,
        r: &impl CartesianPoint2d<Num = f64>,
    ) -> Self {
        Self::from_index(orientation_index(p, q, r))
    }

    /// Converts the result of [`orientation_index`].
    pub fn from_index(index: i32) -> Self {
        match index {
            i if i > 0 => Self::Counterclockwise,
            i if i < 0 => Self::Clockwise,
            _ => Self::Collinear,
        }
    }
}

/// Sign of the cross product of `p2 - p1` and `p - p1`.
///
/// * `1` if `p` is to the left of the directed line `p1 -> p2` (counterclockwise turn),
/// * `-1` if it is to the right (clockwise turn),
/// * `0` if the points are collinear or any of the values is `NaN`.
pub fn orientation_index(
    p1: &impl CartesianPoint2d<Num = f64>,
    p2: &impl CartesianPoint2d<Num = f64>,
    p: &impl CartesianPoint2d<Num = f64>,
) -> i32 {
    let d = p2.sub(p1);
    let dp = p.sub(p1);
    let cross = d.x * dp.y - d.y * dp.x;

    if cross > 0.0 {
        1
    } else if cross < 0.0 {
        -1
    } else {
        0
    }
}

struct SequenceVertex<'a, S>(&'a S, isize);

impl<S: CoordinateSequence> CartesianPoint2d for SequenceVertex<'_, S> {
    type Num = f64;

    fn x(&self) -> f64 {
        self.0.x(self.1)
    }

    fn y(&self) -> f64 {
        self.0.y(self.1)
    }
}

/// Returns true if the closed sequence of vertices goes counterclockwise.
///
/// The orientation is taken at the vertex with the highest Y (the first one in the sequence if
/// there are several), comparing its closest distinct predecessor and successor. Sequences with
/// less than 4 vertices and degenerate (flat) rings are not counterclockwise.
pub fn is_counter_clockwise(sequence: &impl CoordinateSequence) -> bool {
    let vertex_count = sequence.vertex_count();
    if vertex_count < 4 {
        return false;
    }

    let point_count = (vertex_count - 1) as isize;

    let mut hi_index = 0;
    let mut hi_y = sequence.y(0);
    for i in 1..=point_count {
        let y = sequence.y(i);
        if y > hi_y {
            hi_y = y;
            hi_index = i;
        }
    }

    let mut prev_index = hi_index;
    loop {
        prev_index -= 1;
        if prev_index < 0 {
            prev_index = point_count;
        }
        if !(sequence.equals_vertex_2d(prev_index, hi_index) && prev_index != hi_index) {
            break;
        }
    }

    let mut next_index = hi_index;
    loop {
        next_index = (next_index + 1) % point_count;
        if !(sequence.equals_vertex_2d(next_index, hi_index) && next_index != hi_index) {
            break;
        }
    }

    if sequence.equals_vertex_2d(prev_index, hi_index)
        || sequence.equals_vertex_2d(next_index, hi_index)
        || sequence.equals_vertex_2d(prev_index, next_index)
    {
        return false;
    }

    let prev = SequenceVertex(sequence, prev_index);
    let hi = SequenceVertex(sequence, hi_index);
    let next = SequenceVertex(sequence, next_index);

    match orientation_index(&prev, &hi, &next) {
        0 => sequence.coordinate(prev_index, X) > sequence.coordinate(next_index, X),
        index => index > 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinates::Coordinates;

    fn sequence(vertices: &[[f64; 2]]) -> Coordinates {
        Coordinates::new(2, vertices.iter().flatten().copied().collect()).expect("valid")
    }

    #[test]
    fn orientation_of_triplet() {
        let a = [0.0, 0.0];
        let b = [4.0, 0.0];
        assert!(orientation_index(&a, &b, &[2.0, 2.0]) > 0);
        assert!(orientation_index(&a, &b, &[2.0, -2.0]) < 0);
        assert_eq!(orientation_index(&a, &b, &[8.0, 0.0]), 0);
        assert_eq!(
            Orientation::triplet(&a, &b, &[2.0, 2.0]),
            Orientation::Counterclockwise
        );
        assert_eq!(
            Orientation::triplet(&a, &b, &[2.0, -2.0]),
            Orientation::Clockwise
        );
    }

    #[test]
    fn ring_orientation() {
        let square = [[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [0.0, 0.0]];
        let ccw = sequence(&square);
        assert!(is_counter_clockwise(&ccw));
        assert!(!is_counter_clockwise(&ccw.reversed()));
    }

    #[test]
    fn highest_vertex_is_first() {
        let ccw = sequence(&[[2.0, 5.0], [0.0, 0.0], [4.0, 0.0], [2.0, 5.0]]);
        assert!(is_counter_clockwise(&ccw));
        assert!(!is_counter_clockwise(&ccw.reversed()));
    }

    #[test]
    fn repeated_top_vertices() {
        let triangle = [[0.0, 0.0], [4.0, 0.0], [2.0, 5.0], [2.0, 5.0], [0.0, 0.0]];
        let ccw = sequence(&triangle);
        assert!(is_counter_clockwise(&ccw));
    }

    #[test]
    fn degenerate_rings_are_not_ccw() {
        let flat = sequence(&[[0.0, 0.0], [4.0, 0.0], [0.0, 0.0], [0.0, 0.0]]);
        assert!(!is_counter_clockwise(&flat));

        let short = sequence(&[[0.0, 0.0], [4.0, 0.0], [0.0, 0.0]]);
        assert!(!is_counter_clockwise(&short));
    }
}
