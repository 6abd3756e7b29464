//! Fixed handicap placement.
//!
//! Follows the layout of the GTP `fixed_handicap` command: two opposite
//! corners first, then the remaining corners, the centre for odd counts and
//! the side points for six stones and more.

use crate::board::{BoardError, BoardSize};
use crate::constants::{LARGE_BOARD_THRESHOLD, MAX_HANDICAP, MAX_HANDICAP_SMALL_BOARD};
use crate::vertex::{Vertex, VertexNumeric};

/// Line of the corner star points, counted from the edge.
fn edge_line(size: BoardSize) -> i32 {
    if size.dimension() < LARGE_BOARD_THRESHOLD { 3 } else { 4 }
}

fn point(x: i32, y: i32) -> Vertex {
    Vertex::new_unchecked(VertexNumeric::new(x, y))
}

/// Largest fixed handicap for `size`.
pub fn max_handicap(size: BoardSize) -> usize {
    if size == BoardSize::Seven {
        MAX_HANDICAP_SMALL_BOARD
    } else {
        MAX_HANDICAP
    }
}

/// The four corner points, lower-left and upper-right first.
pub(crate) fn corner_points(size: BoardSize) -> Vec<Vertex> {
    let low = edge_line(size);
    let high = size.dimension() as i32 + 1 - low;
    vec![
        point(low, low),
        point(high, high),
        point(low, high),
        point(high, low),
    ]
}

pub(crate) fn centre_point(size: BoardSize) -> Vertex {
    let mid = (size.dimension() as i32 + 1) / 2;
    point(mid, mid)
}

/// The four side points, left and right first.
pub(crate) fn side_points(size: BoardSize) -> Vec<Vertex> {
    let low = edge_line(size);
    let high = size.dimension() as i32 + 1 - low;
    let mid = (size.dimension() as i32 + 1) / 2;
    vec![
        point(low, mid),
        point(high, mid),
        point(mid, low),
        point(mid, high),
    ]
}

/// The handicap stones for `handicap`, or an error if the board cannot hold them.
///
/// A handicap of 0 means an even game. A handicap of 1 is not a thing in
/// fixed placement and is rejected.
pub fn handicap_vertices(size: BoardSize, handicap: usize) -> Result<Vec<Vertex>, BoardError> {
    let max = max_handicap(size);
    if handicap == 1 || handicap > max {
        return Err(BoardError::InvalidHandicap { handicap, max });
    }
    if handicap == 0 {
        return Ok(Vec::new());
    }

    let corners = corner_points(size);
    let sides = side_points(size);
    let mut points: Vec<Vertex> = match handicap {
        2..=4 => corners[..handicap].to_vec(),
        5 => corners,
        6 | 7 => corners.into_iter().chain(sides[..2].iter().cloned()).collect(),
        _ => corners.into_iter().chain(sides).collect(),
    };
    if handicap % 2 == 1 && handicap >= 5 {
        points.push(centre_point(size));
    }
    Ok(points)
}
