//! The Go board: stone placement, captures and regions.
//!
//! The board is the mutable representation that the board position cursor
//! keeps in sync with the move history. Besides normal play it can apply a
//! recorded [`Move`] forward and revert it again, which makes navigating
//! between positions incremental in both directions.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{BOARD_DIMENSIONS, SIDE_STAR_POINT_THRESHOLD};
use crate::handicap::{centre_point, corner_points, side_points};
use crate::moves::{Move, MoveKind};
use crate::vertex::{Vertex, VertexNumeric};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => f.write_str("black"),
            Color::White => f.write_str("white"),
        }
    }
}

/// Errors raised by the board.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BoardError {
    #[error("{0} is not on the board")]
    OutOfBounds(Vertex),
    #[error("illegal move: {0} is not empty")]
    Occupied(Vertex),
    #[error("illegal move: {0} is suicide")]
    Suicide(Vertex),
    #[error("illegal move: {0} retakes ko")]
    Ko(Vertex),
    #[error("unsupported board size {0}")]
    InvalidSize(usize),
    #[error("handicap {handicap} is not possible, maximum is {max}")]
    InvalidHandicap { handicap: usize, max: usize },
    /// A recorded move does not fit the stones on the board.
    #[error("board does not match recorded move at {0}")]
    ReplayMismatch(Vertex),
}

/// The board sizes that can be played.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum BoardSize {
    Seven,
    Nine,
    Eleven,
    Thirteen,
    Fifteen,
    Seventeen,
    #[default]
    Nineteen,
}

impl BoardSize {
    pub const ALL: [BoardSize; 7] = [
        BoardSize::Seven,
        BoardSize::Nine,
        BoardSize::Eleven,
        BoardSize::Thirteen,
        BoardSize::Fifteen,
        BoardSize::Seventeen,
        BoardSize::Nineteen,
    ];

    /// Number of lines in each direction, e.g. 19 for [`BoardSize::Nineteen`].
    pub fn dimension(self) -> usize {
        BOARD_DIMENSIONS[self as usize]
    }

    pub fn from_dimension(dimension: usize) -> Result<Self, BoardError> {
        BoardSize::ALL
            .into_iter()
            .find(|size| size.dimension() == dimension)
            .ok_or(BoardError::InvalidSize(dimension))
    }
}

impl TryFrom<usize> for BoardSize {
    type Error = BoardError;

    fn try_from(dimension: usize) -> Result<Self, Self::Error> {
        Self::from_dimension(dimension)
    }
}

impl From<BoardSize> for usize {
    fn from(size: BoardSize) -> usize {
        size.dimension()
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.dimension();
        write!(f, "{d}x{d}")
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];
}

/// A maximal set of connected intersections that share the same state.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Stone color, or `None` for an empty area.
    pub color: Option<Color>,
    /// Members in row-major order.
    pub vertices: Vec<Vertex>,
    /// Distinct empty neighbours. Always 0 for empty regions.
    pub liberties: usize,
}

impl Region {
    pub fn size(&self) -> usize {
        self.vertices.len()
    }

    pub fn contains(&self, vertex: &Vertex) -> bool {
        self.vertices.binary_search(vertex).is_ok()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: BoardSize,
    cells: Vec<Option<Color>>,
}

impl Board {
    pub fn new(size: BoardSize) -> Self {
        let d = size.dimension();
        Self {
            size,
            cells: vec![None; d * d],
        }
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    pub fn dimension(&self) -> usize {
        self.size.dimension()
    }

    pub fn contains(&self, vertex: &Vertex) -> bool {
        let d = self.dimension() as i32;
        vertex.x() <= d && vertex.y() <= d
    }

    fn idx(&self, vertex: &Vertex) -> usize {
        (vertex.y() as usize - 1) * self.dimension() + (vertex.x() as usize - 1)
    }

    fn vertex_at(&self, idx: usize) -> Vertex {
        let d = self.dimension();
        Vertex::new_unchecked(VertexNumeric::new((idx % d + 1) as i32, (idx / d + 1) as i32))
    }

    fn checked_idx(&self, vertex: &Vertex) -> Result<usize, BoardError> {
        if self.contains(vertex) {
            Ok(self.idx(vertex))
        } else {
            Err(BoardError::OutOfBounds(vertex.clone()))
        }
    }

    /// The stone at `vertex`, `None` if the point is empty or off the board.
    pub fn stone_at(&self, vertex: &Vertex) -> Option<Color> {
        if !self.contains(vertex) {
            return None;
        }
        self.cells[self.idx(vertex)]
    }

    /// All vertices of the board in row-major order starting at A1.
    pub fn vertices(&self) -> impl Iterator<Item = Vertex> + '_ {
        (0..self.cells.len()).map(|i| self.vertex_at(i))
    }

    pub fn count_stones(&self, color: Color) -> usize {
        self.cells.iter().filter(|c| **c == Some(color)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    pub fn neighbour_of(&self, vertex: &Vertex, direction: Direction) -> Option<Vertex> {
        if !self.contains(vertex) {
            return None;
        }
        let (x, y) = (vertex.x(), vertex.y());
        let (nx, ny) = match direction {
            Direction::Left => (x - 1, y),
            Direction::Right => (x + 1, y),
            Direction::Up => (x, y + 1),
            Direction::Down => (x, y - 1),
        };
        Vertex::from_numeric((nx, ny))
            .ok()
            .filter(|n| self.contains(n))
    }

    pub fn neighbours(&self, vertex: &Vertex) -> Vec<Vertex> {
        Direction::ALL
            .iter()
            .filter_map(|&d| self.neighbour_of(vertex, d))
            .collect()
    }

    fn neighbour_indices(&self, idx: usize) -> impl Iterator<Item = usize> {
        let d = self.dimension();
        let (x, y) = (idx % d, idx / d);
        let mut v = Vec::with_capacity(4);
        if x > 0 {
            v.push(idx - 1);
        }
        if x + 1 < d {
            v.push(idx + 1);
        }
        if y > 0 {
            v.push(idx - d);
        }
        if y + 1 < d {
            v.push(idx + d);
        }
        v.into_iter()
    }

    /// Star points for this board size, in no particular order.
    pub fn star_points(&self) -> Vec<Vertex> {
        let mut points = corner_points(self.size);
        points.push(centre_point(self.size));
        if self.dimension() >= SIDE_STAR_POINT_THRESHOLD {
            points.extend(side_points(self.size));
        }
        points
    }

    /// Place black handicap stones. Existing stones are left untouched.
    pub fn setup_handicap(&mut self, vertices: &[Vertex]) -> Result<(), BoardError> {
        for v in vertices {
            let i = self.checked_idx(v)?;
            if self.cells[i].is_some() {
                return Err(BoardError::Occupied(v.clone()));
            }
            self.cells[i] = Some(Color::Black);
        }
        Ok(())
    }

    /// Play a stone and resolve captures.
    ///
    /// `ko` is the point that may not be played because it would retake a ko.
    /// Returns the captured stones in row-major order. On error the board is
    /// unchanged.
    pub fn play(
        &mut self,
        vertex: &Vertex,
        color: Color,
        ko: Option<&Vertex>,
    ) -> Result<Vec<Vertex>, BoardError> {
        let idx = self.checked_idx(vertex)?;
        if self.cells[idx].is_some() {
            return Err(BoardError::Occupied(vertex.clone()));
        }
        if ko == Some(vertex) {
            return Err(BoardError::Ko(vertex.clone()));
        }
        self.cells[idx] = Some(color);

        let opp = color.opposite();
        let mut to_remove: Vec<usize> = Vec::new();
        for n in self.neighbour_indices(idx) {
            if self.cells[n] == Some(opp) && !to_remove.contains(&n) {
                let (group, liberties) = self.group_at(n);
                if liberties == 0 {
                    to_remove.extend(group);
                }
            }
        }
        for &r in &to_remove {
            self.cells[r] = None;
        }

        if to_remove.is_empty() && self.group_at(idx).1 == 0 {
            self.cells[idx] = None; // undo suicidal move
            return Err(BoardError::Suicide(vertex.clone()));
        }

        to_remove.sort_unstable();
        Ok(to_remove.into_iter().map(|i| self.vertex_at(i)).collect())
    }

    /// The point that the player to move may not play because it retakes a ko.
    ///
    /// Must be called while the board reflects the position right after `last`.
    pub fn ko_point_after(&self, last: &Move) -> Option<Vertex> {
        let MoveKind::Play(played) = &last.kind else {
            return None;
        };
        let [captured] = last.captured.as_slice() else {
            return None;
        };
        let idx = self.idx(played);
        let (group, liberties) = self.group_at(idx);
        (group.len() == 1 && liberties == 1).then(|| captured.clone())
    }

    /// Bring the board from the position before `mv` to the position after it.
    pub fn apply(&mut self, mv: &Move) -> Result<(), BoardError> {
        let MoveKind::Play(vertex) = &mv.kind else {
            return Ok(());
        };
        let idx = self.checked_idx(vertex)?;
        if self.cells[idx].is_some() {
            return Err(BoardError::ReplayMismatch(vertex.clone()));
        }
        let opp = Some(mv.player.opposite());
        for c in &mv.captured {
            if self.stone_at(c) != opp {
                return Err(BoardError::ReplayMismatch(c.clone()));
            }
        }
        self.cells[idx] = Some(mv.player);
        for c in &mv.captured {
            let i = self.idx(c);
            self.cells[i] = None;
        }
        Ok(())
    }

    /// Bring the board from the position after `mv` back to the position before it.
    pub fn revert(&mut self, mv: &Move) -> Result<(), BoardError> {
        let MoveKind::Play(vertex) = &mv.kind else {
            return Ok(());
        };
        let idx = self.checked_idx(vertex)?;
        if self.cells[idx] != Some(mv.player) {
            return Err(BoardError::ReplayMismatch(vertex.clone()));
        }
        for c in &mv.captured {
            if !self.contains(c) || self.stone_at(c).is_some() {
                return Err(BoardError::ReplayMismatch(c.clone()));
            }
        }
        self.cells[idx] = None;
        let opp = Some(mv.player.opposite());
        for c in &mv.captured {
            let i = self.idx(c);
            self.cells[i] = opp;
        }
        Ok(())
    }

    /// Flood-fill the region containing `start`. Returns member indices and
    /// the number of distinct empty neighbours.
    fn group_at(&self, start: usize) -> (Vec<usize>, usize) {
        let state = self.cells[start];
        let mut stack = vec![start];
        let mut visited = vec![false; self.cells.len()];
        let mut liberty_visited = vec![false; self.cells.len()];
        let mut members = Vec::new();
        let mut liberties = 0;

        while let Some(i) = stack.pop() {
            if visited[i] {
                continue;
            }
            visited[i] = true;
            members.push(i);
            for n in self.neighbour_indices(i) {
                match self.cells[n] {
                    c if c == state => {
                        if !visited[n] {
                            stack.push(n);
                        }
                    }
                    None => {
                        if !liberty_visited[n] {
                            liberty_visited[n] = true;
                            liberties += 1;
                        }
                    }
                    _ => {}
                }
            }
        }
        members.sort_unstable();
        let liberties = if state.is_some() { liberties } else { 0 };
        (members, liberties)
    }

    fn region_from(&self, start: usize) -> Region {
        let (members, liberties) = self.group_at(start);
        Region {
            color: self.cells[start],
            vertices: members.into_iter().map(|i| self.vertex_at(i)).collect(),
            liberties,
        }
    }

    /// The region that `vertex` belongs to.
    pub fn region_at(&self, vertex: &Vertex) -> Option<Region> {
        self.contains(vertex).then(|| self.region_from(self.idx(vertex)))
    }

    /// All regions of the board, ordered by their first member.
    pub fn regions(&self) -> Vec<Region> {
        let mut seen = vec![false; self.cells.len()];
        let mut regions = Vec::new();
        for i in 0..self.cells.len() {
            if seen[i] {
                continue;
            }
            let (members, _) = self.group_at(i);
            for &m in &members {
                seen[m] = true;
            }
            regions.push(self.region_from(i));
        }
        regions
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.dimension();
        let header: String = crate::constants::AXIS_LETTERS[..d]
            .iter()
            .map(|&b| format!("{} ", b as char))
            .collect();
        writeln!(f, "   {}", header.trim_end())?;
        for y in (0..d).rev() {
            write!(f, "{:>2} ", y + 1)?;
            for x in 0..d {
                let ch = match self.cells[y * d + x] {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    None => '.',
                };
                if x + 1 < d {
                    write!(f, "{ch} ")?;
                } else {
                    write!(f, "{ch}")?;
                }
            }
            writeln!(f, " {}", y + 1)?;
        }
        writeln!(f, "   {}", header.trim_end())
    }
}
