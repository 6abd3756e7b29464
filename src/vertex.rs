//! Vertex coordinates and the letter/number codec.
//!
//! A vertex names one intersection of the board. The human-readable form is a
//! letter followed by a number, e.g. `"C13"`. `"A1"` is the lower-left corner:
//! the letter axis is horizontal, the number axis vertical.
//!
//! The numeric form maps the number axis 1:1 and converts letters so that
//! A=1, B=2, and so on. The letter "I" is never used and the gap it leaves is
//! closed, i.e. H=8 and J=9. Both axes range from 1 to 19.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::constants::{AXIS_LETTERS, AXIS_MAX, AXIS_MIN, SKIPPED_LETTER};

/// Errors produced when constructing a [`Vertex`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VertexError {
    /// The string does not have the form `<letter><number>` with both axes in range.
    #[error("invalid vertex format: {0:?}")]
    InvalidFormat(String),
    /// A numeric axis lies outside 1..=19.
    #[error("vertex ({x}, {y}) is out of range")]
    OutOfRange { x: i32, y: i32 },
}

/// The numeric compounds of a vertex. `x` is the letter axis, `y` the number axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexNumeric {
    pub x: i32,
    pub y: i32,
}

impl VertexNumeric {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for VertexNumeric {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// An immutable board coordinate.
///
/// The string form is computed once at construction. Equality, ordering and
/// hashing only ever look at the numeric compounds.
#[derive(Debug, Clone)]
pub struct Vertex {
    numeric: VertexNumeric,
    string: String,
}

impl Vertex {
    /// Parse a vertex such as `"C13"`. Lowercase letters are accepted.
    pub fn from_string(s: &str) -> Result<Self, VertexError> {
        let invalid = || VertexError::InvalidFormat(s.to_string());

        let bytes = s.as_bytes();
        let Some((&letter, digits)) = bytes.split_first() else {
            return Err(invalid());
        };
        if digits.is_empty() || digits.len() > 2 || !digits.iter().all(u8::is_ascii_digit) {
            return Err(invalid());
        }

        let x = letter_to_axis(letter).ok_or_else(invalid)?;
        let y = digits
            .iter()
            .fold(0i32, |acc, &b| acc * 10 + (b - b'0') as i32);
        if !axis_in_range(y) || digits[0] == b'0' {
            return Err(invalid());
        }

        Ok(Self::new_unchecked(VertexNumeric { x, y }))
    }

    /// Build a vertex from its numeric compounds.
    pub fn from_numeric(numeric: impl Into<VertexNumeric>) -> Result<Self, VertexError> {
        let numeric = numeric.into();
        if !axis_in_range(numeric.x) || !axis_in_range(numeric.y) {
            return Err(VertexError::OutOfRange {
                x: numeric.x,
                y: numeric.y,
            });
        }
        Ok(Self::new_unchecked(numeric))
    }

    pub(crate) fn new_unchecked(numeric: VertexNumeric) -> Self {
        let letter = AXIS_LETTERS[(numeric.x - 1) as usize] as char;
        Self {
            numeric,
            string: format!("{letter}{}", numeric.y),
        }
    }

    /// The vertex in its human-readable form, e.g. `"C13"`.
    pub fn string(&self) -> &str {
        &self.string
    }

    pub fn numeric(&self) -> VertexNumeric {
        self.numeric
    }

    pub fn x(&self) -> i32 {
        self.numeric.x
    }

    pub fn y(&self) -> i32 {
        self.numeric.y
    }

    /// The letter (horizontal) axis compound, e.g. `"C"`.
    pub fn letter_axis_compound(&self) -> &str {
        &self.string[..1]
    }

    /// The number (vertical) axis compound, e.g. `"13"`.
    pub fn number_axis_compound(&self) -> &str {
        &self.string[1..]
    }

    pub fn is_equal_to_vertex(&self, other: &Vertex) -> bool {
        self.numeric == other.numeric
    }
}

fn axis_in_range(value: i32) -> bool {
    (AXIS_MIN as i32..=AXIS_MAX as i32).contains(&value)
}

/// Convert an axis letter to its numeric value, closing the gap left by "I".
fn letter_to_axis(letter: u8) -> Option<i32> {
    let letter = letter.to_ascii_uppercase();
    if !letter.is_ascii_uppercase() || letter == SKIPPED_LETTER {
        return None;
    }
    let mut value = (letter - b'A' + 1) as i32;
    if letter > SKIPPED_LETTER {
        value -= 1;
    }
    axis_in_range(value).then_some(value)
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal_to_vertex(other)
    }
}

impl Eq for Vertex {}

impl Hash for Vertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.numeric.hash(state);
    }
}

impl PartialOrd for Vertex {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Row-major order: by number axis, then letter axis.
impl Ord for Vertex {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.numeric.y, self.numeric.x).cmp(&(other.numeric.y, other.numeric.x))
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.string)
    }
}

impl FromStr for Vertex {
    type Err = VertexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl TryFrom<VertexNumeric> for Vertex {
    type Error = VertexError;

    fn try_from(numeric: VertexNumeric) -> Result<Self, Self::Error> {
        Self::from_numeric(numeric)
    }
}

impl Serialize for Vertex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.string)
    }
}

impl<'de> Deserialize<'de> for Vertex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_string(&s).map_err(serde::de::Error::custom)
    }
}
