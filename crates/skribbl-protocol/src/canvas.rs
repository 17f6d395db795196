//! Canvas strokes: the 7-slot wire tuple, the typed [`Stroke`], and shape
//! generators that decompose into strokes.
//!
//! ```text
//! slot:   0     1      2          3   4   5    6
//! brush:  0     color  thickness  x   y   x2   y2
//! fill:   1     color  x          y   -   -    -
//! ```
//!
//! Unused fill slots are `null` on the wire, never `0`.

use std::f64::consts::TAU;
use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::ProtocolError;

/// Number of slots in a stroke tuple.
pub const STROKE_SLOTS: usize = 7;

/// Most strokes a single draw message may carry. The server drops the rest.
pub const MAX_STROKES_PER_PACKET: usize = 8;

const TOOL_BRUSH: i32 = 0;
const TOOL_FILL: i32 = 1;

// ---------------------------------------------------------------------------
// Color palette
// ---------------------------------------------------------------------------

/// A palette color. The wire value is the index into [`PALETTE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
    Gray,
    DarkGray,
    Red,
    DarkRed,
    Orange,
    DarkOrange,
    Yellow,
    DarkYellow,
    Green,
    DarkGreen,
    Turquoise,
    DarkTurquoise,
    SkyBlue,
    DarkSkyBlue,
    Blue,
    DarkBlue,
    Purple,
    DarkPurple,
    Pink,
    DarkPink,
    Tan,
    DarkTan,
    Brown,
    DarkBrown,
    /// A palette index this client does not know.
    Unknown(i32),
}

/// The palette in wire order. Used for both encoding and decoding.
pub const PALETTE: [Color; 26] = [
    Color::White,
    Color::Black,
    Color::Gray,
    Color::DarkGray,
    Color::Red,
    Color::DarkRed,
    Color::Orange,
    Color::DarkOrange,
    Color::Yellow,
    Color::DarkYellow,
    Color::Green,
    Color::DarkGreen,
    Color::Turquoise,
    Color::DarkTurquoise,
    Color::SkyBlue,
    Color::DarkSkyBlue,
    Color::Blue,
    Color::DarkBlue,
    Color::Purple,
    Color::DarkPurple,
    Color::Pink,
    Color::DarkPink,
    Color::Tan,
    Color::DarkTan,
    Color::Brown,
    Color::DarkBrown,
];

impl Color {
    /// Resolves a palette index.
    pub fn from_index(index: i32) -> Self {
        usize::try_from(index)
            .ok()
            .and_then(|i| PALETTE.get(i).copied())
            .unwrap_or(Self::Unknown(index))
    }

    /// The palette index.
    pub fn index(self) -> i32 {
        match self {
            Self::Unknown(index) => index,
            known => PALETTE
                .iter()
                .position(|candidate| *candidate == known)
                .map_or(-1, |i| i as i32),
        }
    }
}

// ---------------------------------------------------------------------------
// Wire tuple
// ---------------------------------------------------------------------------

/// The raw 7-slot stroke tuple.
///
/// Decoding accepts any JSON number and rounds it; other clients are known to
/// send fractional coordinates. Shorter arrays are padded with `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct WireStroke(pub [Option<i32>; STROKE_SLOTS]);

impl<'de> Deserialize<'de> for WireStroke {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<Option<f64>>::deserialize(deserializer)?;
        if raw.len() > STROKE_SLOTS {
            return Err(de::Error::invalid_length(
                raw.len(),
                &"at most 7 stroke slots",
            ));
        }
        let mut slots = [None; STROKE_SLOTS];
        for (slot, value) in slots.iter_mut().zip(raw) {
            *slot = value.map(|v| v.round() as i32);
        }
        Ok(Self(slots))
    }
}

// ---------------------------------------------------------------------------
// Stroke
// ---------------------------------------------------------------------------

/// Which tool produced a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Brush,
    Fill,
}

/// One atomic drawing operation.
///
/// On the wire a stroke is always a [`WireStroke`]; serde goes through it via
/// `try_from`/`into`, so payloads containing strokes decode straight into
/// this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireStroke", into = "WireStroke")]
pub enum Stroke {
    /// A straight brush segment from `(x, y)` to `(x2, y2)`.
    Brush {
        color: Color,
        thickness: i32,
        x: i32,
        y: i32,
        x2: i32,
        y2: i32,
    },
    /// A flood fill starting at `(x, y)`.
    Fill { color: Color, x: i32, y: i32 },
}

impl Stroke {
    /// The wire tool code for this stroke.
    pub fn tool(&self) -> Tool {
        match self {
            Self::Brush { .. } => Tool::Brush,
            Self::Fill { .. } => Tool::Fill,
        }
    }

    /// Colour of the brush or the fill.
    pub fn color(&self) -> Color {
        match *self {
            Self::Brush { color, .. } | Self::Fill { color, .. } => color,
        }
    }
}

impl fmt::Display for Stroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Brush { x, y, x2, y2, .. } => write!(f, "brush ({x},{y})->({x2},{y2})"),
            Self::Fill { x, y, .. } => write!(f, "fill ({x},{y})"),
        }
    }
}

/// Interprets a wire tuple. Slot 0 picks the tool, slot 1 the color.
pub fn decode_stroke(wire: WireStroke) -> Result<Stroke, ProtocolError> {
    let [tool, color, a, b, c, d, e] = wire.0;
    let required = |slot: Option<i32>, index: usize| {
        slot.ok_or_else(|| ProtocolError::InvalidStroke(format!("slot {index} is empty")))
    };

    let color = Color::from_index(required(color, 1)?);
    match required(tool, 0)? {
        TOOL_BRUSH => Ok(Stroke::Brush {
            color,
            thickness: required(a, 2)?,
            x: required(b, 3)?,
            y: required(c, 4)?,
            x2: required(d, 5)?,
            y2: required(e, 6)?,
        }),
        TOOL_FILL => Ok(Stroke::Fill {
            color,
            x: required(a, 2)?,
            y: required(b, 3)?,
        }),
        other => Err(ProtocolError::InvalidStroke(format!("unknown tool {other}"))),
    }
}

/// Builds the wire tuple for a stroke.
pub fn encode_stroke(stroke: &Stroke) -> WireStroke {
    match *stroke {
        Stroke::Brush {
            color,
            thickness,
            x,
            y,
            x2,
            y2,
        } => WireStroke([
            Some(TOOL_BRUSH),
            Some(color.index()),
            Some(thickness),
            Some(x),
            Some(y),
            Some(x2),
            Some(y2),
        ]),
        Stroke::Fill { color, x, y } => WireStroke([
            Some(TOOL_FILL),
            Some(color.index()),
            Some(x),
            Some(y),
            None,
            None,
            None,
        ]),
    }
}

impl TryFrom<WireStroke> for Stroke {
    type Error = ProtocolError;

    fn try_from(wire: WireStroke) -> Result<Self, Self::Error> {
        decode_stroke(wire)
    }
}

impl From<Stroke> for WireStroke {
    fn from(stroke: Stroke) -> Self {
        encode_stroke(&stroke)
    }
}

// ---------------------------------------------------------------------------
// Shapes
// ---------------------------------------------------------------------------

/// A single brush segment.
pub fn line(color: Color, thickness: i32, x1: i32, y1: i32, x2: i32, y2: i32) -> Stroke {
    Stroke::Brush {
        color,
        thickness,
        x: x1,
        y: y1,
        x2,
        y2,
    }
}

/// The outline of an axis-aligned rectangle with corners `(x1, y1)` and
/// `(x2, y2)`.
///
/// Corners are visited top-left, top-right, bottom-right, bottom-left and
/// back, so each segment starts where the previous one ended.
pub fn rectangle(color: Color, thickness: i32, x1: i32, y1: i32, x2: i32, y2: i32) -> [Stroke; 4] {
    [
        line(color, thickness, x1, y1, x2, y1),
        line(color, thickness, x2, y1, x2, y2),
        line(color, thickness, x2, y2, x1, y2),
        line(color, thickness, x1, y2, x1, y1),
    ]
}

/// A flood fill at `(x, y)`.
pub fn fill(color: Color, x: i32, y: i32) -> Stroke {
    Stroke::Fill { color, x, y }
}

/// The outline of a regular polygon inscribed in a circle.
///
/// Vertex 0 sits at `center + (radius, 0)`; each following vertex advances by
/// `2π / sides`. Segment *i* joins vertex *i* to vertex *i + 1*, and the last
/// one closes back to vertex 0. The result is not chunked; see [`packets`].
pub fn polygon(
    color: Color,
    thickness: i32,
    center_x: i32,
    center_y: i32,
    radius: i32,
    sides: u32,
) -> Vec<Stroke> {
    let vertices: Vec<(i32, i32)> = (0..sides)
        .map(|i| {
            let angle = TAU * f64::from(i) / f64::from(sides);
            let radius = f64::from(radius);
            (
                center_x + (radius * angle.cos()).round() as i32,
                center_y + (radius * angle.sin()).round() as i32,
            )
        })
        .collect();

    vertices
        .iter()
        .zip(vertices.iter().cycle().skip(1))
        .map(|(&(x1, y1), &(x2, y2))| line(color, thickness, x1, y1, x2, y2))
        .collect()
}

/// Splits a stroke batch into draw-message-sized groups.
pub fn packets(strokes: &[Stroke]) -> std::slice::Chunks<'_, Stroke> {
    strokes.chunks(MAX_STROKES_PER_PACKET)
}
