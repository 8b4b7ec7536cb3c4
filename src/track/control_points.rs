//! Control-point sources: the built-in demo loop and a plain text format.
//!
//! The text format holds one point per line as three numbers separated by
//! whitespace and/or commas. Blank lines and lines starting with `#` are
//! skipped.

use std::path::Path;

use crate::error::{TrackError, TrackResult};
use crate::sim::Float3;

/// Hand-authored loop with one raised hill, already closed.
pub const DEMO_LOOP: [Float3; 8] = [
    Float3::new(0.0, 0.0, 0.0),
    Float3::new(1.0, 0.0, 0.0),
    Float3::new(2.0, 0.0, 0.0),
    Float3::new(3.0, 0.5, 2.0),
    Float3::new(3.0, 1.0, 2.0),
    Float3::new(3.0, 0.0, 5.0),
    Float3::new(0.0, 0.0, 5.0),
    Float3::new(0.0, 0.0, 0.0),
];

/// Parses control points from text records.
///
/// # Errors
/// [`TrackError::Parse`] with the 1-based line number of the first bad record,
/// or [`TrackError::InvalidInput`] if no points were found.
pub fn parse(text: &str) -> TrackResult<Vec<Float3>> {
    let mut points = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        points.push(parse_record(line).map_err(|reason| TrackError::Parse {
            line: i + 1,
            reason,
        })?);
    }

    if points.is_empty() {
        return Err(TrackError::invalid_input("no control points found"));
    }
    Ok(points)
}

/// Reads and parses a control-point file.
pub fn load(path: impl AsRef<Path>) -> TrackResult<Vec<Float3>> {
    let text = std::fs::read_to_string(path)?;
    parse(&text)
}

fn parse_record(line: &str) -> Result<Float3, String> {
    let fields: Vec<&str> = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|f| !f.is_empty())
        .collect();

    if fields.len() != 3 {
        return Err(format!("expected 3 fields, found {}", fields.len()));
    }

    let mut coords = [0.0f32; 3];
    for (slot, field) in coords.iter_mut().zip(&fields) {
        let value: f32 = field
            .parse()
            .map_err(|_| format!("`{field}` is not a number"))?;
        if !value.is_finite() {
            return Err(format!("`{field}` is not finite"));
        }
        *slot = value;
    }

    Ok(Float3::new(coords[0], coords[1], coords[2]))
}
