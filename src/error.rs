//! Error types shared by track construction and the ride loop.

use thiserror::Error;

/// Errors raised while building a track or advancing the bead.
///
/// Construction errors (`InvalidInput`, `Parse`, `Io`) are fatal at startup.
/// `DegenerateSegment` and `DegenerateFrame` are recovered per tick by the
/// ride loop, which holds the previous frame.
#[derive(Debug, Error)]
pub enum TrackError {
    /// Control points or a step request cannot be used.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What was wrong with the input.
        reason: String,
    },

    /// Zero-length segment reached with arc length still to cover.
    #[error("degenerate segment at sample {index}")]
    DegenerateSegment {
        /// Index of the segment start.
        index: usize,
    },

    /// A near-zero vector was normalized while building a frame.
    #[error("degenerate frame: near-zero vector during frame estimation")]
    DegenerateFrame,

    /// Sample index outside the curve.
    #[error("sample index {index} out of range for curve of {len} points")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of samples in the curve.
        len: usize,
    },

    /// Malformed control-point record.
    #[error("line {line}: {reason}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// Description of the problem.
        reason: String,
    },

    /// Control-point file could not be read.
    #[error("failed to read control points: {0}")]
    Io(#[from] std::io::Error),
}

impl TrackError {
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

/// Result type for track operations.
pub type TrackResult<T> = std::result::Result<T, TrackError>;
