use crate::error::{TrackError, TrackResult};
use crate::sim::{CyclicIndex, Float3};

/// Densely sampled closed track centreline.
///
/// Consecutive samples, with wraparound from the last to the first, are the
/// segments every consumer walks. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledCurve {
    points: Vec<Float3>,
    total_length: f32,
    crest: usize,
}

impl SampledCurve {
    /// Wraps an already-sampled cyclic point sequence.
    ///
    /// # Errors
    /// [`TrackError::InvalidInput`] if `points` is empty or holds a
    /// non-finite coordinate.
    pub fn new(points: Vec<Float3>) -> TrackResult<Self> {
        if points.is_empty() {
            return Err(TrackError::invalid_input("sampled curve has no points"));
        }
        if let Some(i) = points.iter().position(|p| !p.is_finite()) {
            return Err(TrackError::invalid_input(format!(
                "sample {i} has a non-finite coordinate"
            )));
        }

        let total_length = (0..points.len())
            .map(|i| points[i].distance(points[(i + 1) % points.len()]))
            .sum();
        let crest = highest_point(&points);

        Ok(Self {
            points,
            total_length,
            crest,
        })
    }

    pub fn points(&self) -> &[Float3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when there are no samples. Construction rejects that case.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Wrapping index into this curve.
    pub fn index(&self, raw: usize) -> CyclicIndex {
        CyclicIndex::new(raw, self.points.len())
    }

    /// Index for a caller-supplied sample number, rejecting out-of-range
    /// values instead of wrapping them.
    pub fn try_index(&self, raw: usize) -> TrackResult<CyclicIndex> {
        if raw >= self.points.len() {
            return Err(TrackError::IndexOutOfRange {
                index: raw,
                len: self.points.len(),
            });
        }
        Ok(self.index(raw))
    }

    pub fn point(&self, index: CyclicIndex) -> Float3 {
        debug_assert_eq!(index.period(), self.points.len());
        self.points[index.get()]
    }

    pub fn first(&self) -> Float3 {
        self.points[0]
    }

    pub fn last(&self) -> Float3 {
        self.points[self.points.len() - 1]
    }

    /// Moves `delta` samples along the loop, counting the closing duplicate
    /// and sample 0 as one sample.
    ///
    /// On an open curve this is plain [`CyclicIndex::offset`].
    pub fn offset_distinct(&self, index: CyclicIndex, delta: isize) -> CyclicIndex {
        let len = self.points.len();
        if !self.is_closed() || len < 3 {
            return index.offset(delta);
        }
        let period = len - 1;
        let start = CyclicIndex::new(index.get(), period);
        self.index(start.offset(delta).get())
    }

    /// Next sample whose position differs from `index`'s across the seam.
    pub fn next_distinct(&self, index: CyclicIndex) -> CyclicIndex {
        self.offset_distinct(index, 1)
    }

    /// Previous sample whose position differs from `index`'s across the seam.
    pub fn prev_distinct(&self, index: CyclicIndex) -> CyclicIndex {
        self.offset_distinct(index, -1)
    }

    /// Length of the segment from `index` to its successor.
    pub fn segment_length(&self, index: CyclicIndex) -> f32 {
        self.point(index).distance(self.point(index.next()))
    }

    /// Polyline length including the closing segment.
    pub fn total_length(&self) -> f32 {
        self.total_length
    }

    /// Index of the highest sample (first one on ties).
    pub fn crest_index(&self) -> CyclicIndex {
        self.index(self.crest)
    }

    pub fn crest(&self) -> Float3 {
        self.points[self.crest]
    }

    /// True when the first and last samples are bitwise the same point.
    pub fn is_closed(&self) -> bool {
        self.first() == self.last()
    }
}

fn highest_point(points: &[Float3]) -> usize {
    let mut best = 0;
    for (i, p) in points.iter().enumerate() {
        if p.y > points[best].y {
            best = i;
        }
    }
    best
}
