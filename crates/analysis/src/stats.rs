/// Statistics of one analysis block for one channel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BlockStats {
    /// Sum of squared samples divided by the frames actually read.
    pub mean_square: f32,
    /// Maximum absolute sample value in the block.
    pub peak: f32,
}

/// Partial reduction over a run of samples.
///
/// Both operators (sum, max) are associative and commutative, so partials
/// taken over any partition of a block merge to the same result up to
/// ordinary float rounding. The block loop below folds fixed-size chunks
/// and merges them; sharding the chunks across threads or vector lanes
/// would be equally conformant.
#[derive(Clone, Copy, Debug, Default)]
pub struct Reduction {
    pub sum_squares: f32,
    pub peak: f32,
}

impl Reduction {
    pub fn push(mut self, sample: f32) -> Self {
        self.sum_squares += sample * sample;
        self.peak = self.peak.max(sample.abs());
        self
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            sum_squares: self.sum_squares + other.sum_squares,
            peak: self.peak.max(other.peak),
        }
    }

    /// `frames` is the number of frames actually read, never the nominal
    /// block size; a zero-frame read divides 0/0 and yields NaN, which is
    /// tolerated downstream.
    pub fn into_stats(self, frames: usize) -> BlockStats {
        BlockStats {
            mean_square: self.sum_squares / frames as f32,
            peak: self.peak,
        }
    }
}

const CHUNK_FRAMES: usize = 4096;

/// Reduce one mono block. `samples` holds exactly the frames read.
pub fn mono_block_stats(samples: &[f32]) -> BlockStats {
    samples
        .chunks(CHUNK_FRAMES)
        .map(|chunk| {
            chunk
                .iter()
                .copied()
                .fold(Reduction::default(), Reduction::push)
        })
        .fold(Reduction::default(), Reduction::merge)
        .into_stats(samples.len())
}

/// Reduce one interleaved stereo block into per-channel stats.
///
/// Both channels are deinterleaved from the same read, so their block
/// boundaries can never drift apart.
pub fn stereo_block_stats(samples: &[f32]) -> (BlockStats, BlockStats) {
    debug_assert_eq!(samples.len() % 2, 0);
    let frames = samples.len() / 2;
    let (left, right) = samples
        .chunks(2 * CHUNK_FRAMES)
        .map(|chunk| {
            let mut left = Reduction::default();
            let mut right = Reduction::default();
            for frame in chunk.chunks_exact(2) {
                left = left.push(frame[0]);
                right = right.push(frame[1]);
            }
            (left, right)
        })
        .fold(
            (Reduction::default(), Reduction::default()),
            |(left, right), (chunk_left, chunk_right)| {
                (left.merge(chunk_left), right.merge(chunk_right))
            },
        );
    (left.into_stats(frames), right.into_stats(frames))
}
