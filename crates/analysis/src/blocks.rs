/// Analysis block layout for one stream.
///
/// The block length is tied to real time rather than to the sample rate:
/// a 44.1 kHz stream yields exactly 3 × 44160 = 132480 frames per block
/// (roughly three seconds), and other rates scale proportionally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockPlan {
    /// Frames per analysis block.
    pub block_size: usize,
    /// Number of blocks covering the stream, at least one.
    pub num_blocks: usize,
    /// Size of the top quintile used for the loudness average, at least one.
    pub num_top_blocks: usize,
}

impl BlockPlan {
    pub fn new(sample_rate: u32, total_frames: u64) -> Self {
        let block_size = (3.0 * sample_rate as f32 * 44160.0 / 44100.0).round() as usize;
        let num_blocks = total_frames.div_ceil(block_size as u64).max(1) as usize;
        let num_top_blocks = (num_blocks / 5).max(1);
        Self {
            block_size,
            num_blocks,
            num_top_blocks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cd_rate_block_is_exactly_132480_frames() {
        let plan = BlockPlan::new(44_100, 0);
        assert_eq!(plan.block_size, 132_480);
    }

    #[test]
    fn empty_stream_still_has_one_block() {
        let plan = BlockPlan::new(48_000, 0);
        assert_eq!(plan.num_blocks, 1);
        assert_eq!(plan.num_top_blocks, 1);
    }

    #[test]
    fn block_count_is_ceiling_division() {
        let plan = BlockPlan::new(44_100, 132_480 * 2 + 1);
        assert_eq!(plan.num_blocks, 3);
        let exact = BlockPlan::new(44_100, 132_480 * 2);
        assert_eq!(exact.num_blocks, 2);
    }

    #[test]
    fn top_quintile_bounds_hold() {
        for frames in [1_u64, 132_480, 400_000, 132_480 * 23, 132_480 * 100] {
            for rate in [8_000_u32, 44_100, 48_000, 96_000] {
                let plan = BlockPlan::new(rate, frames);
                assert!(plan.block_size >= 1);
                assert!(plan.num_blocks >= 1);
                assert!(plan.num_top_blocks >= 1);
                assert!(plan.num_top_blocks <= plan.num_blocks);
                assert_eq!(plan.num_top_blocks, (plan.num_blocks / 5).max(1));
            }
        }
    }
}
