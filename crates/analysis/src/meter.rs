use drmeter_audio::PcmSource;
use drmeter_domain::TrackRating;
use tracing::debug;

use crate::blocks::BlockPlan;
use crate::select::{representative_peak, top_quintile_power};
use crate::stats::{mono_block_stats, stereo_block_stats};

fn decibels(peak: f32, average_mean_square: f32) -> f32 {
    10.0 * (peak * peak / average_mean_square).log10()
}

/// Dynamic range of a mono stream, in decibels.
///
/// The result may be non-finite: a channel whose loudest blocks are all
/// silence divides by zero, and the value propagates as-is for the
/// presentation layer to render.
pub fn compute_mono_dr(source: &mut impl PcmSource) -> f32 {
    let plan = BlockPlan::new(source.sample_rate(), source.total_frames());
    debug!(
        block_size = plan.block_size,
        num_blocks = plan.num_blocks,
        "analyzing mono stream"
    );
    let mut buffer = vec![0.0f32; plan.block_size];
    let mut mean_squares = Vec::with_capacity(plan.num_blocks);
    let mut peaks = Vec::with_capacity(plan.num_blocks);

    for _ in 0..plan.num_blocks {
        let frames = source.read_block(&mut buffer, plan.block_size);
        let stats = mono_block_stats(&buffer[..frames]);
        mean_squares.push(stats.mean_square);
        peaks.push(stats.peak);
    }

    let average_mean_square = top_quintile_power(&mut mean_squares, plan.num_top_blocks);
    let peak = representative_peak(&mut peaks);
    decibels(peak, average_mean_square)
}

/// Dynamic range of a stereo stream, as `(left, right)` decibel values.
///
/// Both channels are reduced from a single read sequence, so their block
/// boundaries are always identical.
pub fn compute_stereo_dr(source: &mut impl PcmSource) -> (f32, f32) {
    let plan = BlockPlan::new(source.sample_rate(), source.total_frames());
    debug!(
        block_size = plan.block_size,
        num_blocks = plan.num_blocks,
        "analyzing stereo stream"
    );
    let mut buffer = vec![0.0f32; 2 * plan.block_size];
    let mut left_mean_squares = Vec::with_capacity(plan.num_blocks);
    let mut left_peaks = Vec::with_capacity(plan.num_blocks);
    let mut right_mean_squares = Vec::with_capacity(plan.num_blocks);
    let mut right_peaks = Vec::with_capacity(plan.num_blocks);

    for _ in 0..plan.num_blocks {
        let frames = source.read_block(&mut buffer, plan.block_size);
        let (left, right) = stereo_block_stats(&buffer[..2 * frames]);
        left_mean_squares.push(left.mean_square);
        left_peaks.push(left.peak);
        right_mean_squares.push(right.mean_square);
        right_peaks.push(right.peak);
    }

    let left_average = top_quintile_power(&mut left_mean_squares, plan.num_top_blocks);
    let right_average = top_quintile_power(&mut right_mean_squares, plan.num_top_blocks);
    let left_peak = representative_peak(&mut left_peaks);
    let right_peak = representative_peak(&mut right_peaks);
    (
        decibels(left_peak, left_average),
        decibels(right_peak, right_average),
    )
}

/// Rates one track, dispatching on its channel count.
///
/// Callers reject streams with more than two channels before handing them
/// to the core; anything that is not mono is treated as stereo here.
pub fn rate_track(source: &mut impl PcmSource) -> TrackRating {
    if source.channels() == 1 {
        TrackRating::mono(compute_mono_dr(source))
    } else {
        let (left, right) = compute_stereo_dr(source);
        TrackRating::stereo(left, right)
    }
}
