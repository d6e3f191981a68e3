pub mod blocks;
pub mod meter;
pub mod select;
pub mod stats;

pub use blocks::BlockPlan;
pub use meter::{compute_mono_dr, compute_stereo_dr, rate_track};
pub use stats::BlockStats;
