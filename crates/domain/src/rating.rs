use serde::{Deserialize, Serialize};

/// Raw per-channel dynamic-range values, in decibels.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub enum ChannelDr {
    Mono(f32),
    Stereo { left: f32, right: f32 },
}

/// Rating of a single track, immutable once computed.
///
/// `final_rating` is rounded to a whole number of decibels but kept as a
/// float: a degenerate channel (e.g. all silence) produces a non-finite
/// value, which is a valid result and must survive aggregation.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct TrackRating {
    pub channels: ChannelDr,
    pub final_rating: f32,
}

impl TrackRating {
    pub fn mono(dr: f32) -> Self {
        Self {
            channels: ChannelDr::Mono(dr),
            final_rating: dr.round(),
        }
    }

    pub fn stereo(left: f32, right: f32) -> Self {
        Self {
            channels: ChannelDr::Stereo { left, right },
            final_rating: ((left + right) / 2.0).round(),
        }
    }

    pub fn label(&self) -> String {
        format_rating(self.final_rating)
    }
}

/// Renders a rounded rating as `DR12`; non-finite values render as `N/A`.
pub fn format_rating(value: f32) -> String {
    if value.is_finite() {
        format!("DR{}", value as i64)
    } else {
        "N/A".to_string()
    }
}

/// Album rating: the rounded mean of the per-track final ratings, computed
/// by direct summation. A non-finite track rating carries through the sum,
/// so a single silent track makes the whole album rate as `N/A`.
pub fn album_rating(tracks: &[TrackRating]) -> f32 {
    let sum: f32 = tracks.iter().map(|track| track.final_rating).sum();
    (sum / tracks.len() as f32).round()
}
