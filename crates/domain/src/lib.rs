pub mod error;
pub mod rating;

pub use crate::error::DomainError;
pub use crate::rating::{album_rating, format_rating, ChannelDr, TrackRating};
