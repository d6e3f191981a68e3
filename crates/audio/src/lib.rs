pub mod io;
pub mod stream;

pub use io::{AudioDecoder, DecodedTrack, TrackInfo};
pub use stream::{MemorySource, PcmSource};
