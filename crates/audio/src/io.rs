use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::debug;

use crate::stream::MemorySource;

/// Stream parameters read from the container headers, available without
/// decoding any audio packets.
#[derive(Clone, Copy, Debug)]
pub struct TrackInfo {
    pub sample_rate: u32,
    pub channels: u16,
}

/// A fully decoded track: normalized interleaved f32 samples plus the
/// stream parameters the rating core needs.
#[derive(Debug, Clone)]
pub struct DecodedTrack {
    pub sample_rate: u32,
    pub channels: u16,
    pub samples: Vec<f32>,
}

impl DecodedTrack {
    pub fn total_frames(&self) -> u64 {
        (self.samples.len() / self.channels as usize) as u64
    }

    pub fn into_source(self) -> MemorySource {
        MemorySource::new(self.sample_rate, self.channels, self.samples)
    }
}

pub struct AudioDecoder;

impl AudioDecoder {
    /// Opens the container and reads the stream parameters without
    /// decoding any packets. Cheap enough to validate a whole batch of
    /// inputs up front before the per-track decode work starts.
    pub fn probe<P: AsRef<Path>>(path: P) -> Result<TrackInfo> {
        let (_, info) = open_format(path.as_ref())?;
        Ok(info)
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<DecodedTrack> {
        let path_ref = path.as_ref();
        let (mut format, info) = open_format(path_ref)?;
        let track = format
            .default_track()
            .ok_or_else(|| anyhow::anyhow!("no default track found in {:?}", path_ref))?;
        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())?;
        let TrackInfo {
            sample_rate,
            channels,
        } = info;

        let mut samples = Vec::new();

        loop {
            match format.next_packet() {
                Ok(packet) => match decoder.decode(&packet) {
                    Ok(buffer) => {
                        let spec = *buffer.spec();
                        let frames = buffer.frames() as u64;
                        let mut out = SampleBuffer::<f32>::new(frames, spec);
                        out.copy_interleaved_ref(buffer);
                        samples.extend_from_slice(out.samples());
                    }
                    Err(symphonia::core::errors::Error::DecodeError(_)) => {
                        // skip undecodable packet
                    }
                    Err(err) => return Err(err.into()),
                },
                Err(err) => {
                    use symphonia::core::errors::Error as SymphError;
                    match err {
                        SymphError::IoError(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                            break;
                        }
                        _ => return Err(err.into()),
                    }
                }
            }
        }

        let decoded = DecodedTrack {
            sample_rate,
            channels,
            samples,
        };
        debug!(
            sample_rate,
            channels,
            frames = decoded.total_frames(),
            "decoded track"
        );
        Ok(decoded)
    }
}

fn open_format(path: &Path) -> Result<(Box<dyn FormatReader>, TrackInfo)> {
    let file = File::open(path).with_context(|| format!("open audio file {:?}", path))?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());
    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|ext| ext.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe().format(
        &hint,
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;
    let format = probed.format;
    let track = format
        .default_track()
        .ok_or_else(|| anyhow::anyhow!("no default track found in {:?}", path))?;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| anyhow::anyhow!("sample rate missing for {:?}", path))?;
    let channels = track
        .codec_params
        .channels
        .map(|c| c.count() as u16)
        .ok_or_else(|| anyhow::anyhow!("channel layout missing for {:?}", path))?;
    Ok((
        format,
        TrackInfo {
            sample_rate,
            channels,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decoder_handles_missing_file() {
        let result = AudioDecoder::open("does-not-exist.wav");
        assert!(result.is_err());
    }

    #[test]
    fn probe_handles_missing_file() {
        let result = AudioDecoder::probe("does-not-exist.wav");
        assert!(result.is_err());
    }

    #[test]
    fn decoded_track_frame_count() {
        let track = DecodedTrack {
            sample_rate: 44_100,
            channels: 2,
            samples: vec![0.0; 10],
        };
        assert_eq!(track.total_frames(), 5);
    }
}
