/// Sequential access to decoded, normalized PCM.
///
/// Samples are interleaved `f32` in `[-1, 1]`. The cursor only moves
/// forward: `read_block` fills `buf` with up to `max_frames` frames and
/// returns the number of frames actually written, returning 0 only once
/// the end of the stream is reached. The final block of a stream may be
/// shorter than requested.
pub trait PcmSource {
    fn channels(&self) -> u16;
    fn sample_rate(&self) -> u32;
    fn total_frames(&self) -> u64;
    fn read_block(&mut self, buf: &mut [f32], max_frames: usize) -> usize;
}

/// A [`PcmSource`] over a fully decoded interleaved buffer.
pub struct MemorySource {
    sample_rate: u32,
    channels: u16,
    samples: Vec<f32>,
    cursor: usize,
}

impl MemorySource {
    pub fn new(sample_rate: u32, channels: u16, samples: Vec<f32>) -> Self {
        debug_assert!(channels > 0);
        debug_assert_eq!(samples.len() % channels as usize, 0);
        Self {
            sample_rate,
            channels,
            samples,
            cursor: 0,
        }
    }
}

impl PcmSource for MemorySource {
    fn channels(&self) -> u16 {
        self.channels
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_frames(&self) -> u64 {
        (self.samples.len() / self.channels as usize) as u64
    }

    fn read_block(&mut self, buf: &mut [f32], max_frames: usize) -> usize {
        let stride = self.channels as usize;
        let remaining = (self.samples.len() - self.cursor) / stride;
        let frames = remaining.min(max_frames);
        let len = frames * stride;
        buf[..len].copy_from_slice(&self.samples[self.cursor..self.cursor + len]);
        self.cursor += len;
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_short_final_block() {
        let mut source = MemorySource::new(44_100, 1, vec![0.1; 10]);
        let mut buf = vec![0.0; 4];
        assert_eq!(source.read_block(&mut buf, 4), 4);
        assert_eq!(source.read_block(&mut buf, 4), 4);
        assert_eq!(source.read_block(&mut buf, 4), 2);
        assert_eq!(source.read_block(&mut buf, 4), 0);
    }

    #[test]
    fn stereo_frames_stay_interleaved() {
        let samples = vec![0.1, -0.1, 0.2, -0.2, 0.3, -0.3];
        let mut source = MemorySource::new(48_000, 2, samples);
        assert_eq!(source.total_frames(), 3);
        let mut buf = vec![0.0; 4];
        assert_eq!(source.read_block(&mut buf, 2), 2);
        assert_eq!(buf, vec![0.1, -0.1, 0.2, -0.2]);
        assert_eq!(source.read_block(&mut buf, 2), 1);
        assert_eq!(buf[..2], [0.3, -0.3]);
    }

    #[test]
    fn empty_source_reports_zero_frames() {
        let mut source = MemorySource::new(44_100, 1, Vec::new());
        let mut buf = vec![0.0; 8];
        assert_eq!(source.total_frames(), 0);
        assert_eq!(source.read_block(&mut buf, 8), 0);
    }
}
