use super::FrameSource;
use crate::clock::Clock;
use crate::error::CaptureError;
use crate::types::{Frame, FrameSize};
use std::sync::Arc;
use std::time::Duration;

/// Blank frames paced at a fixed rate, for headless runs and replays
pub struct SyntheticFrameSource {
    size: FrameSize,
    interval: Duration,
    limit: Option<u64>,
    produced: u64,
    clock: Arc<dyn Clock>,
}

impl SyntheticFrameSource {
    pub fn new(size: FrameSize, fps: u32, limit: Option<u64>, clock: Arc<dyn Clock>) -> Self {
        let interval = Duration::from_millis(1000 / u64::from(fps.max(1)));
        Self {
            size,
            interval,
            limit,
            produced: 0,
            clock,
        }
    }

    pub fn produced(&self) -> u64 {
        self.produced
    }
}

impl FrameSource for SyntheticFrameSource {
    fn read(&mut self) -> Result<Option<Frame>, CaptureError> {
        if self.limit.is_some_and(|limit| self.produced >= limit) {
            return Ok(None);
        }
        if self.produced > 0 {
            self.clock.sleep(self.interval);
        }
        self.produced += 1;

        let image = image::RgbImage::new(self.size.width, self.size.height);
        Ok(Some(Frame::new(image, self.clock.now_ms())))
    }
}
