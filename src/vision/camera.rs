use super::FrameSource;
use crate::clock::now_ms;
use crate::config::PipelineConfig;
use crate::error::CaptureError;
use crate::types::Frame;
use opencv::{core, imgproc, prelude::*, videoio};

/// Webcam frames, mirrored so on-screen motion matches the user's hand
pub struct CameraFrameSource {
    capture: videoio::VideoCapture,
    index: i32,
    fallback_index: i32,
    width: u32,
    height: u32,
}

impl CameraFrameSource {
    /// Open the configured camera, falling back to the secondary index
    pub fn open(config: &PipelineConfig) -> Result<Self, CaptureError> {
        let (capture, index) = match open_capture(config.camera_index, config) {
            Ok(capture) => (capture, config.camera_index),
            Err(e) => {
                log::warn!("{e}; trying camera {}", config.fallback_camera_index);
                (
                    open_capture(config.fallback_camera_index, config)?,
                    config.fallback_camera_index,
                )
            }
        };
        log::info!("Camera {index} opened");

        Ok(Self {
            capture,
            index,
            fallback_index: config.fallback_camera_index,
            width: config.frame_width,
            height: config.frame_height,
        })
    }

    fn configure(&mut self) {
        let _ = self.capture.set(videoio::CAP_PROP_FRAME_WIDTH, f64::from(self.width));
        let _ = self.capture.set(videoio::CAP_PROP_FRAME_HEIGHT, f64::from(self.height));
    }
}

fn open_capture(index: i32, config: &PipelineConfig) -> Result<videoio::VideoCapture, CaptureError> {
    let mut capture = videoio::VideoCapture::new(index, videoio::CAP_ANY)
        .map_err(|_| CaptureError::Open { index })?;
    if !capture.is_opened().unwrap_or(false) {
        return Err(CaptureError::Open { index });
    }
    let _ = capture.set(videoio::CAP_PROP_FRAME_WIDTH, f64::from(config.frame_width));
    let _ = capture.set(videoio::CAP_PROP_FRAME_HEIGHT, f64::from(config.frame_height));
    let _ = capture.set(videoio::CAP_PROP_FPS, f64::from(config.target_fps));
    Ok(capture)
}

fn to_rgb_image(bgr: &core::Mat) -> opencv::Result<Option<image::RgbImage>> {
    let mut mirrored = core::Mat::default();
    core::flip(bgr, &mut mirrored, 1)?;
    let mut rgb = core::Mat::default();
    imgproc::cvt_color(&mirrored, &mut rgb, imgproc::COLOR_BGR2RGB, 0)?;

    let (cols, rows) = (rgb.cols() as u32, rgb.rows() as u32);
    let data = rgb.data_bytes()?.to_vec();
    Ok(image::RgbImage::from_raw(cols, rows, data))
}

impl FrameSource for CameraFrameSource {
    fn read(&mut self) -> Result<Option<Frame>, CaptureError> {
        let mut bgr = core::Mat::default();
        let grabbed = self
            .capture
            .read(&mut bgr)
            .map_err(|e| CaptureError::Read(e.to_string()))?;
        if !grabbed || bgr.empty() {
            return Err(CaptureError::Read("camera returned no frame".to_string()));
        }

        let image = to_rgb_image(&bgr)
            .map_err(|e| CaptureError::Read(e.to_string()))?
            .ok_or_else(|| CaptureError::Read("unexpected frame layout".to_string()))?;
        Ok(Some(Frame::new(image, now_ms())))
    }

    fn reconnect(&mut self) -> Result<(), CaptureError> {
        let _ = self.capture.release();
        for index in [self.index, self.fallback_index] {
            match videoio::VideoCapture::new(index, videoio::CAP_ANY) {
                Ok(capture) if capture.is_opened().unwrap_or(false) => {
                    self.capture = capture;
                    self.index = index;
                    self.configure();
                    log::info!("Camera {index} reopened");
                    return Ok(());
                }
                _ => log::warn!("Camera {index} unavailable"),
            }
        }
        Err(CaptureError::Open { index: self.index })
    }
}
