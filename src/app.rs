//! Wiring: turn a [`Config`] into a ready-to-run [`Pipeline`]

use crate::actuation::actuator_from_config;
use crate::classifier::{FixedWindowTitle, GestureClassifier, WindowTitleSource, XdotoolWindowTitle};
use crate::clock::{Clock, SystemClock};
use crate::config::{Config, ContextConfig, DetectorBackend, DetectorConfig, PipelineConfig, WindowTitleBackend};
use crate::overlay::sink_from_config;
use crate::pipeline::{Collaborators, Pipeline};
use crate::vision::{
    landmark_udp_addr_from_env, FrameSource, LandmarkDetector, ReplayDetector, UdpLandmarkDetector,
};
use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;

pub fn title_source(config: &ContextConfig) -> Box<dyn WindowTitleSource + Send> {
    match config.source {
        WindowTitleBackend::Xdotool => Box::new(XdotoolWindowTitle::new()),
        WindowTitleBackend::Fixed => Box::new(FixedWindowTitle::new(config.fixed_title.clone())),
    }
}

pub fn classifier_from_config(config: &Config, clock: Arc<dyn Clock>) -> GestureClassifier {
    GestureClassifier::new(config.gesture.clone(), clock, title_source(&config.context))
}

/// Build the landmark detector. `GESTURE_LANDMARK_UDP_ADDR` forces the UDP
/// feed on that address. Must run inside a tokio runtime.
pub async fn detector_from_config(config: &DetectorConfig) -> Result<Box<dyn LandmarkDetector + Send>> {
    if let Some(addr) = landmark_udp_addr_from_env() {
        log::info!("UDP landmark input enabled via GESTURE_LANDMARK_UDP_ADDR={addr}");
        return Ok(Box::new(UdpLandmarkDetector::bind(addr, config.max_age_ms).await?));
    }

    match config.backend {
        DetectorBackend::Udp => {
            let addr: SocketAddr = config
                .udp_addr
                .parse()
                .with_context(|| format!("Invalid detector udp_addr {:?}", config.udp_addr))?;
            Ok(Box::new(UdpLandmarkDetector::bind(addr, config.max_age_ms).await?))
        }
        DetectorBackend::Replay => {
            let path = config
                .replay_path
                .as_ref()
                .context("detector.replay_path is required for the replay backend")?;
            let replay = ReplayDetector::from_path(path, config.replay_loop)
                .with_context(|| format!("Failed to load replay {}", path.display()))?;
            Ok(Box::new(replay))
        }
    }
}

#[cfg(feature = "vision")]
pub fn frame_source_from_config(
    config: &PipelineConfig,
    _clock: Arc<dyn Clock>,
) -> Result<Box<dyn FrameSource + Send>> {
    let camera = crate::vision::CameraFrameSource::open(config).context("Failed to open camera")?;
    Ok(Box::new(camera))
}

#[cfg(not(feature = "vision"))]
pub fn frame_source_from_config(
    config: &PipelineConfig,
    clock: Arc<dyn Clock>,
) -> Result<Box<dyn FrameSource + Send>> {
    use crate::types::FrameSize;
    use crate::vision::SyntheticFrameSource;

    log::warn!("Vision feature not enabled, using synthetic frames");
    Ok(Box::new(SyntheticFrameSource::new(
        FrameSize::new(config.frame_width, config.frame_height),
        config.target_fps,
        config.frame_limit,
        clock,
    )))
}

/// Assemble every collaborator named in `config` on the wall clock
pub async fn build_pipeline(config: &Config) -> Result<Pipeline> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let collaborators = Collaborators {
        source: frame_source_from_config(&config.pipeline, Arc::clone(&clock))?,
        detector: detector_from_config(&config.detector).await?,
        classifier: classifier_from_config(config, Arc::clone(&clock)),
        actuator: actuator_from_config(&config.actuation),
        sink: sink_from_config(&config.overlay),
    };

    Ok(Pipeline::new(config.pipeline.clone(), collaborators, clock))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn replay_backend_needs_a_path() {
        let config = DetectorConfig {
            backend: DetectorBackend::Replay,
            ..Default::default()
        };
        if landmark_udp_addr_from_env().is_none() {
            assert!(detector_from_config(&config).await.is_err());
        }
    }

    #[tokio::test]
    async fn replay_backend_loads_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "[]").expect("write");
        let config = DetectorConfig {
            backend: DetectorBackend::Replay,
            replay_path: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        if landmark_udp_addr_from_env().is_none() {
            assert!(detector_from_config(&config).await.is_ok());
        }
    }

    #[test]
    fn fixed_title_source_reports_config_title() {
        let mut source = title_source(&ContextConfig {
            source: WindowTitleBackend::Fixed,
            fixed_title: Some("Spotify".into()),
        });
        assert_eq!(
            source.current_foreground_title().expect("title"),
            Some("Spotify".to_string())
        );
    }
}
