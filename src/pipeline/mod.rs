//! # Pipeline
//!
//! Five workers joined by bounded queues:
//!
//! ```text
//! capture/render --frames(lossy)--> detection --landmarks(blocking)--> classification
//!       ^                                                               |      |      |
//!       +------------------------display(blocking, polled)-------------+      |      |
//!                                          action <--commands(lossy)----------+      |
//!                                          status <--status(latest wins)-------------+
//! ```
//!
//! Capture runs on the calling thread; the other four get their own threads.
//! Shutdown is a sentinel pushed into the frame queue and relayed downstream.

pub mod channels;
pub mod workers;

pub use channels::{LatestSender, Message, Poll};
pub use workers::{ClassifierStats, Detection};

use crate::actuation::{Actuator, DispatchStats};
use crate::classifier::GestureClassifier;
use crate::clock::{elapsed_beyond, Clock};
use crate::config::PipelineConfig;
use crate::overlay::StatusSink;
use crate::types::DisplayResult;
use crate::vision::{FrameSource, LandmarkDetector};
use anyhow::{anyhow, Context, Result};
use channels::{poll_payload, queue, send_lossy, send_shutdown};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

/// External collaborators the pipeline drives
pub struct Collaborators {
    pub source: Box<dyn FrameSource + Send>,
    pub detector: Box<dyn LandmarkDetector + Send>,
    pub classifier: GestureClassifier,
    pub actuator: Box<dyn Actuator + Send>,
    pub sink: Box<dyn StatusSink + Send>,
}

/// What happened during one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub frames_captured: u64,
    pub frames_dropped: u64,
    pub frames_detected: u64,
    pub frames_rendered: u64,
    pub classifier: ClassifierStats,
    pub dispatch: DispatchStats,
    pub statuses_shown: u64,
    /// Reconnect bursts that ended without getting the source back
    pub failed_reconnect_bursts: u64,
    /// Status attached to the last processed frame the render loop saw
    pub last_status: Option<String>,
}

pub struct Pipeline {
    config: PipelineConfig,
    collaborators: Collaborators,
    clock: Arc<dyn Clock>,
}

enum CaptureEnd {
    Stopped,
    Exhausted,
    WorkerLost,
}

impl Pipeline {
    pub fn new(config: PipelineConfig, collaborators: Collaborators, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            collaborators,
            clock,
        }
    }

    /// Run until `stop` is set or the source runs dry. A lost capture device
    /// is retried in bursts for as long as the pipeline runs.
    pub fn run(self, stop: &AtomicBool) -> Result<PipelineReport> {
        let Pipeline {
            config,
            collaborators,
            clock,
        } = self;
        let Collaborators {
            mut source,
            detector,
            classifier,
            actuator,
            sink,
        } = collaborators;

        let (frame_tx, frame_rx) = queue(config.frame_queue);
        let (landmark_tx, landmark_rx) = queue(config.landmark_queue);
        let (display_tx, display_rx) = queue::<DisplayResult>(config.display_queue);
        let (command_tx, command_rx) = queue(config.command_queue);
        let (status_tx, status_rx) = queue(config.status_queue);
        let status = LatestSender::new(status_tx, status_rx.clone());

        let detection = thread::Builder::new()
            .name("detection".into())
            .spawn(move || workers::detection_worker(detector, frame_rx, landmark_tx))
            .context("Failed to spawn detection worker")?;
        let classification = thread::Builder::new()
            .name("gesture".into())
            .spawn(move || {
                workers::classification_worker(classifier, landmark_rx, display_tx, command_tx, status)
            })
            .context("Failed to spawn gesture worker")?;
        let action = thread::Builder::new()
            .name("action".into())
            .spawn(move || workers::action_worker(actuator, command_rx))
            .context("Failed to spawn action worker")?;
        let status_display = thread::Builder::new()
            .name("status".into())
            .spawn(move || workers::status_worker(sink, status_rx))
            .context("Failed to spawn status worker")?;

        log::info!("Capture worker started...");
        let mut report = PipelineReport::default();
        let mut latest: Option<DisplayResult> = None;
        let mut window_start = clock.now_ms();
        let mut window_frames = 0u64;

        let end = loop {
            if stop.load(Ordering::SeqCst) {
                break CaptureEnd::Stopped;
            }

            match source.read() {
                Ok(Some(frame)) => {
                    report.frames_captured += 1;
                    if !send_lossy(&frame_tx, frame) {
                        report.frames_dropped += 1;
                    }
                }
                Ok(None) => break CaptureEnd::Exhausted,
                Err(e) => {
                    log::warn!("Capture failed: {e}");
                    if !reconnect(source.as_mut(), &config, clock.as_ref(), stop)
                        && !stop.load(Ordering::SeqCst)
                    {
                        report.failed_reconnect_bursts += 1;
                        log::error!("Capture still unavailable, retrying");
                    }
                }
            }

            match poll_payload(&display_rx) {
                Poll::Ready(result) => {
                    report.frames_rendered += 1;
                    window_frames += 1;
                    latest = Some(result);
                }
                Poll::Empty => {}
                Poll::Closed => break CaptureEnd::WorkerLost,
            }

            let now = clock.now_ms();
            if elapsed_beyond(now, window_start, 999) {
                log::debug!("Processing {window_frames} frames/s");
                window_start = now;
                window_frames = 0;
            }
        };

        match end {
            CaptureEnd::Stopped => log::info!("Stop requested"),
            CaptureEnd::Exhausted => log::info!("Frame source exhausted"),
            CaptureEnd::WorkerLost => log::error!("Gesture worker exited unexpectedly"),
        }

        // Nobody renders from here on; release the classifier if it waits on us.
        drop(display_rx);
        send_shutdown(&frame_tx);
        drop(frame_tx);
        log::info!("Capture worker stopped.");

        report.frames_detected = join(detection, "detection")?;
        report.classifier = join(classification, "gesture")?;
        report.dispatch = join(action, "action")?;
        report.statuses_shown = join(status_display, "status")?;
        report.last_status = latest.map(|r| r.status);

        log::info!(
            "Pipeline finished: {} captured, {} dropped, {} classified, {} commands executed",
            report.frames_captured,
            report.frames_dropped,
            report.classifier.frames,
            report.dispatch.executed
        );
        Ok(report)
    }
}

/// Bounded reconnect loop. True once the source is back.
fn reconnect(
    source: &mut dyn FrameSource,
    config: &PipelineConfig,
    clock: &dyn Clock,
    stop: &AtomicBool,
) -> bool {
    for attempt in 1..=config.reconnect_attempts {
        if stop.load(Ordering::SeqCst) {
            return false;
        }
        clock.sleep(config.reconnect_delay());
        match source.reconnect() {
            Ok(()) => {
                log::info!("Capture reconnected (attempt {attempt})");
                return true;
            }
            Err(e) => log::warn!(
                "Reconnect attempt {attempt}/{} failed: {e}",
                config.reconnect_attempts
            ),
        }
    }
    log::warn!("Capture not back after {} attempts", config.reconnect_attempts);
    false
}

fn join<T>(handle: thread::JoinHandle<T>, name: &str) -> Result<T> {
    handle
        .join()
        .map_err(|_| anyhow!("{name} worker panicked"))
}
