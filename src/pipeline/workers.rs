//! Worker loops. Each owns its collaborator outright and talks to the rest of
//! the pipeline only through queues.

use super::channels::{recv_payload, send_blocking, send_lossy, send_shutdown, LatestSender, Message};
use crate::actuation::{Actuator, DispatchStats, Dispatcher};
use crate::classifier::GestureClassifier;
use crate::command::Command;
use crate::overlay::StatusSink;
use crate::types::{DisplayResult, Frame, HandObservation};
use crate::vision::LandmarkDetector;
use crossbeam_channel::{Receiver, Sender};

pub type Detection = (Frame, Vec<HandObservation>);

/// Counters returned by the classification worker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifierStats {
    pub frames: u64,
    pub commands_sent: u64,
    pub commands_dropped: u64,
}

pub fn detection_worker<D: LandmarkDetector>(
    mut detector: D,
    frames: Receiver<Message<Frame>>,
    results: Sender<Message<Detection>>,
) -> u64 {
    log::info!("Detection worker started...");
    let mut processed = 0u64;

    while let Some(frame) = recv_payload(&frames) {
        let hands = detector.detect(&frame).unwrap_or_else(|e| {
            log::warn!("Landmark detection failed: {e}");
            Vec::new()
        });
        processed += 1;
        if !send_blocking(&results, (frame, hands)) {
            break;
        }
    }

    send_shutdown(&results);
    log::info!("Detection worker stopped.");
    processed
}

pub fn classification_worker(
    mut classifier: GestureClassifier,
    detections: Receiver<Message<Detection>>,
    display: Sender<Message<DisplayResult>>,
    commands: Sender<Message<Command>>,
    status: LatestSender<String>,
) -> ClassifierStats {
    log::info!("Gesture worker started...");
    let mut stats = ClassifierStats::default();

    while let Some((frame, hands)) = recv_payload(&detections) {
        stats.frames += 1;
        let outcome = classifier.classify(frame.size(), &hands);

        if let Some(command) = outcome.command {
            if send_lossy(&commands, command) {
                stats.commands_sent += 1;
            } else {
                stats.commands_dropped += 1;
                log::debug!("Command queue full, dropped {command}");
            }
        }
        if let Some(special) = outcome.special {
            log::trace!("Special gesture: {special:?}");
        }

        status.send(outcome.status.clone());
        // The render loop may already be gone during shutdown.
        let _ = send_blocking(
            &display,
            DisplayResult {
                frame,
                hands,
                status: outcome.status,
            },
        );
    }

    send_shutdown(&commands);
    status.shutdown();
    log::info!("Gesture worker stopped.");
    stats
}

pub fn action_worker<A: Actuator>(actuator: A, commands: Receiver<Message<Command>>) -> DispatchStats {
    log::info!("Action worker started...");
    let mut dispatcher = Dispatcher::new(actuator);

    while let Some(command) = recv_payload(&commands) {
        dispatcher.dispatch(&command);
    }

    log::info!("Action worker stopped.");
    dispatcher.stats()
}

pub fn status_worker<S: StatusSink>(mut sink: S, status: Receiver<Message<String>>) -> u64 {
    log::info!("Status worker started...");
    let mut shown = 0u64;

    while let Some(text) = recv_payload(&status) {
        sink.display(&text);
        shown += 1;
    }

    log::info!("Status worker stopped.");
    shown
}
