use gesture_cortex::error::{ActuationError, CaptureError};
use gesture_cortex::hand::landmarks::INDEX_TIP;
use gesture_cortex::hand::synth::posed_hand;
use gesture_cortex::types::Frame;
use gesture_cortex::{
    Actuator, Clock, Collaborators, Command, FixedWindowTitle, FrameSize, FrameSource,
    GestureClassifier, HandObservation, Handedness, ManualClock, Pipeline, ReplayDetector,
    StatusSink, SyntheticFrameSource, SystemClock,
};
use gesture_cortex::config::PipelineConfig;
use std::io::Cursor;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct RecordingActuator {
    seen: Arc<Mutex<Vec<Command>>>,
}

impl Actuator for RecordingActuator {
    fn execute(&mut self, command: &Command) -> Result<(), ActuationError> {
        self.seen.lock().expect("lock").push(*command);
        Ok(())
    }
}

#[derive(Clone, Default)]
struct RecordingSink {
    shown: Arc<Mutex<Vec<String>>>,
}

impl StatusSink for RecordingSink {
    fn display(&mut self, text: &str) {
        self.shown.lock().expect("lock").push(text.to_string());
    }
}

fn hand_json(hand: &HandObservation) -> String {
    let points: Vec<String> = hand
        .landmarks
        .iter()
        .map(|p| format!("[{},{},{}]", p.x, p.y, p.z))
        .collect();
    format!(
        r#"{{"handedness":"{:?}","landmarks":[{}]}}"#,
        hand.handedness,
        points.join(",")
    )
}

fn frame_line(hands: &[HandObservation]) -> String {
    let items: Vec<String> = hands.iter().map(hand_json).collect();
    format!("[{}]", items.join(","))
}

fn classifier(clock: Arc<ManualClock>) -> GestureClassifier {
    GestureClassifier::new(
        Default::default(),
        clock,
        Box::new(FixedWindowTitle::new(Some("Terminal".into()))),
    )
}

#[test]
fn replayed_gestures_reach_the_actuator() {
    let palms = [
        posed_hand(Handedness::Left, [true; 5], (0.3, 0.5)),
        posed_hand(Handedness::Right, [true; 5], (0.7, 0.5)),
    ];
    let pointing = posed_hand(Handedness::Right, [false, true, false, false, false], (0.5, 0.6))
        .with_point(INDEX_TIP, 0.5625, 0.5);

    let mut script = vec![frame_line(&palms)];
    script.extend((0..4).map(|_| frame_line(std::slice::from_ref(&pointing))));
    script.push(String::new());
    let replay = ReplayDetector::from_reader(Cursor::new(script.join("\n")), false).expect("replay");

    let actuator = RecordingActuator::default();
    let sink = RecordingSink::default();
    let classifier_clock = Arc::new(ManualClock::new(10_000));
    let wall: Arc<dyn Clock> = Arc::new(SystemClock);

    let config = PipelineConfig::default();
    let collaborators = Collaborators {
        source: Box::new(SyntheticFrameSource::new(
            FrameSize::new(640, 480),
            20,
            Some(6),
            Arc::clone(&wall),
        )),
        detector: Box::new(replay),
        classifier: classifier(classifier_clock),
        actuator: Box::new(actuator.clone()),
        sink: Box::new(sink.clone()),
    };

    let report = Pipeline::new(config, collaborators, wall)
        .run(&AtomicBool::new(false))
        .expect("pipeline");

    assert_eq!(report.frames_captured, 6);
    assert_eq!(report.frames_dropped + report.frames_detected, 6);
    assert_eq!(report.classifier.frames, report.frames_detected);
    assert_eq!(report.failed_reconnect_bursts, 0);

    let seen = actuator.seen.lock().expect("lock").clone();
    assert!(!seen.is_empty(), "no commands reached the actuator");
    for command in &seen {
        match command {
            Command::Move { dx, dy } => {
                assert!((dx - 12.0).abs() < 1e-4 && dy.abs() < 1e-4, "{command}");
            }
            other => panic!("unexpected command {other}"),
        }
    }
    assert_eq!(report.dispatch.executed, seen.len() as u64);

    let shown = sink.shown.lock().expect("lock").clone();
    assert_eq!(shown.first().map(String::as_str), Some("Gestures ACTIVATED"));
    assert!(shown.len() as u64 <= report.classifier.frames);
}

#[test]
fn preset_stop_flag_shuts_down_cleanly() {
    let wall: Arc<dyn Clock> = Arc::new(SystemClock);
    let collaborators = Collaborators {
        source: Box::new(SyntheticFrameSource::new(FrameSize::new(8, 8), 30, None, Arc::clone(&wall))),
        detector: Box::new(ReplayDetector::new(Vec::new(), false)),
        classifier: classifier(Arc::new(ManualClock::new(10_000))),
        actuator: Box::new(RecordingActuator::default()),
        sink: Box::new(RecordingSink::default()),
    };

    let report = Pipeline::new(PipelineConfig::default(), collaborators, wall)
        .run(&AtomicBool::new(true))
        .expect("pipeline");
    assert_eq!(report.frames_captured, 0);
    assert_eq!(report.classifier.frames, 0);
    assert_eq!(report.statuses_shown, 0);
}

#[test]
fn stop_from_another_thread_ends_unbounded_run() {
    let stop = Arc::new(AtomicBool::new(false));
    let wall: Arc<dyn Clock> = Arc::new(SystemClock);
    let collaborators = Collaborators {
        source: Box::new(SyntheticFrameSource::new(FrameSize::new(8, 8), 100, None, Arc::clone(&wall))),
        detector: Box::new(ReplayDetector::new(Vec::new(), false)),
        classifier: classifier(Arc::new(ManualClock::new(10_000))),
        actuator: Box::new(RecordingActuator::default()),
        sink: Box::new(RecordingSink::default()),
    };

    let flag = Arc::clone(&stop);
    let stopper = std::thread::spawn(move || {
        std::thread::sleep(std::time::Duration::from_millis(100));
        flag.store(true, std::sync::atomic::Ordering::SeqCst);
    });

    let report = Pipeline::new(PipelineConfig::default(), collaborators, wall)
        .run(&stop)
        .expect("pipeline");
    stopper.join().expect("stopper");

    assert!(report.frames_captured > 0);
    assert_eq!(report.dispatch.executed, 0);
    assert_eq!(report.last_status.as_deref().unwrap_or("MODE: INACTIVE"), "MODE: INACTIVE");
}

struct Unplugged;

impl FrameSource for Unplugged {
    fn read(&mut self) -> Result<Option<Frame>, CaptureError> {
        Err(CaptureError::Read("device vanished".into()))
    }

    fn reconnect(&mut self) -> Result<(), CaptureError> {
        Err(CaptureError::Open { index: 1 })
    }
}

/// Fails until the `recover_after`-th reconnect, then yields `frames` frames
struct Replugged {
    recover_after: u32,
    reconnects: u32,
    frames: u32,
}

impl FrameSource for Replugged {
    fn read(&mut self) -> Result<Option<Frame>, CaptureError> {
        if self.reconnects < self.recover_after {
            return Err(CaptureError::Read("device vanished".into()));
        }
        if self.frames == 0 {
            return Ok(None);
        }
        self.frames -= 1;
        Ok(Some(Frame::new(image::RgbImage::new(4, 4), 0)))
    }

    fn reconnect(&mut self) -> Result<(), CaptureError> {
        self.reconnects += 1;
        if self.reconnects < self.recover_after {
            return Err(CaptureError::Open { index: 1 });
        }
        Ok(())
    }
}

fn idle_collaborators(source: Box<dyn FrameSource + Send>) -> Collaborators {
    Collaborators {
        source,
        detector: Box::new(ReplayDetector::new(Vec::new(), false)),
        classifier: classifier(Arc::new(ManualClock::new(10_000))),
        actuator: Box::new(RecordingActuator::default()),
        sink: Box::new(RecordingSink::default()),
    }
}

#[test]
fn lost_camera_keeps_retrying_until_stopped() {
    let pipeline_clock = Arc::new(ManualClock::new(0));
    let stop = Arc::new(AtomicBool::new(false));

    let (clock, flag) = (Arc::clone(&pipeline_clock), Arc::clone(&stop));
    let stopper = std::thread::spawn(move || {
        let started = std::time::Instant::now();
        while clock.now_ms() < 12_000 && started.elapsed() < std::time::Duration::from_secs(10) {
            std::thread::yield_now();
        }
        flag.store(true, std::sync::atomic::Ordering::SeqCst);
    });

    let report = Pipeline::new(
        PipelineConfig::default(),
        idle_collaborators(Box::new(Unplugged)),
        pipeline_clock.clone(),
    )
    .run(&stop)
    .expect("pipeline");
    stopper.join().expect("stopper");

    // Two full bursts of 5 x 1000 ms went by without the pipeline ending.
    assert!(pipeline_clock.now_ms() >= 12_000);
    assert!(report.failed_reconnect_bursts >= 2, "{report:?}");
    assert_eq!(report.frames_captured, 0);
}

#[test]
fn camera_recovers_after_a_failed_burst() {
    let pipeline_clock = Arc::new(ManualClock::new(0));
    pipeline_clock.set(20_000);
    let source = Replugged {
        recover_after: 7,
        reconnects: 0,
        frames: 3,
    };

    let report = Pipeline::new(
        PipelineConfig::default(),
        idle_collaborators(Box::new(source)),
        pipeline_clock.clone(),
    )
    .run(&AtomicBool::new(false))
    .expect("pipeline");

    assert_eq!(report.failed_reconnect_bursts, 1);
    assert_eq!(report.frames_captured, 3);
    assert_eq!(pipeline_clock.now_ms(), 27_000);
}
