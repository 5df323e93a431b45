//! Criterion benchmarks for the per-frame hot path
//!
//! Covers: finger extraction, single-hand classification (cursor, swipe,
//! bindings) and the idle path.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gesture_cortex::hand::synth::posed_hand;
use gesture_cortex::hand::FingerVector;
use gesture_cortex::{
    Clock, FixedWindowTitle, FrameSize, GestureClassifier, Handedness, HandObservation, ManualClock,
};
use std::sync::Arc;

const SIZE: FrameSize = FrameSize::new(1280, 720);
const PALM: [bool; 5] = [true; 5];

fn active_classifier(title: &str) -> (GestureClassifier, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(10_000));
    let mut classifier = GestureClassifier::new(
        Default::default(),
        clock.clone(),
        Box::new(FixedWindowTitle::new(Some(title.to_string()))),
    );
    let palms = [
        posed_hand(Handedness::Left, PALM, (0.3, 0.5)),
        posed_hand(Handedness::Right, PALM, (0.7, 0.5)),
    ];
    classifier.classify(SIZE, &palms);
    clock.advance(1_100);
    (classifier, clock)
}

fn bench_finger_vector(c: &mut Criterion) {
    let hand = posed_hand(Handedness::Right, [false, true, true, true, false], (0.5, 0.5));
    c.bench_function("finger_vector", |b| {
        b.iter(|| FingerVector::from_hand(black_box(&hand)))
    });
}

fn bench_cursor_frame(c: &mut Criterion) {
    let (mut classifier, clock) = active_classifier("Terminal");
    let hand = posed_hand(Handedness::Right, [false, true, false, false, false], (0.6, 0.5));
    c.bench_function("classify_cursor", |b| {
        b.iter(|| {
            clock.advance(33);
            classifier.classify(SIZE, black_box(std::slice::from_ref(&hand)))
        })
    });
}

fn bench_swipe_frames(c: &mut Criterion) {
    let (mut classifier, clock) = active_classifier("Terminal");
    let frames: Vec<HandObservation> = (0..30)
        .map(|i| posed_hand(Handedness::Right, PALM, (0.3 + i as f32 * 0.02, 0.5)))
        .collect();
    c.bench_function("classify_swipe_sweep", |b| {
        b.iter(|| {
            for hand in &frames {
                clock.advance(33);
                black_box(classifier.classify(SIZE, std::slice::from_ref(hand)));
            }
        })
    });
}

fn bench_profile_lookup(c: &mut Criterion) {
    let (mut classifier, clock) = active_classifier("Spotify");
    let hand = posed_hand(Handedness::Right, [false, true, true, true, false], (0.5, 0.5));
    c.bench_function("classify_media_binding", |b| {
        b.iter(|| {
            clock.advance(1_001);
            classifier.classify(SIZE, black_box(std::slice::from_ref(&hand)))
        })
    });
}

fn bench_idle(c: &mut Criterion) {
    let (mut classifier, clock) = active_classifier("Terminal");
    let none: &[HandObservation] = &[];
    c.bench_function("classify_no_hands", |b| {
        b.iter(|| {
            clock.advance(33);
            classifier.classify(SIZE, black_box(none))
        })
    });
    black_box(clock.now_ms());
}

criterion_group!(
    benches,
    bench_finger_vector,
    bench_cursor_frame,
    bench_swipe_frames,
    bench_profile_lookup,
    bench_idle
);
criterion_main!(benches);
