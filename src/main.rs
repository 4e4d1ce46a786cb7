//! Headless gesture visualizer demo.
//!
//! Replays a scripted hand through the full frame loop: a right hand sweeps a
//! pointer stroke across the frame, opens into a "Stop" palm, then leaves the
//! frame so the ink trail expires. The display collaborator just logs what it
//! would draw, so this runs without a camera or a window.

use std::{thread, time::Duration};

use anyhow::Result;
use nalgebra::Point2;

use fingerpaint::{
    hand::{gesture::Finger, HandObservation, Handedness, LandmarkIdx, NUM_LANDMARKS},
    overlay::{Overlay, Shape},
    resolution::Resolution,
    visualizer::{Display, FrameSource, HandDetector, Signal, Visualizer},
};

const NUM_FRAMES: u64 = 270;
const FRAME_TIME: Duration = Duration::from_millis(33);

fn main() -> Result<()> {
    fingerpaint::init_logger!();

    let mut source = ScriptedSource { next: 0 };
    let mut detector = ScriptedHands;
    let mut display = LogDisplay;

    Visualizer::new().run(&mut source, &mut detector, &mut display)
}

/// Produces `NUM_FRAMES` empty frames at roughly 30 FPS. The frame payload is
/// just the frame number; the scripted detector derives hands from it.
struct ScriptedSource {
    next: u64,
}

impl FrameSource for ScriptedSource {
    type Frame = u64;

    fn resolution(&self) -> Resolution {
        Resolution::RES_720P
    }

    fn read(&mut self) -> Result<Option<u64>> {
        if self.next == NUM_FRAMES {
            return Ok(None);
        }
        thread::sleep(FRAME_TIME);
        let frame = self.next;
        self.next += 1;
        Ok(Some(frame))
    }
}

struct ScriptedHands;

impl HandDetector for ScriptedHands {
    type Frame = u64;

    fn detect(&mut self, frame: &u64) -> Result<Vec<HandObservation>> {
        Ok(match *frame {
            // Sweep a pointer stroke from left to right along a sine arc.
            0..=119 => {
                let t = *frame as f32 / 119.0;
                let tip = Point2::new(
                    0.2 + 0.6 * t,
                    0.4 + 0.15 * (t * std::f32::consts::TAU).sin(),
                );
                vec![pointer_hand(tip)]
            }
            // Open the palm ("Stop").
            120..=179 => vec![open_palm()],
            // Hand leaves the frame; after 2 seconds the trail expires.
            _ => Vec::new(),
        })
    }
}

/// A right hand holding the pointer gesture with its index fingertip at
/// `tip` (normalized coordinates).
fn pointer_hand(tip: Point2<f32>) -> HandObservation {
    let mut landmarks = curled_right_hand(tip);
    landmarks[LandmarkIdx::IndexFingerTip as usize] = tip;
    landmarks[LandmarkIdx::IndexFingerPip as usize] = Point2::new(tip.x, tip.y + 0.1);
    HandObservation::new(Handedness::Right, landmarks)
}

/// A right hand with all five fingers extended.
fn open_palm() -> HandObservation {
    let mut landmarks = curled_right_hand(Point2::new(0.5, 0.4));
    for finger in Finger::ALL {
        let joint = landmarks[finger.reference_joint() as usize];
        landmarks[finger.tip() as usize] = match finger {
            // Right-hand thumb: tip left of the IP joint.
            Finger::Thumb => Point2::new(joint.x - 0.05, joint.y),
            _ => Point2::new(joint.x, joint.y - 0.1),
        };
    }
    HandObservation::new(Handedness::Right, landmarks)
}

/// Landmarks of a right hand centered near `anchor` with every finger curled.
fn curled_right_hand(anchor: Point2<f32>) -> [Point2<f32>; NUM_LANDMARKS] {
    let mut landmarks = [Point2::new(anchor.x, anchor.y + 0.2); NUM_LANDMARKS];
    for finger in Finger::ALL {
        let joint = Point2::new(anchor.x, anchor.y + 0.1);
        landmarks[finger.reference_joint() as usize] = joint;
        landmarks[finger.tip() as usize] = match finger {
            // Right-hand thumb curls when the tip sits right of the IP joint.
            Finger::Thumb => Point2::new(joint.x + 0.05, joint.y),
            _ => Point2::new(joint.x, joint.y + 0.1),
        };
    }
    landmarks
}

/// Logs a short summary of what a real display would draw.
struct LogDisplay;

impl Display for LogDisplay {
    type Frame = u64;

    fn present(&mut self, frame: &u64, overlay: &Overlay) -> Result<Signal> {
        let mut lines = 0;
        let mut labels = Vec::new();
        for shape in overlay.shapes() {
            match shape {
                Shape::Line { .. } => lines += 1,
                Shape::Text { text, .. } => labels.push(text.as_str()),
                _ => {}
            }
        }
        log::debug!("frame {frame}: {lines} line(s), labels {labels:?}");
        Ok(Signal::Continue)
    }
}
