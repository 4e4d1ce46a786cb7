//! The per-frame visualization loop.
//!
//! [`Visualizer`] ties the collaborators together: it pulls frames from a
//! [`FrameSource`], asks a [`HandDetector`] for the hands in each frame,
//! classifies every hand's gesture, updates the [`InkTrail`], and hands the
//! resulting [`Overlay`] to a [`Display`].
//!
//! The loop is single-threaded and synchronous: a frame is fully classified,
//! annotated and presented before the next one is read. The trail is the only
//! state that persists across frames, and the loop is its only writer.

use std::time::Instant;

use anyhow::Result;
use nalgebra::Point2;

use crate::{
    hand::{
        self,
        gesture::{self, Gesture},
        HandObservation, LandmarkIdx,
    },
    overlay::{
        Overlay, BONE_COLOR, BONE_STROKE_WIDTH, FINGERTIP_RADIUS, FPS_COLOR, INK_COLOR,
        INK_STROKE_WIDTH, LABEL_COLOR, MARKER_COLOR,
    },
    resolution::Resolution,
    timer::{FpsCounter, Timer},
    trail::InkTrail,
};

/// Vertical offset of the per-hand label below the wrist landmark, in pixels.
const LABEL_OFFSET_Y: f32 = 30.0;

/// A source of video frames.
///
/// Each frame is read synchronously; reading blocks until a frame is
/// available. The frame type is opaque to this crate and only passed through
/// to the [`HandDetector`] and [`Display`].
pub trait FrameSource {
    type Frame;

    /// Returns the pixel resolution of the produced frames.
    fn resolution(&self) -> Resolution;

    /// Reads the next frame.
    ///
    /// Returns `Ok(None)` when the stream has ended. Errors indicate a device
    /// failure and terminate the loop.
    fn read(&mut self) -> Result<Option<Self::Frame>>;
}

/// A hand pose estimator.
///
/// Operates on a single frame at a time; no temporal state is requested from
/// it.
pub trait HandDetector {
    type Frame;

    /// Returns the hands detected in `frame`, zero or more.
    fn detect(&mut self, frame: &Self::Frame) -> Result<Vec<HandObservation>>;
}

/// Feedback from the display after presenting a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Keep processing frames.
    Continue,
    /// The user requested to quit (e.g. pressed the quit key).
    Stop,
}

/// The output side: renders a frame with its overlay and reports user input.
pub trait Display {
    type Frame;

    /// Presents `frame` with `overlay` drawn on top.
    fn present(&mut self, frame: &Self::Frame, overlay: &Overlay) -> Result<Signal>;
}

/// State of the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// The gesture visualizer.
///
/// Owns all cross-frame state (the ink trail and performance counters) and
/// drives the per-frame processing. [`Visualizer::process_frame`] contains
/// the full per-frame logic and can be exercised directly, without any frame
/// source or display.
pub struct Visualizer {
    trail: InkTrail,
    fps: FpsCounter,
    t_detect: Timer,
    state: LoopState,
}

impl Visualizer {
    pub fn new() -> Self {
        Self {
            trail: InkTrail::new(),
            fps: FpsCounter::new("visualizer"),
            t_detect: Timer::new("detect"),
            state: LoopState::Stopped,
        }
    }

    /// Returns the current ink trail.
    #[inline]
    pub fn trail(&self) -> &InkTrail {
        &self.trail
    }

    /// Returns the current state of the frame loop.
    #[inline]
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Runs the frame loop until the stream ends or the display requests a
    /// stop.
    ///
    /// An in-flight frame is always processed to completion; the stop signal
    /// is only acted on between frames. Frame read and detection errors are
    /// fatal and propagated.
    pub fn run<S, D, V>(&mut self, source: &mut S, detector: &mut D, display: &mut V) -> Result<()>
    where
        S: FrameSource,
        D: HandDetector<Frame = S::Frame>,
        V: Display<Frame = S::Frame>,
    {
        self.state = LoopState::Running;
        let resolution = source.resolution();
        log::info!("starting frame loop at {resolution}");

        while self.state == LoopState::Running {
            let Some(frame) = source.read()? else {
                log::info!("end of stream, stopping");
                self.state = LoopState::Stopped;
                break;
            };

            let now = Instant::now();
            self.fps.tick_at_with(now, [&self.t_detect]);

            let hands = self.t_detect.time(|| detector.detect(&frame))?;
            let overlay = self.process_frame(&hands, resolution, now);

            match display.present(&frame, &overlay)? {
                Signal::Continue => {}
                Signal::Stop => {
                    log::info!("stop requested, stopping");
                    self.state = LoopState::Stopped;
                }
            }
        }

        Ok(())
    }

    /// Processes the hands observed in one frame and produces the overlay for
    /// it.
    ///
    /// Hands are handled in the order the detector reported them; when
    /// several hands hold the pointer gesture at once, their fingertip
    /// positions interleave in that order on the shared trail. Trail expiry
    /// runs once per frame after all hands, so it also runs on frames without
    /// any hands.
    pub fn process_frame(
        &mut self,
        hands: &[HandObservation],
        resolution: Resolution,
        now: Instant,
    ) -> Overlay {
        let mut overlay = Overlay::new();

        for obs in hands {
            self.annotate_hand(obs, resolution, now, &mut overlay);
        }

        self.trail.maybe_expire(now);
        for (start, end) in self.trail.segments() {
            overlay.line(start, end, INK_COLOR, INK_STROKE_WIDTH);
        }

        overlay.text(
            Point2::new(20.0, 40.0),
            format!("FPS: {}", self.fps.current() as u32),
            FPS_COLOR,
            1.0,
        );

        overlay
    }

    fn annotate_hand(
        &mut self,
        obs: &HandObservation,
        resolution: Resolution,
        now: Instant,
        overlay: &mut Overlay,
    ) {
        for (a, b) in hand::CONNECTIVITY {
            overlay.line(
                obs.landmark_px(*a, resolution),
                obs.landmark_px(*b, resolution),
                BONE_COLOR,
                BONE_STROKE_WIDTH,
            );
        }
        for pos in obs.landmarks() {
            overlay.marker(resolution.to_pixels(pos), MARKER_COLOR);
        }

        let (gesture, _fingers) = gesture::classify(obs);
        log::trace!("{} hand: {}", obs.handedness(), gesture);

        let wrist = obs.landmark_px(LandmarkIdx::Wrist, resolution);
        overlay.text(
            Point2::new(wrist.x, wrist.y + LABEL_OFFSET_Y),
            format!("{}: {}", obs.handedness(), gesture),
            LABEL_COLOR,
            0.7,
        );

        if gesture == Gesture::Pointer {
            let tip = obs.index_fingertip_px(resolution);
            self.trail.record(tip, now);

            overlay.circle(tip, FINGERTIP_RADIUS, INK_COLOR);
            overlay.bold_text(
                Point2::new(tip.x + 10.0, tip.y - 10.0),
                "Pointer",
                INK_COLOR,
                1.0,
            );
        }
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new()
    }
}
