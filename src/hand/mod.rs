//! Hand landmark data as produced by a hand pose estimator.
//!
//! A [`HandObservation`] is the per-frame output of an external estimator
//! (MediaPipe's hand landmarker or equivalent): the hand's [`Handedness`] and
//! all 21 landmark positions, normalized to the image dimensions. It carries
//! no temporal state; every frame produces fresh observations.

pub mod gesture;

use std::fmt;

use anyhow::{ensure, Result};
use nalgebra::Point2;

use crate::resolution::Resolution;

/// Number of landmarks of a single hand.
pub const NUM_LANDMARKS: usize = 21;

/// Names for the hand pose landmarks.
///
/// # Terminology
///
/// - **CMC**: [Carpometacarpal joint], the lowest joint of the thumb, located near the wrist.
/// - **MCP**: [Metacarpophalangeal joint], the lower joint forming the knuckles near the palm of
///   the hand.
/// - **PIP**: Proximal Interphalangeal joint, the joint between the MCP and DIP.
/// - **DIP**: Distal Interphalangeal joint, the highest joint of a finger.
/// - **Tip**: This landmark is just placed on the tip of the finger, above the DIP.
///
/// [Carpometacarpal joint]: https://en.wikipedia.org/wiki/Carpometacarpal_joint
/// [Metacarpophalangeal joint]: https://en.wikipedia.org/wiki/Metacarpophalangeal_joint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandmarkIdx {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexFingerMcp,
    IndexFingerPip,
    IndexFingerDip,
    IndexFingerTip,
    MiddleFingerMcp,
    MiddleFingerPip,
    MiddleFingerDip,
    MiddleFingerTip,
    RingFingerMcp,
    RingFingerPip,
    RingFingerDip,
    RingFingerTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

/// Skeleton edges connecting the landmarks, for rendering.
pub const CONNECTIVITY: &[(LandmarkIdx, LandmarkIdx)] = {
    use LandmarkIdx::*;
    &[
        // Surround the palm:
        (Wrist, ThumbCmc),
        (ThumbCmc, IndexFingerMcp),
        (IndexFingerMcp, MiddleFingerMcp),
        (MiddleFingerMcp, RingFingerMcp),
        (RingFingerMcp, PinkyMcp),
        (PinkyMcp, Wrist),
        // Thumb:
        (ThumbCmc, ThumbMcp),
        (ThumbMcp, ThumbIp),
        (ThumbIp, ThumbTip),
        // Index:
        (IndexFingerMcp, IndexFingerPip),
        (IndexFingerPip, IndexFingerDip),
        (IndexFingerDip, IndexFingerTip),
        // Middle:
        (MiddleFingerMcp, MiddleFingerPip),
        (MiddleFingerPip, MiddleFingerDip),
        (MiddleFingerDip, MiddleFingerTip),
        // Ring:
        (RingFingerMcp, RingFingerPip),
        (RingFingerPip, RingFingerDip),
        (RingFingerDip, RingFingerTip),
        // Pinky:
        (PinkyMcp, PinkyPip),
        (PinkyPip, PinkyDip),
        (PinkyDip, PinkyTip),
    ]
};

/// Whether an observed hand is a left or right hand.
///
/// As reported by the estimator for a horizontally mirrored camera view, which
/// is how selfie-style webcam feeds are usually presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handedness::Left => f.write_str("Left"),
            Handedness::Right => f.write_str("Right"),
        }
    }
}

/// A single detected hand in one frame.
///
/// Holds the hand's [`Handedness`] and all [`NUM_LANDMARKS`] landmark
/// positions with coordinates normalized to `[0, 1]` (Y growing downwards).
/// Observations are immutable and live only for the frame they were produced
/// in.
#[derive(Debug, Clone)]
pub struct HandObservation {
    handedness: Handedness,
    landmarks: [Point2<f32>; NUM_LANDMARKS],
}

impl HandObservation {
    /// Creates an observation from a full set of landmark positions.
    pub fn new(handedness: Handedness, landmarks: [Point2<f32>; NUM_LANDMARKS]) -> Self {
        Self {
            handedness,
            landmarks,
        }
    }

    /// Creates an observation from a slice of landmark positions.
    ///
    /// Estimators that deliver landmarks as a plain list go through here; a
    /// list that does not contain exactly [`NUM_LANDMARKS`] points is rejected
    /// with an error rather than padded or truncated.
    pub fn from_slice(handedness: Handedness, landmarks: &[Point2<f32>]) -> Result<Self> {
        ensure!(
            landmarks.len() == NUM_LANDMARKS,
            "expected {} hand landmarks, got {}",
            NUM_LANDMARKS,
            landmarks.len(),
        );

        let mut array = [Point2::new(0.0, 0.0); NUM_LANDMARKS];
        array.copy_from_slice(landmarks);
        Ok(Self::new(handedness, array))
    }

    /// Returns which hand this observation belongs to.
    #[inline]
    pub fn handedness(&self) -> Handedness {
        self.handedness
    }

    /// Returns a landmark's normalized position.
    #[inline]
    pub fn landmark(&self, idx: LandmarkIdx) -> Point2<f32> {
        self.landmarks[idx as usize]
    }

    /// Returns an iterator over all normalized landmark positions, in
    /// [`LandmarkIdx`] order.
    pub fn landmarks(&self) -> impl Iterator<Item = Point2<f32>> + '_ {
        self.landmarks.iter().copied()
    }

    /// Returns a landmark's position in pixel coordinates of `res`.
    pub fn landmark_px(&self, idx: LandmarkIdx, res: Resolution) -> Point2<f32> {
        res.to_pixels(self.landmark(idx))
    }

    /// Returns the index fingertip position in pixel coordinates of `res`.
    ///
    /// This is the position the ink trail records while the hand holds the
    /// pointer gesture.
    pub fn index_fingertip_px(&self, res: Resolution) -> Point2<f32> {
        self.landmark_px(LandmarkIdx::IndexFingerTip, res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_slice_rejects_wrong_count() {
        let too_few = vec![Point2::new(0.5, 0.5); 20];
        assert!(HandObservation::from_slice(Handedness::Left, &too_few).is_err());

        let too_many = vec![Point2::new(0.5, 0.5); 22];
        assert!(HandObservation::from_slice(Handedness::Left, &too_many).is_err());

        let exact = vec![Point2::new(0.5, 0.5); NUM_LANDMARKS];
        assert!(HandObservation::from_slice(Handedness::Left, &exact).is_ok());
    }

    #[test]
    fn fingertip_scaling() {
        let mut landmarks = [Point2::new(0.0, 0.0); NUM_LANDMARKS];
        landmarks[LandmarkIdx::IndexFingerTip as usize] = Point2::new(0.25, 0.5);
        let obs = HandObservation::new(Handedness::Right, landmarks);

        let px = obs.index_fingertip_px(Resolution::new(640, 480));
        assert_eq!(px, Point2::new(160.0, 240.0));
    }
}
