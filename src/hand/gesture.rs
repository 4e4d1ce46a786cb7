//! Static gesture classification from hand landmarks.
//!
//! Classification is a pure function of a single [`HandObservation`]: a
//! 5-entry "finger extended" vector is derived from landmark geometry, then
//! mapped to a [`Gesture`]. There is no smoothing or hysteresis across frames.

use std::fmt;

use crate::hand::{HandObservation, Handedness, LandmarkIdx};

/// The five fingers, in landmark order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    /// All fingers, in the order used by [`FingerState`].
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    /// Returns the fingertip landmark of this finger.
    pub fn tip(&self) -> LandmarkIdx {
        match self {
            Finger::Thumb => LandmarkIdx::ThumbTip,
            Finger::Index => LandmarkIdx::IndexFingerTip,
            Finger::Middle => LandmarkIdx::MiddleFingerTip,
            Finger::Ring => LandmarkIdx::RingFingerTip,
            Finger::Pinky => LandmarkIdx::PinkyTip,
        }
    }

    /// Returns the landmark the fingertip is compared against, two joints
    /// down the finger chain from the tip.
    pub fn reference_joint(&self) -> LandmarkIdx {
        match self {
            Finger::Thumb => LandmarkIdx::ThumbIp,
            Finger::Index => LandmarkIdx::IndexFingerPip,
            Finger::Middle => LandmarkIdx::MiddleFingerPip,
            Finger::Ring => LandmarkIdx::RingFingerPip,
            Finger::Pinky => LandmarkIdx::PinkyPip,
        }
    }
}

impl fmt::Display for Finger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Finger::Thumb => "Thumb",
            Finger::Index => "Index",
            Finger::Middle => "Middle",
            Finger::Ring => "Ring",
            Finger::Pinky => "Pinky",
        })
    }
}

/// Which fingers of a hand are extended (held out straight).
///
/// Derived deterministically from one frame's [`HandObservation`]:
///
/// - The thumb compares tip and IP joint *horizontally*. On a right hand the
///   thumb counts as extended when the tip is left of the joint, on a left
///   hand when it is right of the joint. This heuristic assumes a
///   horizontally mirrored camera view.
/// - Every other finger counts as extended when its tip is *above* its PIP
///   joint (smaller Y, since image Y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FingerState {
    extended: [bool; 5],
}

impl FingerState {
    /// Computes the finger state of an observed hand.
    pub fn of(obs: &HandObservation) -> Self {
        let mut extended = [false; 5];
        for (i, finger) in Finger::ALL.into_iter().enumerate() {
            let tip = obs.landmark(finger.tip());
            let joint = obs.landmark(finger.reference_joint());
            extended[i] = match finger {
                Finger::Thumb => match obs.handedness() {
                    Handedness::Right => tip.x < joint.x,
                    Handedness::Left => tip.x > joint.x,
                },
                _ => tip.y < joint.y,
            };
        }
        Self { extended }
    }

    /// Creates a finger state directly from per-finger booleans, in
    /// [`Finger::ALL`] order.
    pub fn from_flags(extended: [bool; 5]) -> Self {
        Self { extended }
    }

    /// Returns whether `finger` is extended.
    #[inline]
    pub fn is_extended(&self, finger: Finger) -> bool {
        self.extended[finger as usize]
    }

    /// Returns the number of extended fingers.
    pub fn num_extended(&self) -> usize {
        self.extended.iter().filter(|e| **e).count()
    }

    /// Returns the extended fingers, in [`Finger::ALL`] order.
    pub fn extended_fingers(&self) -> impl Iterator<Item = Finger> + '_ {
        Finger::ALL
            .into_iter()
            .filter(|finger| self.is_extended(*finger))
    }
}

/// A static hand gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// All five fingers extended (an open palm).
    Stop,
    /// Index finger extended, middle/ring/pinky curled, thumb in any state.
    ///
    /// This is the gesture that drives the ink trail.
    Pointer,
    /// Only the thumb is extended.
    Thumb,
    /// Only the index finger is extended.
    ///
    /// Unreachable from [`Gesture::classify`]: the index-only pose matches
    /// [`Gesture::Pointer`] first, which deliberately takes precedence over
    /// the solo-finger rule.
    Index,
    /// Only the middle finger is extended.
    Middle,
    /// Only the ring finger is extended.
    Ring,
    /// Only the pinky is extended.
    Pinky,
    /// None of the other gestures matched.
    NoGesture,
}

impl Gesture {
    /// Maps a finger state to a gesture.
    ///
    /// Rules are checked in order, first match wins:
    ///
    /// 1. all five fingers extended ⇒ [`Gesture::Stop`],
    /// 2. index extended and middle/ring/pinky curled ⇒ [`Gesture::Pointer`]
    ///    (the thumb does not matter),
    /// 3. exactly one finger extended ⇒ that finger's gesture,
    /// 4. anything else ⇒ [`Gesture::NoGesture`].
    pub fn classify(fingers: &FingerState) -> Self {
        if fingers.num_extended() == 5 {
            return Gesture::Stop;
        }

        if fingers.is_extended(Finger::Index)
            && !fingers.is_extended(Finger::Middle)
            && !fingers.is_extended(Finger::Ring)
            && !fingers.is_extended(Finger::Pinky)
        {
            return Gesture::Pointer;
        }

        if fingers.num_extended() == 1 {
            // `extended_fingers` yields in Thumb..Pinky order, matching the
            // first-true tie break.
            return match fingers.extended_fingers().next() {
                Some(Finger::Thumb) => Gesture::Thumb,
                Some(Finger::Index) => Gesture::Index,
                Some(Finger::Middle) => Gesture::Middle,
                Some(Finger::Ring) => Gesture::Ring,
                Some(Finger::Pinky) => Gesture::Pinky,
                None => unreachable!(),
            };
        }

        Gesture::NoGesture
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Gesture::Stop => "Stop",
            Gesture::Pointer => "Pointer",
            Gesture::Thumb => "Thumb",
            Gesture::Index => "Index",
            Gesture::Middle => "Middle",
            Gesture::Ring => "Ring",
            Gesture::Pinky => "Pinky",
            Gesture::NoGesture => "No Gesture",
        })
    }
}

/// Classifies an observed hand, returning the gesture and the finger state it
/// was derived from.
pub fn classify(obs: &HandObservation) -> (Gesture, FingerState) {
    let fingers = FingerState::of(obs);
    (Gesture::classify(&fingers), fingers)
}

#[cfg(test)]
mod tests {
    use nalgebra::Point2;

    use crate::hand::NUM_LANDMARKS;

    use super::*;

    /// Builds an observation whose geometry yields the given extended-finger
    /// set, with a bit of random jitter on every landmark.
    fn observation(handedness: Handedness, extended: [bool; 5]) -> HandObservation {
        let jitter = || fastrand::f32() * 0.05;
        let mut landmarks = [Point2::new(0.5, 0.5); NUM_LANDMARKS];
        for (i, finger) in Finger::ALL.into_iter().enumerate() {
            let joint = Point2::new(0.4 + jitter(), 0.5 + jitter());
            landmarks[finger.reference_joint() as usize] = joint;
            landmarks[finger.tip() as usize] = match finger {
                Finger::Thumb => {
                    // Horizontal rule, mirrored between hands.
                    let out = match handedness {
                        Handedness::Right => joint.x - 0.1,
                        Handedness::Left => joint.x + 0.1,
                    };
                    let curled = match handedness {
                        Handedness::Right => joint.x + 0.1,
                        Handedness::Left => joint.x - 0.1,
                    };
                    Point2::new(if extended[i] { out } else { curled }, joint.y)
                }
                _ => {
                    let y = if extended[i] { joint.y - 0.2 } else { joint.y + 0.2 };
                    Point2::new(joint.x, y)
                }
            };
        }
        HandObservation::new(handedness, landmarks)
    }

    #[test]
    fn finger_state_matches_geometry() {
        for bits in 0..32u32 {
            let flags = [
                bits & 1 != 0,
                bits & 2 != 0,
                bits & 4 != 0,
                bits & 8 != 0,
                bits & 16 != 0,
            ];
            for handedness in [Handedness::Left, Handedness::Right] {
                let obs = observation(handedness, flags);
                assert_eq!(
                    FingerState::of(&obs),
                    FingerState::from_flags(flags),
                    "handedness {handedness:?}, flags {flags:?}",
                );
            }
        }
    }

    #[test]
    fn open_palm_is_stop() {
        let fingers = FingerState::from_flags([true; 5]);
        assert_eq!(Gesture::classify(&fingers), Gesture::Stop);
    }

    #[test]
    fn lone_index_is_pointer_not_index() {
        let fingers = FingerState::from_flags([false, true, false, false, false]);
        assert_eq!(Gesture::classify(&fingers), Gesture::Pointer);
    }

    #[test]
    fn index_plus_thumb_is_still_pointer() {
        let fingers = FingerState::from_flags([true, true, false, false, false]);
        assert_eq!(Gesture::classify(&fingers), Gesture::Pointer);
    }

    #[test]
    fn solo_fingers() {
        let cases = [
            ([true, false, false, false, false], Gesture::Thumb),
            ([false, false, true, false, false], Gesture::Middle),
            ([false, false, false, true, false], Gesture::Ring),
            ([false, false, false, false, true], Gesture::Pinky),
        ];
        for (flags, expected) in cases {
            assert_eq!(
                Gesture::classify(&FingerState::from_flags(flags)),
                expected,
                "flags {flags:?}",
            );
        }
    }

    #[test]
    fn everything_else_is_no_gesture() {
        for bits in 0..32u32 {
            let flags = [
                bits & 1 != 0,
                bits & 2 != 0,
                bits & 4 != 0,
                bits & 8 != 0,
                bits & 16 != 0,
            ];
            let fingers = FingerState::from_flags(flags);
            let gesture = Gesture::classify(&fingers);

            let pointer = flags[1] && !flags[2] && !flags[3] && !flags[4];
            if flags == [true; 5] {
                assert_eq!(gesture, Gesture::Stop);
            } else if pointer {
                assert_eq!(gesture, Gesture::Pointer);
            } else if fingers.num_extended() == 1 {
                assert_ne!(gesture, Gesture::NoGesture);
            } else {
                assert_eq!(gesture, Gesture::NoGesture, "flags {flags:?}");
            }
        }
    }

    #[test]
    fn right_thumb_scenario() {
        // Right hand, thumb tip left of the IP joint, everything else curled.
        let mut landmarks = [Point2::new(0.5, 0.5); NUM_LANDMARKS];
        landmarks[LandmarkIdx::ThumbTip as usize] = Point2::new(0.3, 0.5);
        landmarks[LandmarkIdx::ThumbIp as usize] = Point2::new(0.4, 0.5);
        for finger in [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky] {
            landmarks[finger.reference_joint() as usize] = Point2::new(0.5, 0.4);
            landmarks[finger.tip() as usize] = Point2::new(0.5, 0.6);
        }
        let obs = HandObservation::new(Handedness::Right, landmarks);

        let (gesture, fingers) = classify(&obs);
        assert_eq!(
            fingers,
            FingerState::from_flags([true, false, false, false, false])
        );
        assert_eq!(gesture, Gesture::Thumb);
    }

    #[test]
    fn left_pointer_scenario() {
        // Left hand, index tip above its PIP joint, other fingers curled.
        let mut landmarks = [Point2::new(0.5, 0.5); NUM_LANDMARKS];
        landmarks[LandmarkIdx::IndexFingerTip as usize] = Point2::new(0.5, 0.2);
        landmarks[LandmarkIdx::IndexFingerPip as usize] = Point2::new(0.5, 0.4);
        for finger in [Finger::Middle, Finger::Ring, Finger::Pinky] {
            landmarks[finger.reference_joint() as usize] = Point2::new(0.5, 0.4);
            landmarks[finger.tip() as usize] = Point2::new(0.5, 0.6);
        }
        let obs = HandObservation::new(Handedness::Left, landmarks);

        let (gesture, _) = classify(&obs);
        assert_eq!(gesture, Gesture::Pointer);
    }
}
