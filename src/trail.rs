//! The ink trail drawn while a pointer gesture is held.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use itertools::Itertools;
use nalgebra::Point2;

/// Maximum number of points the trail holds before evicting the oldest.
pub const TRAIL_CAPACITY: usize = 1024;

/// How long after the last recorded point the whole trail is cleared.
pub const TRAIL_TIMEOUT: Duration = Duration::from_secs(2);

/// A bounded, time-decaying sequence of drawn points.
///
/// Points are appended while any observed hand holds the pointer gesture.
/// The trail is shared across hands; points from multiple hands interleave in
/// processing order and are not attributed to a hand. A single last-append
/// timestamp covers the whole trail: once [`TRAIL_TIMEOUT`] passes without an
/// append, the next [`InkTrail::maybe_expire`] clears everything.
///
/// Timestamps are passed in by the caller so that expiry is testable without
/// waiting on a real clock.
#[derive(Debug, Clone)]
pub struct InkTrail {
    points: VecDeque<Point2<f32>>,
    last_append: Option<Instant>,
}

impl InkTrail {
    /// Creates an empty trail.
    pub fn new() -> Self {
        Self {
            points: VecDeque::with_capacity(TRAIL_CAPACITY),
            last_append: None,
        }
    }

    /// Appends a point (in pixel coordinates) drawn at time `now`.
    ///
    /// If the trail is at capacity, the oldest point is evicted first.
    pub fn record(&mut self, point: Point2<f32>, now: Instant) {
        if self.points.len() == TRAIL_CAPACITY {
            self.points.pop_front();
        }
        self.points.push_back(point);
        self.last_append = Some(now);
    }

    /// Clears the trail if more than [`TRAIL_TIMEOUT`] has passed since the
    /// last append.
    ///
    /// Called once per frame, after all hands have been processed, so an
    /// append for the current frame always wins over expiry at the same
    /// instant.
    pub fn maybe_expire(&mut self, now: Instant) {
        let Some(last) = self.last_append else { return };
        if !self.points.is_empty() && now.duration_since(last) > TRAIL_TIMEOUT {
            log::debug!("ink trail idle for over {TRAIL_TIMEOUT:?}, clearing");
            self.points.clear();
            self.last_append = None;
        }
    }

    /// Returns the recorded points, oldest first.
    pub fn points(&self) -> impl Iterator<Item = Point2<f32>> + '_ {
        self.points.iter().copied()
    }

    /// Returns consecutive point pairs for drawing connecting line segments.
    ///
    /// An empty or single-point trail yields no segments.
    pub fn segments(&self) -> impl Iterator<Item = (Point2<f32>, Point2<f32>)> + '_ {
        self.points().tuple_windows()
    }

    /// Returns the number of recorded points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns whether the trail holds no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Default for InkTrail {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(i: usize) -> Point2<f32> {
        Point2::new(i as f32, i as f32 * 2.0)
    }

    #[test]
    fn insertion_order_and_eviction() {
        let now = Instant::now();
        let mut trail = InkTrail::new();
        for i in 0..TRAIL_CAPACITY {
            trail.record(pt(i), now);
        }
        assert_eq!(trail.len(), TRAIL_CAPACITY);
        assert_eq!(trail.points().next(), Some(pt(0)));

        trail.record(pt(TRAIL_CAPACITY), now);
        assert_eq!(trail.len(), TRAIL_CAPACITY);
        // Oldest point was evicted, the rest kept their order.
        assert_eq!(trail.points().next(), Some(pt(1)));
        assert_eq!(trail.points().last(), Some(pt(TRAIL_CAPACITY)));
    }

    #[test]
    fn expiry_boundary() {
        let t0 = Instant::now();
        let mut trail = InkTrail::new();
        trail.record(pt(0), t0);
        trail.record(pt(1), t0);

        trail.maybe_expire(t0 + Duration::from_millis(1999));
        assert_eq!(trail.len(), 2);

        trail.maybe_expire(t0 + Duration::from_millis(2001));
        assert!(trail.is_empty());
    }

    #[test]
    fn expiry_resets_with_new_points() {
        let t0 = Instant::now();
        let mut trail = InkTrail::new();
        trail.record(pt(0), t0);
        trail.record(pt(1), t0 + Duration::from_millis(1500));

        // Less than the timeout since the *last* append.
        trail.maybe_expire(t0 + Duration::from_millis(3000));
        assert_eq!(trail.len(), 2);

        trail.maybe_expire(t0 + Duration::from_millis(3600));
        assert!(trail.is_empty());
    }

    #[test]
    fn expire_on_empty_is_a_no_op() {
        let mut trail = InkTrail::new();
        trail.maybe_expire(Instant::now());
        assert!(trail.is_empty());
    }

    #[test]
    fn segments_pair_consecutive_points() {
        let now = Instant::now();
        let mut trail = InkTrail::new();
        assert_eq!(trail.segments().count(), 0);

        trail.record(pt(0), now);
        assert_eq!(trail.segments().count(), 0);

        trail.record(pt(1), now);
        trail.record(pt(2), now);
        let segments: Vec<_> = trail.segments().collect();
        assert_eq!(segments, vec![(pt(0), pt(1)), (pt(1), pt(2))]);
    }
}
