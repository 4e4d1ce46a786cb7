//! Data filtering and smoothing.

/// A stateless filter for values of type `f32`.
///
/// The filter parameters live in the filter itself, while the accumulated
/// history lives in a separate [`Filter::State`] value, so a single filter
/// configuration can drive several independent data streams.
pub trait Filter {
    /// Accumulated filter state.
    type State: Default;

    /// Feeds a new value into the filter, returning the filtered value.
    fn filter(&self, state: &mut Self::State, value: f32) -> f32;
}

/// An Exponential Moving Average (EMA) filter.
#[derive(Debug, Clone, Copy)]
pub struct Ema {
    alpha: f32,
}

impl Ema {
    /// Creates a new Exponential Moving Average filter.
    ///
    /// The `alpha` parameter must be between 0.0 and 1.0 and defines how
    /// quickly the weight of older values decays. Values closer to 1.0 favor
    /// recent values more strongly.
    ///
    /// # Panics
    ///
    /// This method will panic if `alpha` is not in between 0.0 and 1.0.
    pub fn new(alpha: f32) -> Self {
        assert!((0.0..=1.0).contains(&alpha));
        Self { alpha }
    }
}

/// Filter state for [`Ema`] filters.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmaState {
    last: Option<f32>,
}

impl Filter for Ema {
    type State = EmaState;

    fn filter(&self, state: &mut Self::State, value: f32) -> f32 {
        match state.last {
            Some(last) => {
                let avg = self.alpha * value + (1.0 - self.alpha) * last;
                state.last = Some(avg);
                avg
            }
            None => {
                state.last = Some(value);
                value
            }
        }
    }
}
