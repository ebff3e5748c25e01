//! Progress reporting for a single generation call.
//!
//! While the completion request is in flight there is nothing real to report,
//! so [`tick_while`] drives a periodic callback next to the request future.
//! Both live in the same `select!` loop: once the request resolves (or the
//! whole call is dropped) the ticker is gone, and no tick can land after the
//! stage that follows it.

use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};

use crate::locale::Locale;
use crate::types::{GenerationProgress, ProgressCallback, Stage};

/// Period of the synthetic `generating` updates.
pub const TICK_PERIOD: Duration = Duration::from_millis(500);

pub(crate) const PREPARING_PERCENT: f64 = 15.0;
pub(crate) const GENERATING_PERCENT: f64 = 25.0;
pub(crate) const PARSING_PERCENT: f64 = 90.0;
pub(crate) const COMPLETED_PERCENT: f64 = 100.0;
pub(crate) const FAILED_PERCENT: f64 = 0.0;

const TICK_MIN: f64 = 25.0;
const TICK_MAX: f64 = 30.0;
const TICK_CAP: f64 = 85.0;

/// Poll `future` to completion, calling `on_tick` every `period` meanwhile.
///
/// The first tick fires one full period after the call starts.
pub async fn tick_while<F, T>(future: F, period: Duration, mut on_tick: T) -> F::Output
where
    F: Future,
    T: FnMut(),
{
    tokio::pin!(future);
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            output = &mut future => return output,
            _ = ticker.tick() => on_tick(),
        }
    }
}

/// Emits snapshots to an optional callback, keeping percentages monotonic.
pub(crate) struct ProgressReporter<'a> {
    callback: Option<&'a ProgressCallback>,
    locale: Locale,
    last: f64,
}

impl<'a> ProgressReporter<'a> {
    pub(crate) fn new(callback: Option<&'a ProgressCallback>, locale: Locale) -> Self {
        Self {
            callback,
            locale,
            last: 0.0,
        }
    }

    pub(crate) fn locale(&self) -> Locale {
        self.locale
    }

    pub(crate) fn emit(&mut self, stage: Stage, percentage: f64, message: String) {
        self.last = percentage;
        if let Some(callback) = self.callback {
            callback(GenerationProgress::new(stage, percentage, message));
        }
    }

    /// One synthetic `generating` update.
    ///
    /// The sampled value never drops below what was last reported.
    pub(crate) fn tick(&mut self, provider: &str, card_count: u32) {
        let sampled = rand::random_range(TICK_MIN..TICK_MAX).min(TICK_CAP);
        let percentage = sampled.max(self.last);
        let message = self.locale.generating(provider, card_count);
        self.emit(Stage::Generating, percentage, message);
    }
}
