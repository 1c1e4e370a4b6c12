//! Tick task for time-based updates
//!
//! Provides periodic ticks to the controller for button sampling, blink,
//! schedule evaluation and relay sequencing.

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Ticker};

use crate::board::TICK_MS;

/// Signal to notify the controller of a tick, carrying milliseconds since start
pub static TICK_SIGNAL: Signal<CriticalSectionRawMutex, u32> = Signal::new();

/// Tick task - sends periodic tick signals with timestamp
#[embassy_executor::task]
pub async fn tick_task() {
    info!("Tick task started ({} ms)", TICK_MS);

    let mut ticker = Ticker::every(Duration::from_millis(TICK_MS));
    let start = Instant::now();

    loop {
        ticker.next().await;

        // Truncation wraps the counter, which every consumer tolerates
        let now_ms = start.elapsed().as_millis() as u32;

        TICK_SIGNAL.signal(now_ms);
    }
}
