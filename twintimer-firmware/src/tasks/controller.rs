//! Main controller task
//!
//! Waits for tick signals, runs one controller pass per tick, logs what
//! happened and pushes changed LCD rows out over I2C.

use defmt::*;
use twintimer_core::app::{Event, TickEvents};
use twintimer_display::DisplayError;
use twintimer_hal::elapsed_ms;

use crate::tasks::tick::TICK_SIGNAL;
use crate::{App, Display};

/// Interval between attempts to bring up an LCD that failed to initialize
const LCD_RETRY_MS: u32 = 5000;

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(mut controller: App, mut lcd: Display) {
    info!("Controller task started");

    match controller.boot() {
        Ok(events) => {
            log_events(&events);
            let s = controller.settings();
            info!(
                "Settings loaded: {:02}:{:02} day {} manual={}",
                s.hours, s.minutes, s.day_of_week, s.manual_mode
            );
        }
        Err(e) => error!("Boot failed, running with defaults: {}", e),
    }
    refresh_display(&mut controller, &mut lcd);

    let mut last_lcd_attempt = 0;
    loop {
        let now = TICK_SIGNAL.wait().await;

        if !lcd.is_initialized() && elapsed_ms(now, last_lcd_attempt) > LCD_RETRY_MS {
            last_lcd_attempt = now;
            match lcd.init() {
                Ok(()) => {
                    info!("LCD initialized");
                    controller.renderer_mut().backend_mut().mark_dirty();
                }
                Err(e) => warn!("LCD still not responding: {}", e),
            }
        }

        match controller.tick(now) {
            Ok(events) => log_events(&events),
            Err(e) if e.is_configuration_error() => {
                error!("Menu layout broken: {}", e);
                crate::halt();
            }
            Err(e) if e.requires_storage_reset() => {
                warn!("Stored settings unusable: {}", e);
            }
            Err(e) => error!("Tick failed: {}", e),
        }

        refresh_display(&mut controller, &mut lcd);
    }
}

fn log_events(events: &TickEvents) {
    for event in events {
        match event {
            Event::SettingsReset => warn!("Storage blank or corrupted, defaults written"),
            e if e.is_relay_event() => info!("Relay: {}", e),
            e if e.is_user_event() => debug!("Input: {}", e),
            e => info!("{}", e),
        }
    }
}

/// Send changed rows to the LCD
fn refresh_display(controller: &mut App, lcd: &mut Display) {
    let renderer = controller.renderer_mut();

    if let Some(e) = renderer.take_error() {
        warn!("Render failed: {}", e);
    }

    if !lcd.is_initialized() {
        return;
    }

    match renderer.backend_mut().flush_to(lcd) {
        Ok(()) => {}
        Err(DisplayError::Communication) => warn!("LCD write failed"),
        Err(e) => error!("LCD error: {}", e),
    }
}
