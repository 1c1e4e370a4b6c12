//! Build script for twintimer-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates board.toml at compile time
//! - Generates `board.rs` with the validated values as constants

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// GPIO pins taken by the I2C0 bus (SDA, SCL)
const I2C_PINS: [i64; 2] = [4, 5];

/// Button and relay pins, in the order the firmware takes them
const PIN_NAMES: [&str; 6] = ["left", "central", "right", "power", "living_room", "room"];

/// The settings store keeps its marker at the end of the first kilobyte
const MIN_EEPROM_SIZE: i64 = 1024;

fn main() {
    setup_linker();
    let config = validate_config();
    generate_board(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate board.toml and return the parsed document
fn validate_config() -> toml::Value {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a board.toml configuration file.          ║\n\
            ║  Please create one in the twintimer-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read board.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in board.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    validate_required_sections(&config);
    validate_pins(&config);
    validate_i2c(&config);
    validate_eeprom(&config);
    validate_timing(&config);

    println!("cargo:warning=board.toml validated successfully");
    config
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Abort the build with a boxed list of errors
fn report(title: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Look up an integer at `section.key`
fn int(config: &toml::Value, section: &str, key: &str) -> Option<i64> {
    config.get(section)?.get(key)?.as_integer()
}

/// Check `section.key` is an integer within `min..=max`
fn check_range(
    config: &toml::Value,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) {
    match int(config, section, key) {
        Some(v) if (min..=max).contains(&v) => {}
        Some(_) => errors.push(format!("[{}] {} must be {}-{}", section, key, min, max)),
        None => errors.push(format!("[{}] missing integer '{}'", section, key)),
    }
}

/// Validate that required sections exist
fn validate_required_sections(config: &toml::Value) {
    let errors: Vec<String> = ["pins", "i2c", "eeprom", "timing", "actuation"]
        .iter()
        .filter(|section| !matches!(config.get(**section), Some(toml::Value::Table(_))))
        .map(|section| format!("Missing [{}] section", section))
        .collect();

    report("Missing required sections in board.toml", &errors);
}

/// Validate GPIO assignments
fn validate_pins(config: &toml::Value) {
    let mut errors = Vec::new();
    let mut used: Vec<i64> = Vec::new();

    for name in PIN_NAMES {
        match int(config, "pins", name) {
            Some(pin) if !(0..=29).contains(&pin) => {
                errors.push(format!("[pins] {} must be GPIO 0-29", name));
            }
            Some(pin) if I2C_PINS.contains(&pin) => {
                errors.push(format!("[pins] {} collides with the I2C bus (GPIO4/5)", name));
            }
            Some(pin) if used.contains(&pin) => {
                errors.push(format!("[pins] {} reuses GPIO{}", name, pin));
            }
            Some(pin) => used.push(pin),
            None => errors.push(format!("[pins] missing integer '{}'", name)),
        }
    }

    report("Invalid pin configuration", &errors);
}

/// Validate the shared I2C bus
fn validate_i2c(config: &toml::Value) {
    let mut errors = Vec::new();

    check_range(config, "i2c", "frequency_hz", 10_000, 400_000, &mut errors);
    for key in ["lcd_address", "rtc_address", "eeprom_address"] {
        check_range(config, "i2c", key, 0x08, 0x77, &mut errors);
    }

    let addresses: Vec<i64> = ["lcd_address", "rtc_address", "eeprom_address"]
        .iter()
        .filter_map(|key| int(config, "i2c", key))
        .collect();
    for (i, a) in addresses.iter().enumerate() {
        if addresses[i + 1..].contains(a) {
            errors.push(format!("[i2c] address 0x{:02x} used twice", a));
        }
    }

    report("Invalid I2C configuration", &errors);
}

/// Validate the settings EEPROM geometry
fn validate_eeprom(config: &toml::Value) {
    let mut errors = Vec::new();

    check_range(config, "eeprom", "size_bytes", MIN_EEPROM_SIZE, 65_536, &mut errors);
    check_range(config, "eeprom", "page_size", 1, 256, &mut errors);
    check_range(config, "eeprom", "write_cycle_ms", 1, 100, &mut errors);

    if let Some(page) = int(config, "eeprom", "page_size") {
        if page > 0 && (page & (page - 1)) != 0 {
            errors.push("[eeprom] page_size must be a power of two".to_string());
        }
    }

    report("Invalid EEPROM configuration", &errors);
}

/// Validate timing thresholds and the relay actuation cycle
fn validate_timing(config: &toml::Value) {
    let mut errors = Vec::new();

    check_range(config, "timing", "tick_ms", 1, 100, &mut errors);
    for key in [
        "short_press_ms",
        "long_press_ms",
        "hold_repeat_ms",
        "blink_interval_ms",
        "edit_timeout_ms",
    ] {
        check_range(config, "timing", key, 1, 600_000, &mut errors);
    }
    for key in ["rail_on_ms", "rail_off_ms", "complete_ms"] {
        check_range(config, "actuation", key, 0, 600_000, &mut errors);
    }

    if let (Some(short), Some(long)) = (
        int(config, "timing", "short_press_ms"),
        int(config, "timing", "long_press_ms"),
    ) {
        if short >= long {
            errors.push("[timing] short_press_ms must be below long_press_ms".to_string());
        }
    }

    if let (Some(on), Some(off), Some(complete)) = (
        int(config, "actuation", "rail_on_ms"),
        int(config, "actuation", "rail_off_ms"),
        int(config, "actuation", "complete_ms"),
    ) {
        if !(on < off && off < complete) {
            errors.push("[actuation] need rail_on_ms < rail_off_ms < complete_ms".to_string());
        }
    }

    report("Invalid timing configuration", &errors);
}

/// Write the validated values to `$OUT_DIR/board.rs`
fn generate_board(config: &toml::Value) {
    // Validation guarantees every lookup below succeeds
    let get = |section: &str, key: &str| int(config, section, key).unwrap_or_default();

    let mut out = String::new();
    out.push_str("// Generated by build.rs from board.toml\n\n");

    out.push_str(&format!(
        "pub const I2C_FREQUENCY_HZ: u32 = {};\n",
        get("i2c", "frequency_hz")
    ));
    for (name, key) in [
        ("LCD_ADDRESS", "lcd_address"),
        ("RTC_ADDRESS", "rtc_address"),
        ("EEPROM_ADDRESS", "eeprom_address"),
    ] {
        out.push_str(&format!("pub const {}: u8 = 0x{:02x};\n", name, get("i2c", key)));
    }
    out.push_str(&format!(
        "pub const EEPROM_SIZE: usize = {};\n",
        get("eeprom", "size_bytes")
    ));
    out.push_str(&format!(
        "pub const EEPROM_PAGE_SIZE: usize = {};\n",
        get("eeprom", "page_size")
    ));
    out.push_str(&format!(
        "pub const EEPROM_WRITE_CYCLE_MS: u32 = {};\n",
        get("eeprom", "write_cycle_ms")
    ));
    out.push_str(&format!("pub const TICK_MS: u64 = {};\n\n", get("timing", "tick_ms")));

    out.push_str(&format!(
        "pub const TIMING: twintimer_core::config::Timing = twintimer_core::config::Timing {{\n\
         \x20   button: twintimer_core::config::ButtonTiming {{\n\
         \x20       short_press_ms: {},\n\
         \x20       long_press_ms: {},\n\
         \x20       hold_repeat_ms: {},\n\
         \x20   }},\n\
         \x20   blink_interval_ms: {},\n\
         \x20   edit_timeout_ms: {},\n\
         \x20   actuation: twintimer_core::config::ActuationTiming {{\n\
         \x20       rail_on_ms: {},\n\
         \x20       rail_off_ms: {},\n\
         \x20       complete_ms: {},\n\
         \x20   }},\n\
         }};\n\n",
        get("timing", "short_press_ms"),
        get("timing", "long_press_ms"),
        get("timing", "hold_repeat_ms"),
        get("timing", "blink_interval_ms"),
        get("timing", "edit_timeout_ms"),
        get("actuation", "rail_on_ms"),
        get("actuation", "rail_off_ms"),
        get("actuation", "complete_ms"),
    ));

    out.push_str("macro_rules! take_board_pins {\n    ($p:ident) => {\n        BoardPins {\n");
    for name in PIN_NAMES {
        out.push_str(&format!(
            "            {}: embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_{}),\n",
            name,
            get("pins", name)
        ));
    }
    out.push_str("        }\n    };\n}\n");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("board.rs"), out).unwrap();
}
