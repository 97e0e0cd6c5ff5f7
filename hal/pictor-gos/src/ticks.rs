//! Duration to scheduler tick conversion
//!
//! Schedulers count time in ticks of `1 / tick_hz` seconds. A request for a
//! short delay must never collapse into a zero-tick wait, which most
//! schedulers treat as "do not block at all".

use embassy_time::Duration;

const MICROS_PER_SECOND: u128 = 1_000_000;

/// Convert a duration into scheduler ticks
///
/// Rounds up, never returns less than one tick, and saturates at
/// `u32::MAX` for durations the scheduler cannot represent.
pub fn ticks_for(duration: Duration, tick_hz: u32) -> u32 {
    ticks_for_micros(duration.as_micros(), tick_hz)
}

/// Convert a microsecond count into scheduler ticks
///
/// Same rounding rules as [`ticks_for`].
pub fn ticks_for_micros(micros: u64, tick_hz: u32) -> u32 {
    let scaled = micros as u128 * tick_hz as u128;
    let ticks = scaled.div_ceil(MICROS_PER_SECOND);
    ticks.clamp(1, u32::MAX as u128) as u32
}
