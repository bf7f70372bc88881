//! Detect overlapping slots within a single weekday.
//!
//! Touching slots (one ends exactly when the next starts) do NOT overlap.

use crate::store::TimeSlot;
use crate::time::MINUTES_PER_DAY;

/// Two slots of the same day whose intervals intersect.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlap {
    /// The slot that starts first.
    pub earlier: TimeSlot,
    pub later: TimeSlot,
    pub overlap_minutes: u32,
}

/// End of a slot in minutes since midnight, with an end that wrapped past
/// midnight counted on the same day (`end + 24h`).
fn effective_end(slot: &TimeSlot) -> u32 {
    let start = slot.start_time.minutes();
    let end = slot.end_time.minutes();
    if end < start {
        end + MINUTES_PER_DAY
    } else {
        end
    }
}

/// Find the first overlap in a day's slots, if any.
///
/// Slots are sorted by start time (the input order is left untouched) and each
/// adjacent pair is checked: the earlier slot's end must not be after the
/// later slot's start.
pub fn find_overlap(slots: &[TimeSlot]) -> Option<Overlap> {
    let mut sorted: Vec<&TimeSlot> = slots.iter().collect();
    sorted.sort_by_key(|s| s.start_time.minutes());

    sorted.windows(2).find_map(|pair| {
        let (earlier, later) = (pair[0], pair[1]);
        let earlier_end = effective_end(earlier);
        let later_start = later.start_time.minutes();
        if earlier_end > later_start {
            let overlap_minutes = earlier_end.min(effective_end(later)) - later_start;
            Some(Overlap {
                earlier: earlier.clone(),
                later: later.clone(),
                overlap_minutes,
            })
        } else {
            None
        }
    })
}
