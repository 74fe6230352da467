//! Distance aggregation for legs.

use crate::domain::LegCandidate;
use crate::store::ScheduleStore;

/// Distance covered by a candidate leg.
///
/// Sums the per-stop increments after boarding up to and including the
/// alighting stop. Finders call this exactly once per candidate.
pub fn leg_distance<S: ScheduleStore + ?Sized>(store: &S, candidate: &LegCandidate) -> u32 {
    store.sum_distance(candidate.train_id, candidate.from_index, candidate.to_index)
}
