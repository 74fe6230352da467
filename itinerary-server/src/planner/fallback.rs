//! Placeholder itineraries for trains that serve both stations.

use crate::domain::{Itinerary, Leg, Station};
use crate::store::ScheduleStore;

/// One placeholder itinerary per distinct train that stops at both
/// stations, in either order.
///
/// Only meaningful when no timed itinerary exists; the caller decides.
pub fn find_available<S: ScheduleStore + ?Sized>(
    store: &S,
    from: &Station,
    to: &Station,
) -> Vec<Itinerary> {
    store
        .trains_serving(from.id, to.id)
        .into_iter()
        .map(|train| {
            Itinerary::available(Leg::placeholder(
                train.id,
                train.name,
                from.clone(),
                to.clone(),
            ))
        })
        .collect()
}
