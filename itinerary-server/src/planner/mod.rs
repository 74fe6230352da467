//! Itinerary planner.
//!
//! Answers "how do I get from A to B on this network?" with itineraries of
//! at most one change, each priced by distance and timed within a single
//! day. Searches run against a read-only [`ScheduleStore`].
//!
//! [`ScheduleStore`]: crate::store::ScheduleStore

mod config;
mod direct;
mod distance;
mod fallback;
mod rank;
mod search;
mod transfer;


pub use config::{DEFAULT_MAX_TRANSFER_STATIONS, SearchConfig};
pub use direct::{find_direct, find_legs};
pub use distance::leg_distance;
pub use fallback::find_available;
pub use rank::{SortBy, UnknownSortKey, rank_itineraries};
pub use search::{Planner, ResolvedSearch, SearchError, SearchRequest, SearchResult};
pub use transfer::{TransferScan, find_transfers};
