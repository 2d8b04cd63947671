pub mod query;
pub mod traffic;

pub use query::{build_segment_query, SegmentQuery};
pub use traffic::{PgTrafficStore, TrafficStore};
