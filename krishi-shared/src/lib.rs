pub mod cache;
pub mod clock;

pub use cache::TtlCache;
pub use clock::{Clock, ManualClock, SystemClock};
