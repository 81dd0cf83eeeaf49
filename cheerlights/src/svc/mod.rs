pub use clock::{Clock, Instant, StdClock};
pub use feed::{parse_color_name, Feed, FeedError};
pub use network::ensure_connected;

pub mod clock;
pub mod feed;
pub mod network;
