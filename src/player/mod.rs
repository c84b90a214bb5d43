pub mod config;
pub mod merge;
pub mod multi;
pub mod stream;
pub mod timeline;

pub use config::{MessageOrdering, PlayerConfig};
pub use merge::merge_catalogs;
pub use multi::MultiSourcePlayer;
pub use timeline::Timeline;
