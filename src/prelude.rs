pub use crate::builder::LruBuilder;
pub use crate::cache::{EvictionListener, LruCache};
pub use crate::ds::{RecencyList, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};

#[cfg(feature = "metrics")]
pub use crate::metrics::LruMetricsSnapshot;
