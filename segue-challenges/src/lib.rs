mod error;
pub use error::*;
mod metrics;
pub use metrics::*;
mod oracle;
pub use oracle::*;
pub mod playlist;
pub use playlist::Playlist;
mod story;
pub use story::*;
mod transition;
pub use transition::*;
