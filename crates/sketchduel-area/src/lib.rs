//! Area hosting for Sketchduel.
//!
//! An area is the place in the shared space where matches are played. It
//! hosts at most one session at a time and runs as an isolated Tokio task
//! (actor model) that applies commands strictly one after another.
//!
//! # Key types
//!
//! - [`SessionDispatcher`]: routes commands into the active session,
//!   records finished matches, notifies observers
//! - [`AreaHandle`]: send commands to a running area actor
//! - [`AreaManager`]: creates, destroys and routes to areas
//! - [`MatchHistory`], [`leaderboard`]: finished matches and their summary
//! - [`AreaConfig`]: catalog and channel settings

mod area;
mod config;
mod dispatcher;
mod error;
mod history;
mod manager;
mod observer;

pub use area::{spawn_area, AreaHandle};
pub use config::AreaConfig;
pub use dispatcher::{Participant, SessionDispatcher};
pub use error::{AreaError, ConfigError};
pub use history::{leaderboard, LeaderboardRow, MatchHistory};
pub use manager::AreaManager;
pub use observer::{AreaObserver, ChannelObserver, SnapshotSender};
