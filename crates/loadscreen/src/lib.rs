//! Imperial uplink loading screen.
//!
//! Everything the screen shows is driven from two places: host hook calls
//! ([`HookCall`]) and timer tasks run by [`LoadingScreen::update`]. The
//! renderer only reads the [`UiRegistry`].

pub mod clock;
pub mod feed;
pub mod format;
pub mod glitch;
pub mod hooks;
pub mod pools;
pub mod progress;
pub mod registry;
pub mod screen;

pub use clock::{FixedClock, LocalClock, WallClock};
pub use feed::{Feed, FeedItem, Rotation};
pub use hooks::{classify_status, HookCall, HookValue, HostLineError, Phase};
pub use progress::ProgressTracker;
pub use registry::{Region, RegionId, StyleClass, UiRegistry};
pub use screen::{FeedKind, LoadingScreen, Task};
