//! Paginated blog feed: controller, state machine, renderer contract, and
//! the infinite-scroll trigger.

mod controller;
mod render;
mod state;
mod trigger;

pub use controller::FeedController;
pub use render::{FeedView, Renderer, Row};
pub use state::{FeedConfig, Phase};
pub use trigger::VisibilityTrigger;
