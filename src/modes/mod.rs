pub mod autopilot;
pub mod headless;
pub mod human;

pub use autopilot::Autopilot;
pub use headless::{HeadlessConfig, HeadlessMode};
pub use human::HumanMode;
