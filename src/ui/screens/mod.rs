pub mod dashboard;
pub mod market;
pub mod marketplace;
pub mod planner;
pub mod settings;

pub use dashboard::DashboardScreen;
pub use market::MarketScreen;
pub use marketplace::MarketplaceScreen;
pub use planner::PlannerScreen;
pub use settings::{SettingsField, SettingsScreen};
