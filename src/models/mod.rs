pub mod crop;
pub mod farm;
pub mod listing;
pub mod market;
pub mod reference;
pub mod weather;

pub use crop::*;
pub use farm::*;
pub use listing::*;
pub use market::*;
pub use reference::*;
pub use weather::*;
