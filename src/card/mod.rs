pub mod loader;
pub mod types;

pub use loader::load_card;
pub use types::{CardConfig, Page};
