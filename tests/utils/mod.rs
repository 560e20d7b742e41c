pub mod game_builders;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use game_builders::{d, s, t, GameLogBuilder};
#[allow(unused_imports)]
pub use setup::{TestSetup, TestSetupBuilder};
