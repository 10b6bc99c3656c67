#![allow(dead_code)]

pub mod bot;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use bot::{apply, choose, play_out};
#[allow(unused_imports)]
pub use setup::{TestSetup, TestSetupBuilder};
