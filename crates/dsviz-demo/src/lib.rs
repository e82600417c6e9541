#![forbid(unsafe_code)]

pub mod cli;
pub mod error;
pub mod intent;
pub mod logging;
pub mod race;
pub mod reference;
pub mod render;
pub mod run;

pub use cli::run_from_env;
pub use error::{DemoError, Result};
