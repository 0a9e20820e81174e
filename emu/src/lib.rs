pub mod ann;
pub mod bank;
pub mod capture;
pub mod config;
pub mod error;
pub mod filter;
pub mod hooks;
pub mod logger;
pub mod model;
pub mod session;

pub use ann::{Ann, Event};
pub use error::{Error, Result};
pub use session::Session;
