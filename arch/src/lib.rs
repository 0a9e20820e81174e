pub mod bus;
pub mod error;
pub mod lookups;
pub mod mem;
pub mod op;
pub mod pin;
pub mod reg;
pub mod sym;

pub use error::{Error, Result};
pub use lookups::Lookups;
