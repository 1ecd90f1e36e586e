pub mod contract;
pub mod entry;
pub mod types;

pub use contract::*;
pub use entry::*;
pub use types::*;
