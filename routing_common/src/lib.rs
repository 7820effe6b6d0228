pub mod accounts;
pub mod constants;
pub mod errors;
pub mod sidecar;
pub mod types;
pub mod validation;

pub use types::*;
