pub mod logic;

pub const DEFAULT_ID: &str = "17";
pub const DEFAULT_AMOUNT: &str = "99";
