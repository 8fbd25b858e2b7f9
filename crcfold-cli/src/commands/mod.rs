//! Command implementations for crcfold CLI.

pub mod check;
pub mod info;
pub mod sum;

pub use check::cmd_check;
pub use info::cmd_info;
pub use sum::{SumOptions, cmd_sum};
