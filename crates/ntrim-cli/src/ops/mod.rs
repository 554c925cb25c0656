pub mod confirm;
pub mod execute;

pub use confirm::{Confirmation, confirm};
pub use execute::{ExecutionReport, execute_plan};
