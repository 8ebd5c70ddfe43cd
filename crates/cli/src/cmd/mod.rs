mod check;
mod plan;
mod targets;

pub use check::cmd_check;
pub use plan::{PlanOptions, cmd_plan};
pub use targets::cmd_targets;
