pub mod human;
pub mod session;

pub use human::HumanMode;
pub use session::{run_loop, Session};
