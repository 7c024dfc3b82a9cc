mod players;
mod stats;

pub use players::*;
pub use stats::*;
