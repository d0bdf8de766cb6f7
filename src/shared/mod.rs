pub mod format;
pub mod time;

pub use format::*;
pub use time::*;
