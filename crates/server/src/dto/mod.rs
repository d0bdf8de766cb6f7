mod cue;
mod sheet;

pub use cue::*;
pub use sheet::*;
