mod cue_sheet;
mod index;

pub use cue_sheet::*;
pub use index::*;
