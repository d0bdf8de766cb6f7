pub mod cue;
pub mod sheet;
pub mod shared;
pub mod source;

pub mod prelude {
    pub use crate::cue::{Cue, CueRef, Point, Road};
    pub use crate::sheet::{ColumnIndex, CueSheet, Field, NormalizedRow};
    pub use crate::source::{RawTable, SheetReader};
}
