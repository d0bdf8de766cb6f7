use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::{fmt::Display, ops::Deref, str::FromStr};
use thiserror::Error;
use tracing::warn;

mod point;
mod road;
pub mod time;
pub use point::*;
pub use road::*;

use crate::{
    sheet::{CueSheet, Field, NormalizedRow},
    shared::format_distance,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{field} is not a number: {value}")]
    MalformedNumber { field: Field, value: String },
    #[error("{text} is not a valid date and time")]
    InvalidTime { text: String },
    #[error("No time is written anywhere on the sheet")]
    UndefinedDuration,
    #[error("Goal distance is zero")]
    UndefinedProgress,
}

/// One row of the cue sheet. Everything that depends on earlier rows is
/// resolved when the sheet is built, in row order.
#[derive(Debug, Clone)]
pub struct Cue {
    index: usize,
    row: NormalizedRow,
    point: Point,
    roads: Box<[Road]>,
    block_distance: Result<Decimal, Error>,
    total_distance: Result<Decimal, Error>,
    times: Result<Box<[NaiveDateTime]>, Error>,
    explicit_time: bool,
}

impl Cue {
    /// `prev` is the cue right before this one, `reference` seeds the times of the first cue.
    pub fn new(
        index: usize,
        row: NormalizedRow,
        prev: Option<&Cue>,
        reference: NaiveDateTime,
    ) -> Self {
        let point = Point::parse(row.get(Field::Point).unwrap_or_default());
        let roads: Box<[Road]> = Road::parse_all(row.get(Field::Road)).into();
        let block_distance = carry_distance(
            &row,
            Field::BlockDistance,
            prev.map(|prev| &prev.block_distance),
        );
        let total_distance = carry_distance(
            &row,
            Field::TotalDistance,
            prev.map(|prev| &prev.total_distance),
        );

        let seed = match prev {
            Some(prev) => prev.last_time(),
            None => Ok(reference),
        };
        let other = row.get(Field::Other);
        let explicit_time = other.is_some_and(|other| !time::scan(other).is_empty());
        let times: Result<Box<[NaiveDateTime]>, Error> = seed
            .and_then(|seed| time::infer(other, seed))
            .map(Vec::into_boxed_slice);
        if let Err(err) = &times {
            warn!("Cue {index} has no usable time: {err}");
        }

        Self {
            index,
            row,
            point,
            roads,
            block_distance,
            total_distance,
            times,
            explicit_time,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_start(&self) -> bool {
        self.index == 0
    }

    pub fn no(&self) -> Result<u32, Error> {
        let src = self.no_src();
        src.parse().map_err(|_| Error::MalformedNumber {
            field: Field::No,
            value: src.to_string(),
        })
    }

    pub fn no_src(&self) -> &str {
        self.row.get(Field::No).unwrap_or_default()
    }

    /// The sequence number as shown to riders, or the cell as written when it is not a number.
    pub fn no_text(&self) -> String {
        match self.no() {
            Ok(no) => no.to_string(),
            Err(_) => self.no_src().to_string(),
        }
    }

    pub fn point_src(&self) -> Option<&str> {
        self.row.get(Field::Point)
    }

    pub fn point(&self) -> &Point {
        &self.point
    }

    pub fn is_checkpoint(&self) -> bool {
        self.point.is_checkpoint()
    }

    pub fn direction_src(&self) -> Option<&str> {
        self.row.get(Field::Direction)
    }

    /// Turns are drawn as arrows, anything else is shown as written.
    pub fn direction(&self) -> &str {
        match self.direction_src() {
            Some("左折") => "↰",
            Some("右折") => "↱",
            Some(direction) => direction,
            None => "",
        }
    }

    pub fn road_src(&self) -> Option<&str> {
        self.row.get(Field::Road)
    }

    pub fn roads(&self) -> &[Road] {
        &self.roads
    }

    /// The road taken when leaving this cue.
    pub fn road_to(&self) -> Option<&Road> {
        self.roads.first()
    }

    pub fn other(&self) -> Option<&str> {
        self.row.get(Field::Other)
    }

    pub fn block_distance_to_here_src(&self) -> Option<&str> {
        self.row.get(Field::BlockDistance)
    }

    pub fn block_distance_to_here(&self) -> Result<Decimal, Error> {
        self.block_distance.clone()
    }

    pub fn total_distance_to_here_src(&self) -> Option<&str> {
        self.row.get(Field::TotalDistance)
    }

    pub fn total_distance_to_here(&self) -> Result<Decimal, Error> {
        self.total_distance.clone()
    }

    /// Never empty when `Ok`.
    pub fn times(&self) -> Result<&[NaiveDateTime], Error> {
        self.times.as_deref().map_err(Clone::clone)
    }

    pub fn first_time(&self) -> Result<NaiveDateTime, Error> {
        self.times()?.first().copied().ok_or(Error::UndefinedDuration)
    }

    pub fn last_time(&self) -> Result<NaiveDateTime, Error> {
        self.times()?.last().copied().ok_or(Error::UndefinedDuration)
    }

    /// Whether the annotation itself holds a time, as opposed to a carried one.
    pub fn has_explicit_time(&self) -> bool {
        self.explicit_time
    }

    /// `"{point} {direction}"`, followed by the road to take when there is one.
    pub fn maneuver(&self) -> String {
        let mut maneuver = format!("{} {}", self.point, self.direction());
        if let Some(road) = self.road_to() {
            maneuver.push_str(&format!(" {road}に"));
        }
        maneuver
    }
}

fn carry_distance(
    row: &NormalizedRow,
    field: Field,
    prev: Option<&Result<Decimal, Error>>,
) -> Result<Decimal, Error> {
    match row.get(field) {
        Some(src) => Decimal::from_str(src).map_err(|_| Error::MalformedNumber {
            field,
            value: src.to_string(),
        }),
        None => prev.cloned().unwrap_or(Ok(Decimal::ZERO)),
    }
}

/// A cue together with the sheet it belongs to, for everything that needs
/// its neighbours or sheet wide values.
#[derive(Debug, Clone, Copy)]
pub struct CueRef<'a> {
    sheet: &'a CueSheet,
    cue: &'a Cue,
}

impl<'a> CueRef<'a> {
    pub(crate) fn new(sheet: &'a CueSheet, cue: &'a Cue) -> Self {
        Self { sheet, cue }
    }

    pub fn prev(&self) -> Option<CueRef<'a>> {
        let index = self.cue.index.checked_sub(1)?;
        self.sheet.cue(index)
    }

    pub fn next(&self) -> Option<CueRef<'a>> {
        self.sheet.cue(self.cue.index + 1)
    }

    pub fn progress_exact(&self) -> Result<Decimal, Error> {
        self.sheet.progress(self.cue)
    }

    pub fn progress(&self) -> Result<f64, Error> {
        self.sheet.progress_f64(self.cue)
    }

    pub fn percent(&self) -> Result<String, Error> {
        crate::shared::format_percent(self.progress_exact()?).ok_or(Error::UndefinedProgress)
    }

    pub fn estimate_time(&self) -> Result<NaiveDateTime, Error> {
        self.sheet.estimate_time(self.cue)
    }

    /// `"{block}km先({previous roads}) :{percent}"`. Only cues reached by road have one.
    pub fn route(&self) -> Result<Option<String>, Error> {
        let Some(prev) = self.prev() else {
            return Ok(None);
        };
        if self.cue.roads.is_empty() {
            return Ok(None);
        }
        let via: String = prev.roads().iter().map(|road| format!("{road}〜")).collect();
        Ok(Some(format!(
            "{}km先({via}) :{}",
            format_distance(self.block_distance_to_here()?),
            self.percent()?
        )))
    }
}

impl Deref for CueRef<'_> {
    type Target = Cue;

    fn deref(&self) -> &Self::Target {
        self.cue
    }
}

impl Display for CueRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.route() {
            Ok(Some(route)) => writeln!(f, "{route}")?,
            Ok(None) => (),
            Err(err) => warn!("Cue {} has no route: {err}", self.index),
        }
        writeln!(f, "{}: {}", self.no_text(), self.maneuver())?;
        if let Some(other) = self.other() {
            writeln!(f, "({other})")?;
        }
        Ok(())
    }
}
