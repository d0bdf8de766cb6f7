use chrono::{Local, NaiveDateTime, TimeDelta};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use std::{fmt::Display, io::Read, time::Instant};
use thiserror::Error;
use tracing::{debug, warn};

mod header;
mod row;
pub use header::*;
pub use row::*;

use crate::{
    cue::{self, Cue, CueRef},
    shared::start_of_year,
    source::{self, SheetReader},
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Could not find the {0} header")]
    HeaderNotFound(Field),
    #[error("Source error: {0}")]
    Source(#[from] source::Error),
}

pub struct Config {
    /// Seeds the times of the first cue. Annotations only override the parts they write down.
    pub reference_time: NaiveDateTime,
}

impl Config {
    pub fn new(reference_time: NaiveDateTime) -> Self {
        Self { reference_time }
    }

    /// Reads the clock; the start of the current year.
    pub fn current_year() -> Self {
        Self::new(start_of_year(Local::now().naive_local()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct CueSheet {
    title: Option<String>,
    cues: Box<[Cue]>,
}

impl CueSheet {
    /// Builds every cue in row order, each one from the cue before it.
    pub fn new(rows: Vec<NormalizedRow>, title: Option<String>, config: &Config) -> Self {
        let now = Instant::now();
        let mut cues: Vec<Cue> = Vec::with_capacity(rows.len());
        for (index, row) in rows.into_iter().enumerate() {
            let cue = Cue::new(index, row, cues.last(), config.reference_time);
            if let Some(prev) = cues.last()
                && let (Ok(before), Ok(here)) =
                    (prev.total_distance_to_here(), cue.total_distance_to_here())
                && here < before
            {
                warn!("Total distance goes back from {before} to {here} at cue {index}");
            }
            cues.push(cue);
        }
        debug!("Building {} cues took {:?}", cues.len(), now.elapsed());
        Self {
            title,
            cues: cues.into(),
        }
    }

    /// Finds the header, the title and the data rows of a raw export.
    pub fn load(table: &[Vec<String>], config: &Config) -> Result<Self, self::Error> {
        let columns = ColumnIndex::resolve(table)?;
        let title = find_title(table);
        let rows = normalize_rows(table, &columns);
        debug!(
            "Data starts at row {} with {} rows",
            columns.data_start(),
            rows.len()
        );
        Ok(Self::new(rows, title, config))
    }

    pub fn read<R: Read>(
        reader: &SheetReader,
        source: R,
        config: &Config,
    ) -> Result<Self, self::Error> {
        let table = reader.read(source)?;
        Self::load(&table, config)
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn cue(&self, index: usize) -> Option<CueRef<'_>> {
        self.cues.get(index).map(|cue| CueRef::new(self, cue))
    }

    pub fn cues(&self) -> impl Iterator<Item = CueRef<'_>> {
        self.cues.iter().map(|cue| CueRef::new(self, cue))
    }

    /// Total distance of the last cue. An empty sheet has no distance.
    pub fn goal_distance(&self) -> Result<Decimal, cue::Error> {
        match self.cues.last() {
            Some(cue) => cue.total_distance_to_here(),
            None => Ok(Decimal::ZERO),
        }
    }

    pub fn start_time(&self) -> Result<NaiveDateTime, cue::Error> {
        self.cues
            .first()
            .ok_or(cue::Error::UndefinedDuration)?
            .first_time()
    }

    pub fn end_time(&self) -> Result<NaiveDateTime, cue::Error> {
        self.cues
            .last()
            .ok_or(cue::Error::UndefinedDuration)?
            .last_time()
    }

    /// Only defined when some annotation holds a time; otherwise every time
    /// is the reference instant and there is nothing to measure.
    pub fn time_duration(&self) -> Result<TimeDelta, cue::Error> {
        if !self.cues.iter().any(Cue::has_explicit_time) {
            return Err(cue::Error::UndefinedDuration);
        }
        Ok(self.end_time()? - self.start_time()?)
    }

    pub fn progress(&self, cue: &Cue) -> Result<Decimal, cue::Error> {
        let goal = self.goal_distance()?;
        if goal.is_zero() {
            return Err(cue::Error::UndefinedProgress);
        }
        cue.total_distance_to_here()?
            .checked_div(goal)
            .ok_or(cue::Error::UndefinedProgress)
    }

    pub fn progress_f64(&self, cue: &Cue) -> Result<f64, cue::Error> {
        self.progress(cue)?
            .to_f64()
            .ok_or(cue::Error::UndefinedProgress)
    }

    /// Where the rider should be at `cue` when riding evenly from start to end.
    pub fn estimate_time(&self, cue: &Cue) -> Result<NaiveDateTime, cue::Error> {
        let duration = self.time_duration()?;
        let progress = self.progress(cue)?;
        let offset = Decimal::from(duration.num_milliseconds())
            .checked_mul(progress)
            .and_then(|offset| offset.round().to_i64())
            .and_then(TimeDelta::try_milliseconds)
            .ok_or(cue::Error::UndefinedDuration)?;
        self.start_time()?
            .checked_add_signed(offset)
            .ok_or(cue::Error::UndefinedDuration)
    }
}

impl Display for CueSheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(title) = &self.title {
            writeln!(f, "{title}")?;
            writeln!(f)?;
        }
        for (i, cue) in self.cues().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{cue}")?;
        }
        Ok(())
    }
}
