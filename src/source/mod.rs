use csv::ReaderBuilder;
use std::{
    fs::File,
    io::{self, Read},
    path::Path,
    time::Instant,
};
use thiserror::Error;
use tracing::debug;

mod config;
mod export;
pub use config::*;
pub use export::*;

/// Rows of raw cells exactly as they came out of the export.
pub type RawTable = Vec<Vec<String>>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Default)]
pub struct SheetReader {
    config: Config,
}

impl SheetReader {
    pub fn new(config: self::Config) -> Self {
        Self { config }
    }

    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<RawTable, self::Error> {
        let file = File::open(path)?;
        self.read(file)
    }

    pub fn read_bytes(&self, bytes: &[u8]) -> Result<RawTable, self::Error> {
        self.read(bytes)
    }

    /// Reads every record of the export. Rows may have different lengths,
    /// the header row of a cue sheet is rarely the first one.
    pub fn read<R: Read>(&self, reader: R) -> Result<RawTable, self::Error> {
        let now = Instant::now();
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.config.delimiter)
            .from_reader(reader);
        let mut table: RawTable = Vec::new();
        for record in reader.records() {
            let record = record?;
            table.push(record.iter().map(|cell| cell.to_string()).collect());
        }
        debug!("Reading {} rows took {:?}", table.len(), now.elapsed());
        Ok(table)
    }
}
