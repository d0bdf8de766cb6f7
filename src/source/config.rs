pub struct Config {
    /// Field separator of the export. Spreadsheet exports are comma separated,
    /// hand made sheets are usually tab separated.
    pub delimiter: u8,
}

impl Config {
    pub fn tsv() -> Self {
        Self { delimiter: b'\t' }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}
