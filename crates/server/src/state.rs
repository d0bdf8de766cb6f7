use cuesheet::source::SheetReader;

pub struct AppState {
    pub client: reqwest::Client,
    pub reader: SheetReader,
}

impl AppState {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            reader: SheetReader::default(),
        }
    }
}
