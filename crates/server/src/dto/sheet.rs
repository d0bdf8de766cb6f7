use cuesheet::{sheet::CueSheet, shared::format_time};
use serde::Serialize;

use crate::dto::CueDto;

#[derive(Debug, Clone, Serialize)]
pub struct CueSheetDto {
    pub title: Option<String>,
    pub goal_distance: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub cues: Vec<CueDto>,
}

impl CueSheetDto {
    pub fn from(sheet: &CueSheet) -> Self {
        Self {
            title: sheet.title().map(String::from),
            goal_distance: sheet.goal_distance().ok().map(|km| km.to_string()),
            start_time: sheet.start_time().ok().map(format_time),
            end_time: sheet.end_time().ok().map(format_time),
            cues: sheet.cues().map(CueDto::from).collect(),
        }
    }
}
