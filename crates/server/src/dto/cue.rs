use cuesheet::{
    cue::{CueRef, Point, Road},
    shared::format_time,
};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CueDto {
    pub no: String,
    #[serde(rename = "move")]
    pub maneuver: String,
    pub route: Option<String>,
    pub other: Option<String>,
    pub point: Point,
    pub roads: Vec<Road>,
    pub checkpoint: bool,
    pub block_distance: Option<String>,
    pub total_distance: Option<String>,
    pub times: Vec<String>,
    pub percent: Option<String>,
    pub estimate: Option<String>,
}

impl CueDto {
    pub fn from(cue: CueRef<'_>) -> Self {
        let times = cue
            .times()
            .map(|times| times.iter().copied().map(format_time).collect())
            .unwrap_or_default();
        Self {
            no: cue.no_text(),
            maneuver: cue.maneuver(),
            route: cue.route().ok().flatten(),
            other: cue.other().map(String::from),
            point: cue.point().clone(),
            roads: cue.roads().to_vec(),
            checkpoint: cue.is_checkpoint(),
            block_distance: cue.block_distance_to_here().ok().map(|km| km.to_string()),
            total_distance: cue.total_distance_to_here().ok().map(|km| km.to_string()),
            times,
            percent: cue.percent().ok(),
            estimate: cue.estimate_time().ok().map(format_time),
        }
    }
}
