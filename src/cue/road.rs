use regex::Regex;
use serde::Serialize;
use std::{fmt::Display, sync::OnceLock};

const DELIMITERS: [char; 5] = [',', '、', '，', '・', '･'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RoadCode {
    /// `K`, prefectural road (県道).
    Prefectural,
    /// `R`, national route (国道).
    National,
}

impl RoadCode {
    fn from_letter(letter: &str) -> Option<Self> {
        match letter {
            "K" => Some(Self::Prefectural),
            "R" => Some(Self::National),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoadKind {
    Named { code: RoadCode, number: Box<str> },
    AsIs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Road {
    src: Box<str>,
    #[serde(flatten)]
    kind: RoadKind,
}

impl Road {
    pub fn parse(src: &str) -> Self {
        static NAMED_RE: OnceLock<Regex> = OnceLock::new();
        let named_re = NAMED_RE.get_or_init(|| Regex::new(r"^([KR])(\d+)").expect("valid regex"));

        let kind = named_re
            .captures(src)
            .and_then(|caps| {
                let code = RoadCode::from_letter(&caps[1])?;
                Some(RoadKind::Named {
                    code,
                    number: caps[2].into(),
                })
            })
            .unwrap_or(RoadKind::AsIs);
        Self {
            src: src.into(),
            kind,
        }
    }

    /// Splits a road cell such as `R17・K2, 旧中山道` into its roads.
    pub fn parse_all(src: Option<&str>) -> Vec<Road> {
        let Some(src) = src else {
            return Vec::new();
        };
        let compact: String = src.chars().filter(|c| !c.is_whitespace()).collect();
        compact
            .split(DELIMITERS)
            .filter(|piece| !piece.is_empty())
            .map(Road::parse)
            .collect()
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn kind(&self) -> &RoadKind {
        &self.kind
    }

    pub fn is_named(&self) -> bool {
        matches!(self.kind, RoadKind::Named { .. })
    }
}

// Roads are shown as written on the sheet, even when the code was understood.
impl Display for Road {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.src)
    }
}
