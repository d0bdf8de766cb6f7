use regex::Regex;
use serde::Serialize;
use std::{fmt::Display, sync::OnceLock};

const SIGNAL: &str = "🚥";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointKind {
    Plain,
    Signal { name: Option<Box<str>> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Point {
    src: Box<str>,
    #[serde(flatten)]
    kind: PointKind,
}

impl Point {
    /// `S` marks a traffic signal, optionally named as in `S「大宮駅前」`.
    pub fn parse(src: &str) -> Self {
        static SIGNAL_RE: OnceLock<Regex> = OnceLock::new();
        let signal_re = SIGNAL_RE.get_or_init(|| Regex::new(r"^S(「(.+)」)?").expect("valid regex"));

        let kind = match signal_re.captures(src) {
            Some(caps) => PointKind::Signal {
                name: caps.get(2).map(|name| name.as_str().into()),
            },
            None => PointKind::Plain,
        };
        Self {
            src: src.into(),
            kind,
        }
    }

    /// Passage controls are written as `PC1`, `PC2`, ...
    pub fn is_checkpoint(&self) -> bool {
        static CHECKPOINT_RE: OnceLock<Regex> = OnceLock::new();
        CHECKPOINT_RE
            .get_or_init(|| Regex::new(r"^PC\d+").expect("valid regex"))
            .is_match(&self.src)
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn kind(&self) -> &PointKind {
        &self.kind
    }

    pub fn is_signal(&self) -> bool {
        matches!(self.kind, PointKind::Signal { .. })
    }

    pub fn signal_name(&self) -> Option<&str> {
        match &self.kind {
            PointKind::Signal { name } => name.as_deref(),
            PointKind::Plain => None,
        }
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            PointKind::Plain => f.write_str(&self.src),
            PointKind::Signal { name: Some(name) } => write!(f, "{SIGNAL}[{name}]"),
            PointKind::Signal { name: None } => f.write_str(SIGNAL),
        }
    }
}
