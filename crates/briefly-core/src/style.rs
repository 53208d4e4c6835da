//! Summary styles and the sentence/point counts each one allows.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Allowed lengths and the default length for a summary style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthOptions {
    /// Allowed values, in the order they are offered.
    pub allowed: &'static [u32],
    /// Length picked when the current one is not allowed.
    pub default: u32,
}

impl LengthOptions {
    pub fn contains(&self, length: u32) -> bool {
        self.allowed.contains(&length)
    }
}

const CONCISE: LengthOptions = LengthOptions {
    allowed: &[2, 3, 4],
    default: 3,
};

const DETAILED: LengthOptions = LengthOptions {
    allowed: &[5, 7, 10, 12],
    default: 7,
};

const BULLET_POINTS: LengthOptions = LengthOptions {
    allowed: &[3, 5, 7, 10],
    default: 5,
};

/// Length a fresh form starts at, before any style change.
pub const INITIAL_LENGTH: u32 = 2;

/// Used for style ids that are not in the catalog.
pub const FALLBACK_LENGTHS: LengthOptions = LengthOptions {
    allowed: &[2, 3, 4, 5],
    default: 3,
};

/// How the summary should be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryStyle {
    #[default]
    Concise,
    Detailed,
    BulletPoints,
}

impl SummaryStyle {
    /// All styles in picker order.
    pub fn all() -> &'static [SummaryStyle] {
        &[
            SummaryStyle::Concise,
            SummaryStyle::Detailed,
            SummaryStyle::BulletPoints,
        ]
    }

    /// Identifier used on the wire and in config files.
    pub fn id(&self) -> &'static str {
        match self {
            SummaryStyle::Concise => "concise",
            SummaryStyle::Detailed => "detailed",
            SummaryStyle::BulletPoints => "bullet_points",
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            SummaryStyle::Concise => "Concise",
            SummaryStyle::Detailed => "Detailed",
            SummaryStyle::BulletPoints => "Bullet points",
        }
    }

    /// One-line description shown in the style picker.
    pub fn description(&self) -> &'static str {
        match self {
            SummaryStyle::Concise => "Brief & focused (2-4 sentences)",
            SummaryStyle::Detailed => "Comprehensive analysis (5-12 sentences)",
            SummaryStyle::BulletPoints => "Key points listed (3-10 points)",
        }
    }

    /// Unit word for a length in this style.
    pub fn unit(&self) -> &'static str {
        match self {
            SummaryStyle::BulletPoints => "points",
            _ => "sentences",
        }
    }

    /// e.g. "5 points" or "3 sentences".
    pub fn describe_length(&self, length: u32) -> String {
        format!("{} {}", length, self.unit())
    }

    pub fn length_options(&self) -> &'static LengthOptions {
        match self {
            SummaryStyle::Concise => &CONCISE,
            SummaryStyle::Detailed => &DETAILED,
            SummaryStyle::BulletPoints => &BULLET_POINTS,
        }
    }

    pub fn default_length(&self) -> u32 {
        self.length_options().default
    }

    /// Length a new session starts at in this style.
    pub fn initial_length(&self) -> u32 {
        self.reconcile_length(INITIAL_LENGTH)
    }

    /// Keep `current` if this style allows it, otherwise use the style default.
    pub fn reconcile_length(&self, current: u32) -> u32 {
        let options = self.length_options();
        if options.contains(current) {
            current
        } else {
            options.default
        }
    }
}

/// Look up length options by wire id. Unknown ids get [`FALLBACK_LENGTHS`].
pub fn length_options_for_id(id: &str) -> &'static LengthOptions {
    match id.parse::<SummaryStyle>() {
        Ok(style) => style.length_options(),
        Err(_) => &FALLBACK_LENGTHS,
    }
}

impl std::fmt::Display for SummaryStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for SummaryStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "concise" => Ok(SummaryStyle::Concise),
            "detailed" => Ok(SummaryStyle::Detailed),
            "bullet_points" | "bullets" => Ok(SummaryStyle::BulletPoints),
            other => Err(format!(
                "unknown summary style '{other}' (expected concise, detailed or bullet_points)"
            )),
        }
    }
}
