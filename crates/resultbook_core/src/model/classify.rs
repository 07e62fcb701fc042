//! Score classification.
//!
//! `grade` and `score_tier` band the same score with different thresholds
//! (90/80/70/60 versus 80/60/40). They stay separate functions.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Letter grade derived from a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

impl Display for Grade {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display severity bucket.
///
/// `LowDistinct` is only produced for grade `D` and is kept apart from `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    High,
    MidHigh,
    Mid,
    Low,
    LowDistinct,
    Critical,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::MidHigh => "mid_high",
            Self::Mid => "mid",
            Self::Low => "low",
            Self::LowDistinct => "low_distinct",
            Self::Critical => "critical",
        }
    }
}

impl Display for Tier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Letter grade; each band includes its lower bound.
pub fn grade(score: u8) -> Grade {
    match score {
        90.. => Grade::A,
        80..=89 => Grade::B,
        70..=79 => Grade::C,
        60..=69 => Grade::D,
        _ => Grade::F,
    }
}

/// Severity of a raw score.
pub fn score_tier(score: u8) -> Tier {
    match score {
        80.. => Tier::High,
        60..=79 => Tier::Mid,
        40..=59 => Tier::Low,
        _ => Tier::Critical,
    }
}

/// Severity of a letter grade.
pub fn grade_tier(grade: Grade) -> Tier {
    match grade {
        Grade::A => Tier::High,
        Grade::B => Tier::MidHigh,
        Grade::C => Tier::Mid,
        Grade::D => Tier::LowDistinct,
        Grade::F => Tier::Critical,
    }
}
