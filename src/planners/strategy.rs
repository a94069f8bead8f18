use std::fmt;
use std::str::FromStr;

use crate::error::InputError;

use super::level_planner::LevelPlanner;
use super::quotient::Quotient;
use super::quotient_cover::{CoverParams, QuotientCover};
use super::quotient_roadmap::{QuotientRoadmap, RoadmapParams};

/// Level planner family of a hierarchy. Every level of a hierarchy uses the same one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    QuotientCover,
    QuotientRoadmap,
}

impl FromStr for StrategyKind {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cover" | "quotient_cover" => Ok(StrategyKind::QuotientCover),
            "roadmap" | "qsp" | "necessary_prm" => Ok(StrategyKind::QuotientRoadmap),
            _ => Err(InputError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::QuotientCover => write!(f, "cover"),
            StrategyKind::QuotientRoadmap => write!(f, "roadmap"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrategyParams {
    pub cover: CoverParams,
    pub roadmap: RoadmapParams,
}

pub fn create_level_planner(
    kind: StrategyKind,
    quotient: Quotient,
    params: &StrategyParams,
    level: usize,
) -> Box<dyn LevelPlanner> {
    match kind {
        StrategyKind::QuotientCover => Box::new(QuotientCover::new(quotient, params.cover.clone(), level)),
        StrategyKind::QuotientRoadmap => Box::new(QuotientRoadmap::new(quotient, params.roadmap.clone(), level)),
    }
}
