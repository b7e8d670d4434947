use std::error::Error;
use std::fmt;
use std::str::FromStr;

use crate::core::data::point::Point;

/// One scripted viewport change.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NavigationStep {
    /// `zoom:X1,Y1,X2,Y2`: opposite pixel corners of the selection.
    Zoom { corner_a: Point, corner_b: Point },
    /// `back`
    Back,
    /// `iterations:N`
    Iterations(u32),
    /// `reset`
    Reset,
    /// `recompute`
    Recompute,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationStepParseError {
    UnknownStep(String),
    InvalidZoom(String),
    InvalidIterations(String),
}

impl fmt::Display for NavigationStepParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownStep(step) => write!(
                f,
                "unknown step '{}': expected zoom:X1,Y1,X2,Y2, back, iterations:N, reset or recompute",
                step
            ),
            Self::InvalidZoom(args) => {
                write!(f, "zoom expects four pixel coordinates X1,Y1,X2,Y2, got '{}'", args)
            }
            Self::InvalidIterations(args) => {
                write!(f, "iterations expects a positive integer, got '{}'", args)
            }
        }
    }
}

impl Error for NavigationStepParseError {}

impl FromStr for NavigationStep {
    type Err = NavigationStepParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        match s.split_once(':') {
            Some(("zoom", args)) => parse_zoom(args),
            Some(("iterations", args)) => args
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|&cap| cap > 0)
                .map(Self::Iterations)
                .ok_or_else(|| NavigationStepParseError::InvalidIterations(args.to_string())),
            None if s == "back" => Ok(Self::Back),
            None if s == "reset" => Ok(Self::Reset),
            None if s == "recompute" => Ok(Self::Recompute),
            _ => Err(NavigationStepParseError::UnknownStep(s.to_string())),
        }
    }
}

fn parse_zoom(args: &str) -> Result<NavigationStep, NavigationStepParseError> {
    let invalid = || NavigationStepParseError::InvalidZoom(args.to_string());

    let coords = args
        .split(',')
        .map(|part| part.trim().parse::<u32>())
        .collect::<Result<Vec<u32>, _>>()
        .map_err(|_| invalid())?;

    let [x1, y1, x2, y2] = coords[..] else {
        return Err(invalid());
    };

    Ok(NavigationStep::Zoom {
        corner_a: Point { x: x1, y: y1 },
        corner_b: Point { x: x2, y: y2 },
    })
}

impl fmt::Display for NavigationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zoom { corner_a, corner_b } => write!(
                f,
                "zoom:{},{},{},{}",
                corner_a.x, corner_a.y, corner_b.x, corner_b.y
            ),
            Self::Back => write!(f, "back"),
            Self::Iterations(cap) => write!(f, "iterations:{}", cap),
            Self::Reset => write!(f, "reset"),
            Self::Recompute => write!(f, "recompute"),
        }
    }
}
