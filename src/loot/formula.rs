//! Dice formula evaluator
//!
//! Parses and rolls loot notation: a fixed number like "5", or dice like
//! "1d6" and "2d6x100" (sum of the dice times a multiplier).

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::random::RandomSource;

/// Upper bound on the number of dice in a single formula
pub const MAX_DICE: u32 = 1000;

static FIXED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("static regex"));

static DICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)[dD]([0-9]+)(?:[xX]([0-9]+))?$").expect("static regex")
});

/// Formula parsing and evaluation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    #[error("invalid formula: {0:?}")]
    Invalid(String),

    #[error("invalid number of dice: {0} (must be at least 1)")]
    InvalidCount(String),

    #[error("invalid number of sides: {0} (must be at least 1)")]
    InvalidSides(String),

    #[error("invalid multiplier: {0} (must be at least 1)")]
    InvalidMultiplier(String),

    #[error("too many dice: {0} (limit {max})", max = MAX_DICE)]
    TooManyDice(u32),

    #[error("formula result overflows")]
    Overflow,
}

/// A parsed loot formula
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formula {
    /// A literal value
    Fixed(u64),
    /// `count` dice with `sides` faces, summed and multiplied
    Dice {
        count: u32,
        sides: u32,
        multiplier: u64,
    },
}

impl Formula {
    /// Roll the formula once. Hand-built dice outside the parser's limits
    /// are rejected the same way `parse_formula` would reject them.
    pub fn roll(&self, rng: &mut dyn RandomSource) -> Result<u64, FormulaError> {
        match *self {
            Formula::Fixed(n) => Ok(n),
            Formula::Dice {
                count,
                sides,
                multiplier,
            } => {
                if count == 0 {
                    return Err(FormulaError::InvalidCount(count.to_string()));
                }
                if count > MAX_DICE {
                    return Err(FormulaError::TooManyDice(count));
                }
                if sides == 0 {
                    return Err(FormulaError::InvalidSides(sides.to_string()));
                }
                if multiplier == 0 {
                    return Err(FormulaError::InvalidMultiplier(multiplier.to_string()));
                }
                let mut sum: u64 = 0;
                for _ in 0..count {
                    sum += rng.between(1, sides as u64);
                }
                sum.checked_mul(multiplier).ok_or(FormulaError::Overflow)
            }
        }
    }

    /// Smallest possible result
    pub fn min(&self) -> u64 {
        match *self {
            Formula::Fixed(n) => n,
            Formula::Dice {
                count, multiplier, ..
            } => (count as u64).saturating_mul(multiplier),
        }
    }

    /// Largest possible result
    pub fn max(&self) -> u64 {
        match *self {
            Formula::Fixed(n) => n,
            Formula::Dice {
                count,
                sides,
                multiplier,
            } => (count as u64 * sides as u64).saturating_mul(multiplier),
        }
    }
}

impl FromStr for Formula {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_formula(s)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Formula::Fixed(n) => write!(f, "{}", n),
            Formula::Dice {
                count,
                sides,
                multiplier: 1,
            } => write!(f, "{}d{}", count, sides),
            Formula::Dice {
                count,
                sides,
                multiplier,
            } => write!(f, "{}d{}x{}", count, sides, multiplier),
        }
    }
}

/// Parse a formula string like "2d6x100"
pub fn parse_formula(formula: &str) -> Result<Formula, FormulaError> {
    let notation = formula.trim();

    if FIXED_RE.is_match(notation) {
        let n = notation
            .parse()
            .map_err(|_| FormulaError::Invalid(formula.to_string()))?;
        return Ok(Formula::Fixed(n));
    }

    let caps = DICE_RE
        .captures(notation)
        .ok_or_else(|| FormulaError::Invalid(formula.to_string()))?;

    let count_str = &caps[1];
    let sides_str = &caps[2];
    let multiplier_str = caps.get(3).map(|m| m.as_str());

    let count: u32 = count_str
        .parse()
        .ok()
        .filter(|&n| n >= 1)
        .ok_or_else(|| FormulaError::InvalidCount(count_str.to_string()))?;

    let sides: u32 = sides_str
        .parse()
        .ok()
        .filter(|&n| n >= 1)
        .ok_or_else(|| FormulaError::InvalidSides(sides_str.to_string()))?;

    let multiplier: u64 = match multiplier_str {
        None => 1,
        Some(m) => m
            .parse()
            .ok()
            .filter(|&n| n >= 1)
            .ok_or_else(|| FormulaError::InvalidMultiplier(m.to_string()))?,
    };

    if count > MAX_DICE {
        return Err(FormulaError::TooManyDice(count));
    }

    Ok(Formula::Dice {
        count,
        sides,
        multiplier,
    })
}

/// Parse and roll a formula in one step
pub fn evaluate(formula: &str, rng: &mut dyn RandomSource) -> Result<u64, FormulaError> {
    parse_formula(formula)?.roll(rng)
}
