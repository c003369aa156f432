//! # Recipe Value Objects
//!
//! Small typed wrappers and enumerations used by the recipe entities.
//!
//! The enumerations carry a stable integer `code` (what the store persists and
//! what the list query receives) and a case-insensitive [`FromStr`] for names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Upper bound on a recipe title, in characters.
pub const TITLE_MAX_LEN: usize = 200;

/// Non-empty, trimmed recipe title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecipeTitle(String);

impl RecipeTitle {
    /// Wraps an already validated title. Callers are expected to go through the
    /// creation pipeline, which trims and bounds the value first.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipeTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A duration expressed in whole minutes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Duration(u32);

impl Duration {
    pub const ZERO: Duration = Duration(0);

    pub fn from_minutes(minutes: u32) -> Self {
        Self(minutes)
    }

    pub fn minutes(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min", self.0)
    }
}

/// Positive amount of an ingredient.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Quantity(f64);

impl Quantity {
    /// Returns `None` unless `value` is finite and strictly positive.
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value > 0.0).then_some(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Measurement unit of an ingredient quantity.
///
/// `Unknown` is the sentinel for "not parsed" and is never accepted on a
/// persisted ingredient.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[default]
    Unknown,
    Gram,
    Milliliter,
    Teaspoon,
    Tablespoon,
    Piece,
}

impl Unit {
    /// Units an ingredient may carry, in declaration order.
    pub const VALID: [Unit; 5] = [
        Unit::Gram,
        Unit::Milliliter,
        Unit::Teaspoon,
        Unit::Tablespoon,
        Unit::Piece,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Unit::Unknown => "Unknown",
            Unit::Gram => "Gram",
            Unit::Milliliter => "Milliliter",
            Unit::Teaspoon => "Teaspoon",
            Unit::Tablespoon => "Tablespoon",
            Unit::Piece => "Piece",
        }
    }

    /// Comma-separated list of [`Unit::VALID`] names, used in error messages.
    pub fn valid_names() -> String {
        Self::VALID
            .iter()
            .map(Unit::name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Unit {
    type Err = String;

    /// Case-insensitive parse of a unit name. `"unknown"` parses to the
    /// sentinel; rejecting it is left to the caller.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        std::iter::once(Unit::Unknown)
            .chain(Unit::VALID)
            .find(|unit| unit.name().to_ascii_lowercase() == lower)
            .ok_or_else(|| format!("invalid unit: {s}"))
    }
}

/// Diet category of a recipe, also used as the list filter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecipeCategory {
    #[default]
    Unknown,
    Vegetarian,
    Meat,
    Vegan,
}

impl RecipeCategory {
    pub const ALL: [RecipeCategory; 4] = [
        RecipeCategory::Unknown,
        RecipeCategory::Vegetarian,
        RecipeCategory::Meat,
        RecipeCategory::Vegan,
    ];

    pub fn code(&self) -> i32 {
        match self {
            RecipeCategory::Unknown => 0,
            RecipeCategory::Vegetarian => 1,
            RecipeCategory::Meat => 2,
            RecipeCategory::Vegan => 3,
        }
    }

    /// Maps a stored or user-supplied code back to a category.
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    pub fn name(&self) -> &'static str {
        match self {
            RecipeCategory::Unknown => "Unknown",
            RecipeCategory::Vegetarian => "Vegetarian",
            RecipeCategory::Meat => "Meat",
            RecipeCategory::Vegan => "Vegan",
        }
    }
}

impl fmt::Display for RecipeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RecipeCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.name().to_ascii_lowercase() == lower)
            .ok_or_else(|| format!("invalid category: {s}"))
    }
}

/// How hard a recipe is to prepare. Not settable on creation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Unknown,
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn code(&self) -> i32 {
        match self {
            Difficulty::Unknown => 0,
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Difficulty::Unknown),
            1 => Some(Difficulty::Easy),
            2 => Some(Difficulty::Medium),
            3 => Some(Difficulty::Hard),
            _ => None,
        }
    }
}
