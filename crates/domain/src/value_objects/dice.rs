//! Percentile die roll value object
//!
//! Every turn rolls a single d100. The scale runs from 1 (sudden death) to
//! 100 (miracle); the number is handed to the narrator, never interpreted here.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::DomainError;

/// A single percentile die result, always within `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct DiceRoll(u8);

impl DiceRoll {
    /// Lowest face on the die.
    pub const MIN: i32 = 1;
    /// Highest face on the die.
    pub const MAX: i32 = 100;

    /// Create a roll from a known value, rejecting anything off the die.
    pub fn new(value: i32) -> Result<Self, DomainError> {
        let out_of_range = || {
            DomainError::out_of_range(
                "dice roll",
                i64::from(value),
                i64::from(Self::MIN),
                i64::from(Self::MAX),
            )
        };
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(out_of_range());
        }
        u8::try_from(value).map(Self).map_err(|_| out_of_range())
    }

    /// Roll the die using an injected inclusive range generator.
    ///
    /// The generator receives `(1, 100)` and must return a value in that
    /// range; the engine passes its `RandomPort` here so tests can pin rolls.
    pub fn roll(gen_range: impl FnOnce(i32, i32) -> i32) -> Result<Self, DomainError> {
        Self::new(gen_range(Self::MIN, Self::MAX))
    }

    pub fn value(&self) -> i32 {
        i32::from(self.0)
    }
}

impl TryFrom<i32> for DiceRoll {
    type Error = DomainError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DiceRoll> for i32 {
    fn from(roll: DiceRoll) -> Self {
        roll.value()
    }
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_faces_of_the_die() {
        assert_eq!(DiceRoll::new(1).map(|r| r.value()), Ok(1));
        assert_eq!(DiceRoll::new(100).map(|r| r.value()), Ok(100));
    }

    #[test]
    fn rejects_values_off_the_die() {
        assert!(matches!(
            DiceRoll::new(0),
            Err(DomainError::OutOfRange { value: 0, .. })
        ));
        assert!(DiceRoll::new(101).is_err());
        assert!(DiceRoll::new(-5).is_err());
    }

    #[test]
    fn values_past_a_byte_do_not_wrap_onto_the_die() {
        // 300 truncated to a byte would be 44.
        assert!(matches!(
            DiceRoll::new(300),
            Err(DomainError::OutOfRange { value: 300, .. })
        ));
        assert!(DiceRoll::new(i32::MAX).is_err());
        assert!(DiceRoll::new(i32::MIN).is_err());
    }

    #[test]
    fn roll_asks_generator_for_percentile_range() {
        let roll = DiceRoll::roll(|min, max| {
            assert_eq!((min, max), (1, 100));
            42
        })
        .expect("in range");
        assert_eq!(roll.value(), 42);
    }

    #[test]
    fn roll_surfaces_misbehaving_generator() {
        assert!(DiceRoll::roll(|_, _| 250).is_err());
    }

    #[test]
    fn serializes_as_plain_integer() {
        let roll = DiceRoll::new(17).expect("valid");
        assert_eq!(serde_json::to_string(&roll).expect("serialize"), "17");
        assert!(serde_json::from_str::<DiceRoll>("0").is_err());
    }
}
