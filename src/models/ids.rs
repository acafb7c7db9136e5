//! Strongly-typed ID wrappers for stored entities
//!
//! IDs are integers handed out by the store from a persisted high-water
//! mark, so a deleted ID is never issued again. The newtypes keep a
//! transaction ID from being passed where a budget ID is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw integer ID
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Get the raw integer value
            pub const fn get(&self) -> u64 {
                self.0
            }

            /// The ID that follows this one
            pub const fn next(&self) -> Self {
                Self(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }
    };
}

define_id!(TransactionId);
define_id!(BudgetId);
