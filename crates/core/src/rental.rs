//! Rental vocabulary stored as text columns.
//!
//! Each enum round-trips through its lowercase `snake_case` database value via
//! [`as_str`](ListingStatus::as_str) and [`FromStr`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

macro_rules! define_text_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// All variants in declaration order.
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            /// The value stored in the database.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $value ),+
                }
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $value => Ok($name::$variant), )+
                    other => Err(CoreError::Validation(format!(
                        "Unknown {}: '{other}'. Expected one of: {}",
                        $label,
                        [$( $value ),+].join(", ")
                    ))),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

define_text_enum! {
    /// Lifecycle of a listing. Only `Active` listings are live for search.
    ListingStatus, "listing status" {
        Active => "active",
        Inactive => "inactive",
        Rented => "rented",
        Sold => "sold",
    }
}

define_text_enum! {
    /// Tenant profile an owner prefers. `Any` is a wildcard on the property side.
    PreferredTenant, "preferred tenant" {
        Family => "family",
        BachelorMale => "bachelor_male",
        BachelorFemale => "bachelor_female",
        Company => "company",
        Any => "any",
    }
}

define_text_enum! {
    /// Whether a listing offers the property for rent or for sale.
    ListingType, "listing type" {
        Rent => "rent",
        Sale => "sale",
    }
}

define_text_enum! {
    /// Marketplace role chosen at registration.
    UserType, "user type" {
        Owner => "owner",
        Tenant => "tenant",
        Both => "both",
    }
}

impl PreferredTenant {
    /// Whether a property advertising `self` accepts a tenant of kind `requested`.
    pub fn accepts(self, requested: PreferredTenant) -> bool {
        self == PreferredTenant::Any || self == requested
    }
}

// ---------------------------------------------------------------------------
// Furnishing names
// ---------------------------------------------------------------------------

/// Seeded furnishing type names.
pub const FURNISHING_FULL: &str = "Fully Furnished";
pub const FURNISHING_SEMI: &str = "Semi Furnished";
pub const FURNISHING_NONE: &str = "Unfurnished";

/// Furnishing names that count as "furnished" for the `furnished` filter.
pub const FURNISHED_NAMES: &[&str] = &[FURNISHING_FULL, FURNISHING_SEMI];

/// Furnishing names that count as "unfurnished".
pub const UNFURNISHED_NAMES: &[&str] = &[FURNISHING_NONE];
