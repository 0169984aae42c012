//! Type-safe identifiers for transactions and pickups.
//!
//! Both are strings made of a fixed prefix followed by a UUID v4 in
//! simple (32 lowercase hex digits) form, e.g. `TXN3f2a...`. The prefix
//! keeps ids readable in the UI; the UUID makes them unique regardless
//! of when they are generated.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! prefixed_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Fixed prefix of every identifier of this kind.
            pub const PREFIX: &'static str = $prefix;

            /// Generates a fresh identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(format!("{}{}", Self::PREFIX, uuid::Uuid::new_v4().simple()))
            }

            /// Wraps an identifier received from a client or the database.
            #[must_use]
            pub fn from_string(raw: String) -> Self {
                Self(raw)
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

prefixed_id!(
    /// Identifier of an order, `TXN` + UUID.
    TransactionId,
    "TXN"
);

prefixed_id!(
    /// Identifier of a pickup booking, `PU` + UUID.
    PickupId,
    "PU"
);
