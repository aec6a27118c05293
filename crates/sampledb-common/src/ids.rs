//! Typed row ID wrappers.
//!
//! Primary keys are generated by the store as integers. These newtypes keep a
//! `ClientId` from being passed where a `ProductId` is expected.

use serde::{Deserialize, Serialize};

macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Raw integer key as stored in the database.
            #[must_use]
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

row_id!(
    /// Identifier of a row in `clients`.
    ClientId
);
row_id!(
    /// Identifier of a row in `products`.
    ProductId
);
row_id!(
    /// Identifier of a row in `sales`.
    SaleId
);
row_id!(
    /// Identifier of a row in `cinemas`.
    CinemaId
);
row_id!(
    /// Identifier of a row in `movies`.
    MovieId
);
row_id!(
    /// Identifier of a row in `screenings`.
    ScreeningId
);
