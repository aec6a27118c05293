//! Sampledb-Common: Shared types, IDs, and errors.
//!
//! This crate provides functionality used by both the database layer and the
//! command-line tool:
//!
//! - **Row IDs**: Typed wrappers around store-generated integer keys
//! - **Core Types**: Schema variants, client types, payment methods
//! - **Money**: Fixed-point currency stored as integer minor units
//! - **Error Handling**: Common error type and result alias
//!
//! # Examples
//!
//! ```
//! use sampledb_common::{ClientId, Money, PaymentMethod, Error, Result};
//!
//! let id = ClientId::from(1);
//! assert_eq!(id.get(), 1);
//!
//! let price = Money::from_major(12_000);
//! assert_eq!(price.to_string(), "12000.00");
//!
//! assert_eq!("cash".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
//!
//! fn example() -> Result<()> {
//!     Err(Error::not_found("client"))
//! }
//! assert!(example().is_err());
//! ```

pub mod error;
pub mod ids;
pub mod money;
pub mod types;

pub use error::{Error, Result};
pub use ids::*;
pub use money::Money;
pub use types::*;
