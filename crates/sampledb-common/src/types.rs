//! Core enums shared by the schema, the seed batch and the reports.
//!
//! Each enum's `Display` form is exactly the literal stored in the database
//! and accepted by the matching CHECK constraint.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which schema the tool operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Clients, products and sales.
    #[default]
    Commerce,
    /// Cinemas, movies and screenings.
    Cinema,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Commerce, Variant::Cinema];
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Commerce => write!(f, "commerce"),
            Self::Cinema => write!(f, "cinema"),
        }
    }
}

impl std::str::FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "commerce" => Ok(Self::Commerce),
            "cinema" => Ok(Self::Cinema),
            _ => Err(format!("Invalid variant: {}", s)),
        }
    }
}

/// Legal form of a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientType {
    /// A registered company.
    Legal,
    /// A private person or sole proprietor.
    Individual,
}

impl fmt::Display for ClientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legal => write!(f, "legal"),
            Self::Individual => write!(f, "individual"),
        }
    }
}

impl std::str::FromStr for ClientType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "legal" => Ok(Self::Legal),
            "individual" => Ok(Self::Individual),
            _ => Err(format!("Invalid client type: {}", s)),
        }
    }
}

/// How a sale was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    NonCash,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cash => write!(f, "cash"),
            Self::NonCash => write!(f, "non_cash"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(Self::Cash),
            "non_cash" => Ok(Self::NonCash),
            _ => Err(format!("Invalid payment method: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_roundtrip() {
        for variant in Variant::ALL {
            assert_eq!(variant.to_string().parse::<Variant>().unwrap(), variant);
        }
        assert!("retail".parse::<Variant>().is_err());
    }

    #[test]
    fn test_variant_default() {
        assert_eq!(Variant::default(), Variant::Commerce);
    }

    #[test]
    fn test_variant_serialization() {
        let json = serde_json::to_string(&Variant::Cinema).unwrap();
        assert_eq!(json, r#""cinema""#);
    }

    #[test]
    fn test_client_type_display() {
        assert_eq!(ClientType::Legal.to_string(), "legal");
        assert_eq!(ClientType::Individual.to_string(), "individual");
        assert_eq!("individual".parse::<ClientType>().unwrap(), ClientType::Individual);
    }

    #[test]
    fn test_payment_method_matches_serde() {
        // Display and serde must agree, both are the stored literal.
        for method in [PaymentMethod::Cash, PaymentMethod::NonCash] {
            let json = serde_json::to_string(&method).unwrap();
            assert_eq!(json, format!("\"{}\"", method));
        }
        assert!("card".parse::<PaymentMethod>().is_err());
    }
}
