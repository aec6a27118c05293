//! Database query modules.
//!
//! Row-level operations grouped by table:
//! - clients, products, sales: commerce variant
//! - cinemas, movies, screenings: cinema variant

pub mod cinemas;
pub mod clients;
pub mod movies;
pub mod products;
pub mod sales;
pub mod screenings;
