//! Database seeding: fixtures, the sequential runner and its HTTP endpoint

pub mod fixtures;
pub mod handlers;
pub mod runner;

pub use fixtures::SeedFixtures;
pub use handlers::{SeedErrorResponse, SeedResponse, seed_database};
pub use runner::{DEFAULT_BCRYPT_COST, SeedError, SeedReport, SeedRunner};
