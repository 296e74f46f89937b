//! Seed fixture records for the tables that only the seeder writes

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A dashboard login. `password` holds the bcrypt hash once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

/// Revenue for one month, keyed by the month abbreviation ("Jan")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueRecord {
    pub month: String,
    pub revenue: i32,
}

/// The four tables the seeder manages, in seeding order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SeedTable {
    Users,
    Customers,
    Invoices,
    Revenue,
}

impl SeedTable {
    pub const ALL: [SeedTable; 4] = [
        SeedTable::Users,
        SeedTable::Customers,
        SeedTable::Invoices,
        SeedTable::Revenue,
    ];

    /// SQL table name
    pub fn name(&self) -> &'static str {
        match self {
            SeedTable::Users => "users",
            SeedTable::Customers => "customers",
            SeedTable::Invoices => "invoices",
            SeedTable::Revenue => "revenue",
        }
    }
}

impl fmt::Display for SeedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
