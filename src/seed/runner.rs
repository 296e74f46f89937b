//! Sequential database seeder
//!
//! Phases run in a fixed order (users, customers, invoices, revenue). Each
//! phase creates its table if needed, then inserts one row at a time and
//! awaits every statement before issuing the next. Rows whose key already
//! exists are skipped, so the seeder can be run repeatedly.

use super::fixtures::SeedFixtures;
use crate::core::records::{SeedTable, UserRecord};
use crate::core::store::SeedStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// bcrypt cost used when none is configured
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Rows processed per table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedReport {
    pub users: usize,
    pub customers: usize,
    pub invoices: usize,
    pub revenue: usize,
}

/// Errors that abort a seeding run
///
/// Phases that completed before the failure are not rolled back.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to hash password for {email}: {source}")]
    Hash {
        email: String,
        #[source]
        source: bcrypt::BcryptError,
    },

    #[error("password hashing for {email} did not complete: {source}")]
    HashTask {
        email: String,
        #[source]
        source: tokio::task::JoinError,
    },

    #[error("seeding {table} failed: {message}")]
    Store { table: SeedTable, message: String },
}

impl SeedError {
    fn store(table: SeedTable) -> impl Fn(anyhow::Error) -> SeedError {
        move |e| SeedError::Store {
            table,
            message: e.to_string(),
        }
    }
}

/// Inserted/skipped tally for one phase
#[derive(Debug, Default)]
struct PhaseTally {
    inserted: usize,
    skipped: usize,
}

impl PhaseTally {
    fn record(&mut self, inserted: bool) {
        if inserted {
            self.inserted += 1;
        } else {
            self.skipped += 1;
        }
    }

    fn log(&self, table: SeedTable, processed: usize) {
        tracing::info!(
            table = %table,
            processed,
            inserted = self.inserted,
            skipped = self.skipped,
            "seeded table"
        );
    }
}

pub struct SeedRunner {
    store: Arc<dyn SeedStore>,
    fixtures: SeedFixtures,
    bcrypt_cost: u32,
}

impl SeedRunner {
    /// Seeder for the placeholder data set
    pub fn new(store: Arc<dyn SeedStore>) -> Self {
        Self::with_fixtures(store, SeedFixtures::placeholder())
    }

    pub fn with_fixtures(store: Arc<dyn SeedStore>, fixtures: SeedFixtures) -> Self {
        Self {
            store,
            fixtures,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }

    /// Set the bcrypt work factor for user passwords
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// Run every phase in order, stopping at the first failure
    pub async fn run(&self) -> Result<SeedReport, SeedError> {
        let users = self.seed_users().await?;
        let customers = self.seed_customers().await?;
        let invoices = self.seed_invoices().await?;
        let revenue = self.seed_revenue().await?;

        Ok(SeedReport {
            users,
            customers,
            invoices,
            revenue,
        })
    }

    async fn seed_users(&self) -> Result<usize, SeedError> {
        let table = SeedTable::Users;
        tracing::debug!(table = %table, "seeding");
        self.store
            .ensure_table(table)
            .await
            .map_err(SeedError::store(table))?;

        let mut tally = PhaseTally::default();
        for user in &self.fixtures.users {
            let hashed = UserRecord {
                password: self.hash_password(user).await?,
                ..user.clone()
            };
            let inserted = self
                .store
                .insert_user(&hashed)
                .await
                .map_err(SeedError::store(table))?;
            tally.record(inserted);
        }

        tally.log(table, self.fixtures.users.len());
        Ok(self.fixtures.users.len())
    }

    async fn seed_customers(&self) -> Result<usize, SeedError> {
        let table = SeedTable::Customers;
        tracing::debug!(table = %table, "seeding");
        self.store
            .ensure_table(table)
            .await
            .map_err(SeedError::store(table))?;

        let mut tally = PhaseTally::default();
        for customer in &self.fixtures.customers {
            let inserted = self
                .store
                .insert_customer(customer)
                .await
                .map_err(SeedError::store(table))?;
            tally.record(inserted);
        }

        tally.log(table, self.fixtures.customers.len());
        Ok(self.fixtures.customers.len())
    }

    async fn seed_invoices(&self) -> Result<usize, SeedError> {
        let table = SeedTable::Invoices;
        tracing::debug!(table = %table, "seeding");
        self.store
            .ensure_table(table)
            .await
            .map_err(SeedError::store(table))?;

        let mut tally = PhaseTally::default();
        for invoice in &self.fixtures.invoices {
            let inserted = self
                .store
                .insert_seed_invoice(invoice)
                .await
                .map_err(SeedError::store(table))?;
            tally.record(inserted);
        }

        tally.log(table, self.fixtures.invoices.len());
        Ok(self.fixtures.invoices.len())
    }

    async fn seed_revenue(&self) -> Result<usize, SeedError> {
        let table = SeedTable::Revenue;
        tracing::debug!(table = %table, "seeding");
        self.store
            .ensure_table(table)
            .await
            .map_err(SeedError::store(table))?;

        let mut tally = PhaseTally::default();
        for revenue in &self.fixtures.revenue {
            let inserted = self
                .store
                .insert_revenue(revenue)
                .await
                .map_err(SeedError::store(table))?;
            tally.record(inserted);
        }

        tally.log(table, self.fixtures.revenue.len());
        Ok(self.fixtures.revenue.len())
    }

    /// bcrypt runs on the blocking pool; the phase still waits for it
    async fn hash_password(&self, user: &UserRecord) -> Result<String, SeedError> {
        let password = user.password.clone();
        let cost = self.bcrypt_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|source| SeedError::HashTask {
                email: user.email.clone(),
                source,
            })?
            .map_err(|source| SeedError::Hash {
                email: user.email.clone(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;

    #[tokio::test]
    async fn test_run_reports_fixture_counts() {
        let store = Arc::new(InMemoryStore::new());
        let runner = SeedRunner::new(store).with_bcrypt_cost(4);

        let report = runner.run().await.unwrap();
        assert_eq!(
            report,
            SeedReport {
                users: 1,
                customers: 6,
                invoices: 13,
                revenue: 12,
            }
        );
    }

    #[tokio::test]
    async fn test_invalid_cost_fails_hash_phase() {
        let store = Arc::new(InMemoryStore::new());
        let runner = SeedRunner::new(store.clone()).with_bcrypt_cost(99);

        let err = runner.run().await.unwrap_err();
        assert!(matches!(err, SeedError::Hash { .. }));
        // later phases never ran
        assert!(store.count_rows(SeedTable::Customers).await.is_err());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_user_password_is_hashed() {
        let store = Arc::new(InMemoryStore::new());
        let fixture = SeedFixtures::placeholder().users[0].clone();

        SeedRunner::new(store.clone())
            .with_bcrypt_cost(4)
            .run()
            .await
            .unwrap();

        let stored = store.user(&fixture.id).unwrap().unwrap();
        assert_ne!(stored.password, fixture.password);
        assert!(bcrypt::verify(&fixture.password, &stored.password).unwrap());
    }
}
