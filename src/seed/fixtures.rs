//! Placeholder data loaded by the seeder
//!
//! Invoice fixtures carry fixed identifiers so that re-running the seeder
//! hits the primary key conflict instead of inserting duplicates.

use crate::core::invoice::{Invoice, InvoiceStatus};
use crate::core::records::{CustomerRecord, RevenueRecord, UserRecord};
use chrono::NaiveDate;
use uuid::{Uuid, uuid};

/// Rows to seed, one list per table
#[derive(Debug, Clone, Default)]
pub struct SeedFixtures {
    /// Users with plaintext passwords; the seeder hashes them
    pub users: Vec<UserRecord>,
    pub customers: Vec<CustomerRecord>,
    pub invoices: Vec<Invoice>,
    pub revenue: Vec<RevenueRecord>,
}

const USERS: &[(Uuid, &str, &str, &str)] = &[(
    uuid!("410544b2-4001-4271-9855-fec4b6a6442a"),
    "User",
    "user@nextmail.com",
    "123456",
)];

const CUSTOMERS: &[(Uuid, &str, &str, &str)] = &[
    (
        uuid!("d6e15727-9fe1-4961-8c5b-ea44a9bd81aa"),
        "Evil Rabbit",
        "evil@rabbit.com",
        "/customers/evil-rabbit.png",
    ),
    (
        uuid!("3958dc9e-712f-4377-85e9-fec4b6a6442a"),
        "Delba de Oliveira",
        "delba@oliveira.com",
        "/customers/delba-de-oliveira.png",
    ),
    (
        uuid!("3958dc9e-742f-4377-85e9-fec4b6a6442a"),
        "Lee Robinson",
        "lee@robinson.com",
        "/customers/lee-robinson.png",
    ),
    (
        uuid!("76d65c26-f784-44a2-ac19-586678f7c2f2"),
        "Michael Novotny",
        "michael@novotny.com",
        "/customers/michael-novotny.png",
    ),
    (
        uuid!("cc27c14a-0acf-4f4a-a6c9-d45682c144b9"),
        "Amy Burns",
        "amy@burns.com",
        "/customers/amy-burns.png",
    ),
    (
        uuid!("13d07535-c59e-4157-a011-f8d2ef4e0cbb"),
        "Balazs Orban",
        "balazs@orban.com",
        "/customers/balazs-orban.png",
    ),
];

// (invoice id, index into CUSTOMERS, cents, status, (year, month, day))
#[allow(clippy::type_complexity)]
const INVOICES: &[(Uuid, usize, i32, InvoiceStatus, (i32, u32, u32))] = &[
    (uuid!("7234ca87-7950-4580-baf3-875717bbfd5c"), 0, 15795, InvoiceStatus::Pending, (2022, 12, 6)),
    (uuid!("3dd8fa8b-4d47-4358-9852-cffb978b81b4"), 1, 20348, InvoiceStatus::Pending, (2022, 11, 14)),
    (uuid!("ada41637-09c0-4d28-af21-891f67c52aa2"), 4, 3040, InvoiceStatus::Paid, (2022, 10, 29)),
    (uuid!("b50b96f0-f367-47ce-8328-41d7af0c8d71"), 3, 44800, InvoiceStatus::Paid, (2023, 9, 10)),
    (uuid!("dc4f80b0-23f8-4f8e-8444-37aeaa2035ec"), 5, 34577, InvoiceStatus::Pending, (2023, 8, 5)),
    (uuid!("ad80818e-324f-4e9b-9434-c6d6e313123c"), 2, 54246, InvoiceStatus::Pending, (2023, 7, 16)),
    (uuid!("a820f32e-d4fe-433d-bbf6-77973d0b47b7"), 0, 666, InvoiceStatus::Pending, (2023, 6, 27)),
    (uuid!("42462d5c-d6ff-40e1-8d62-93bfef68e1c8"), 3, 32545, InvoiceStatus::Paid, (2023, 6, 9)),
    (uuid!("1c38435c-1351-4627-ae40-ccf44f744acd"), 4, 1250, InvoiceStatus::Paid, (2023, 6, 17)),
    (uuid!("d9bffcf4-0fca-4f6c-8c44-8e8ee68a2e3c"), 5, 8546, InvoiceStatus::Paid, (2023, 6, 7)),
    (uuid!("501ff5a8-48ac-4276-8996-e71bdd8fe3fc"), 1, 500, InvoiceStatus::Paid, (2023, 8, 19)),
    (uuid!("aad26e94-dc66-41b3-beb1-0e9d9ee136a0"), 5, 8945, InvoiceStatus::Paid, (2023, 6, 3)),
    (uuid!("e6c5a95c-2e15-46c9-b181-6803e297363c"), 2, 1000, InvoiceStatus::Paid, (2022, 6, 5)),
];

const REVENUE: &[(&str, i32)] = &[
    ("Jan", 2000),
    ("Feb", 1800),
    ("Mar", 2200),
    ("Apr", 2500),
    ("May", 2300),
    ("Jun", 3200),
    ("Jul", 3500),
    ("Aug", 3700),
    ("Sep", 2500),
    ("Oct", 2800),
    ("Nov", 3000),
    ("Dec", 4800),
];

impl SeedFixtures {
    /// The dashboard's placeholder data set
    pub fn placeholder() -> Self {
        let users = USERS
            .iter()
            .map(|&(id, name, email, password)| UserRecord {
                id,
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            })
            .collect();

        let customers = CUSTOMERS
            .iter()
            .map(|&(id, name, email, image_url)| CustomerRecord {
                id,
                name: name.to_string(),
                email: email.to_string(),
                image_url: image_url.to_string(),
            })
            .collect();

        let invoices = INVOICES
            .iter()
            .filter_map(|&(id, customer, amount, status, (y, m, d))| {
                Some(Invoice {
                    id,
                    customer_id: CUSTOMERS.get(customer)?.0.to_string(),
                    amount,
                    status,
                    date: NaiveDate::from_ymd_opt(y, m, d)?,
                })
            })
            .collect();

        let revenue = REVENUE
            .iter()
            .map(|&(month, revenue)| RevenueRecord {
                month: month.to_string(),
                revenue,
            })
            .collect();

        Self {
            users,
            customers,
            invoices,
            revenue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_placeholder_sizes() {
        let fixtures = SeedFixtures::placeholder();
        assert_eq!(fixtures.users.len(), 1);
        assert_eq!(fixtures.customers.len(), 6);
        assert_eq!(fixtures.invoices.len(), 13);
        assert_eq!(fixtures.revenue.len(), 12);
    }

    #[test]
    fn test_invoices_reference_known_customers() {
        let fixtures = SeedFixtures::placeholder();
        let customers: HashSet<String> =
            fixtures.customers.iter().map(|c| c.id.to_string()).collect();

        for invoice in &fixtures.invoices {
            assert!(customers.contains(&invoice.customer_id));
        }
    }

    #[test]
    fn test_keys_are_unique() {
        let fixtures = SeedFixtures::placeholder();
        let ids: HashSet<Uuid> = fixtures.invoices.iter().map(|i| i.id).collect();
        assert_eq!(ids.len(), fixtures.invoices.len());

        let months: HashSet<&str> = fixtures.revenue.iter().map(|r| r.month.as_str()).collect();
        assert_eq!(months.len(), 12);
    }
}
