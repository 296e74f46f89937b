//! Integration tests for the seed endpoint

use axum::http::StatusCode;
use axum_test::TestServer;
use dashboard::core::records::UserRecord;
use dashboard::prelude::*;
use dashboard::seed::SeedErrorResponse;

fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    // Lowest cost bcrypt accepts; keeps hashing fast
    config.seed.bcrypt_cost = 4;
    config
}

fn server_for(store: &InMemoryStore) -> TestServer {
    let app = ServerBuilder::new(test_config())
        .with_database(store.clone())
        .build()
        .expect("router should build");
    TestServer::try_new(app).expect("Failed to create test server")
}

async fn row_counts(store: &InMemoryStore) -> Vec<u64> {
    let mut counts = Vec::new();
    for table in SeedTable::ALL {
        counts.push(store.count_rows(table).await.unwrap());
    }
    counts
}

#[tokio::test]
async fn test_seed_creates_tables_and_reports_counts() {
    let store = InMemoryStore::new();
    let server = server_for(&store);

    let response = server.get("/seed").await;

    response.assert_status_ok();
    let body: SeedResponse = response.json();
    assert_eq!(body.message, "Database seeded successfully");
    assert_eq!(
        body.details,
        SeedReport {
            users: 1,
            customers: 6,
            invoices: 13,
            revenue: 12,
        }
    );
    assert_eq!(row_counts(&store).await, vec![1, 6, 13, 12]);
}

#[tokio::test]
async fn test_seed_is_idempotent() {
    let store = InMemoryStore::new();
    let server = server_for(&store);

    server.get("/seed").await.assert_status_ok();
    let second = server.get("/seed").await;

    second.assert_status_ok();
    let body: SeedResponse = second.json();
    assert_eq!(body.details.invoices, 13);
    assert_eq!(row_counts(&store).await, vec![1, 6, 13, 12]);
}

#[tokio::test]
async fn test_seeded_password_is_hashed() {
    let store = InMemoryStore::new();
    let server = server_for(&store);
    server.get("/seed").await.assert_status_ok();

    let fixture = &SeedFixtures::placeholder().users[0];
    let stored = store.user(&fixture.id).unwrap().expect("user row");

    assert_eq!(stored.email, "user@nextmail.com");
    assert_ne!(stored.password, "123456");
    assert!(bcrypt::verify("123456", &stored.password).unwrap());
}

#[tokio::test]
async fn test_seed_failure_keeps_earlier_phases() {
    let store = InMemoryStore::new();
    store.ensure_table(SeedTable::Users).await.unwrap();
    store
        .insert_user(&UserRecord {
            id: Uuid::new_v4(),
            name: "Someone Else".to_string(),
            email: "user@nextmail.com".to_string(),
            password: "x".to_string(),
        })
        .await
        .unwrap();
    let server = server_for(&store);

    let response = server.get("/seed").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: SeedErrorResponse = response.json();
    assert!(body.error.contains("users"), "error was {:?}", body.error);

    // Users table stays; later phases never ran
    assert_eq!(store.count_rows(SeedTable::Users).await.unwrap(), 1);
    assert!(store.count_rows(SeedTable::Customers).await.is_err());
    assert!(store.count_rows(SeedTable::Revenue).await.is_err());
}

#[tokio::test]
async fn test_seeded_invoices_show_in_list_view() {
    let store = InMemoryStore::new();
    let server = server_for(&store);
    server.get("/seed").await.assert_status_ok();

    let page: InvoiceListPage = server.get("/dashboard/invoices").await.json();

    assert_eq!(page.count, 13);
    // Newest first
    assert_eq!(page.invoices[0].date.to_string(), "2023-09-10");
}

#[tokio::test]
async fn test_seed_refreshes_cached_list_view() {
    let store = InMemoryStore::with_schema();
    let server = server_for(&store);

    let before: InvoiceListPage = server.get("/dashboard/invoices").await.json();
    assert_eq!(before.count, 0);

    server.get("/seed").await.assert_status_ok();

    let after: InvoiceListPage = server.get("/dashboard/invoices").await.json();
    assert_eq!(after.count, 13);
}
