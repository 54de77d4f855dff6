//! End-to-end tests running the core repositories and services against a
//! real SQLite-backed store.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;
use std::sync::Arc;

use moneta_core::accounts::{Account, AccountRepository, AccountRepositoryTrait, NewAccount};
use moneta_core::errors::StoreError;
use moneta_core::categories::{CategoryRepository, CategoryRepositoryTrait, CategoryType, NewCategory};
use moneta_core::store::{CategoryClause, DocumentKind, DocumentQuery, DocumentStore, SortDirection};
use moneta_core::transactions::{
    DateRange, NewTransaction, ParsedStatement, StatementBalance, StatementParser, Transaction,
    TransactionRepository, TransactionRepositoryTrait, TransactionService, TransactionServiceTrait,
    TransactionType,
};
use moneta_storage_sqlite::{create_pool, init, run_migrations, spawn_writer, SqliteDocumentStore};

fn open_store(dir: &tempfile::TempDir) -> Arc<SqliteDocumentStore> {
    let db_path = init(dir.path().to_str().unwrap()).unwrap();
    let pool = create_pool(&db_path).unwrap();
    run_migrations(&pool).unwrap();
    let writer = spawn_writer(pool.as_ref().clone());
    Arc::new(SqliteDocumentStore::new(pool, writer))
}

fn new_transaction(date: &str, amount: Decimal, name: &str) -> NewTransaction {
    NewTransaction {
        date: date.to_string(),
        amount,
        transaction_type: if amount.is_sign_negative() {
            TransactionType::Debit
        } else {
            TransactionType::Credit
        },
        name: name.to_string(),
        memo: String::new(),
        category_id: None,
        account_id: None,
    }
}

#[tokio::test]
async fn post_get_put_remove_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir);

    let id = store
        .post(
            DocumentKind::Account,
            json!({ "name": "Checking", "financialInstitution": "First National", "accountType": "checking" }),
        )
        .await
        .unwrap();

    let mut doc = store.get(&id).await.unwrap();
    assert_eq!(doc["id"], json!(id));
    assert_eq!(doc["name"], json!("Checking"));

    doc["name"] = json!("Joint Checking");
    store.put(DocumentKind::Account, doc).await.unwrap();
    let doc = store.get(&id).await.unwrap();
    assert_eq!(doc["name"], json!("Joint Checking"));

    store.remove(&id).await.unwrap();
    assert!(store.get(&id).await.unwrap_err().is_not_found());
    assert!(store.remove(&id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn write_job_errors_keep_their_kind() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir);

    // The NotFound raised inside the writer's transaction must come back
    // to the caller as a NotFound, not as some internal failure.
    let err = store.remove("missing").await.unwrap_err();
    assert!(matches!(
        err,
        moneta_core::Error::Store(StoreError::NotFound(_))
    ));
}

#[tokio::test]
async fn find_partitions_by_kind_and_honors_the_selector() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir);

    store
        .post(DocumentKind::Account, json!({ "name": "Checking" }))
        .await
        .unwrap();
    for (date, name) in [
        ("2017-01-01", "RENT"),
        ("2017-02-01", "POWER"),
        ("2017-01-15", "WATER"),
    ] {
        store
            .post(
                DocumentKind::Transaction,
                json!({ "date": date, "amount": "-10", "type": "DEBIT", "name": name }),
            )
            .await
            .unwrap();
    }

    let all = DocumentQuery::for_kind(DocumentKind::Transaction)
        .date_between(None, None)
        .sort_by_date(SortDirection::Asc);
    let dates: Vec<String> = store
        .find(&all)
        .await
        .unwrap()
        .iter()
        .map(|d| d["date"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(dates, vec!["2017-01-01", "2017-01-15", "2017-02-01"]);

    // Inclusive bounds, then a one-row page.
    let january = DocumentQuery::for_kind(DocumentKind::Transaction)
        .date_between(Some("2017-01-01"), Some("2017-01-15"))
        .sort_by_date(SortDirection::Desc)
        .paginate(1, 2);
    let page = store.find(&january).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0]["date"], json!("2017-01-01"));
}

#[tokio::test]
async fn save_new_rejects_checksum_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir);
    let repository = TransactionRepository::new(store);

    repository
        .save_new(new_transaction("2017-01-05", dec!(-42.50), "COFFEE CO"))
        .await
        .unwrap();
    let duplicate = repository
        .save_new(new_transaction("2017-01-05", dec!(-42.50), "COFFEE CO"))
        .await;
    assert!(duplicate.is_err());

    // An amount differing only in trailing zeros is still the same content.
    let same_normalized = repository
        .save_new(new_transaction("2017-01-05", dec!(-42.500), "COFFEE CO"))
        .await;
    assert!(same_normalized.is_err());
}

#[tokio::test]
async fn aggregate_views_sum_the_transaction_partition() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir);
    let repository = TransactionRepository::new(store.clone());

    let mut payroll = new_transaction("2017-01-05", dec!(2500), "PAYROLL");
    payroll.category_id = Some("salary".to_string());
    let mut rent = new_transaction("2017-01-10", dec!(-900), "RENT");
    rent.category_id = Some("rent".to_string());
    let mut coffee = new_transaction("2017-01-12", dec!(-42.50), "COFFEE CO");
    coffee.category_id = Some("dining".to_string());
    for t in [payroll, rent, coffee, new_transaction("2017-02-10", dec!(-5), "OUT OF RANGE")] {
        repository.save_new(t).await.unwrap();
    }

    let credit = store
        .query_by_type("CREDIT", "2017-01-01", "2017-01-31")
        .await
        .unwrap();
    assert_eq!(credit, Some(dec!(2500)));
    let debit = store
        .query_by_type("DEBIT", "2017-01-01", "2017-01-31")
        .await
        .unwrap();
    assert_eq!(debit, Some(dec!(-942.50)));
    let empty = store
        .query_by_type("CREDIT", "2016-01-01", "2016-12-31")
        .await
        .unwrap();
    assert_eq!(empty, None);

    let sums = store
        .query_by_category("2017-01-01", "2017-01-31")
        .await
        .unwrap();
    assert_eq!(sums.len(), 3);
    assert_eq!(sums["rent"], dec!(-900));

    // The uncategorized out-of-range debit never contributes.
    let all_sums = store
        .query_by_category("2017-01-01", "2017-12-31")
        .await
        .unwrap();
    assert_eq!(all_sums.len(), 3);
}

#[tokio::test]
async fn query_by_amount_matches_exactly_most_recent_first() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir);
    let repository = TransactionRepository::new(store.clone());

    for t in [
        new_transaction("2017-01-10", dec!(3500), "TRANSFER IN JAN"),
        new_transaction("2017-03-10", dec!(3500), "TRANSFER IN MAR"),
        new_transaction("2017-03-10", dec!(3500.01), "NEAR MISS"),
        new_transaction("2017-02-01", dec!(-3500), "TRANSFER OUT"),
    ] {
        repository.save_new(t).await.unwrap();
    }

    let matched = store.query_by_amount(&dec!(3500)).await.unwrap();
    let names: Vec<&str> = matched
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["TRANSFER IN MAR", "TRANSFER IN JAN"]);
}

#[tokio::test]
async fn uncategorized_selector_checks_field_absence() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir);
    let repository = TransactionRepository::new(store.clone());

    let mut categorized = new_transaction("2017-01-12", dec!(-42.50), "COFFEE CO");
    categorized.category_id = Some("dining".to_string());
    repository.save_new(categorized).await.unwrap();
    repository
        .save_new(new_transaction("2017-01-10", dec!(-900), "RENT"))
        .await
        .unwrap();

    let query = DocumentQuery::for_kind(DocumentKind::Transaction)
        .date_between(Some("2017-01-01"), Some("2017-01-31"))
        .category(CategoryClause {
            must_not_exist: true,
            ..Default::default()
        });
    let uncategorized = store.find(&query).await.unwrap();
    assert_eq!(uncategorized.len(), 1);
    assert_eq!(uncategorized[0]["name"], json!("RENT"));
}

// Two fixed records and a balance, regardless of the file contents.
struct CannedParser;

impl StatementParser for CannedParser {
    fn parse(
        &self,
        _content: &str,
        account: &Account,
    ) -> moneta_core::Result<ParsedStatement> {
        let scoped = |mut t: NewTransaction| {
            t.account_id = Some(account.id.clone());
            t
        };
        Ok(ParsedStatement {
            transactions: vec![
                scoped(new_transaction("2017-01-10", dec!(-900), "RENT")),
                scoped(new_transaction("2017-01-25", dec!(2500), "PAYROLL")),
            ],
            balance: StatementBalance {
                date_time: "2017-01-31T00:00:00".to_string(),
                amount: dec!(1600),
            },
        })
    }
}

#[tokio::test]
async fn full_stack_import_and_linking() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir);
    let transactions = Arc::new(TransactionRepository::new(store.clone()));
    let accounts = Arc::new(AccountRepository::new(store.clone()));
    let categories = Arc::new(CategoryRepository::new(store.clone()));
    let service = TransactionService::new(
        transactions.clone(),
        accounts.clone(),
        categories.clone(),
        Arc::new(CannedParser),
    );

    let account = accounts
        .create(NewAccount {
            name: "Checking".to_string(),
            financial_institution: "First National".to_string(),
            account_type: "checking".to_string(),
        })
        .await
        .unwrap();
    categories
        .create(NewCategory {
            name: "Salary".to_string(),
            category_type: CategoryType::Income,
            parent: None,
        })
        .await
        .unwrap();

    let statement = dir.path().join("statement.csv");
    std::fs::write(&statement, "raw statement").unwrap();

    let first = service
        .import_account_statement(&account.id, &statement)
        .await
        .unwrap();
    assert_eq!(first.num_imported, 2);
    assert_eq!(first.num_skipped, 0);

    let second = service
        .import_account_statement(&account.id, &statement)
        .await
        .unwrap();
    assert_eq!(second.num_imported, 0);
    assert_eq!(second.num_skipped, 2);

    let account = accounts.get_by_id(&account.id).await.unwrap();
    assert_eq!(account.balance_records.len(), 2);
    assert_eq!(account.balance_records[0].amount, dec!(1600));

    // Reconcile a transfer pair created outside the statement.
    let out_id = transactions
        .save_new(new_transaction("2017-02-01", dec!(-3500), "TRANSFER OUT"))
        .await
        .unwrap();
    let in_id = transactions
        .save_new(new_transaction("2017-02-02", dec!(3500), "TRANSFER IN"))
        .await
        .unwrap();
    let out = service.fetch_by_id(&out_id).await.unwrap();

    let candidates = service
        .fetch_transaction_link_candidates(&out)
        .await
        .unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].id, in_id);

    let counterpart: Transaction = candidates.into_iter().next().unwrap();
    service.link_transactions(out, counterpart).await.unwrap();

    let linked_out = service.fetch_by_id(&out_id).await.unwrap();
    assert_eq!(linked_out.linked_to.as_deref(), Some(in_id.as_str()));
    assert_eq!(
        linked_out
            .linked_to_transaction
            .as_ref()
            .map(|t| t.id.as_str()),
        Some(in_id.as_str())
    );
    assert_eq!(linked_out.category_id.as_deref(), Some("internaltransfer"));

    // Linked transfers disappear from the default listing.
    let page = service
        .fetch(Default::default())
        .await
        .unwrap();
    assert!(page.result.iter().all(|t| t.id != out_id && t.id != in_id));

    let totals = service
        .sum_by_type(&DateRange {
            date_from: "2017-01-01".to_string(),
            date_to: "2017-01-31".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(totals.credit, dec!(2500));
    assert_eq!(totals.debit, dec!(-900));
}
