//! Transaction service - query, import, and reconciliation operations.

use async_trait::async_trait;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::path::Path;
use std::sync::Arc;

use super::statement::StatementParser;
use super::transactions_constants::INTERNAL_TRANSFER_CATEGORY_ID;
use super::transactions_model::{
    CategorySummary, CategorySummaryEntry, DateRange, FetchOptions, ImportResult, NewTransaction,
    PaginationResult, Transaction, TransactionType, TransactionTypeTotals, TransactionUpdate,
};
use super::transactions_query::{compose_fetch_query, uncategorized_count_query};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::accounts::AccountRepositoryTrait;
use crate::categories::{CategoryRepositoryTrait, CategoryType};
use crate::errors::Result;
use crate::hydration::fetch_associated;

/// Service for transaction operations, with injected dependencies.
///
/// Stateless at the service boundary: every operation is a function of its
/// inputs and the store's current contents.
pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
    account_repository: Arc<dyn AccountRepositoryTrait>,
    category_repository: Arc<dyn CategoryRepositoryTrait>,
    statement_parser: Arc<dyn StatementParser>,
}

impl TransactionService {
    /// Creates a new TransactionService instance with injected dependencies.
    pub fn new(
        repository: Arc<dyn TransactionRepositoryTrait>,
        account_repository: Arc<dyn AccountRepositoryTrait>,
        category_repository: Arc<dyn CategoryRepositoryTrait>,
        statement_parser: Arc<dyn StatementParser>,
    ) -> Self {
        Self {
            repository,
            account_repository,
            category_repository,
            statement_parser,
        }
    }

    /// Attaches each transaction's account, resolving every distinct
    /// account id once. Unresolvable accounts leave the field unset.
    async fn hydrate_accounts(&self, transactions: &mut [Transaction]) -> Result<()> {
        let ids = transactions
            .iter()
            .filter_map(|t| t.account_id.clone())
            .collect::<Vec<_>>();
        let accounts = fetch_associated(ids, |id| async move {
            self.account_repository.get_by_id(&id).await
        })
        .await?;

        for transaction in transactions.iter_mut() {
            transaction.account = transaction
                .account_id
                .as_ref()
                .and_then(|id| accounts.get(id).cloned());
        }
        Ok(())
    }

    /// Attaches each transaction's linked counterpart, resolving every
    /// distinct linked id once. Unresolvable links leave the field unset.
    async fn hydrate_linked_transactions(&self, transactions: &mut [Transaction]) -> Result<()> {
        let ids = transactions
            .iter()
            .filter_map(|t| t.linked_to.clone())
            .collect::<Vec<_>>();
        let linked =
            fetch_associated(ids, |id| async move { self.repository.get_by_id(&id).await })
                .await?;

        for transaction in transactions.iter_mut() {
            transaction.linked_to_transaction = transaction
                .linked_to
                .as_ref()
                .and_then(|id| linked.get(id).cloned())
                .map(Box::new);
        }
        Ok(())
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    async fn fetch(&self, options: FetchOptions) -> Result<PaginationResult<Transaction>> {
        let query = compose_fetch_query(&options);
        let total_rows = self.repository.count(&query).await?;
        let mut transactions = self.repository.find(&query).await?;
        self.hydrate_accounts(&mut transactions).await?;
        self.hydrate_linked_transactions(&mut transactions).await?;
        Ok(PaginationResult {
            result: transactions,
            total_rows,
        })
    }

    async fn fetch_by_id(&self, transaction_id: &str) -> Result<Transaction> {
        let mut transactions = vec![self.repository.get_by_id(transaction_id).await?];
        self.hydrate_accounts(&mut transactions).await?;
        self.hydrate_linked_transactions(&mut transactions).await?;
        Ok(transactions.remove(0))
    }

    async fn create(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        let id = self.repository.save_new(new_transaction).await?;
        self.fetch_by_id(&id).await
    }

    async fn update(
        &self,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction> {
        let mut transaction = self.repository.get_by_id(transaction_id).await?;
        update.apply_to(&mut transaction);
        self.repository.put(&transaction).await?;
        self.fetch_by_id(transaction_id).await
    }

    async fn delete(&self, transaction_id: &str) -> Result<()> {
        self.repository.delete(transaction_id).await
    }

    async fn update_category(&self, transaction_id: &str, category_id: &str) -> Result<()> {
        let mut transaction = self.repository.get_by_id(transaction_id).await?;
        transaction.category_id = Some(category_id.to_string());
        self.repository.put(&transaction).await
    }

    async fn import_account_statement(
        &self,
        account_id: &str,
        statement_path: &Path,
    ) -> Result<ImportResult> {
        let mut account = self.account_repository.get_by_id(account_id).await?;
        let content = std::fs::read_to_string(statement_path)?;
        let parsed = self.statement_parser.parse(&content, &account)?;

        // Every attempt runs independently; a duplicate checksum - or any
        // other per-record failure - counts as a skip and the batch
        // continues. Completion order is irrelevant to the tallies.
        let attempts = parsed.transactions.into_iter().map(|record| async move {
            match self.repository.save_new(record).await {
                Ok(_) => true,
                Err(err) => {
                    warn!("Skipping statement record: {}", err);
                    false
                }
            }
        });
        let outcomes = futures::future::join_all(attempts).await;

        let num_imported = outcomes.iter().filter(|imported| **imported).count();
        let num_skipped = outcomes.len() - num_imported;

        account.add_balance_record(parsed.balance.date_time, parsed.balance.amount);
        self.account_repository.put(&account).await?;

        debug!(
            "Imported statement for account {}: {} imported, {} skipped",
            account_id, num_imported, num_skipped
        );
        Ok(ImportResult {
            num_imported,
            num_skipped,
        })
    }

    async fn fetch_transaction_link_candidates(
        &self,
        transaction: &Transaction,
    ) -> Result<Vec<Transaction>> {
        let negated_amount = -transaction.amount;
        let mut candidates = self.repository.find_by_amount(&negated_amount).await?;
        self.hydrate_accounts(&mut candidates).await?;
        Ok(candidates)
    }

    async fn link_transactions(&self, t1: Transaction, t2: Transaction) -> Result<()> {
        let mut t1 = t1;
        let mut t2 = t2;
        t1.linked_to = Some(t2.id.clone());
        t1.category_id = Some(INTERNAL_TRANSFER_CATEGORY_ID.to_string());
        t2.linked_to = Some(t1.id.clone());
        t2.category_id = Some(INTERNAL_TRANSFER_CATEGORY_ID.to_string());

        // Two independent writes with no cross-document transaction; a
        // failure between them leaves one side linked and the other not.
        self.repository.put(&t1).await?;
        self.repository.put(&t2).await
    }

    async fn sum_by_type(&self, range: &DateRange) -> Result<TransactionTypeTotals> {
        let credit = self
            .repository
            .sum_for_type(TransactionType::Credit, range)
            .await?
            .unwrap_or(Decimal::ZERO);
        let debit = self
            .repository
            .sum_for_type(TransactionType::Debit, range)
            .await?
            .unwrap_or(Decimal::ZERO);
        Ok(TransactionTypeTotals { credit, debit })
    }

    async fn sum_by_category(&self, range: &DateRange) -> Result<CategorySummary> {
        let sums = self.repository.sums_by_category(range).await?;
        let categories = fetch_associated(sums.keys().cloned(), |id| async move {
            self.category_repository.get_by_id(&id).await
        })
        .await?;

        let mut income_categories = Vec::new();
        let mut expenses_categories = Vec::new();
        for (category_id, amount) in sums {
            // Categories deleted since the view was built drop out of the
            // summary.
            let Some(category) = categories.get(&category_id) else {
                continue;
            };
            let entry = CategorySummaryEntry {
                category_id,
                category_name: category.name.clone(),
                category_type: category.category_type,
                parent_category_id: category.parent.clone(),
                amount,
            };
            match category.category_type {
                CategoryType::Income => income_categories.push(entry),
                CategoryType::Expense => expenses_categories.push(entry),
            }
        }

        // Largest income first; most negative (largest) expense first.
        income_categories.sort_by(|a, b| b.amount.cmp(&a.amount));
        expenses_categories.sort_by(|a, b| a.amount.cmp(&b.amount));

        Ok(CategorySummary {
            income_categories,
            expenses_categories,
        })
    }

    async fn fetch_uncategorized_transactions_count(&self, range: &DateRange) -> Result<usize> {
        self.repository
            .count(&uncategorized_count_query(range))
            .await
    }
}
