//! Transactions module - query, import, and reconciliation engine.

mod checksum;
mod statement;
mod transactions_constants;
mod transactions_errors;
mod transactions_model;
mod transactions_query;
mod transactions_repository;
mod transactions_service;
mod transactions_traits;


pub use checksum::compute_checksum;
pub use statement::{ParsedStatement, StatementBalance, StatementParser};
pub use transactions_constants::*;
pub use transactions_errors::TransactionError;
pub use transactions_model::{
    CategorySummary, CategorySummaryEntry, DateRange, FetchOptions, ImportResult,
    NewTransaction, PaginationResult, Pagination, Transaction, TransactionFilters,
    TransactionType, TransactionTypeTotals, TransactionUpdate,
};
pub use transactions_query::{
    checksum_query, compose_fetch_query, uncategorized_count_query,
};
pub use transactions_repository::TransactionRepository;
pub use transactions_service::TransactionService;
pub use transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
