pub mod command;
pub mod query;

/// Fixed page size shared by the listing endpoints of both services.
pub const TRANSACTION_PAGE_SIZE: i64 = 10;
