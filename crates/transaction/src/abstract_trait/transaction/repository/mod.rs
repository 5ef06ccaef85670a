mod command;
mod query;

pub use self::command::{DynTransactionCommandRepository, TransactionCommandRepositoryTrait};
pub use self::query::{DynTransactionQueryRepository, TransactionQueryRepositoryTrait};
