mod catalog;
mod transaction;

pub use self::catalog::{CatalogHttpClientTrait, DynCatalogHttpClient};
pub use self::transaction::{DynTransactionHttpClient, TransactionHttpClientTrait};
