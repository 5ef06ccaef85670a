use serde::{Deserialize, Serialize};

/// Raw product record from the external marketplace listing.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CatalogProductRecord {
    pub name: String,
    pub sku: String,
    #[serde(default)]
    pub image: String,
    pub price: f64,
    pub stock: i64,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CatalogListing {
    pub products: Vec<CatalogProductRecord>,
}
