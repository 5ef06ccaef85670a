mod product;

pub use self::product::{DynProductHttpClient, ProductHttpClientTrait};
