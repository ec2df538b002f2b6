//! File-backed inputs and outputs

pub mod lien_sheet_store;
pub mod loaders;
pub mod missing_info_store;
pub mod url_cache_store;

pub use url_cache_store::UrlCacheStore;
