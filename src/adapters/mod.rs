// Adapters layer: concrete implementations of the domain ports (http, search, html, storage).

pub mod html;
pub mod http;
pub mod search;
pub mod storage;

pub use html::HtmlTextExtractor;
pub use http::ReqwestFetcher;
pub use search::GoogleSearch;
pub use storage::LocalStorage;
