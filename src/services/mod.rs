pub mod identifier_parser;
pub mod response_builder;
pub mod result_extractor;
pub mod table_matcher;
pub mod url_resolver;

pub use url_resolver::{resolve_legacy, table_index, UrlResolver};
