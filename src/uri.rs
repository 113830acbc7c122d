//! URI parsing
//!
//! The `anyURI` type delegates lexical parsing to a [`UriFactory`], so
//! callers can swap in a stricter or more lenient parser.

use std::fmt;
use url::Url;

/// Parses lexical URI forms into URI values
pub trait UriFactory: fmt::Debug + Send + Sync {
    /// Parse an absolute URI
    fn parse(&self, lexical: &str) -> Result<Url, url::ParseError>;
}

/// Default factory backed by the WHATWG URL parser
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlFactory;

impl UriFactory for UrlFactory {
    fn parse(&self, lexical: &str) -> Result<Url, url::ParseError> {
        Url::parse(lexical)
    }
}
