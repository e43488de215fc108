//! # Bridge URI
//!
//! Parsed representation of a navigation target handed to the portlet bridge:
//! - Opaque targets (`portlet:render?...`, `mailto:...`)
//! - Hierarchical targets with an authority (`https://host/x`)
//! - Context paths (`/app/views/a.xhtml`) and relative paths (`../img/a.png`)
//! - Embedded JSF resource markers (`javax.faces.resource`)
//!
//! Every predicate is computed from the raw string once, at parse time, and the
//! value is read-only afterwards.
//!
//! ## Example
//!
//! ```
//! use bridge_uri::{BridgeUri, PortletPhase};
//!
//! let uri = BridgeUri::parse("portlet:action?_facesViewIdRender=%2Fa.xhtml").unwrap();
//! assert!(uri.is_opaque());
//! assert!(uri.is_portlet_scheme());
//! assert_eq!(uri.portlet_phase(), Some(PortletPhase::Action));
//! assert_eq!(uri.query_value("_facesViewIdRender"), Some("/a.xhtml"));
//! ```

use thiserror::Error;

pub mod path;
pub mod query;
pub mod scheme;

pub use path::{context_relative_path, is_within_context, normalize_context_path};
pub use query::{encode_query, parse_query};
pub use scheme::{PortletPhase, PORTLET_SCHEME};

/// Marker the JSF resource handler embeds in every resource request path
pub const RESOURCE_MARKER: &str = "javax.faces.resource";

/// Marker as it appears once a resource URL has been encoded as a parameter
pub const ENCODED_RESOURCE_TOKEN: &str = "javax.faces.resource=";

/// Errors raised while tokenizing a raw target
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UriError {
    /// A query component is not valid percent-encoded UTF-8
    #[error("invalid percent-encoding in target component: {0}")]
    InvalidEncoding(String),
}

/// A navigation target split into scheme, path, query and fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeUri {
    raw: String,
    scheme: Option<String>,
    /// Raw target without query and fragment
    base: String,
    path: String,
    query: Vec<(String, String)>,
    fragment: Option<String>,
    opaque: bool,
    authority: bool,
}

impl BridgeUri {
    /// Tokenizes a raw target
    ///
    /// The empty string parses to a target for which every predicate is false.
    ///
    /// # Examples
    ///
    /// ```
    /// use bridge_uri::BridgeUri;
    ///
    /// let uri = BridgeUri::parse("https://example.com/a/b?x=1#top").unwrap();
    /// assert!(!uri.is_opaque());
    /// assert_eq!(uri.scheme(), Some("https"));
    /// assert_eq!(uri.path(), "/a/b");
    /// assert_eq!(uri.fragment(), Some("top"));
    /// ```
    pub fn parse(raw: &str) -> Result<Self, UriError> {
        let (before_fragment, fragment) = match raw.split_once('#') {
            Some((before, fragment)) => (before, Some(fragment.to_string())),
            None => (raw, None),
        };
        let (base, query) = before_fragment
            .split_once('?')
            .unwrap_or((before_fragment, ""));

        let (scheme, rest) = match scheme::split_scheme(base) {
            Some((scheme, rest)) => (Some(scheme.to_string()), rest),
            None => (None, base),
        };

        let opaque = scheme.is_some() && !rest.starts_with('/');
        let authority = rest.starts_with("//");
        let path = if authority {
            rest[2..].find('/').map(|i| &rest[2 + i..]).unwrap_or("")
        } else {
            rest
        };

        Ok(Self {
            raw: raw.to_string(),
            scheme,
            base: base.to_string(),
            path: path.to_string(),
            query: query::parse_query(query)?,
            fragment,
            opaque,
            authority,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.raw.trim().is_empty()
    }

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// Raw target without query and fragment
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Path component; for opaque targets, the scheme-specific part
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Decoded query parameters in the order they appear
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// First decoded value of a query parameter
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Scheme followed directly by scheme-specific data (no `/`)
    pub fn is_opaque(&self) -> bool {
        self.opaque
    }

    pub fn is_portlet_scheme(&self) -> bool {
        self.scheme
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case(PORTLET_SCHEME))
    }

    pub fn has_resource_marker(&self) -> bool {
        self.raw.contains(RESOURCE_MARKER)
    }

    /// The resource marker already appears as an encoded parameter
    pub fn is_resource_encoded(&self) -> bool {
        self.raw.find(ENCODED_RESOURCE_TOKEN).is_some_and(|i| i > 0)
    }

    pub fn is_path_relative(&self) -> bool {
        self.raw.starts_with(path::PARENT_MARKER)
    }

    /// Whether the target points outside the application at `context_path`
    ///
    /// Targets with an authority are always external, absolute paths are
    /// external when they leave the context, relative and opaque targets never
    /// are.
    ///
    /// # Examples
    ///
    /// ```
    /// use bridge_uri::BridgeUri;
    ///
    /// let inside = BridgeUri::parse("/app/views/a.xhtml").unwrap();
    /// let outside = BridgeUri::parse("/portal/img/logo.png").unwrap();
    /// assert!(!inside.is_external("/app"));
    /// assert!(outside.is_external("/app"));
    /// assert!(BridgeUri::parse("http://example.com").unwrap().is_external("/app"));
    /// ```
    pub fn is_external(&self, context_path: &str) -> bool {
        if self.opaque {
            return false;
        }
        if self.authority {
            return true;
        }
        self.path.starts_with('/') && !path::is_within_context(&self.path, context_path)
    }

    /// Phase a `portlet:` target addresses; `None` for any other target
    pub fn portlet_phase(&self) -> Option<PortletPhase> {
        if !self.is_portlet_scheme() {
            return None;
        }
        Some(scheme::classify_phase(&self.path))
    }

    /// Path with the context path prefix removed
    pub fn context_relative_path(&self, context_path: &str) -> &str {
        path::context_relative_path(&self.path, context_path)
    }

    /// Rebuilds the target with a different query, keeping base and fragment
    ///
    /// # Examples
    ///
    /// ```
    /// use bridge_uri::BridgeUri;
    ///
    /// let uri = BridgeUri::parse("/app/a.xhtml?old=1#frag").unwrap();
    /// assert_eq!(uri.with_query([("new", "2")]), "/app/a.xhtml?new=2#frag");
    /// assert_eq!(uri.with_query(Vec::<(&str, &str)>::new()), "/app/a.xhtml#frag");
    /// ```
    pub fn with_query<I, K, V>(&self, pairs: I) -> String
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let query = query::encode_query(pairs);
        let mut url = self.base.clone();
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }
        if let Some(fragment) = &self.fragment {
            url.push('#');
            url.push_str(fragment);
        }
        url
    }
}

impl std::fmt::Display for BridgeUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

impl std::str::FromStr for BridgeUri {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
