//! # Bridge URL
//!
//! Encodes navigation targets of a Faces application running inside a portlet
//! container. A target string plus a parameter table becomes exactly one of:
//! - Container action, render or resource URLs
//! - Action/render URLs navigating to another view with mode, state and security
//! - Plain strings (opaque, external, relative and redirect targets)
//!
//! The resource encoder walks a fixed chain of classification rules, first
//! match wins (see [`rules::RULES`]). The container and view mapping are
//! reached through the [`UrlFactory`] and [`ViewResolver`] traits.
//!
//! ## Example
//!
//! ```
//! use bridge_url::{
//!     BaseUrl, BridgeConfig, BridgeContext, BridgeResourceUrl, EncodedUrl, PortalUrlFactory,
//!     ServletMappingResolver,
//! };
//! use bridge_uri::PortletPhase;
//!
//! let config = BridgeConfig::default().with_context_path("/app");
//! let resolver = ServletMappingResolver::from_config(&config);
//! let factory = PortalUrlFactory::from_config(&config);
//! let ctx = BridgeContext::new(PortletPhase::Render).with_context_path("/app");
//!
//! let url = BridgeResourceUrl::parse("../img/logo.png", &config, &resolver).unwrap();
//! let encoded = url.to_encoded_url(&ctx, &factory).unwrap();
//! assert!(matches!(encoded, EncodedUrl::Relative(_)));
//! assert_eq!(encoded.to_url_string(), "/app/img/logo.png");
//! ```

pub mod base_url;
pub mod config;
pub mod context;
pub mod encoding;
pub mod error;
pub mod factory;
pub mod names;
pub mod parameters;
pub mod partial_action_url;
pub mod portlet_url;
pub mod redirect_url;
pub mod resource_url;
pub mod rules;
mod url_base;
pub mod view;

pub use base_url::{
    BaseUrl, EncodedExternalString, EncodedUrl, FacesTargetAction, NonEncodedString, NonFacesTargetRender,
    RelativeString,
};
pub use config::{BridgeConfig, EmptyTargetPolicy};
pub use context::{BridgeContext, PhaseOracle};
pub use error::{BridgeError, Result};
pub use factory::{PortalUrlFactory, UrlFactory};
pub use parameters::ParameterTable;
pub use partial_action_url::BridgePartialActionUrl;
pub use portlet_url::PortletUrl;
pub use redirect_url::{BridgeRedirectUrl, RedirectParameters};
pub use resource_url::{encode_resource_url, BridgeResourceUrl};
pub use rules::{Strategy, UrlTraits};
pub use url_base::is_self_referencing;
pub use view::{ServletMappingResolver, ViewResolver};
