// File: src/url_base.rs
// Purpose: State and parameter primitives shared by the resource, redirect and partial-action encoders

use crate::base_url::NonEncodedString;
use crate::config::{BridgeConfig, EmptyTargetPolicy};
use crate::context::BridgeContext;
use crate::error::{BridgeError, Result};
use crate::parameters::ParameterTable;
use crate::view::ViewResolver;
use bridge_uri::BridgeUri;

/// A parsed target, its parameter table and the view it names
#[derive(Debug, Clone)]
pub(crate) struct UrlBase<'a> {
    pub uri: BridgeUri,
    pub parameters: ParameterTable,
    /// Table as parsed from the target, before any override or mutation
    original_parameters: ParameterTable,
    pub config: &'a BridgeConfig,
    pub view_target: Option<String>,
    /// Name under which the view id travels in the exported target
    pub view_id_parameter: String,
}

impl<'a> UrlBase<'a> {
    /// Parses `raw` and merges `overrides` over its query; the view target is
    /// resolved after the merge
    pub fn new(
        raw: &str,
        overrides: Option<&ParameterTable>,
        config: &'a BridgeConfig,
        resolver: Option<&dyn ViewResolver>,
    ) -> Result<Self> {
        if raw.trim().is_empty() && config.encoding.empty_target == EmptyTargetPolicy::Reject {
            return Err(BridgeError::MalformedTarget("empty target".to_string()));
        }

        let uri = BridgeUri::parse(raw)?;
        let mut parameters = ParameterTable::with_namespace(config.portlet.namespace.clone());
        for (name, value) in uri.query_pairs() {
            parameters.append(name.as_str(), value.as_str());
        }
        let original_parameters = parameters.clone();
        if let Some(overrides) = overrides {
            parameters.merge(overrides);
        }

        let view_target = resolver.and_then(|r| r.resolve(&uri, &parameters));

        Ok(Self {
            uri,
            parameters,
            original_parameters,
            config,
            view_target,
            view_id_parameter: config.parameters.view_id_render.clone(),
        })
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name)
    }

    /// Resolved view target equals the view currently being rendered
    pub fn is_self_referencing(&self, resolver: &dyn ViewResolver, ctx: &BridgeContext) -> bool {
        is_self_referencing(self.view_target.as_deref(), resolver.current_view(ctx))
    }

    /// The raw target, rebuilt only if its parameters changed
    pub fn merged_string(&self) -> String {
        if self.parameters == self.original_parameters {
            return self.uri.as_str().to_string();
        }
        self.uri.with_query(self.parameters.pairs())
    }

    /// Target string handed to the URL factory
    ///
    /// `excluded` parameters are dropped. Any view-id parameter is replaced by
    /// the resolved view target under `view_id_parameter`.
    pub fn to_target_string(&self, excluded: &[&str]) -> String {
        self.to_target_string_as(excluded, &self.view_id_parameter)
    }

    /// Like [`UrlBase::to_target_string`] with an explicit view-id parameter name
    pub fn to_target_string_as(&self, excluded: &[&str], view_id_parameter: &str) -> String {
        let names = &self.config.parameters;
        let mut dropped: Vec<&str> = excluded.to_vec();
        dropped.push(names.view_id_render.as_str());
        dropped.push(names.view_id_resource.as_str());

        let mut exported = self.parameters.export_excluding(&dropped);
        if let Some(view_id) = &self.view_target {
            exported.set(view_id_parameter, view_id.as_str());
        }
        self.uri.with_query(exported.pairs())
    }

    /// Empty target under the pass-through policy
    pub fn is_empty_target(&self) -> bool {
        self.uri.is_empty()
    }

    pub fn empty_target_url(&self) -> NonEncodedString {
        tracing::warn!("Unable to encode URL for an empty target, passing it through");
        NonEncodedString::new("", self.parameters.clone())
    }
}

/// Self-reference detector
///
/// ```
/// use bridge_url::is_self_referencing;
///
/// assert!(is_self_referencing(Some("/a.xhtml"), Some("/a.xhtml")));
/// assert!(!is_self_referencing(Some("/a.xhtml"), Some("/b.xhtml")));
/// assert!(!is_self_referencing(None, None));
/// ```
pub fn is_self_referencing(view_target: Option<&str>, current_view: Option<&str>) -> bool {
    matches!((view_target, current_view), (Some(target), Some(current)) if target == current)
}

/// Lenient boolean for flag parameters (`true`, `yes`, `y`, `1`, `on`)
pub(crate) fn to_boolean(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "y" | "1" | "on"
    )
}
