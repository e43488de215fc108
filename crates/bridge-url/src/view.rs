// File: src/view.rs
// Purpose: View resolution seam and the servlet-mapping based default

use crate::config::BridgeConfig;
use crate::context::BridgeContext;
use crate::parameters::ParameterTable;
use bridge_uri::BridgeUri;

/// Decides which targets name views of the hosted application
pub trait ViewResolver {
    /// View id named by the target, if it names a view of this application
    fn resolve(&self, uri: &BridgeUri, parameters: &ParameterTable) -> Option<String>;

    /// View currently being rendered
    fn current_view<'c>(&self, ctx: &'c BridgeContext) -> Option<&'c str> {
        ctx.view_id()
    }

    /// Application action URL for a view, before container encoding
    fn action_url(&self, ctx: &BridgeContext, view_id: &str) -> String;
}

/// Resolves views the way a servlet container maps the faces servlet
///
/// # Resolution Rules (evaluated in order)
///
/// 1. An explicit view-id parameter in the target names the view
/// 2. Opaque, external and `../` targets never name a view
/// 3. Prefix mapping: `/app/faces/a.xhtml` → `/a.xhtml`
/// 4. Extension mapping: `/app/views/a.xhtml` → `/views/a.xhtml`
///
/// ```
/// use bridge_url::{BridgeConfig, ParameterTable, ServletMappingResolver, ViewResolver};
/// use bridge_uri::BridgeUri;
///
/// let resolver = ServletMappingResolver::from_config(&BridgeConfig::default().with_context_path("/app"));
/// let uri = BridgeUri::parse("/app/views/a.xhtml?x=1").unwrap();
/// assert_eq!(resolver.resolve(&uri, &ParameterTable::new()), Some("/views/a.xhtml".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct ServletMappingResolver {
    context_path: String,
    extensions: Vec<String>,
    prefixes: Vec<String>,
    view_id_parameters: Vec<String>,
}

impl ServletMappingResolver {
    pub fn from_config(config: &BridgeConfig) -> Self {
        Self {
            context_path: config.portlet.context_path.clone(),
            extensions: config.mapping.extensions.clone(),
            prefixes: config
                .mapping
                .prefixes
                .iter()
                .map(|p| bridge_uri::normalize_context_path(p).into_owned())
                .collect(),
            view_id_parameters: vec![
                config.parameters.view_id_render.clone(),
                config.parameters.view_id_resource.clone(),
            ],
        }
    }

    fn resolve_path(&self, path: &str) -> Option<String> {
        if !path.starts_with('/') {
            return None;
        }

        let by_prefix = self.prefixes.iter().find_map(|prefix| {
            path.strip_prefix(prefix.as_str())
                .filter(|rest| rest.starts_with('/') && rest.len() > 1)
                .map(str::to_string)
        });
        if by_prefix.is_some() {
            return by_prefix;
        }

        let file_name = path.rsplit('/').next().unwrap_or_default();
        self.extensions
            .iter()
            .any(|ext| {
                file_name
                    .strip_suffix(ext.as_str())
                    .is_some_and(|stem| stem.len() > 1 && stem.ends_with('.'))
            })
            .then(|| path.to_string())
    }
}

impl ViewResolver for ServletMappingResolver {
    fn resolve(&self, uri: &BridgeUri, parameters: &ParameterTable) -> Option<String> {
        let explicit = self
            .view_id_parameters
            .iter()
            .find_map(|name| parameters.get(name))
            .filter(|view_id| !view_id.is_empty());
        if let Some(view_id) = explicit {
            return Some(view_id.to_string());
        }

        if uri.is_opaque() || uri.is_path_relative() || uri.is_external(&self.context_path) {
            return None;
        }

        self.resolve_path(uri.context_relative_path(&self.context_path))
    }

    fn action_url(&self, ctx: &BridgeContext, view_id: &str) -> String {
        match (self.extensions.is_empty(), self.prefixes.first()) {
            (true, Some(prefix)) => format!("{}{}{}", ctx.request_context_path, prefix, view_id),
            _ => format!("{}{}", ctx.request_context_path, view_id),
        }
    }
}
