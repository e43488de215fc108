// File: src/factory.rs
// Purpose: Portal URL factory seam and the default portal implementation

use crate::config::BridgeConfig;
use crate::context::BridgeContext;
use crate::error::Result;
use crate::portlet_url::PortletUrl;
use bridge_uri::{BridgeUri, PortletPhase};

/// Creates container URLs from a target string
///
/// The engine calls exactly one `create_*` method per classification that
/// yields a container URL.
pub trait UrlFactory {
    fn create_action_url(&self, ctx: &BridgeContext, target: &str) -> Result<PortletUrl>;

    fn create_render_url(&self, ctx: &BridgeContext, target: &str) -> Result<PortletUrl>;

    fn create_resource_url(&self, ctx: &BridgeContext, target: &str) -> Result<PortletUrl>;

    /// Turns an application action URL (e.g., "/app/a.xhtml") into a container action URL
    fn encode_action_url(&self, ctx: &BridgeContext, url: &str) -> Result<String>;

    /// Response-level encoding applied to plain string URLs
    fn encode_url(&self, _ctx: &BridgeContext, url: &str) -> String {
        url.to_string()
    }
}

/// Builds `p_p_*` style URLs against a single portal page
#[derive(Debug, Clone)]
pub struct PortalUrlFactory {
    portal_url: String,
    portlet_id: String,
    namespace: String,
    context_path: String,
    view_id_parameter: String,
}

impl PortalUrlFactory {
    pub fn from_config(config: &BridgeConfig) -> Self {
        Self {
            portal_url: config.portlet.portal_url.clone(),
            portlet_id: config.portlet.portlet_id.clone(),
            namespace: config.portlet.namespace.clone(),
            context_path: config.portlet.context_path.clone(),
            view_id_parameter: config.parameters.view_id_render.clone(),
        }
    }

    fn create(&self, phase: PortletPhase, target: &str) -> Result<PortletUrl> {
        let uri = BridgeUri::parse(target)?;
        let mut url = PortletUrl::new(phase, &self.portal_url, &self.portlet_id, &self.namespace);
        for (name, value) in uri.query_pairs() {
            url.parameters_mut().append(name.as_str(), value.as_str());
        }
        Ok(url)
    }
}

impl UrlFactory for PortalUrlFactory {
    fn create_action_url(&self, _ctx: &BridgeContext, target: &str) -> Result<PortletUrl> {
        self.create(PortletPhase::Action, target)
    }

    fn create_render_url(&self, _ctx: &BridgeContext, target: &str) -> Result<PortletUrl> {
        self.create(PortletPhase::Render, target)
    }

    fn create_resource_url(&self, _ctx: &BridgeContext, target: &str) -> Result<PortletUrl> {
        self.create(PortletPhase::Resource, target)
    }

    fn encode_action_url(&self, ctx: &BridgeContext, url: &str) -> Result<String> {
        let uri = BridgeUri::parse(url)?;
        let mut action_url = self.create_action_url(ctx, url)?;
        if !action_url.parameters().contains(&self.view_id_parameter) {
            action_url
                .parameters_mut()
                .set(self.view_id_parameter.as_str(), uri.context_relative_path(&self.context_path));
        }
        Ok(action_url.to_url_string())
    }
}
