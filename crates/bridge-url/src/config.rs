// File: src/config.rs
// Purpose: Configuration parsing from bridge.toml

use crate::names;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Bridge configuration, immutable once loaded
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BridgeConfig {
    #[serde(default)]
    pub portlet: PortletConfig,

    #[serde(default)]
    pub parameters: ParameterNames,

    #[serde(default)]
    pub mapping: MappingConfig,

    #[serde(default)]
    pub encoding: EncodingConfig,
}

/// Where the portlet lives inside the portal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortletConfig {
    /// Context path of the portlet application (e.g., "/app")
    #[serde(default)]
    pub context_path: String,

    /// Prefix the container applies to this portlet's parameters
    #[serde(default)]
    pub namespace: String,

    /// Portal page the container URLs point at
    #[serde(default = "default_portal_url")]
    pub portal_url: String,

    #[serde(default = "default_portlet_id")]
    pub portlet_id: String,
}

/// Names of the parameters the bridge reserves or injects
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParameterNames {
    #[serde(default = "default_portlet_mode")]
    pub portlet_mode: String,

    #[serde(default = "default_window_state")]
    pub window_state: String,

    #[serde(default = "default_secure")]
    pub secure: String,

    #[serde(default = "default_back_link")]
    pub back_link: String,

    #[serde(default = "default_view_link")]
    pub view_link: String,

    #[serde(default = "default_in_protocol")]
    pub in_protocol: String,

    /// View-id parameter carried by action and render URLs
    #[serde(default = "default_view_id_render")]
    pub view_id_render: String,

    /// View-id parameter carried by resource and partial-action URLs
    #[serde(default = "default_view_id_resource")]
    pub view_id_resource: String,

    #[serde(default = "default_non_faces_view")]
    pub non_faces_view: String,

    #[serde(default = "default_ajax_redirect")]
    pub ajax_redirect: String,
}

/// How context paths map to views (servlet-style mappings)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MappingConfig {
    /// Extension mappings without the dot (e.g., "xhtml" for `*.xhtml`)
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Path prefix mappings (e.g., "/faces" for `/faces/*`)
    #[serde(default = "default_prefixes")]
    pub prefixes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EncodingConfig {
    #[serde(default = "default_charset")]
    pub charset: String,

    #[serde(default)]
    pub empty_target: EmptyTargetPolicy,
}

/// What to do with an empty target string
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyTargetPolicy {
    /// Fail with a malformed-target error
    #[default]
    Reject,
    /// Log a warning and encode to an empty string
    PassThrough,
}

// Default values
fn default_portal_url() -> String {
    "/web/guest/home".to_string()
}

fn default_portlet_id() -> String {
    "bridge_portlet".to_string()
}

fn default_portlet_mode() -> String {
    names::PORTLET_MODE_PARAMETER.to_string()
}

fn default_window_state() -> String {
    names::WINDOW_STATE_PARAMETER.to_string()
}

fn default_secure() -> String {
    names::SECURE_PARAMETER.to_string()
}

fn default_back_link() -> String {
    names::BACK_LINK_PARAMETER.to_string()
}

fn default_view_link() -> String {
    names::VIEW_LINK_PARAMETER.to_string()
}

fn default_in_protocol() -> String {
    names::IN_PROTOCOL_RESOURCE_LINK_PARAMETER.to_string()
}

fn default_view_id_render() -> String {
    names::VIEW_ID_RENDER_PARAMETER.to_string()
}

fn default_view_id_resource() -> String {
    names::VIEW_ID_RESOURCE_PARAMETER.to_string()
}

fn default_non_faces_view() -> String {
    names::NON_FACES_VIEW_PARAMETER.to_string()
}

fn default_ajax_redirect() -> String {
    names::AJAX_REDIRECT_PARAMETER.to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["xhtml".to_string(), "faces".to_string()]
}

fn default_prefixes() -> Vec<String> {
    vec!["/faces".to_string()]
}

fn default_charset() -> String {
    "UTF-8".to_string()
}

// Default implementations
impl Default for PortletConfig {
    fn default() -> Self {
        Self {
            context_path: String::new(),
            namespace: String::new(),
            portal_url: default_portal_url(),
            portlet_id: default_portlet_id(),
        }
    }
}

impl Default for ParameterNames {
    fn default() -> Self {
        Self {
            portlet_mode: default_portlet_mode(),
            window_state: default_window_state(),
            secure: default_secure(),
            back_link: default_back_link(),
            view_link: default_view_link(),
            in_protocol: default_in_protocol(),
            view_id_render: default_view_id_render(),
            view_id_resource: default_view_id_resource(),
            non_faces_view: default_non_faces_view(),
            ajax_redirect: default_ajax_redirect(),
        }
    }
}

impl ParameterNames {
    /// Mode, security and window-state: stripped from every exported URL
    pub fn reserved(&self) -> [&str; 3] {
        [
            self.portlet_mode.as_str(),
            self.secure.as_str(),
            self.window_state.as_str(),
        ]
    }
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            prefixes: default_prefixes(),
        }
    }
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            charset: default_charset(),
            empty_target: EmptyTargetPolicy::Reject,
        }
    }
}

impl BridgeConfig {
    /// Load configuration from bridge.toml
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: BridgeConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Builder-style override of the portlet context path
    pub fn with_context_path(mut self, context_path: impl Into<String>) -> Self {
        self.portlet.context_path = context_path.into();
        self
    }

    /// Builder-style override of the portlet namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.portlet.namespace = namespace.into();
        self
    }
}
