pub mod encode;
pub mod partial;
pub mod redirect;

use crate::RequestArgs;
use anyhow::Result;
use bridge_url::{names, BaseUrl, BridgeConfig, BridgeContext, EncodedUrl};
use colored::Colorize;
use tracing::debug;

/// Parses a `name=value` argument
pub fn parse_key_value(arg: &str) -> std::result::Result<(String, String), String> {
    match arg.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected name=value, got `{}`", arg)),
    }
}

pub fn load_config(request: &RequestArgs) -> Result<BridgeConfig> {
    let config = BridgeConfig::load(&request.config)?;
    debug!(path = ?request.config, namespace = %config.portlet.namespace, "loaded configuration");
    Ok(config)
}

/// Request context described by the command-line flags
pub fn build_context(request: &RequestArgs, config: &BridgeConfig) -> BridgeContext {
    let context_path = request
        .context_path
        .clone()
        .unwrap_or_else(|| config.portlet.context_path.clone());

    let mut ctx = BridgeContext::new(request.phase.into()).with_context_path(context_path);
    if let Some(view_id) = &request.view_id {
        ctx = ctx.with_view_id(view_id.as_str());
    }
    if request.partial {
        ctx = ctx.with_header(names::FACES_REQUEST_HEADER, "partial/ajax");
    }
    for (name, value) in &request.render_params {
        ctx = ctx.with_render_parameter(name.as_str(), value.as_str());
    }
    debug!(
        phase = ?request.phase,
        context_path = %ctx.request_context_path,
        partial = request.partial,
        "built request context"
    );
    ctx
}

pub fn print_encoded(target: &str, encoded: &EncodedUrl) {
    println!("{} {}", "Target:".bold(), target);
    println!("{} {}", "Variant:".bold(), encoded.kind().cyan());

    if let Some(portlet_url) = encoded.portlet_url() {
        println!("{} {}", "Phase:".bold(), portlet_url.phase());
        if let Some(mode) = portlet_url.portlet_mode() {
            println!("{} {}", "Mode:".bold(), mode);
        }
        if let Some(window_state) = portlet_url.window_state() {
            println!("{} {}", "Window state:".bold(), window_state);
        }
        if let Some(resource_id) = portlet_url.resource_id() {
            println!("{} {}", "Resource id:".bold(), resource_id);
        }
        if portlet_url.is_secure() {
            println!("{} yes", "Secure:".bold());
        }
    }

    println!("{} {}", "URL:".bold(), encoded.to_url_string().green());
}
