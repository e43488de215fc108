use anyhow::{Context, Result};
use bridge_url::{BridgeRedirectUrl, RedirectParameters};
use colored::Colorize;
use tracing::debug;

use super::{build_context, load_config, print_encoded};
use crate::RequestArgs;

pub fn execute(request: &RequestArgs, target: &str, params: &[(String, String)], clear: &[String]) -> Result<()> {
    let config = load_config(request)?;
    let ctx = build_context(request, &config);

    println!("{}", "Encoding redirect URL...".green().bold());
    println!();

    let redirect_parameters = redirect_parameters(params, clear);
    debug!(count = redirect_parameters.len(), "merging redirect parameters");
    let url = BridgeRedirectUrl::new(&ctx, target, Some(&redirect_parameters), &config)
        .with_context(|| format!("Failed to parse target: {}", target))?;
    let encoded = url.to_encoded_url(&ctx)?;
    print_encoded(target, &encoded);

    Ok(())
}

/// Repeated names accumulate; cleared names map to `None`
fn redirect_parameters(params: &[(String, String)], clear: &[String]) -> RedirectParameters {
    let mut redirect_parameters = RedirectParameters::new();
    for (name, value) in params {
        redirect_parameters
            .entry(name.clone())
            .or_insert_with(|| Some(Vec::new()))
            .get_or_insert_with(Vec::new)
            .push(value.clone());
    }
    for name in clear {
        redirect_parameters.insert(name.clone(), None);
    }
    redirect_parameters
}
