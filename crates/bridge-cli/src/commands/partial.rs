use anyhow::{Context, Result};
use bridge_url::{BridgePartialActionUrl, PortalUrlFactory, ServletMappingResolver};
use colored::Colorize;

use super::{build_context, load_config, print_encoded};
use crate::RequestArgs;

pub fn execute(request: &RequestArgs, target: &str) -> Result<()> {
    let config = load_config(request)?;
    let ctx = build_context(request, &config);
    let resolver = ServletMappingResolver::from_config(&config);
    let factory = PortalUrlFactory::from_config(&config);

    println!("{}", "Encoding partial action URL...".green().bold());
    println!();

    let url = BridgePartialActionUrl::new(target, &config, &resolver)
        .with_context(|| format!("Failed to parse target: {}", target))?;
    if let Some(view_id) = url.view_target() {
        println!("{} {}", "View:".bold(), view_id);
    }

    let encoded = url.to_encoded_url(&ctx, &factory)?;
    print_encoded(target, &encoded);

    Ok(())
}
