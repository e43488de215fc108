use anyhow::{Context, Result};
use bridge_url::{BridgeResourceUrl, PortalUrlFactory, ServletMappingResolver};
use colored::Colorize;

use super::{build_context, load_config, print_encoded};
use crate::RequestArgs;

pub fn execute(request: &RequestArgs, target: &str, view_link: bool, in_protocol: bool) -> Result<()> {
    let config = load_config(request)?;
    let ctx = build_context(request, &config);
    let resolver = ServletMappingResolver::from_config(&config);
    let factory = PortalUrlFactory::from_config(&config);

    println!("{}", "Encoding resource URL...".green().bold());
    println!();

    let mut url = BridgeResourceUrl::parse(target, &config, &resolver)
        .with_context(|| format!("Failed to parse target: {}", target))?;
    if view_link {
        url.set_view_link(true);
    }
    if in_protocol {
        url.set_in_protocol(true);
    }
    if url.parameters().contains(&config.parameters.back_link) {
        let (key, _) = url.replace_back_link_parameter(&ctx, &factory)?;
        println!("{} {}", "Back link:".bold(), key);
    }

    let encoded = url.to_encoded_url(&ctx, &factory)?;
    print_encoded(target, &encoded);

    Ok(())
}
