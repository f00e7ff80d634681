use chrono::Utc;

use crate::config::Config;
use crate::landing::LandingRegistry;
use crate::sitemap::landing_sitemap;

pub fn cmd_sitemap(config: &Config) -> anyhow::Result<()> {
    let registry = LandingRegistry::builtin()?;
    let xml = landing_sitemap(&registry, config.site_origin(), Utc::now())?;
    println!("{xml}");
    Ok(())
}
