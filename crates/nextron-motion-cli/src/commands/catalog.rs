use anyhow::{Context, Result};

use nextron_motion_core::Catalog;

use crate::Format;

pub fn run(format: Format) -> Result<()> {
    let catalog = Catalog::standard();

    let output = match format {
        Format::Json => catalog.to_json()?,
        Format::Toml => toml::to_string_pretty(&catalog).context("Failed to render catalog as TOML")?,
    };

    println!("{}", output);
    Ok(())
}
