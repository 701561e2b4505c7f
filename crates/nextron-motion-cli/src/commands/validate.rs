use anyhow::Result;

use nextron_motion_core::{Catalog, MotionConfig};

pub fn run(config: &MotionConfig) -> Result<()> {
    let catalog = Catalog::standard();

    catalog.validate()?;
    println!(
        "Tokens OK: {} easings, {} durations, {} staggers, {} distances",
        catalog.tokens.easings.len(),
        catalog.tokens.durations.len(),
        catalog.tokens.staggers.len(),
        catalog.tokens.distances.len()
    );
    println!(
        "Library OK: {} variants, {} interactions, {} ambient loops",
        catalog.variants.len(),
        catalog.interactions.len(),
        catalog.ambient.len()
    );

    config.validate()?;
    println!("Config OK: {}", MotionConfig::config_path().display());

    Ok(())
}
