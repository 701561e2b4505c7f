use anyhow::{anyhow, Result};

use nextron_motion_core::library::stagger_container;
use nextron_motion_core::{Catalog, StaggerTier};
use nextron_motion_runtime::SectionReveal;

pub fn run(children: usize, stagger: &str, delay: f64, child: &str) -> Result<()> {
    let tier = StaggerTier::from_name(stagger).ok_or_else(|| {
        let names: Vec<_> = StaggerTier::ALL.iter().map(|t| t.name()).collect();
        anyhow!("Unknown stagger tier '{}' (expected one of: {})", stagger, names.join(", "))
    })?;
    if delay.is_nan() || delay < 0.0 {
        return Err(anyhow!("Delay must be a non-negative number of seconds"));
    }

    let catalog = Catalog::standard();
    let variant = catalog.variant(child)?;

    let reveal = SectionReveal::new(stagger_container(tier, delay))
        .children(std::iter::repeat(variant.clone()).take(children));

    println!(
        "Stagger {} ({}s) after {}s, {} x {}:\n",
        tier.name(),
        tier.secs(),
        delay,
        children,
        variant.name
    );

    for (index, offset) in reveal.child_start_offsets().iter().enumerate() {
        println!("  child {:>2}  starts at {:.3}s", index, offset);
    }

    println!("\nSection settles after {:.3}s", reveal.total_duration());

    Ok(())
}
