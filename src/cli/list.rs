use std::path::Path;
use crate::catalog::ScenarioCatalog;
use crate::errors::VulnprobeError;
use super::commands::ListArgs;

pub async fn handle_list(args: ListArgs) -> Result<i32, VulnprobeError> {
    let catalog = ScenarioCatalog::load(Path::new(&args.scenarios))?;
    let registry = catalog.into_registry()?;

    for scenario in registry.list() {
        println!(
            "{:<28} {:<14} {:<13} {}",
            scenario.id,
            scenario.category,
            scenario.trigger.kind(),
            scenario.description.as_deref().unwrap_or("")
        );
    }
    println!();
    println!("{} scenarios", registry.len());

    Ok(0)
}
