use std::path::Path;
use crate::catalog::ScenarioCatalog;
use crate::errors::VulnprobeError;
use super::commands::ValidateArgs;

pub async fn handle_validate(args: ValidateArgs) -> Result<i32, VulnprobeError> {
    let catalog = ScenarioCatalog::load(Path::new(&args.scenarios))?;
    let registry = catalog.into_registry()?;
    println!(
        "Catalog is valid: {} scenarios in {}",
        registry.len(),
        args.scenarios
    );
    Ok(0)
}
