//! `tbgen templates` — List the template catalog.

use std::path::Path;
use tbgen_render::RenderError;

pub fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    let catalog = super::load_catalog(&config)?;

    if catalog.is_empty() {
        let err = RenderError::EmptyCatalog {
            dir: catalog.dir().to_path_buf(),
        };
        super::print_failure(&err, false);
        eprintln!(
            "  hint: templates are files ending in .{}; run `tbgen init` for a starter",
            config.templates.extension
        );
        std::process::exit(1);
    }

    let default = catalog.default_template();
    println!("Templates in {} ({}):\n", catalog.dir().display(), catalog.len());
    for name in catalog.names() {
        let marker = if Some(name) == default { "*" } else { " " };
        println!("  {marker} {name}");
    }
    Ok(())
}
