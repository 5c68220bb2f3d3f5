//! `tbgen context` — Build the testbench context and export it as JSON.

use std::path::Path;
use tbgen_core::GenerationRequest;
use tbgen_core::agent::AgentKind;
use tbgen_core::context::count_by_kind;

pub fn run(
    config_path: Option<&Path>,
    input: &Path,
    name: Option<String>,
    out: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;

    let mut request = GenerationRequest::load(input)?;
    if let Some(name) = name {
        request = request.with_name(name);
    }
    let context = request.context();
    let json = context.to_json()?;

    let Some(out) = out else {
        println!("{json}");
        return Ok(());
    };

    let path = if out.is_dir() {
        out.join(&config.output.export_file_name)
    } else {
        out.to_path_buf()
    };
    std::fs::write(&path, format!("{json}\n"))?;

    println!(
        "Wrote {} ({} existing, {} new agent(s))",
        path.display(),
        count_by_kind(context.agents(), AgentKind::Existing),
        count_by_kind(context.agents(), AgentKind::New),
    );
    Ok(())
}
