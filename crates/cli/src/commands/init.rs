//! `tbgen init` — First-time setup: config file and starter template.

use std::path::Path;
use tbgen_config::AppConfig;

/// Starter UVM testbench template written by `init`.
pub const STARTER_TEMPLATE: &str = include_str!("../../templates/tb.sv.hbs");

/// Example session showing both row tables, including blank placeholders.
pub const EXAMPLE_SESSION: &str = r#"{
  "name": "apb",
  "existing_agents": [
    {
      "instance_name": "apb_agent_i",
      "agent": "apb_agent",
      "interface": "apb_if",
      "driver": "",
      "monitor": "",
      "sequencer": "",
      "sequence": ""
    }
  ],
  "new_agents": [
    { "name": "spi", "instance_name": "", "integrate": true }
  ]
}
"#;

pub fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(AppConfig::config_path);

    println!("tbgen — First-Time Setup");
    println!("========================\n");

    if let Some(dir) = config_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if !dir.exists() {
            std::fs::create_dir_all(dir)?;
            println!("✅ Created config directory: {}", dir.display());
        }
    }

    if config_path.exists() {
        println!("⚠️  Config already exists at: {}", config_path.display());
    } else {
        std::fs::write(&config_path, AppConfig::default_toml())?;
        println!("✅ Created config at: {}", config_path.display());
    }

    let config = AppConfig::load_with_overrides(&config_path)?;
    let template_dir = &config.templates.dir;
    if !template_dir.exists() {
        std::fs::create_dir_all(template_dir)?;
        println!("✅ Created template directory: {}", template_dir.display());
    }

    let starter = template_dir.join(&config.templates.default);
    if starter.exists() {
        println!("   Template exists: {}", starter.display());
    } else {
        std::fs::write(&starter, STARTER_TEMPLATE)?;
        println!("✅ Created starter template: {}", starter.display());
    }

    let session = config_path.with_file_name("session.example.json");
    if !session.exists() {
        std::fs::write(&session, EXAMPLE_SESSION)?;
        println!("✅ Created example session: {}", session.display());
    }

    println!("\n📝 Next steps:");
    println!("   tbgen context --input {}", session.display());
    println!("   tbgen render --input {}\n", session.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tbgen_core::GenerationRequest;
    use tbgen_render::{TemplateCatalog, TemplateRenderer};

    #[test]
    fn example_session_renders_with_starter_template() {
        let context = GenerationRequest::from_json(EXAMPLE_SESSION).unwrap().context();
        let renderer =
            TemplateRenderer::new(TemplateCatalog::from_sources([("tb.sv.hbs", STARTER_TEMPLATE)]));
        let text = renderer.render("tb.sv.hbs", &context).unwrap();
        assert!(text.contains("`define APB_TB_SV"));
        assert!(text.contains("apb_agent apb_agent_i;"));
        assert!(text.contains("spi_agent spi_i;"));
        assert!(text.contains("module apb_tb;"));
    }

    #[test]
    fn init_writes_config_template_and_session() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("tbgen").join("config.toml");
        let templates = dir.path().join("templates");
        std::fs::create_dir_all(config_path.parent().unwrap()).unwrap();
        std::fs::write(
            &config_path,
            format!("[templates]\ndir = {:?}\n", templates.display().to_string()),
        )
        .unwrap();

        run(Some(&config_path)).unwrap();

        assert!(templates.join("tb.sv.hbs").exists());
        assert!(config_path.with_file_name("session.example.json").exists());
    }
}
