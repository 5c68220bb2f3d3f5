//! End-to-end tests for tbgen.
//!
//! These exercise the full pipeline from raw session rows to rendered
//! testbench text, first through the library crates and then through the
//! `tbgen` binary itself.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::json;
use tbgen_core::{AgentSpec, GenerationRequest, TestbenchContext};
use tbgen_render::{ErrorKind, Generator, RenderError, TemplateCatalog, TemplateRenderer};

const FLAT_TEMPLATE: &str = "\
tb {{name}}
{{#each agents}}
{{this.kind}} {{this.name}} {{this.instance_name}}
{{/each}}
";

fn apb_session() -> serde_json::Value {
    json!({
        "name": "apb",
        "existing_agents": [
            {"instance_name": "", "agent": "", "interface": "", "driver": "",
             "monitor": "", "sequencer": "", "sequence": ""},
            {"agent": "apb_agent", "instance_name": "apb_agent_i", "interface": "apb_if",
             "driver": "", "monitor": "", "sequencer": "", "sequence": ""}
        ],
        "new_agents": [
            {"name": "spi", "instance_name": "", "integrate": true},
            {"name": "   ", "instance_name": "ghost_i", "integrate": true}
        ]
    })
}

fn starter_template_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("templates")
}

// ── Library pipeline ─────────────────────────────────────────────────────

#[test]
fn e2e_session_to_context() {
    let request: GenerationRequest = serde_json::from_value(apb_session()).unwrap();
    let ctx = request.context();

    assert_eq!(ctx.name(), "apb");
    assert_eq!(ctx.existing_agents().len(), 1);
    assert_eq!(ctx.new_agents().len(), 1);
    assert_eq!(ctx.agents().len(), 2);

    match &ctx.agents()[0] {
        AgentSpec::Existing(a) => {
            assert_eq!(a.name(), "apb_agent");
            assert_eq!(a.instance_name(), "apb_agent_i");
            assert_eq!(a.interface(), "apb_if");
        }
        other => panic!("expected existing agent first, got {other:?}"),
    }
    match &ctx.agents()[1] {
        AgentSpec::New(a) => {
            assert_eq!(a.instance_name(), "spi_i");
            assert!(a.integrate());
        }
        other => panic!("expected new agent second, got {other:?}"),
    }
}

#[test]
fn e2e_render_flat_template() {
    let request: GenerationRequest = serde_json::from_value(apb_session()).unwrap();
    let catalog = TemplateCatalog::from_sources([("flat.sv.hbs", FLAT_TEMPLATE)]);
    let generator = Generator::new(TemplateRenderer::new(catalog), "sv");

    let file = generator.generate_request(None, &request).unwrap();
    assert_eq!(file.file_name, "apb_tb.sv");
    assert!(file.contents.contains("existing apb_agent apb_agent_i"));
    assert!(file.contents.contains("new spi spi_i"));
}

#[test]
fn e2e_export_reingest_render_matches() {
    let request: GenerationRequest = serde_json::from_value(apb_session()).unwrap();
    let original = request.context();
    let reloaded = TestbenchContext::from_json(&original.to_json().unwrap()).unwrap();
    assert_eq!(reloaded, original);

    let catalog = TemplateCatalog::load(&starter_template_dir(), "hbs").unwrap();
    let renderer = TemplateRenderer::new(catalog);
    assert_eq!(
        renderer.render("tb.sv.hbs", &original).unwrap(),
        renderer.render("tb.sv.hbs", &reloaded).unwrap()
    );
}

#[test]
fn e2e_schema_drift_fails_loudly() {
    let request: GenerationRequest = serde_json::from_value(apb_session()).unwrap();
    let catalog = TemplateCatalog::from_sources([(
        "drift.sv.hbs",
        "{{#each agents}}{{this.name}}: {{this.driver}}\n{{/each}}",
    )]);
    let generator = Generator::new(TemplateRenderer::new(catalog), "sv");

    // The new agent has no `driver`; nothing may be rendered.
    let err = generator.generate_request(None, &request).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RenderFailure);
    assert!(matches!(err, RenderError::Undefined { .. }));
    assert!(err.report().detail.contains("driver"));
}

// ── Binary ───────────────────────────────────────────────────────────────

struct Workspace {
    dir: tempfile::TempDir,
}

impl Workspace {
    fn new(templates: &[(&str, &str)]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let template_dir = dir.path().join("templates");
        std::fs::create_dir_all(&template_dir).unwrap();
        for (name, body) in templates {
            std::fs::write(template_dir.join(name), body).unwrap();
        }
        std::fs::write(
            dir.path().join("config.toml"),
            format!(
                "[templates]\ndir = {:?}\n",
                template_dir.display().to_string()
            ),
        )
        .unwrap();
        std::fs::write(dir.path().join("session.json"), apb_session().to_string()).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn tbgen(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_tbgen"))
            .arg("--config")
            .arg(self.path("config.toml"))
            .args(args)
            .env_remove("TBGEN_TEMPLATE_DIR")
            .env_remove("TBGEN_TEMPLATE")
            .env_remove("TBGEN_OUTPUT_EXT")
            .env("RUST_LOG", "off")
            .output()
            .unwrap()
    }
}

#[test]
fn cli_render_to_stdout() {
    let ws = Workspace::new(&[("tb.sv.hbs", FLAT_TEMPLATE)]);
    let session = ws.path("session.json");
    let out = ws.tbgen(&["render", "--input", session.to_str().unwrap()]);

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.starts_with("tb apb"));
    assert!(stdout.contains("new spi spi_i"));
}

#[test]
fn cli_render_writes_named_file() {
    let ws = Workspace::new(&[("tb.sv.hbs", FLAT_TEMPLATE)]);
    let session = ws.path("session.json");
    let out_dir = ws.path("out");
    let out = ws.tbgen(&[
        "render",
        "--input",
        session.to_str().unwrap(),
        "--name",
        "uart",
        "--out-dir",
        out_dir.to_str().unwrap(),
    ]);

    assert!(out.status.success());
    let text = std::fs::read_to_string(out_dir.join("uart_tb.sv")).unwrap();
    assert!(text.starts_with("tb uart"));
}

#[test]
fn cli_undefined_reference_reports_and_writes_nothing() {
    let ws = Workspace::new(&[("tb.sv.hbs", "{{agents.0.missing_field}}")]);
    let session = ws.path("session.json");
    let out_dir = ws.path("out");
    let out = ws.tbgen(&[
        "render",
        "--input",
        session.to_str().unwrap(),
        "--out-dir",
        out_dir.to_str().unwrap(),
        "--json-errors",
    ]);

    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    assert!(!out_dir.join("apb_tb.sv").exists());

    let stderr = String::from_utf8(out.stderr).unwrap();
    let start = stderr.find('{').unwrap();
    let end = stderr.rfind('}').unwrap();
    let report: serde_json::Value = serde_json::from_str(&stderr[start..=end]).unwrap();
    assert_eq!(report["kind"], "render_failure");
    assert!(report["detail"].as_str().unwrap().contains("missing_field"));
}

#[test]
fn cli_unknown_template_is_lookup_failure() {
    let ws = Workspace::new(&[("tb.sv.hbs", "{{name}}")]);
    let session = ws.path("session.json");
    let out = ws.tbgen(&[
        "render",
        "--input",
        session.to_str().unwrap(),
        "--template",
        "nope.sv.hbs",
    ]);

    assert!(!out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("error[lookup_failure]"));
    assert!(stderr.contains("tb.sv.hbs"));
}

#[test]
fn cli_empty_catalog_is_reported() {
    let ws = Workspace::new(&[]);
    let out = ws.tbgen(&["templates"]);
    assert!(!out.status.success());
    assert!(String::from_utf8(out.stderr).unwrap().contains("no templates found"));
}

#[test]
fn cli_context_export_then_render_from_export() {
    let ws = Workspace::new(&[("tb.sv.hbs", FLAT_TEMPLATE)]);
    let session = ws.path("session.json");
    let export_dir = ws.path("exports");
    std::fs::create_dir_all(&export_dir).unwrap();

    let out = ws.tbgen(&[
        "context",
        "--input",
        session.to_str().unwrap(),
        "--out",
        export_dir.to_str().unwrap(),
    ]);
    assert!(out.status.success());

    let export = export_dir.join("tb_inputs.json");
    let ctx = TestbenchContext::from_json(&std::fs::read_to_string(&export).unwrap()).unwrap();
    assert_eq!(ctx.agents().len(), 2);

    let out = ws.tbgen(&["render", "--context", export.to_str().unwrap()]);
    assert!(out.status.success());
    assert!(String::from_utf8(out.stdout).unwrap().contains("existing apb_agent apb_agent_i"));
}

#[test]
fn cli_templates_marks_default() {
    let ws = Workspace::new(&[("tb.sv.hbs", "x"), ("agent.sv.hbs", "y")]);
    let out = ws.tbgen(&["templates"]);
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("* tb.sv.hbs"));
    assert!(stdout.contains("  agent.sv.hbs"));
}
