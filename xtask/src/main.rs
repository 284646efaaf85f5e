//! Developer tasks (schema generation, fixture conformance, explain coverage).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use lockguard_test_util::normalize_nondeterministic;
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .or_else(|_| std::env::current_dir())
        .unwrap_or_else(|_| PathBuf::from("."));

    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(manifest_dir)
    } else {
        manifest_dir
    }
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

fn fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(lockguard_types::LockguardReport)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(lockguard_settings::LockguardConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "lockguard.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "lockguard.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn report_validator() -> anyhow::Result<jsonschema::Validator> {
    let schema_value = serde_json::to_value(generate_report_schema())
        .context("Failed to convert report schema to JSON")?;
    jsonschema::draft7::new(&schema_value)
        .map_err(|e| anyhow::anyhow!("Failed to compile schema: {}", e))
}

/// Emit schemas to the schemas/ directory.
fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Validate that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {}", name);
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {}", name);
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Validate golden fixture reports against the report schema");
    eprintln!("  conform-full      Run the lockguard binary on every fixture and check its reports");
    eprintln!("  explain-coverage  Validate all rule IDs and codes have explanations");
}

fn fixture_dirs() -> anyhow::Result<Vec<PathBuf>> {
    let dir = fixtures_dir();
    let mut dirs = Vec::new();
    for entry in fs::read_dir(&dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn fixture_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

fn read_json(path: &Path) -> anyhow::Result<serde_json::Value> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Golden reports must validate and must already be in normalized form.
fn conform() -> anyhow::Result<()> {
    let validator = report_validator()?;
    let mut errors = Vec::new();
    let mut checked = 0;

    for fixture in fixture_dirs()? {
        let golden_path = fixture.join("expected.report.json");
        if !golden_path.exists() {
            continue;
        }
        let name = fixture_name(&fixture);
        let value = read_json(&golden_path)?;

        for err in validator.iter_errors(&value) {
            errors.push(format!("{}: schema validation: {}", name, err));
        }
        if normalize_nondeterministic(value.clone()) != value {
            errors.push(format!(
                "{}: golden report contains real timestamps or tool version",
                name
            ));
        }
        checked += 1;
    }

    if !errors.is_empty() {
        for err in &errors {
            eprintln!("  - {}", err);
        }
        bail!("Conformance validation failed with {} errors", errors.len());
    }

    println!("✓ {} golden reports conform", checked);
    Ok(())
}

fn conform_full() -> anyhow::Result<()> {
    conform()?;

    println!("\n--- Full conformance: lockguard binary output ---\n");

    let validator = report_validator()?;
    let lockguard_bin = project_root().join("target").join("debug").join("lockguard");
    #[cfg(target_os = "windows")]
    let lockguard_bin = lockguard_bin.with_extension("exe");

    if !lockguard_bin.exists() {
        bail!(
            "lockguard binary not found at {}.\n\
            Run `cargo build -p lockguard-cli` first.",
            lockguard_bin.display()
        );
    }

    let mut errors = Vec::new();

    for fixture in fixture_dirs()? {
        let name = fixture_name(&fixture);
        let temp_dir = tempfile::tempdir().context("Failed to create temp dir")?;
        let report_out = temp_dir.path().join("report.json");

        let output = std::process::Command::new(&lockguard_bin)
            .current_dir(&fixture)
            .arg("check")
            .arg("--report-out")
            .arg(&report_out)
            .output()
            .with_context(|| format!("Failed to run lockguard on fixture '{}'", name))?;

        // Without --ci only runtime errors exit non-zero.
        if !output.status.success() {
            errors.push(format!(
                "fixture '{}': lockguard exited with {:?}: {}",
                name,
                output.status.code(),
                String::from_utf8_lossy(&output.stderr)
            ));
            continue;
        }

        let report = read_json(&report_out)?;
        for err in validator.iter_errors(&report) {
            errors.push(format!("fixture '{}': schema validation: {}", name, err));
        }

        let golden_path = fixture.join("expected.report.json");
        if golden_path.exists() && normalize_nondeterministic(report) != read_json(&golden_path)? {
            errors.push(format!(
                "fixture '{}': output does not match expected.report.json",
                name
            ));
        }
    }

    if !errors.is_empty() {
        for err in &errors {
            eprintln!("  - {}", err);
        }
        bail!(
            "Full conformance validation failed with {} errors",
            errors.len()
        );
    }

    println!("✓ Full conformance checks passed!");
    Ok(())
}

/// Validate that all rule IDs and codes have explanations.
fn explain_coverage() -> anyhow::Result<()> {
    use lockguard_types::explain::{all_check_ids, all_codes, lookup_explanation};

    let mut errors = Vec::new();

    for (kind, identifiers) in [("Rule", all_check_ids()), ("Code", all_codes())] {
        for id in identifiers {
            match lookup_explanation(id) {
                Some(exp) => {
                    if exp.title.is_empty() {
                        errors.push(format!("{} '{}' has empty title", kind, id));
                    }
                    if exp.description.is_empty() {
                        errors.push(format!("{} '{}' has empty description", kind, id));
                    }
                    if exp.remediation.is_empty() {
                        errors.push(format!("{} '{}' has empty remediation", kind, id));
                    }
                }
                None => errors.push(format!("{} '{}' has no explanation", kind, id)),
            }
        }
    }

    if errors.is_empty() {
        println!("✓ {} rule IDs have explanations", all_check_ids().len());
        println!("✓ {} codes have explanations", all_codes().len());
        println!("\n✓ All explain coverage checks passed!");
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        bail!(
            "Explain coverage validation failed with {} errors",
            errors.len()
        )
    }
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "conform-full" => conform_full(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
