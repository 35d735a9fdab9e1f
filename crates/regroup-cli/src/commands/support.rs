use std::io::{Read, Write};
use std::path::Path;
use std::{fs, io};

use anyhow::{Context, Result};
use regroup_core::RegroupConfig;
use regroup_core::models::to_document_json;

use crate::cli::{InputArgs, SizeArgs};

pub(super) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

/// Prints (or writes) a document in the downstream layout.
pub(super) fn emit_document<T: serde::Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = to_document_json(value)?;
    match output {
        Some(path) => write_text(path, &json),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            writeln!(stdout)?;
            Ok(())
        }
    }
}

pub(super) fn write_text(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

pub(super) fn read_payloads(input: &InputArgs) -> Result<Vec<String>> {
    if input.inputs.is_empty() && !input.stdin {
        anyhow::bail!("no input given: pass response files or --stdin");
    }
    let mut payloads = Vec::with_capacity(input.inputs.len() + usize::from(input.stdin));
    for path in &input.inputs {
        let payload = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        payloads.push(payload);
    }
    if input.stdin {
        let mut payload = String::new();
        io::stdin()
            .read_to_string(&mut payload)
            .context("failed to read stdin")?;
        payloads.push(payload);
    }
    Ok(payloads)
}

/// Layers the config: defaults or `--config` file, then environment, then flags.
pub(super) fn resolve_config(
    config_path: Option<&Path>,
    sizes: Option<&SizeArgs>,
    strict_ids: bool,
) -> Result<RegroupConfig> {
    let base = match config_path {
        Some(path) => RegroupConfig::from_toml_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => RegroupConfig::default(),
    };
    let mut config = base.with_env_overrides();
    if let Some(sizes) = sizes {
        if let Some(min_size) = sizes.min_size {
            config.min_size = min_size;
        }
        if let Some(max_size) = sizes.max_size {
            config.max_size = max_size;
        }
    }
    if strict_ids {
        config.strict_ids = true;
    }
    Ok(config)
}
