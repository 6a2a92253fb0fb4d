use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

/// Refuse to write commands over the dhcpd.conf being converted.
pub fn ensure_output_not_same(output: &Path, inputs: &[&Path]) -> Result<()> {
    let out_resolved = resolve(output)
        .with_context(|| format!("failed to resolve output path {}", output.display()))?;

    for input in inputs {
        let in_resolved = resolve(input)
            .with_context(|| format!("failed to resolve input path {}", input.display()))?;
        if out_resolved == in_resolved {
            bail!(
                "refusing to overwrite input file: output {} is the same file as {}",
                output.display(),
                input.display()
            );
        }
    }
    Ok(())
}

/// Canonical path for existing files. For a file that does not exist yet the
/// parent directory is canonicalized instead and the file name re-attached.
fn resolve(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return path
            .canonicalize()
            .with_context(|| format!("canonicalize {}", path.display()));
    }

    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => std::env::current_dir().context("current_dir")?,
    };
    let parent = parent.canonicalize().unwrap_or(parent);
    Ok(match path.file_name() {
        Some(name) => parent.join(name),
        None => parent,
    })
}
