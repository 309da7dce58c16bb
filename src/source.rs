// src/source.rs

//! Source acquisition
//!
//! Downloads the pinned release archive (cached by checksum key), verifies
//! it, extracts it stripped of its top-level wrapper directory, and fetches
//! the pinned MAVLink headers by exact commit into their fixed subdirectory
//! beneath the source root. All retrieval failures are fatal here; retry
//! policy belongs to whatever invokes the recipe.

use crate::error::{Error, Result};
use crate::recipe::{source_for, RecipeVersion};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, warn};

/// Fetch everything the given recipe version needs into `root`.
///
/// After this returns, the tree layout matches what the patch catalog and
/// the configuration generator expect.
pub fn fetch(version: RecipeVersion, root: &Path, cache: &Path) -> Result<()> {
    let spec = source_for(version);

    let archive = fetch_archive(spec.archive_url, spec.archive_checksum, cache)?;
    fs::create_dir_all(root)?;
    extract_stripped(&archive, root)?;
    info!("extracted {} to {}", spec.archive_url, root.display());

    let mavlink_dir = root.join(spec.mavlink_dir);
    fetch_pinned_commit(spec.mavlink_repo, spec.mavlink_commit, &mavlink_dir)?;
    info!(
        "fetched mavlink headers at {} into {}",
        spec.mavlink_commit,
        mavlink_dir.display()
    );

    Ok(())
}

/// Download an archive with caching, keyed by its checksum
fn fetch_archive(url: &str, checksum: &str, cache: &Path) -> Result<PathBuf> {
    fs::create_dir_all(cache)?;

    let cache_key = checksum.replace(':', "_");
    let cached_path = cache.join(&cache_key);

    if cached_path.exists() {
        debug!("using cached source: {}", cached_path.display());
        if verify_checksum(&cached_path, checksum)? {
            return Ok(cached_path);
        }
        warn!("cached file checksum mismatch, re-downloading");
        fs::remove_file(&cached_path)?;
    }

    info!("downloading: {}", url);
    let temp_path = cache.join(format!("{cache_key}.tmp"));
    download_file(url, &temp_path)?;

    if !verify_checksum(&temp_path, checksum)? {
        fs::remove_file(&temp_path)?;
        return Err(Error::ChecksumMismatch {
            path: PathBuf::from(url),
            expected: checksum.to_string(),
            actual: "mismatch".to_string(),
        });
    }

    fs::rename(&temp_path, &cached_path)?;
    Ok(cached_path)
}

/// Download a file from a URL via curl
fn download_file(url: &str, dest: &Path) -> Result<()> {
    let curl = which::which("curl").map_err(|_| Error::ToolNotFound("curl".to_string()))?;
    let output = Command::new(curl)
        .arg("-fsSL")
        .arg("-o")
        .arg(dest)
        .arg(url)
        .output()
        .map_err(|e| Error::Fetch(format!("curl failed to start: {e}")))?;

    if !output.status.success() {
        return Err(Error::Fetch(format!(
            "failed to download {}: {}",
            url,
            String::from_utf8_lossy(&output.stderr)
        )));
    }
    Ok(())
}

/// Verify a `sha256:`-prefixed checksum
fn verify_checksum(path: &Path, expected: &str) -> Result<bool> {
    let Some(expected_hex) = expected.strip_prefix("sha256:") else {
        return Err(Error::Fetch(format!(
            "unsupported checksum format: {expected}"
        )));
    };
    let content = fs::read(path)?;
    let digest = Sha256::digest(&content);
    Ok(hex::encode(digest) == expected_hex)
}

/// Extract a tarball into `dest`, dropping the top-level wrapper directory
fn extract_stripped(archive: &Path, dest: &Path) -> Result<()> {
    let tar = which::which("tar").map_err(|_| Error::ToolNotFound("tar".to_string()))?;
    let output = Command::new(tar)
        .arg("-xzf")
        .arg(archive)
        .arg("--strip-components=1")
        .arg("-C")
        .arg(dest)
        .output()
        .map_err(|e| Error::Fetch(format!("tar failed to start: {e}")))?;

    if !output.status.success() {
        return Err(Error::Fetch(format!(
            "failed to extract {}: {}",
            archive.display(),
            String::from_utf8_lossy(&output.stderr)
        )));
    }
    Ok(())
}

/// Fetch one exact commit into `dest` — never a branch or tag, so the
/// checkout is reproducible regardless of upstream history rewrites
fn fetch_pinned_commit(repo: &str, commit: &str, dest: &Path) -> Result<()> {
    let git = which::which("git").map_err(|_| Error::ToolNotFound("git".to_string()))?;
    fs::create_dir_all(dest)?;

    run_git(&git, dest, &["init", "--quiet"])?;
    run_git(&git, dest, &["fetch", "--quiet", "--depth", "1", repo, commit])?;
    run_git(&git, dest, &["checkout", "--quiet", "FETCH_HEAD"])?;
    Ok(())
}

fn run_git(git: &Path, dir: &Path, args: &[&str]) -> Result<()> {
    let output = Command::new(git)
        .current_dir(dir)
        .args(args)
        .output()
        .map_err(|e| Error::Fetch(format!("git failed to start: {e}")))?;

    if !output.status.success() {
        return Err(Error::Fetch(format!(
            "git {} failed: {}",
            args.first().unwrap_or(&""),
            String::from_utf8_lossy(&output.stderr)
        )));
    }
    Ok(())
}
