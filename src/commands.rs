// src/commands.rs
//! Command implementations for the mavforge CLI

use anyhow::{Context, Result};
use mavforge::{
    dependency_ranges, operations_for, BuildOptions, Compiler, Forge, ForgeConfig, Patcher,
    Platform, PluginManifest, RecipeVersion, TargetOs,
};
use std::path::{Path, PathBuf};
use std::str::FromStr;

fn parse_recipe(spec: &str) -> Result<RecipeVersion> {
    RecipeVersion::from_str(spec)
        .map_err(|_| anyhow::anyhow!("unknown recipe version '{spec}' (expected 1.4 or 2)"))
}

fn parse_os(spec: &str) -> Result<TargetOs> {
    TargetOs::from_str(spec)
        .map_err(|_| anyhow::anyhow!("unknown target OS '{spec}' (expected linux, windows or macos)"))
}

#[allow(clippy::too_many_arguments)]
pub fn cmd_build(
    recipe: &str,
    workdir: &str,
    output: &str,
    source_cache: Option<&str>,
    shared: bool,
    no_pic: bool,
    target_os: Option<&str>,
    compiler: Option<&str>,
    runtime: Option<&str>,
) -> Result<()> {
    let version = parse_recipe(recipe)?;

    let mut platform = Platform::host();
    if let Some(os) = target_os {
        platform.os = parse_os(os)?;
        platform.compiler = match platform.os {
            TargetOs::Windows => Compiler::Msvc,
            TargetOs::Macos => Compiler::Clang,
            TargetOs::Linux => Compiler::Gcc,
        };
    }
    if let Some(compiler) = compiler {
        platform.compiler = Compiler::from_str(compiler)
            .map_err(|_| anyhow::anyhow!("unknown compiler '{compiler}'"))?;
    }
    if let Some(runtime) = runtime {
        platform.runtime = Some(runtime.to_string());
    }

    let mut config = ForgeConfig {
        options: BuildOptions {
            shared,
            position_independent: !no_pic,
        },
        platform,
        ..ForgeConfig::default()
    };
    if let Some(cache) = source_cache {
        config.source_cache = PathBuf::from(cache);
    }

    let result = Forge::new(config)
        .run(version, Path::new(workdir), Path::new(output))
        .with_context(|| format!("recipe {version} failed"))?;
    println!("Package exported to {}", result.package_dir.display());
    Ok(())
}

pub fn cmd_patch(recipe: &str, root: &str, dry_run: bool) -> Result<()> {
    let version = parse_recipe(recipe)?;
    let patcher = Patcher::new(root);
    let catalog = operations_for(version);

    if dry_run {
        let previews = patcher
            .preview(&catalog)
            .context("dry-run preview failed")?;
        if previews.is_empty() {
            println!("No changes: the tree is already fully patched.");
        }
        for preview in previews {
            println!("--- {}", preview.file.display());
            println!("{}", preview.diff);
        }
    } else {
        patcher.apply_all(&catalog).context("patching failed")?;
        println!("Applied {} catalog entries.", catalog.len());
    }
    Ok(())
}

pub fn cmd_manifest(recipe: &str, target_os: &str, json: bool) -> Result<()> {
    let version = parse_recipe(recipe)?;
    let os = parse_os(target_os)?;
    let manifest = PluginManifest::for_version(version);

    if json {
        println!("{}", serde_json::to_string_pretty(&manifest.export(os))?);
        return Ok(());
    }

    println!("mavsdk {}", version.library_version());
    println!("libraries:");
    for lib in manifest.libs() {
        println!("  {lib}");
    }
    println!("include directories:");
    for dir in manifest.include_dirs() {
        println!("  {dir}");
    }
    println!("system libraries ({os}):");
    for lib in manifest.system_libs(os) {
        println!("  {lib}");
    }
    Ok(())
}

pub fn cmd_deps(recipe: &str) -> Result<()> {
    let version = parse_recipe(recipe)?;
    for dep in dependency_ranges(version) {
        println!("{} {}", dep.name, dep.requirement);
    }
    Ok(())
}
