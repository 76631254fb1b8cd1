use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use ngbridge::{Blueprint, Config, DirLoader, Generator, ServiceDescriptor};

/// Build input: the host exports its registered blueprints, views and
/// services as one JSON document, together with the generator configuration
/// and the template root to scan for macros.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    #[serde(default)]
    config: Config,
    template_root: PathBuf,
    #[serde(default)]
    blueprints: Vec<Blueprint>,
    #[serde(default)]
    services: Vec<ServiceDescriptor>,
}

#[derive(Debug, Clone, Copy)]
enum Command {
    Build,
    Clean,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("[ngbridge] {err:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let (command, manifest_path, static_dir) = parse_args()?;

    let payload = fs::read_to_string(&manifest_path)
        .with_context(|| format!("failed to read manifest '{}'", manifest_path.display()))?;
    let manifest: Manifest = serde_json::from_str(&payload)
        .with_context(|| format!("invalid manifest JSON in '{}'", manifest_path.display()))?;

    let mut config = manifest.config;
    if let Some(static_dir) = static_dir {
        config.static_dir = static_dir;
    }

    let loader = DirLoader::new(&manifest.template_root);
    let mut generator = Generator::new(
        config,
        manifest.blueprints,
        manifest.services,
        Box::new(loader),
    );

    match command {
        Command::Build => {
            let output = generator.build()?;
            println!("generated {} files", output.files.len());
        }
        Command::Clean => {
            generator.clean()?;
            println!("removed generated files");
        }
    }

    Ok(())
}

fn parse_args() -> Result<(Command, PathBuf, Option<PathBuf>)> {
    const USAGE: &str = "usage: ngbridge (build|clean) --manifest <path> [--static-dir <path>]";

    let mut args = env::args().skip(1);
    let command = match args.next().as_deref() {
        Some("build") => Command::Build,
        Some("clean") => Command::Clean,
        Some(other) => anyhow::bail!("unknown command '{other}'. {USAGE}"),
        None => anyhow::bail!("missing command. {USAGE}"),
    };

    let mut manifest: Option<PathBuf> = None;
    let mut static_dir: Option<PathBuf> = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--manifest" => {
                let value = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("missing value for --manifest"))?;
                manifest = Some(PathBuf::from(value));
            }
            "--static-dir" => {
                let value = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("missing value for --static-dir"))?;
                static_dir = Some(PathBuf::from(value));
            }
            _ => anyhow::bail!("unknown argument '{arg}'. {USAGE}"),
        }
    }

    let manifest = manifest.ok_or_else(|| anyhow::anyhow!("required flag missing: --manifest <path>"))?;
    Ok((command, manifest, static_dir))
}
