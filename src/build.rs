//! Build orchestration.
//!
//! `collect()` runs the emitters in the fixed order {directives, routes,
//! services, app} and returns pure data; `build()` and `clean()` are the
//! only functions that touch the filesystem, and both derive their file set
//! from the same collect pass. All errors abort the whole call — a single
//! bad macro halts generation of every file in the run.

use std::fs;
use std::io::ErrorKind;

use tracing::{debug, info};

use crate::assets::AssetRegistry;
use crate::config::Config;
use crate::emit::{self, AssetRef, EmitOutput, GeneratedFile};
use crate::template::{extract_macro, TemplateLoader};
use crate::{Blueprint, BuildError, ServiceDescriptor};

/// Whether this generator has produced its output tree yet.
///
/// The transition NotBuilt → Built happens on the first `ensure_built()`
/// (typically the host's first incoming request) or an explicit `build()`;
/// it is never reset except by constructing a new generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    NotBuilt,
    Built,
}

/// Everything one build run produces, before any filesystem side effect.
#[derive(Debug)]
pub struct BuildOutput {
    pub files: Vec<GeneratedFile>,
    /// Module names accumulated for the app bootstrap, in emitter-run order.
    pub app_deps: Vec<String>,
    pub assets: Vec<AssetRef>,
}

pub struct Generator {
    config: Config,
    blueprints: Vec<Blueprint>,
    services: Vec<ServiceDescriptor>,
    loader: Box<dyn TemplateLoader>,
    assets: AssetRegistry,
    state: BuildState,
}

impl Generator {
    pub fn new(
        config: Config,
        blueprints: Vec<Blueprint>,
        services: Vec<ServiceDescriptor>,
        loader: Box<dyn TemplateLoader>,
    ) -> Self {
        let mut assets = AssetRegistry::new();
        assets.register_cdn_defaults();
        Self {
            config,
            blueprints,
            services,
            loader,
            assets,
            state: BuildState::NotBuilt,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn assets(&self) -> &AssetRegistry {
        &self.assets
    }

    pub fn state(&self) -> BuildState {
        self.state
    }

    /// Run every emitter and gather the generated files, the dependency
    /// accumulator and the pending asset appends. Pure: no disk writes.
    pub fn collect(&self) -> Result<BuildOutput, BuildError> {
        let mut files = Vec::new();
        let mut app_deps = Vec::new();
        let mut assets = Vec::new();

        let mut take = |out: EmitOutput, files: &mut Vec<GeneratedFile>| {
            if let Some(module) = out.module {
                app_deps.push(module);
            }
            files.extend(out.files);
            assets.extend(out.assets);
        };

        take(
            emit::directives::collect(&self.config, self.loader.as_ref())?,
            &mut files,
        );
        take(
            emit::routes::collect(&self.config, &self.blueprints, self.loader.as_ref())?,
            &mut files,
        );
        take(emit::services::collect(&self.config, &self.services), &mut files);

        let app = emit::app::collect(&self.config, &app_deps);
        files.extend(app.files);
        assets.extend(app.assets);

        Ok(BuildOutput {
            files,
            app_deps,
            assets,
        })
    }

    /// Generate and write every output file, overwriting existing ones, then
    /// apply the asset appends.
    pub fn build(&mut self) -> Result<BuildOutput, BuildError> {
        let output = self.collect()?;
        for file in &output.files {
            if let Some(parent) = file.path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&file.path, &file.source)?;
            debug!(path = %file.path.display(), bytes = file.source.len(), "wrote generated file");
        }
        for asset in &output.assets {
            self.assets.append(asset.bundle.as_deref(), &asset.path);
        }
        self.state = BuildState::Built;
        info!(files = output.files.len(), "build complete");
        Ok(output)
    }

    /// Delete every file `build()` would produce. Already-missing files are
    /// not an error, so clean is safe to run on a never-built tree.
    pub fn clean(&mut self) -> Result<(), BuildError> {
        let output = self.collect()?;
        let mut removed = 0usize;
        for file in &output.files {
            match fs::remove_file(&file.path) {
                Ok(()) => {
                    removed += 1;
                    debug!(path = %file.path.display(), "removed generated file");
                }
                Err(err) if err.kind() == ErrorKind::NotFound => {}
                Err(err) => return Err(err.into()),
            }
        }
        info!(removed, "clean complete");
        Ok(())
    }

    /// Build at most once per generator lifetime. Returns whether a build
    /// actually ran. Lets interactive development regenerate lazily on the
    /// first request instead of eagerly at process start.
    pub fn ensure_built(&mut self) -> Result<bool, BuildError> {
        if self.state == BuildState::Built {
            return Ok(false);
        }
        self.build()?;
        Ok(true)
    }

    /// Regenerate a single partial's current markup without a full rebuild.
    /// Backs the host's on-demand partial endpoint
    /// (`GET <static>/<partials_dir>/<macro>.html`).
    pub fn render_partial(&self, macro_name: &str) -> Result<String, BuildError> {
        let partial = extract_macro(self.loader.as_ref(), macro_name)?;
        Ok(partial.body.trim().to_string())
    }

    /// Public URL the on-demand partial endpoint serves a macro under.
    pub fn partial_url(&self, macro_name: &str) -> String {
        self.config.partial_url(macro_name)
    }
}
