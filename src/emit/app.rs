//! App bootstrap module emitter.
//!
//! Declares the root module depending on every module name the other
//! emitters accumulated, followed by the statically configured extras.
//! A no-op when app-file generation is disabled.

use super::{AssetRef, EmitOutput, GeneratedFile, MODULE_HEADER};
use crate::config::Config;

pub fn collect(config: &Config, deps: &[String]) -> EmitOutput {
    let mut out = EmitOutput::default();
    let Some(app_file) = &config.app_file else {
        return out;
    };

    let mut all_deps: Vec<&str> = deps.iter().map(String::as_str).collect();
    all_deps.extend(config.app_deps.iter().map(String::as_str));

    let dep_list = if all_deps.is_empty() {
        String::new()
    } else {
        format!(
            "\n  {}\n",
            all_deps
                .iter()
                .map(|d| format!("'{d}'"))
                .collect::<Vec<_>>()
                .join(",\n  ")
        )
    };

    let module = format!(
        "{MODULE_HEADER}\nangular.module('{}', [{}]);\n",
        config.app_module, dep_list
    );

    out.files.push(GeneratedFile {
        path: config.static_dir.join(app_file),
        source: module,
    });
    out.assets.push(AssetRef {
        bundle: None,
        path: app_file.clone(),
    });
    out
}
