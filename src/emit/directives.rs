//! Directives module emitter.
//!
//! Each exported macro becomes an HTML partial file plus one directive
//! registration whose definition object is the macro's `ngdirective` options
//! with a `templateUrl` pointing at the partial. A misconfigured macro name
//! aborts the whole build; there is no partial output.

use serde_json::Value;

use super::{to_json_indented, AssetRef, EmitOutput, GeneratedFile, MODULE_HEADER};
use crate::config::Config;
use crate::template::{extract_macro, TemplateLoader};
use crate::BuildError;

pub fn collect(config: &Config, loader: &dyn TemplateLoader) -> Result<EmitOutput, BuildError> {
    let mut out = EmitOutput::default();
    let mut module = format!(
        "{MODULE_HEADER}\nvar directives = angular.module('{}', []);\n\n",
        config.directives_module
    );

    for macro_name in &config.export_macros {
        let mut partial = extract_macro(loader, macro_name)?;
        out.files.push(GeneratedFile {
            path: config.partial_path(macro_name),
            source: partial.body.trim().to_string(),
        });

        partial.options.insert(
            "templateUrl".to_string(),
            Value::String(config.partial_url(macro_name)),
        );
        // A "name" key in the annotation overrides the registered name.
        let name = match partial.options.remove("name") {
            Some(Value::String(name)) => name,
            _ => macro_name.clone(),
        };
        module.push_str(&format!(
            "directives.directive('{}', function() {{\nreturn {};\n}});\n\n",
            name,
            to_json_indented(&Value::Object(partial.options), "    ")
        ));
    }

    out.files.push(GeneratedFile {
        path: config.static_dir.join(&config.directives_file),
        source: module,
    });
    out.assets.push(AssetRef {
        bundle: None,
        path: config.directives_file.clone(),
    });
    out.module = Some(config.directives_module.clone());
    Ok(out)
}
