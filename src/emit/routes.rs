//! Routes module emitter.
//!
//! Client-kind views become `$routeProvider.when(...)` entries in declaration
//! order; everything else falls through a single `otherwise` that performs a
//! full page navigation, which is how server-rendered and client-rendered
//! routes coexist on one URL space.

use serde_json::Value;

use super::{AssetRef, EmitOutput, GeneratedFile, MODULE_HEADER};
use crate::config::Config;
use crate::template::TemplateLoader;
use crate::utils::{convert_url_args, strip_yaml_frontmatter};
use crate::{Blueprint, BuildError, ViewKind};

const OTHERWISE: &str = "$routeProvider.otherwise({redirectTo: function(params, path, search) { window.location.href = path; }});";

pub fn collect(
    config: &Config,
    blueprints: &[Blueprint],
    loader: &dyn TemplateLoader,
) -> Result<EmitOutput, BuildError> {
    let mut out = EmitOutput::default();
    let mut whens = Vec::new();

    for blueprint in blueprints {
        for view in blueprint.views.iter().filter(|v| v.kind == ViewKind::Client) {
            out.files.push(export_view(config, loader, &view.template)?);
            for rule in &view.url_rules {
                let mut spec = view.route_options.clone();
                spec.insert(
                    "templateUrl".to_string(),
                    Value::String(config.view_url(&view.template)),
                );
                let mut url = rule.pattern.clone();
                if let Some(prefix) = &blueprint.url_prefix {
                    url = format!("{prefix}{url}");
                }
                whens.push(format!(
                    "$routeProvider.when('{}', {});",
                    convert_url_args(&url),
                    Value::Object(spec)
                ));
            }
        }
    }

    whens.push(OTHERWISE.to_string());

    let module = format!(
        "{MODULE_HEADER}\nangular.module('{}', ['ngRoute']).config(['$routeProvider', '$locationProvider',\n    function($routeProvider, $locationProvider) {{\n        $locationProvider.html5Mode(true);\n        {}\n    }}\n]);\n",
        config.routes_module,
        whens.join("\n        ")
    );

    out.files.push(GeneratedFile {
        path: config.static_dir.join(&config.routes_file),
        source: module,
    });
    out.assets.push(AssetRef {
        bundle: Some("@angular-route-cdn".to_string()),
        path: config.routes_file.clone(),
    });
    out.module = Some(config.routes_module.clone());
    Ok(out)
}

/// Copy a view template under the client views directory, front-matter
/// stripped, keeping the template's relative path.
fn export_view(
    config: &Config,
    loader: &dyn TemplateLoader,
    template: &str,
) -> Result<GeneratedFile, BuildError> {
    let source = loader.source(template)?;
    Ok(GeneratedFile {
        path: config.static_dir.join(&config.views_dir).join(template),
        source: strip_yaml_frontmatter(&source),
    })
}
