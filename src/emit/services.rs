//! Services module emitter.
//!
//! Each host service becomes a factory built by the shared
//! `bridgeServiceFactory` helper from the ngbridge runtime, parameterized
//! with the service name, a capability list (currently always empty) and an
//! endpoints table mapping endpoint names to
//! `[convertedUrlPattern, viewArgumentNames]`.

use serde_json::{json, Map, Value};

use super::{to_json_indented, AssetRef, EmitOutput, GeneratedFile, MODULE_HEADER};
use crate::config::Config;
use crate::utils::convert_url_args;
use crate::ServiceDescriptor;

pub fn collect(config: &Config, services: &[ServiceDescriptor]) -> EmitOutput {
    let mut out = EmitOutput::default();
    let Some(services_file) = &config.services_file else {
        return out;
    };

    let mut module = format!(
        "{MODULE_HEADER}\nvar services = angular.module('{}', ['ngbridge']);\n",
        config.services_module
    );

    for service in services {
        let mut endpoints = Map::new();
        for view in &service.views {
            // Only the first URL rule is exposed to the client.
            if let Some(rule) = view.url_rules.first() {
                endpoints.insert(
                    view.name.clone(),
                    json!([convert_url_args(&rule.pattern), view.args]),
                );
            }
        }
        module.push_str(&format!(
            "\nservices.factory('{0}', ['bridgeServiceFactory', function(bridgeServiceFactory) {{\nreturn bridgeServiceFactory.make('{0}', [], {1});\n}}]);\n",
            service.name,
            to_json_indented(&Value::Object(endpoints), "  ")
        ));
    }

    out.files.push(GeneratedFile {
        path: config.static_dir.join(services_file),
        source: module,
    });
    out.assets.push(AssetRef {
        bundle: Some("@ngbridge".to_string()),
        path: services_file.clone(),
    });
    out.module = Some(config.services_module.clone());
    out
}
