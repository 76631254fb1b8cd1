//! Generator configuration.
//!
//! Every generated path is derived from this struct and nothing else, so
//! `build` and `clean` always agree on the file set.

use std::path::PathBuf;

use serde::Deserialize;

/// Output layout and module naming.
///
/// Missing manifest keys fall back to the stock defaults below; an explicit
/// `null` for `app_file` or `services_file` disables that module entirely.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Root directory for all generated files.
    pub static_dir: PathBuf,
    /// Public URL prefix under which `static_dir` is served.
    pub static_url_path: String,
    /// App bootstrap module path, relative to `static_dir`. `None` disables.
    pub app_file: Option<String>,
    pub app_module: String,
    /// Extra module dependencies appended after the generated ones.
    pub app_deps: Vec<String>,
    pub partials_dir: String,
    pub directives_file: String,
    pub directives_module: String,
    pub views_dir: String,
    pub routes_file: String,
    pub routes_module: String,
    /// Services module path, relative to `static_dir`. `None` disables.
    pub services_file: Option<String>,
    pub services_module: String,
    /// Macro names to expose as client directives, in registration order.
    pub export_macros: Vec<String>,
    /// Suppresses the host's on-demand partial endpoint.
    pub disable_reloading_endpoints: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            static_dir: PathBuf::from("static"),
            static_url_path: "/static".to_string(),
            app_file: Some("app/app.js".to_string()),
            app_module: "app".to_string(),
            app_deps: Vec::new(),
            partials_dir: "app/partials".to_string(),
            directives_file: "app/directives/auto.js".to_string(),
            directives_module: "directives".to_string(),
            views_dir: "app/views".to_string(),
            routes_file: "app/routes.js".to_string(),
            routes_module: "routes".to_string(),
            services_file: Some("app/services/auto.js".to_string()),
            services_module: "services".to_string(),
            export_macros: Vec::new(),
            disable_reloading_endpoints: false,
        }
    }
}

impl Config {
    /// Filesystem destination of an extracted partial.
    pub fn partial_path(&self, macro_name: &str) -> PathBuf {
        self.static_dir
            .join(&self.partials_dir)
            .join(format!("{macro_name}.html"))
    }

    /// Public URL of an extracted partial, as written into directive options.
    pub fn partial_url(&self, macro_name: &str) -> String {
        format!(
            "{}/{}/{}.html",
            self.static_url_path, self.partials_dir, macro_name
        )
    }

    /// Public URL of an exported view template.
    pub fn view_url(&self, template: &str) -> String {
        format!("{}/{}/{}", self.static_url_path, self.views_dir, template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_layout() {
        let config = Config::default();
        assert_eq!(config.routes_file, "app/routes.js");
        assert_eq!(config.routes_module, "routes");
        assert_eq!(config.app_file.as_deref(), Some("app/app.js"));
        assert_eq!(config.services_file.as_deref(), Some("app/services/auto.js"));
        assert!(!config.disable_reloading_endpoints);
    }

    #[test]
    fn null_disables_optional_modules() {
        let config: Config =
            serde_json::from_str(r#"{"app_file": null, "services_file": null}"#).unwrap();
        assert!(config.app_file.is_none());
        assert!(config.services_file.is_none());
        // Unrelated keys keep their defaults.
        assert_eq!(config.directives_file, "app/directives/auto.js");
    }

    #[test]
    fn partial_paths_derive_from_config() {
        let config = Config::default();
        assert_eq!(
            config.partial_path("navbar"),
            PathBuf::from("static/app/partials/navbar.html")
        );
        assert_eq!(config.partial_url("navbar"), "/static/app/partials/navbar.html");
    }
}
