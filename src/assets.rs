//! Ordered asset bundles handed to the host's asset pipeline.
//!
//! A bundle is an ordered list of references: plain file paths, URLs, or
//! `@name` pointers to another registered bundle. The generator appends its
//! output files (and the client-framework libraries they need) to a single
//! application bundle, preserving load order.

use std::collections::BTreeMap;

/// Name of the bundle the generated files are appended to.
pub const APP_BUNDLE: &str = "angular-app";

const CDN_BASE: &str = "https://cdnjs.cloudflare.com/ajax/libs/angular.js/1.2.20";

#[derive(Debug, Default)]
pub struct AssetRegistry {
    bundles: BTreeMap<String, Vec<String>>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named bundle with its ordered sources, replacing any
    /// previous registration of the same name.
    pub fn register(&mut self, name: &str, sources: Vec<String>) {
        self.bundles.insert(name.to_string(), sources);
    }

    /// Register an empty bundle if absent.
    pub fn register_empty(&mut self, name: &str) {
        self.bundles.entry(name.to_string()).or_default();
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bundles.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.bundles.get(name).map(Vec::as_slice)
    }

    /// Append a reference to the application bundle, optionally preceded by
    /// a `@bundle` pointer (used to pull in the library a generated file
    /// depends on, in front of the file itself).
    pub fn append(&mut self, bundle_ref: Option<&str>, path: &str) {
        self.register_empty(APP_BUNDLE);
        let app = self.bundles.get_mut(APP_BUNDLE).unwrap();
        if let Some(bundle_ref) = bundle_ref {
            app.push(bundle_ref.to_string());
        }
        app.push(path.to_string());
    }

    /// Register the stock client-framework CDN bundles plus the ngbridge
    /// runtime shim, mirroring what the host expects to find by name.
    pub fn register_cdn_defaults(&mut self) {
        for module in [
            "", "-route", "-resource", "-animate", "-cookies", "-loader", "-sanitize", "-touch",
        ] {
            self.register(
                &format!("angular{module}-cdn"),
                vec![format!("{CDN_BASE}/angular{module}.min.js")],
            );
        }
        self.register(
            "ngbridge",
            vec!["ngbridge/angular-bridge.js".to_string()],
        );
    }
}
