//! # ngbridge
//!
//! Build-time code generator bridging a server-side routing/templating layer
//! with a client-side single-page-application framework.
//!
//! Given the host's registered views, exported template macros and service
//! endpoints, the generator emits:
//!
//! - a **routes** module mapping converted URL patterns to view templates,
//!   with a single `otherwise` fallback that performs a full page navigation
//!   (so server-rendered and client-rendered routes coexist),
//! - a **directives** module backed by HTML partials extracted from template
//!   macros,
//! - a **services** module exposing server endpoints to the client,
//! - an **app** bootstrap module wiring the three together.
//!
//! The generator never interprets the markup it extracts. It is a structural
//! transformer: collect data, render JS text, apply to disk in one terminal
//! step.

pub mod assets;
pub mod build;
pub mod config;
pub mod emit;
pub mod template;
pub mod utils;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub use assets::AssetRegistry;
pub use build::{BuildOutput, BuildState, Generator};
pub use config::Config;
pub use emit::{AssetRef, EmitOutput, GeneratedFile};
pub use template::{extract_macro, DirLoader, ExtractedPartial, TemplateLoader};
pub use utils::convert_url_args;

// ---------------------------------------------------------------------------
// Host view model
// ---------------------------------------------------------------------------

/// How a view's response is produced.
///
/// Only `Client` views take part in route generation: their server response
/// is always the static application shell, so the client router owns the
/// path. `Server` views keep ordinary server-side dispatch and are reached
/// through the routes module's `otherwise` fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    Client,
    Server,
}

impl Default for ViewKind {
    fn default() -> Self {
        ViewKind::Client
    }
}

/// One URL rule of a view: a server-side path pattern plus its HTTP methods.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UrlRule {
    pub pattern: String,
    #[serde(default)]
    pub methods: Vec<String>,
}

/// A view registered with the host framework, read-only to the generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct View {
    pub name: String,
    #[serde(default)]
    pub url_rules: Vec<UrlRule>,
    /// Template reference, relative to the template root.
    #[serde(default)]
    pub template: String,
    /// Extra routing options copied verbatim into the route spec.
    #[serde(default)]
    pub route_options: Map<String, Value>,
    /// View argument names, used by service endpoint tables.
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub kind: ViewKind,
}

/// A host-framework grouping of views sharing a URL prefix.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Blueprint {
    pub name: String,
    #[serde(default)]
    pub url_prefix: Option<String>,
    #[serde(default)]
    pub views: Vec<View>,
}

/// A named service with an ordered list of endpoint views.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceDescriptor {
    pub name: String,
    #[serde(default)]
    pub views: Vec<View>,
}

// ---------------------------------------------------------------------------
// BuildError
// ---------------------------------------------------------------------------

/// Errors that abort a build or clean. There is no partial-success mode:
/// a single bad macro halts generation of every file in the run.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("macro '{name}' cannot be exported because it does not exist in the template search path")]
    UnknownMacro { name: String },

    #[error("macro '{name}' not found in template '{template}'")]
    MacroNotFound { name: String, template: String },

    #[error("macro '{name}' has no matching endmacro in template '{template}'")]
    UnterminatedMacro { name: String, template: String },

    #[error("invalid ngdirective options on macro '{name}': {source}")]
    MacroOptions {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
