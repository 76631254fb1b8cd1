//! Template source access and macro extraction.
//!
//! The templating engine itself is a collaborator: the generator only needs
//! to resolve a macro name to a source file and scan that source for the
//! macro's block boundaries. Boundary search is balanced — a macro whose body
//! defines further macros extracts up to its own `endmacro`, not the first
//! one encountered.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

use crate::BuildError;

static MACRO_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{%-?\s*(endmacro|macro)\b").unwrap());

static NGDIRECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{#\s*ngdirective:(.+?)#\}").unwrap());

// ---------------------------------------------------------------------------
// TemplateLoader
// ---------------------------------------------------------------------------

/// Source lookup over the host's template search path.
pub trait TemplateLoader {
    /// Resolve a macro name to the template it is declared in.
    /// `None` means the macro is not registered anywhere.
    fn resolve_macro(&self, name: &str) -> Option<String>;

    /// Raw source text of a template, by its resolver-relative reference.
    fn source(&self, template: &str) -> Result<String, BuildError>;
}

/// Filesystem-backed loader over a template root directory.
///
/// Macro resolution walks `.html` files in sorted order and returns the
/// first template declaring the macro, so resolution is deterministic
/// regardless of directory enumeration order.
pub struct DirLoader {
    root: PathBuf,
}

impl DirLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn walk(dir: &Path, out: &mut Vec<PathBuf>) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                debug!(dir = %dir.display(), %err, "skipping unreadable template directory");
                return;
            }
        };
        let mut paths: Vec<PathBuf> = entries.filter_map(|e| e.ok().map(|e| e.path())).collect();
        paths.sort();
        for path in paths {
            if path.is_dir() {
                Self::walk(&path, out);
            } else if path.extension().is_some_and(|ext| ext == "html") {
                out.push(path);
            }
        }
    }
}

impl TemplateLoader for DirLoader {
    fn resolve_macro(&self, name: &str) -> Option<String> {
        let mut files = Vec::new();
        Self::walk(&self.root, &mut files);
        let decl = macro_decl_re(name);
        for path in files {
            let source = match fs::read_to_string(&path) {
                Ok(source) => source,
                Err(err) => {
                    debug!(path = %path.display(), %err, "skipping unreadable template");
                    continue;
                }
            };
            if decl.is_match(&source) {
                let rel = path.strip_prefix(&self.root).unwrap_or(&path);
                return Some(rel.to_string_lossy().replace('\\', "/"));
            }
        }
        None
    }

    fn source(&self, template: &str) -> Result<String, BuildError> {
        Ok(fs::read_to_string(self.root.join(template))?)
    }
}

// ---------------------------------------------------------------------------
// Macro extraction
// ---------------------------------------------------------------------------

/// A macro body with its inline directive options separated out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPartial {
    /// The macro's rendered-body source, annotation removed.
    pub body: String,
    /// Parsed `ngdirective` annotation payload; empty when absent.
    pub options: Map<String, Value>,
}

fn macro_decl_re(name: &str) -> Regex {
    Regex::new(&format!(
        r"\{{%-?\s*macro\s+{}\s*\(",
        regex::escape(name)
    ))
    .unwrap()
}

/// Locate `name` via the loader and extract its body and options.
///
/// Fails with [`BuildError::UnknownMacro`] when no template declares the
/// macro, and with [`BuildError::MacroNotFound`] when the resolved source
/// unexpectedly lacks the declaration.
pub fn extract_macro(
    loader: &dyn TemplateLoader,
    name: &str,
) -> Result<ExtractedPartial, BuildError> {
    let template = loader
        .resolve_macro(name)
        .ok_or_else(|| BuildError::UnknownMacro {
            name: name.to_string(),
        })?;
    let source = loader.source(&template)?;
    extract_from_source(&source, name, &template)
}

/// Extract a macro body from already-loaded template source.
pub fn extract_from_source(
    source: &str,
    name: &str,
    template: &str,
) -> Result<ExtractedPartial, BuildError> {
    let decl = macro_decl_re(name)
        .find(source)
        .ok_or_else(|| BuildError::MacroNotFound {
            name: name.to_string(),
            template: template.to_string(),
        })?;

    // The body starts after the declaration's closing `%}`, which may sit on
    // a later line when the parameter list spans several lines.
    let body_start = source[decl.start()..]
        .find("%}")
        .map(|i| decl.start() + i + 2)
        .ok_or_else(|| BuildError::UnterminatedMacro {
            name: name.to_string(),
            template: template.to_string(),
        })?;

    let body_end =
        find_macro_end(source, body_start).ok_or_else(|| BuildError::UnterminatedMacro {
            name: name.to_string(),
            template: template.to_string(),
        })?;

    let mut body = source[body_start..body_end].to_string();
    let options = take_directive_options(&mut body, name)?;
    Ok(ExtractedPartial { body, options })
}

/// Find the start offset of the `endmacro` tag closing the macro whose body
/// begins at `from`, skipping over nested macro definitions.
fn find_macro_end(source: &str, from: usize) -> Option<usize> {
    let mut depth = 1usize;
    for m in MACRO_TAG_RE.captures_iter(&source[from..]) {
        let whole = m.get(0).unwrap();
        match m.get(1).unwrap().as_str() {
            "macro" => depth += 1,
            _ => {
                depth -= 1;
                if depth == 0 {
                    return Some(from + whole.start());
                }
            }
        }
    }
    None
}

/// Parse and remove a `{# ngdirective: {...} #}` annotation from `body`.
///
/// The whole comment is removed, not just the payload, so the remaining
/// partial is valid standalone markup. Malformed JSON surfaces the decode
/// error verbatim, tagged with the macro name.
fn take_directive_options(
    body: &mut String,
    name: &str,
) -> Result<Map<String, Value>, BuildError> {
    let Some(caps) = NGDIRECTIVE_RE.captures(body) else {
        return Ok(Map::new());
    };
    let payload = caps.get(1).unwrap().as_str();
    let options: Map<String, Value> =
        serde_json::from_str(payload).map_err(|source| BuildError::MacroOptions {
            name: name.to_string(),
            source,
        })?;
    let range = caps.get(0).unwrap().range();
    body.replace_range(range, "");
    Ok(options)
}
