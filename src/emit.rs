//! Shared emitter plumbing.
//!
//! Each emitter is a pure `collect` function: it gathers data from the host
//! model and renders JS text, returning an [`EmitOutput`] without touching
//! the filesystem. The orchestrator in [`crate::build`] applies the combined
//! output in one terminal step.

pub mod app;
pub mod directives;
pub mod routes;
pub mod services;

use std::path::PathBuf;

use serde::Serialize;

/// Fixed header opening every generated JS module. The contract is advisory:
/// nothing stops a hand edit, but the next build overwrites it.
pub const MODULE_HEADER: &str =
    "/* This file is auto-generated by ngbridge. DO NOT MODIFY. */\n'use strict';\n";

/// One generated file: destination path plus full source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub source: String,
}

/// A pending asset-registry append: an optional `@bundle` pointer followed
/// by the generated file's path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRef {
    pub bundle: Option<String>,
    pub path: String,
}

/// What one emitter produced.
#[derive(Debug, Default)]
pub struct EmitOutput {
    pub files: Vec<GeneratedFile>,
    /// Module name the app bootstrap must depend on, when this emitter
    /// produced a loadable module.
    pub module: Option<String>,
    pub assets: Vec<AssetRef>,
}

/// Serialize a JSON value with a custom indent. Serialization of in-memory
/// JSON values into a byte buffer cannot fail.
pub(crate) fn to_json_indented(value: &impl Serialize, indent: &'static str) -> String {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .expect("JSON value serialization is infallible");
    String::from_utf8(buf).expect("serde_json emits UTF-8")
}
