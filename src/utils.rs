//! Pure text helpers shared by the emitters.
//!
//! - Server-to-client URL pattern conversion
//! - YAML front-matter stripping for exported view templates

use std::sync::LazyLock;

use regex::Regex;

static URL_ARG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(?:[a-z_]+:)?([A-Za-z0-9_]+)>").unwrap());

static FRONTMATTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A---[ \t]*\r?\n.*?\r?\n---[ \t]*\r?\n").unwrap());

/// Convert a server-side URL rule into a client router path.
///
/// Typed and untyped placeholders both collapse to a colon-prefixed bare
/// name: `<int:id>` and `<id>` become `:id`. Input without placeholders is
/// returned unchanged, which also makes the conversion idempotent.
pub fn convert_url_args(url: &str) -> String {
    URL_ARG_RE.replace_all(url, ":$1").into_owned()
}

/// Strip a leading `---` fenced YAML front-matter block from template source.
///
/// The host's view files may carry routing metadata in front-matter; the
/// copy exported for the client must be clean markup.
pub fn strip_yaml_frontmatter(source: &str) -> String {
    FRONTMATTER_RE.replace(source, "").into_owned()
}
