//! Textual rewrite of the `gravity` attribute.
//!
//! Only the first `gravity="..."` occurrence is replaced. Every other byte
//! of the document is left untouched, and the document is never parsed.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::{NoExpand, Regex};
use tracing::{debug, warn};

use crate::domain::GravityVector;
use crate::ports::CoreError;

static GRAVITY_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"gravity="[^"]*""#).expect("gravity pattern is valid"));

/// Outcome of rewriting the gravity attribute in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GravityRewrite {
    /// Full document text after the rewrite.
    pub text: String,
    /// Whether a `gravity="..."` attribute was found.
    pub matched: bool,
}

/// Replace the value of the first `gravity="..."` attribute in `text`.
///
/// When no attribute exists the text comes back unchanged with
/// `matched == false`.
pub fn rewrite_gravity(text: &str, gravity: GravityVector) -> GravityRewrite {
    let replacement = format!("gravity=\"{gravity}\"");
    let matched = GRAVITY_ATTR.is_match(text);
    let text = GRAVITY_ATTR
        .replace(text, NoExpand(&replacement))
        .into_owned();
    GravityRewrite { text, matched }
}

/// Current value of the first `gravity="..."` attribute, without quotes.
pub fn current_gravity(text: &str) -> Option<&str> {
    GRAVITY_ATTR
        .find(text)
        .and_then(|m| m.as_str().strip_prefix("gravity=\""))
        .and_then(|v| v.strip_suffix('"'))
}

/// Rewrite the gravity attribute of the file at `path` in place.
///
/// The whole file is always written back, even when nothing matched; a
/// miss is logged as a warning rather than treated as an error.
pub fn set_gravity(path: &Path, gravity: GravityVector) -> Result<GravityRewrite, CoreError> {
    let text = fs::read_to_string(path).map_err(|e| CoreError::io(path, e))?;
    let rewrite = rewrite_gravity(&text, gravity);
    fs::write(path, &rewrite.text).map_err(|e| CoreError::io(path, e))?;

    if rewrite.matched {
        debug!("Set gravity=\"{}\" in {}", gravity, path.display());
    } else {
        warn!(
            "No gravity attribute found in {}; file left unchanged",
            path.display()
        );
    }
    Ok(rewrite)
}
