use deunicode::deunicode;
use once_cell::sync::Lazy;
use regex::Regex;

const FALLBACK_BASE_NAME: &str = "document";

static UNSAFE_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_.-]").unwrap());
static DOT_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.{2,}").unwrap());

/// Reduce a client supplied filename to a single safe path component.
///
/// Path separators become word breaks, whitespace runs become `_`, anything
/// outside `[A-Za-z0-9_.-]` is dropped and leading/trailing dots and
/// underscores are stripped. The result may be empty.
pub fn sanitize_filename(name: &str) -> String {
    let ascii = deunicode(name).replace(['/', '\\'], " ");
    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned = UNSAFE_CHARS.replace_all(&joined, "");
    let collapsed = DOT_RUNS.replace_all(&cleaned, ".");

    collapsed.trim_matches(['.', '_']).to_string()
}

/// Base name used for generated artifacts: sanitized stem, lower-cased.
pub fn artifact_base_name(filename: &str) -> String {
    let sanitized = sanitize_filename(filename);
    let stem = match sanitized.rsplit_once('.') {
        Some((stem, _ext)) if !stem.is_empty() => stem,
        _ => sanitized.as_str(),
    };

    let base = stem
        .to_lowercase()
        .trim_matches(['.', '_'])
        .to_string();

    if base.is_empty() {
        FALLBACK_BASE_NAME.to_string()
    } else {
        base
    }
}

/// Whether a filename coming from a URL can address a stored file directly
pub fn is_safe_filename(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains("..")
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}
