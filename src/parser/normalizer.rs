//! Frame filename normalization.
//!
//! GlitchTip reports filenames the way each SDK captured them: Windows
//! separators, and for Ruby a `name (version) ` prefix on gem and runtime
//! frames. Normalized paths are relative paths comparable to the workspace.

use once_cell::sync::Lazy;
use regex::Regex;

/// `<word> (<anything but ')'>)` followed by whitespace, at the start only
pub(crate) static RUNTIME_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\w+ \([^)]*\)\s+").expect("runtime prefix pattern is valid"));

/// Normalize a raw frame filename
///
/// **Public** - pure, used by both classification and file search
///
/// Converts `\` to `/`, strips one leading runtime descriptor prefix such as
/// `ruby (3.2.0) ` and trims whitespace. `.`/`..` segments and drive letters
/// are left alone.
pub fn normalize_path(raw: &str) -> String {
    let unified = to_forward_slashes(raw.trim());
    RUNTIME_PREFIX.replace(&unified, "").trim().to_string()
}

/// Convert every backslash to a forward slash
pub(crate) fn to_forward_slashes(path: &str) -> String {
    path.replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_runtime_prefix() {
        assert_eq!(normalize_path("ruby (3.2.1) app/models/user.rb"), "app/models/user.rb");
        assert_eq!(
            normalize_path("activesupport (7.0.4)   lib/active_support/callbacks.rb"),
            "lib/active_support/callbacks.rb"
        );
    }

    #[test]
    fn test_strips_prefix_only_once() {
        assert_eq!(normalize_path("ruby (3.2.1) rake (13.0) lib/x.rb"), "rake (13.0) lib/x.rb");
    }

    #[test]
    fn test_prefix_must_match_exact_shape() {
        // No space after the closing paren
        assert_eq!(normalize_path("ruby (3.2.1)app/a.rb"), "ruby (3.2.1)app/a.rb");
        // Not at the start
        assert_eq!(normalize_path("app/ruby (3.2.1) a.rb"), "app/ruby (3.2.1) a.rb");
        // Two words before the paren
        assert_eq!(normalize_path("my gem (1.0) lib/a.rb"), "my gem (1.0) lib/a.rb");
    }

    #[test]
    fn test_converts_separators() {
        assert_eq!(normalize_path("lib\\foo\\bar.py"), "lib/foo/bar.py");
        assert_eq!(normalize_path("C:\\work\\src\\main.ts"), "C:/work/src/main.ts");
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(normalize_path("  src/index.ts \n"), "src/index.ts");
    }

    #[test]
    fn test_leaves_dot_segments() {
        assert_eq!(normalize_path("./src/../lib/a.js"), "./src/../lib/a.js");
    }

    #[test]
    fn test_idempotent_without_prefix() {
        for raw in [
            "src\\handlers\\index.ts",
            "  app/models/user.rb ",
            "/usr/lib/python3.11/site-packages/django/core.py",
            "webpack:///./src/app.js",
            "",
        ] {
            let once = normalize_path(raw);
            assert_eq!(normalize_path(&once), once, "not idempotent for {:?}", raw);
        }
    }
}
