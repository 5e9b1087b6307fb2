//! Code block language normalization and highlighting seam.

use std::collections::HashMap;

use crate::view::ViewNode;

/// Language aliases mapped to the names highlighters expect.
const LANGUAGE_ALIASES: [(&str, &str); 12] = [
    ("c++", "cpp"),
    ("c#", "csharp"),
    ("f#", "fsharp"),
    ("shell", "bash"),
    ("sh", "bash"),
    ("zsh", "bash"),
    ("js", "javascript"),
    ("ts", "typescript"),
    ("py", "python"),
    ("rs", "rust"),
    ("yml", "yaml"),
    ("plain text", "text"),
];

/// Normalize a code block language name.
///
/// The name is trimmed and lowercased for the lookup in `overrides` and the
/// built-in alias table. Unrecognized names are returned unchanged.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use folio_renderer::normalize_language;
///
/// let none = HashMap::new();
/// assert_eq!(normalize_language("C++", &none), "cpp");
/// assert_eq!(normalize_language("shell", &none), "bash");
/// assert_eq!(normalize_language("Haskell", &none), "Haskell");
/// ```
#[must_use]
pub fn normalize_language(language: &str, overrides: &HashMap<String, String>) -> String {
    let key = language.trim().to_lowercase();
    if let Some(target) = overrides.get(&key) {
        return target.clone();
    }
    LANGUAGE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map_or_else(|| language.to_owned(), |(_, target)| (*target).to_owned())
}

/// Produces the contents of a `<code>` element for a code block.
pub trait Highlighter {
    /// Render `code` written in `language` (already normalized, possibly empty).
    fn highlight(&self, language: &str, code: &str) -> Vec<ViewNode>;
}

/// Highlighter that emits the code as a single text node.
///
/// Client-side highlighting can pick the block up from its
/// `language-*` class.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&self, _language: &str, code: &str) -> Vec<ViewNode> {
        vec![ViewNode::text(code)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_aliases() {
        let none = HashMap::new();
        for (alias, target) in LANGUAGE_ALIASES {
            assert_eq!(normalize_language(alias, &none), target);
        }
    }

    #[test]
    fn test_lookup_ignores_case_and_whitespace() {
        let none = HashMap::new();
        assert_eq!(normalize_language(" C++ ", &none), "cpp");
        assert_eq!(normalize_language("Plain Text", &none), "text");
    }

    #[test]
    fn test_unknown_language_passes_through() {
        let none = HashMap::new();
        assert_eq!(normalize_language("cobol", &none), "cobol");
        assert_eq!(normalize_language("Haskell", &none), "Haskell");
        assert_eq!(normalize_language(" OCaml ", &none), " OCaml ");
        assert_eq!(normalize_language("", &none), "");
    }

    #[test]
    fn test_overrides_take_precedence() {
        let overrides = HashMap::from([
            ("sh".to_owned(), "posix-shell".to_owned()),
            ("tsx".to_owned(), "typescript".to_owned()),
        ]);
        assert_eq!(normalize_language("sh", &overrides), "posix-shell");
        assert_eq!(normalize_language("TSX", &overrides), "typescript");
        assert_eq!(normalize_language("py", &overrides), "python");
    }

    #[test]
    fn test_plain_highlighter() {
        let nodes = PlainHighlighter.highlight("rust", "fn main() {}");
        assert_eq!(nodes, vec![ViewNode::text("fn main() {}")]);
    }
}
