//! # Directive Parsing
//!
//! Recognizes `@inject_tag`, `@inject_tag_oneof` and oneof alternative marker
//! lines in Go `//` comments. Anything that does not match exactly is ignored.

use regex::Regex;
use std::sync::OnceLock;

/// Field-name prefix protoc-gen-go uses for internal bookkeeping fields.
pub const RESERVED_PREFIX: &str = "XXX";

/// A recognized directive line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `// @inject_tag: <replacement>`
    Inject {
        /// Tag text after the directive, verbatim.
        replacement: String,
    },
    /// `// @inject_tag_oneof: <var>: <replacement>`
    InjectOneof {
        /// The oneof variable name as written.
        var_name: String,
        /// Tag text after the variable name, verbatim.
        replacement: String,
    },
    /// `//\t*Msg_Foo`, the generated list of oneof wrapper types.
    Alternative {
        /// Declared name of the wrapper type.
        type_name: String,
    },
}

/// Parses a single comment line. Returns `None` for anything unrecognized.
pub fn parse_directive(comment: &str) -> Option<Directive> {
    static ONEOF_RE: OnceLock<Regex> = OnceLock::new();
    let oneof_re = ONEOF_RE.get_or_init(|| {
        Regex::new(r"^//\s*@inject_tag_oneof:\s(\w+):\s*(.*)$").expect("Invalid regex")
    });

    static INJECT_RE: OnceLock<Regex> = OnceLock::new();
    let inject_re =
        INJECT_RE.get_or_init(|| Regex::new(r"^//\s*@inject_tag:\s*(.*)$").expect("Invalid regex"));

    static ALTERNATIVE_RE: OnceLock<Regex> = OnceLock::new();
    let alternative_re =
        ALTERNATIVE_RE.get_or_init(|| Regex::new(r"^//\s*\*\s*(\w+)$").expect("Invalid regex"));

    let line = comment.trim_end_matches('\r');

    if let Some(caps) = oneof_re.captures(line) {
        return Some(Directive::InjectOneof {
            var_name: caps[1].to_string(),
            replacement: caps[2].to_string(),
        });
    }

    if let Some(caps) = inject_re.captures(line) {
        return Some(Directive::Inject {
            replacement: caps[1].to_string(),
        });
    }

    alternative_re.captures(line).map(|caps| Directive::Alternative {
        type_name: caps[1].to_string(),
    })
}

/// Upper-cases the first character, leaving the rest untouched (`foo_bar` -> `Foo_bar`).
pub fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Name fragment a generated oneof wrapper type carries: `<Enclosing>_<Var>`.
pub fn mangled_name(enclosing_type: &str, title_var: &str) -> String {
    format!("{}_{}", enclosing_type, title_var)
}

/// Builds the exclusion tag for skip-list fields: `a:"-",b:"-"`.
pub fn skip_metadata(skip: &[String]) -> String {
    skip.iter()
        .map(|name| format!("{}:\"-\"", name))
        .collect::<Vec<_>>()
        .join(",")
}

/// True when a field name is eligible for skip-list handling.
pub fn is_skip_field(name: &str, skip: &[String]) -> bool {
    name.starts_with(RESERVED_PREFIX) && skip.iter().any(|s| s == name)
}
