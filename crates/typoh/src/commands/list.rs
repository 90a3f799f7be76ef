//! `typoh --list`: print the active substitution tables.

use std::fmt::Write as _;

use typoh_config::{Config, Pass, Rule};

use crate::output::Output;

/// Print both passes, in precedence order.
pub(crate) fn execute(config: &Config, output: &Output) {
    if let Some(path) = &config.config_path {
        output.line(&format!("Configuration: {}", path.display()));
    }

    for (pass, title) in [(Pass::First, "First pass:"), (Pass::Second, "Second pass:")] {
        output.heading(title);
        for rule in config.rules(pass) {
            output.line(&format_rule(rule));
        }
    }
}

/// Format a rule as `  marker --> replacement`.
fn format_rule(rule: &Rule) -> String {
    format!("  {} --> {}", rule.marker, visible(&rule.replacement))
}

/// Escape characters that would otherwise print as nothing.
fn visible(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_whitespace() || c.is_control() || c == '\u{ad}' {
            let _ = write!(out, "{}", c.escape_unicode());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rule() {
        assert_eq!(format_rule(&Rule::new("---", "—")), "  --- --> —");
    }

    #[test]
    fn test_format_rule_invisible_replacement() {
        assert_eq!(format_rule(&Rule::new("_", "\u{a0}")), "  _ --> \\u{a0}");
        assert_eq!(format_rule(&Rule::new("~", "\u{ad}")), "  ~ --> \\u{ad}");
    }

    #[test]
    fn test_visible_leaves_symbols() {
        assert_eq!(visible("½→✓"), "½→✓");
    }
}
