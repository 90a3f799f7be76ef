//! Built-in pattern tables.
//!
//! Order matters within each table: the first marker to complete wins.
//! Markers that are prefixes of second-pass markers (`---` vs `--`, ``` `` ```
//! vs `` ` ``) live in the first pass so the longer form is replaced before
//! the shorter one can see it.

/// First-pass markers.
pub const FIRST_PASS: &[(&str, &str)] = &[
    ("---", "—"),
    ("\\-", "-"),
    ("``", "“"),
    ("''", "”"),
    ("...", "…"),
    ("\\.", "."),
    ("~", "\u{ad}"),
    ("=>", "•"),
    ("N^o", "№"),
    ("1/2", "½"),
    ("1/4", "¼"),
    ("3/4", "¾"),
    ("1/3", "⅓"),
    ("2/3", "⅔"),
    ("^0", "⁰"),
    ("^1", "¹"),
    ("^2", "²"),
    ("^3", "³"),
    ("^4", "⁴"),
    ("^5", "⁵"),
    ("^6", "⁶"),
    ("^7", "⁷"),
    ("^8", "⁸"),
    ("^9", "⁹"),
    ("_0", "₀"),
    ("_1", "₁"),
    ("_2", "₂"),
    ("_3", "₃"),
    ("_4", "₄"),
    ("_5", "₅"),
    ("_6", "₆"),
    ("_7", "₇"),
    ("_8", "₈"),
    ("_9", "₉"),
    (":check:", "✓"),
    (":rightarrow:", "→"),
    (":leftarrow:", "←"),
    (":uparrow:", "↑"),
    (":downarrow:", "↓"),
    (":mult:", "×"),
];

/// Second-pass markers.
pub const SECOND_PASS: &[(&str, &str)] = &[
    ("_", "\u{a0}"),
    ("\\'", "'"),
    ("--", "–"),
    ("\\`", "`"),
    ("`", "‘"),
    ("'", "’"),
];
