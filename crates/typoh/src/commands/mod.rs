//! CLI command implementations.

pub(crate) mod convert;
pub(crate) mod list;

pub(crate) use convert::ConvertArgs;

use typoh_config::{Config, Pass};
use typoh_core::PatternTable;

/// Build the core pattern table for one pass from resolved config.
pub(crate) fn pattern_table(config: &Config, pass: Pass) -> PatternTable {
    config
        .rules(pass)
        .iter()
        .map(|rule| (rule.marker.as_str(), rule.replacement.as_str()))
        .collect()
}
