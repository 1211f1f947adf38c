//! The M3UG filter-rule language
//!
//! M3UG is a line-oriented format for describing which media files belong
//! in a playlist. Blank lines and lines starting with `#` are ignored;
//! every other line is one rule in the form `<tag> <operator> <value>`:
//!
//! ```text
//! # My favorite DANCE WITH THE DEAD songs
//! artist = DANCE WITH THE DEAD
//! rating >= 4
//! genre ~= Synthwave
//! ```
//!
//! All rules in a file must pass for a file to match (logical AND). The
//! operator set is closed: `=`, `!=`, `~=` (substring), `<`, `<=`, `>`,
//! `>=`. Operand typing is validated at parse time, so a comparison
//! against a non-numeric value is rejected before any file is evaluated.

pub mod evaluator;
pub mod parser;
pub mod types;

pub use parser::{ParseError, parse_rules};
pub use types::{Operand, Operator, Rule, RuleSet};
