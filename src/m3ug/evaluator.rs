//! Rule evaluation against tag sets
//!
//! Evaluation is pure: rules and tag sets are never mutated, and repeated
//! application yields the same result. Before any operator check runs, the
//! resolved tag value is normalized into a scalar, a list of scalars, or an
//! explicit "missing" marker, so the per-operator checks never deal with
//! multiplicity themselves.
//!
//! Two deliberate asymmetries, kept for compatibility with existing filter
//! files:
//!
//! - a missing tag fails every operator except `!=`, which passes;
//! - a list-valued tag satisfies an operator iff at least one element does
//!   (any-match, for every operator including `~=`).

use crate::tags::{TagSet, TagValue};

use super::types::{FLOAT_RE, INT_RE, Operand, Operator, Rule, RuleSet};

/// fmps_rating stores 0.0..=1.0; ratings are exposed as 0..=5 stars
const RATING_SCALE: f64 = 5.0;

/// A tag value after name resolution and multiplicity normalization
enum Resolved<'a> {
    Scalar(Scalar<'a>),
    Many(&'a [String]),
    Missing,
}

/// What the per-operator checks actually see
enum Scalar<'a> {
    Number(f64),
    Text(&'a str),
}

impl Rule {
    /// True if this rule passes for the given tag set
    #[must_use]
    pub fn apply(&self, tags: &TagSet) -> bool {
        match resolve(tags, &self.name) {
            Resolved::Missing => self.operator == Operator::NotEqual,
            Resolved::Scalar(value) => self.operator.check(&value, &self.operand),
            Resolved::Many(items) => items
                .iter()
                .any(|item| self.operator.check(&Scalar::Text(item), &self.operand)),
        }
    }
}

impl RuleSet {
    /// True if every rule passes, in file order, stopping at the first
    /// failure
    #[must_use]
    pub fn apply(&self, tags: &TagSet) -> bool {
        self.iter().all(|rule| rule.apply(tags))
    }
}

/// Resolve a rule's tag reference against a tag set
///
/// Lookup is case-insensitive. `rating` has one hardcoded fallback:
/// `fmps_rating`, rescaled from its 0.0..=1.0 domain to stars. A
/// fallback value that does not read as a number resolves to missing.
fn resolve<'a>(tags: &'a TagSet, name: &str) -> Resolved<'a> {
    if let Some(value) = tags.get(name) {
        return normalize(value);
    }
    if name.eq_ignore_ascii_case("rating") {
        if let Some(raw) = tags.get("fmps_rating") {
            if let Some(rating) = fallback_number(raw) {
                return Resolved::Scalar(Scalar::Number(rating * RATING_SCALE));
            }
        }
    }
    Resolved::Missing
}

/// Collapse multiplicity: empty lists are missing, single-element lists
/// are their element, larger lists stay lists
fn normalize(value: &TagValue) -> Resolved<'_> {
    match value {
        TagValue::Number(n) => Resolved::Scalar(Scalar::Number(*n)),
        TagValue::Text(s) => Resolved::Scalar(Scalar::Text(s)),
        TagValue::List(items) => match items.as_slice() {
            [] => Resolved::Missing,
            [only] => Resolved::Scalar(Scalar::Text(only)),
            many => Resolved::Many(many),
        },
    }
}

fn fallback_number(value: &TagValue) -> Option<f64> {
    match normalize(value) {
        Resolved::Scalar(Scalar::Number(n)) => Some(n),
        Resolved::Scalar(Scalar::Text(s)) => s.trim().parse().ok(),
        _ => None,
    }
}

impl Operator {
    /// The scalar contract of one operator; pure, total over its inputs
    fn check(self, value: &Scalar<'_>, operand: &Operand) -> bool {
        match self {
            Self::Equal => scalar_eq(value, operand),
            Self::NotEqual => !scalar_eq(value, operand),
            Self::Contains => match (value, operand) {
                (Scalar::Text(v), Operand::Text(r)) => v.contains(r.as_str()),
                _ => false,
            },
            Self::Less => compare(value, operand, |v, r| v < r),
            Self::LessOrEqual => compare(value, operand, |v, r| v <= r),
            Self::Greater => compare(value, operand, |v, r| v > r),
            Self::GreaterOrEqual => compare(value, operand, |v, r| v >= r),
        }
    }
}

/// Same-kind equality; a number never equals a string
fn scalar_eq(value: &Scalar<'_>, operand: &Operand) -> bool {
    match (value, operand) {
        (Scalar::Number(v), Operand::Number(r)) => v == r,
        (Scalar::Text(v), Operand::Text(r)) => *v == r.as_str(),
        _ => false,
    }
}

fn compare(value: &Scalar<'_>, operand: &Operand, ordering: fn(f64, f64) -> bool) -> bool {
    let Operand::Number(bound) = operand else {
        // the parser rejects text operands for ordering operators
        return false;
    };
    numeric_value(value).is_some_and(|v| ordering(v, *bound))
}

/// Numeric view of a scalar; text coerces only when it is a pure integer
/// or decimal
fn numeric_value(value: &Scalar<'_>) -> Option<f64> {
    match value {
        Scalar::Number(n) => Some(*n),
        Scalar::Text(s) => {
            if INT_RE.is_match(s) || FLOAT_RE.is_match(s) {
                s.parse().ok()
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::m3ug::parser::parse_rules;

    fn tags(pairs: &[(&str, TagValue)]) -> TagSet {
        pairs.iter().cloned().collect()
    }

    fn single_rule(content: &str) -> Rule {
        parse_rules(content, "test.m3ug").unwrap().rules()[0].clone()
    }

    #[test]
    fn test_equal_float() {
        let rule = single_rule("rating = 4.5");
        assert!(rule.apply(&tags(&[("rating", TagValue::Number(4.5))])));
        assert!(!rule.apply(&tags(&[("rating", TagValue::Number(3.5))])));
        assert!(!rule.apply(&tags(&[("rating", TagValue::text("string for some reason"))])));
        assert!(!rule.apply(&TagSet::new()));
    }

    #[test]
    fn test_equal_integer_matches_float_tag() {
        let rule = single_rule("rating = 5");
        assert!(rule.apply(&tags(&[("rating", TagValue::Number(5.0))])));
        assert!(!rule.apply(&tags(&[("rating", TagValue::Number(4.5))])));
    }

    #[test]
    fn test_equal_string() {
        let rule = single_rule("genre = Synthwave");
        assert!(rule.apply(&tags(&[("genre", TagValue::text("Synthwave"))])));
        assert!(!rule.apply(&tags(&[("genre", TagValue::text("Synthwave; Retrowave"))])));
        assert!(!rule.apply(&tags(&[("genre", TagValue::Number(100.0))])));
        assert!(!rule.apply(&TagSet::new()));
    }

    #[test]
    fn test_not_equal_passes_on_missing() {
        let rule = single_rule("rating != 3.5");
        assert!(!rule.apply(&tags(&[("rating", TagValue::Number(3.5))])));
        assert!(rule.apply(&tags(&[("rating", TagValue::Number(5.0))])));
        assert!(rule.apply(&tags(&[("rating", TagValue::text("string for some reason"))])));
        assert!(rule.apply(&TagSet::new()));
    }

    #[test]
    fn test_not_equal_string() {
        let rule = single_rule("genre != Pop");
        assert!(!rule.apply(&tags(&[("genre", TagValue::text("Pop"))])));
        assert!(rule.apply(&tags(&[("genre", TagValue::text("Pop; Reggaeton"))])));
        assert!(rule.apply(&tags(&[("genre", TagValue::text("Metal"))])));
        assert!(rule.apply(&tags(&[("genre", TagValue::Number(100.0))])));
        assert!(rule.apply(&TagSet::new()));
    }

    #[test]
    fn test_contains() {
        let rule = single_rule("genre ~= Synthwave");
        assert!(rule.apply(&tags(&[("genre", TagValue::text("Synthwave"))])));
        assert!(rule.apply(&tags(&[("genre", TagValue::text("Synthwave; Retrowave"))])));
        assert!(!rule.apply(&tags(&[("genre", TagValue::text("Synth; Electronic"))])));
        assert!(!rule.apply(&tags(&[("genre", TagValue::Number(42.0))])));
        assert!(!rule.apply(&TagSet::new()));
    }

    #[test]
    fn test_greater() {
        let rule = single_rule("rating > 3.5");
        assert!(rule.apply(&tags(&[("rating", TagValue::Number(4.0))])));
        assert!(!rule.apply(&tags(&[("rating", TagValue::Number(3.5))])));
        assert!(!rule.apply(&tags(&[("rating", TagValue::text("string for some reason"))])));
        assert!(!rule.apply(&TagSet::new()));
    }

    #[test]
    fn test_ordering_coerces_numeric_strings() {
        let rule = single_rule("rating >= 4");
        assert!(rule.apply(&tags(&[("rating", TagValue::text("4.5"))])));
        assert!(rule.apply(&tags(&[("rating", TagValue::text("4"))])));
        assert!(!rule.apply(&tags(&[("rating", TagValue::text("3.5"))])));
        assert!(!rule.apply(&tags(&[("rating", TagValue::text("nope"))])));
        // signs and exponents are not pure integer/decimal patterns
        assert!(!rule.apply(&tags(&[("rating", TagValue::text("+5"))])));
        assert!(!rule.apply(&tags(&[("rating", TagValue::text("5e1"))])));
    }

    #[test]
    fn test_less_family() {
        assert!(single_rule("rating < 4").apply(&tags(&[("rating", TagValue::Number(3.9))])));
        assert!(!single_rule("rating < 4").apply(&tags(&[("rating", TagValue::Number(4.0))])));
        assert!(single_rule("rating <= 4").apply(&tags(&[("rating", TagValue::Number(4.0))])));
        assert!(!single_rule("rating <= 4").apply(&tags(&[("rating", TagValue::Number(4.1))])));
        assert!(single_rule("rating >= 3.5").apply(&tags(&[("rating", TagValue::Number(3.5))])));
        assert!(!single_rule("rating >= 3.5").apply(&tags(&[("rating", TagValue::Number(2.5))])));
    }

    #[test]
    fn test_name_resolution_is_case_insensitive() {
        let rule = single_rule("Genre = Synthwave");
        assert!(rule.apply(&tags(&[("GENRE", TagValue::text("Synthwave"))])));
    }

    #[test]
    fn test_rating_alias_rescales_fmps_rating() {
        let set = tags(&[("fmps_rating", TagValue::Number(0.8))]);
        assert!(single_rule("rating = 4").apply(&set));
        assert!(single_rule("rating >= 4").apply(&set));
        assert!(!single_rule("rating > 4").apply(&set));
    }

    #[test]
    fn test_rating_alias_accepts_text_and_single_element_lists() {
        assert!(single_rule("rating = 4").apply(&tags(&[("fmps_rating", TagValue::text("0.8"))])));
        assert!(
            single_rule("rating = 4").apply(&tags(&[("fmps_rating", TagValue::list(["0.8"]))]))
        );
    }

    #[test]
    fn test_rating_alias_prefers_direct_key() {
        let set = tags(&[
            ("rating", TagValue::Number(2.0)),
            ("fmps_rating", TagValue::Number(0.8)),
        ]);
        assert!(single_rule("rating = 2").apply(&set));
    }

    #[test]
    fn test_rating_alias_ignores_garbage() {
        let set = tags(&[("fmps_rating", TagValue::text("not a number"))]);
        assert!(!single_rule("rating = 4").apply(&set));
        // missing semantics apply, so != still passes
        assert!(single_rule("rating != 4").apply(&set));
    }

    #[test]
    fn test_list_any_match() {
        let set = tags(&[(
            "genre",
            TagValue::list(["Synthwave", "Retrowave", "Electronic"]),
        )]);
        assert!(single_rule("genre ~= Synth").apply(&set));
        assert!(single_rule("genre = Retrowave").apply(&set));
        assert!(!single_rule("genre = Pop").apply(&set));
        assert!(!single_rule("genre ~= Jazz").apply(&set));
        // any-match applies to != as well: some element differs
        assert!(single_rule("genre != Synthwave").apply(&set));
    }

    #[test]
    fn test_list_of_numeric_strings_compares() {
        let set = tags(&[("rating", TagValue::list(["2", "4.5"]))]);
        assert!(single_rule("rating > 4").apply(&set));
        assert!(!single_rule("rating > 5").apply(&set));
    }

    #[test]
    fn test_single_element_list_behaves_as_scalar() {
        let set = tags(&[("genre", TagValue::list(["Synthwave"]))]);
        assert!(single_rule("genre = Synthwave").apply(&set));
        assert!(!single_rule("genre != Synthwave").apply(&set));
    }

    #[test]
    fn test_empty_list_behaves_as_missing() {
        let set = tags(&[("genre", TagValue::List(Vec::new()))]);
        assert!(!single_rule("genre = Synthwave").apply(&set));
        assert!(single_rule("genre != Synthwave").apply(&set));
    }

    #[test]
    fn test_rule_set_and_semantics() {
        let rules = parse_rules(
            "artist = DANCE WITH THE DEAD\nrating >= 4\ngenre ~= Synthwave",
            "favs.m3ug",
        )
        .unwrap();

        let matching = tags(&[
            ("artist", TagValue::text("DANCE WITH THE DEAD")),
            ("rating", TagValue::Number(4.5)),
            ("genre", TagValue::text("Synthwave; Retrowave")),
        ]);
        assert!(rules.apply(&matching));

        // failing any single rule rejects, regardless of which one
        let wrong_artist = tags(&[
            ("artist", TagValue::text("Carpenter Brut")),
            ("rating", TagValue::Number(4.5)),
            ("genre", TagValue::text("Synthwave")),
        ]);
        let low_rating = tags(&[
            ("artist", TagValue::text("DANCE WITH THE DEAD")),
            ("rating", TagValue::Number(2.0)),
            ("genre", TagValue::text("Synthwave")),
        ]);
        let wrong_genre = tags(&[
            ("artist", TagValue::text("DANCE WITH THE DEAD")),
            ("rating", TagValue::Number(4.5)),
            ("genre", TagValue::text("Jazz")),
        ]);
        assert!(!rules.apply(&wrong_artist));
        assert!(!rules.apply(&low_rating));
        assert!(!rules.apply(&wrong_genre));
    }

    #[test]
    fn test_apply_is_repeatable() {
        let rules = parse_rules("rating >= 4", "f").unwrap();
        let set = tags(&[("rating", TagValue::Number(4.5))]);
        assert!(rules.apply(&set));
        assert!(rules.apply(&set));
        assert_eq!(set, tags(&[("rating", TagValue::Number(4.5))]));
    }

    #[test]
    fn test_empty_rule_set_matches_everything() {
        let rules = parse_rules("# only comments\n", "f").unwrap();
        assert!(rules.is_empty());
        assert!(rules.apply(&TagSet::new()));
    }
}
