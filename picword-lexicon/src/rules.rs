//! Disambiguation rules: substring patterns that rewrite a cleaned label.

use crate::model::RuleSpec;
use crate::normalize::canonical_form;

/// A compiled rule. Patterns and result are in canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisambiguationRule {
    pub patterns: Vec<String>,
    pub result: String,
}

impl DisambiguationRule {
    fn specificity(&self) -> usize {
        self.patterns.iter().map(|p| p.chars().count()).sum()
    }

    fn matches(&self, label: &str) -> bool {
        self.patterns.iter().all(|p| label.contains(p.as_str()))
    }
}

/// Ordered rule set. The most specific rule (longest total pattern length)
/// is tried first; equally specific rules keep their file order.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<DisambiguationRule>,
}

impl RuleTable {
    /// Compile rule specs. Returns the index of the first spec with no
    /// usable pattern or an empty result.
    pub fn compile(specs: &[RuleSpec]) -> Result<Self, usize> {
        let mut rules = Vec::with_capacity(specs.len());
        for (index, spec) in specs.iter().enumerate() {
            let patterns: Vec<String> = spec
                .when
                .iter()
                .map(|p| canonical_form(p))
                .filter(|p| !p.is_empty())
                .collect();
            let result = canonical_form(&spec.then);
            if patterns.is_empty() || result.is_empty() {
                return Err(index);
            }
            rules.push(DisambiguationRule { patterns, result });
        }
        // sort_by is stable
        rules.sort_by(|a, b| b.specificity().cmp(&a.specificity()));
        Ok(Self { rules })
    }

    /// Result of the first matching rule, if any.
    pub fn apply(&self, label: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.matches(label))
            .map(|rule| rule.result.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &DisambiguationRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(when: &[&str], then: &str) -> RuleSpec {
        RuleSpec {
            when: when.iter().map(|s| s.to_string()).collect(),
            then: then.to_string(),
        }
    }

    #[test]
    fn specific_rule_beats_generic_one() {
        let table = RuleTable::compile(&[
            spec(&["акула"], "акула"),
            spec(&["акула", "бычья"], "бычья_акула"),
        ])
        .unwrap();
        assert_eq!(table.apply("бычья_акула_в_воде"), Some("бычья_акула"));
        assert_eq!(table.apply("акула_на_глубине"), Some("акула"));
        assert_eq!(table.apply("дельфин"), None);
    }

    #[test]
    fn head_noun_inside_longer_word_loses_to_full_match() {
        let table = RuleTable::compile(&[
            spec(&["енот"], "енот"),
            spec(&["собака", "енотовидная"], "енотовидная_собака"),
        ])
        .unwrap();
        assert_eq!(table.apply("енотовидная_собака"), Some("енотовидная_собака"));
    }

    #[test]
    fn ties_keep_file_order() {
        let table = RuleTable::compile(&[spec(&["ab"], "first"), spec(&["cd"], "second")]).unwrap();
        assert_eq!(table.apply("ab_cd"), Some("first"));
    }

    #[test]
    fn empty_rules_are_rejected() {
        assert_eq!(RuleTable::compile(&[spec(&["x"], "y"), spec(&[" "], "z")]).unwrap_err(), 1);
        assert_eq!(RuleTable::compile(&[spec(&["x"], "")]).unwrap_err(), 0);
    }
}
