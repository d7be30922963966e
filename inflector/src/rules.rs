//! Ordered regex inflection rules.
//!
//! Rules are checked most-recently-added first, so later additions override
//! the built-in English set. Irregular pairs and uncountable words apply to
//! the last `_`-separated segment of a word (`line_items` → `line_item`,
//! `sea_sheep` stays `sea_sheep`).

use std::sync::LazyLock;

use regex::Regex;

use crate::Inflector;
use crate::error::{InflectorError, Result};

/// English singular rules, lowest priority first.
const ENGLISH_SINGULARS: &[(&str, &str)] = &[
    (r"(?i)s$", ""),
    (r"(?i)(ss)$", "${1}"),
    (r"(?i)(n)ews$", "${1}ews"),
    (r"(?i)([ti])a$", "${1}um"),
    (
        r"(?i)((a)naly|(b)a|(d)iagno|(p)arenthe|(p)rogno|(s)ynop|(t)he)(sis|ses)$",
        "${1}sis",
    ),
    (r"(?i)(^analy)(sis|ses)$", "${1}sis"),
    (r"(?i)([^f])ves$", "${1}fe"),
    (r"(?i)(hive)s$", "${1}"),
    (r"(?i)(tive)s$", "${1}"),
    (r"(?i)([lr])ves$", "${1}f"),
    (r"(?i)([^aeiouy]|qu)ies$", "${1}y"),
    (r"(?i)(s)eries$", "${1}eries"),
    (r"(?i)(m)ovies$", "${1}ovie"),
    (r"(?i)(x|ch|ss|sh)es$", "${1}"),
    (r"(?i)^(m|l)ice$", "${1}ouse"),
    (r"(?i)(bus)(es)?$", "${1}"),
    (r"(?i)(o)es$", "${1}"),
    (r"(?i)(shoe)s$", "${1}"),
    (r"(?i)(cris|test)(is|es)$", "${1}is"),
    (r"(?i)^(a)x[ie]s$", "${1}xis"),
    (r"(?i)(octop|vir)(us|i)$", "${1}us"),
    (r"(?i)(alias|status)(es)?$", "${1}"),
    (r"(?i)^(ox)en", "${1}"),
    (r"(?i)(vert|ind)ices$", "${1}ex"),
    (r"(?i)(matr)ices$", "${1}ix"),
    (r"(?i)(quiz)zes$", "${1}"),
    (r"(?i)(database)s$", "${1}"),
];

/// English plural rules, lowest priority first.
const ENGLISH_PLURALS: &[(&str, &str)] = &[
    (r"$", "s"),
    (r"(?i)s$", "s"),
    (r"(?i)^(ax|test)is$", "${1}es"),
    (r"(?i)(octop|vir)us$", "${1}i"),
    (r"(?i)(octop|vir)i$", "${1}i"),
    (r"(?i)(alias|status)$", "${1}es"),
    (r"(?i)(bu)s$", "${1}ses"),
    (r"(?i)(buffal|tomat)o$", "${1}oes"),
    (r"(?i)([ti])um$", "${1}a"),
    (r"(?i)([ti])a$", "${1}a"),
    (r"(?i)sis$", "ses"),
    (r"(?i)(?:([^f])fe|([lr])f)$", "${1}${2}ves"),
    (r"(?i)(hive)$", "${1}s"),
    (r"(?i)([^aeiouy]|qu)y$", "${1}ies"),
    (r"(?i)(x|ch|ss|sh)$", "${1}es"),
    (r"(?i)(matr|vert|ind)(?:ix|ex)$", "${1}ices"),
    (r"(?i)^(m|l)ouse$", "${1}ice"),
    (r"(?i)^(m|l)ice$", "${1}ice"),
    (r"(?i)^(ox)$", "${1}en"),
    (r"(?i)^(oxen)$", "${1}"),
    (r"(?i)(quiz)$", "${1}zes"),
];

const ENGLISH_IRREGULARS: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("child", "children"),
    ("sex", "sexes"),
    ("move", "moves"),
    ("zombie", "zombies"),
];

const ENGLISH_UNCOUNTABLES: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "jeans",
    "police",
];

static ENGLISH: LazyLock<RuleInflector> = LazyLock::new(|| {
    let mut inflector = RuleInflector::empty();
    for (pattern, replacement) in ENGLISH_SINGULARS {
        inflector.add_singular(Rule::new(pattern, *replacement).expect("static regex must compile"));
    }
    for (pattern, replacement) in ENGLISH_PLURALS {
        inflector.add_plural(Rule::new(pattern, *replacement).expect("static regex must compile"));
    }
    for (singular, plural) in ENGLISH_IRREGULARS {
        inflector.add_irregular(singular, plural);
    }
    for word in ENGLISH_UNCOUNTABLES {
        inflector.add_uncountable(word);
    }
    inflector
});

/// A single regex substitution rule.
///
/// The replacement uses [`regex`] expansion syntax (`${1}`), and only the
/// first match is replaced.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Regex,
    replacement: String,
}

impl Rule {
    /// Compiles a rule.
    ///
    /// # Errors
    ///
    /// Returns [`InflectorError::InvalidPattern`] if `pattern` is not a
    /// valid regular expression.
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        let compiled = Regex::new(pattern).map_err(|source| InflectorError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            pattern: compiled,
            replacement: replacement.into(),
        })
    }

    /// Returns the source pattern.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Returns the replacement template.
    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    fn apply(&self, word: &str) -> Option<String> {
        if !self.pattern.is_match(word) {
            return None;
        }
        Some(
            self.pattern
                .replace(word, self.replacement.as_str())
                .into_owned(),
        )
    }
}

/// Rule-based inflector.
///
/// # Examples
///
/// ```
/// use dsl_factory_inflector::{Inflector, Rule, RuleInflector};
///
/// let mut inflector = RuleInflector::english();
/// inflector.add_irregular("cactus", "cacti");
/// inflector.add_singular(Rule::new("(?i)(kudo)s$", "${1}s").unwrap());
///
/// assert_eq!(inflector.singularize("cacti"), "cactus");
/// assert_eq!(inflector.singularize("kudos"), "kudos");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleInflector {
    singulars: Vec<Rule>,
    plurals: Vec<Rule>,
    irregulars: Vec<(String, String)>,
    uncountables: Vec<String>,
}

impl RuleInflector {
    /// Creates an inflector with no rules; every word is returned unchanged.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the built-in English rule set.
    pub fn english() -> Self {
        ENGLISH.clone()
    }

    /// Adds a singularization rule with the highest priority.
    pub fn add_singular(&mut self, rule: Rule) -> &mut Self {
        self.singulars.push(rule);
        self
    }

    /// Adds a pluralization rule with the highest priority.
    pub fn add_plural(&mut self, rule: Rule) -> &mut Self {
        self.plurals.push(rule);
        self
    }

    /// Registers an irregular singular/plural pair.
    pub fn add_irregular(&mut self, singular: &str, plural: &str) -> &mut Self {
        self.irregulars
            .push((singular.to_lowercase(), plural.to_lowercase()));
        self
    }

    /// Registers a word that is identical in singular and plural.
    pub fn add_uncountable(&mut self, word: &str) -> &mut Self {
        self.uncountables.push(word.to_lowercase());
        self
    }

    /// Returns `true` if the last segment of `word` is uncountable.
    pub fn is_uncountable(&self, word: &str) -> bool {
        let segment = last_segment(word).to_lowercase();
        self.uncountables.iter().any(|u| *u == segment)
    }

    fn inflect(&self, word: &str, rules: &[Rule], to_singular: bool) -> String {
        if word.is_empty() || self.is_uncountable(word) {
            return word.to_string();
        }

        let segment = last_segment(word);
        let lower = segment.to_lowercase();
        for (singular, plural) in self.irregulars.iter().rev() {
            let (from, to) = if to_singular {
                (plural, singular)
            } else {
                (singular, plural)
            };
            if lower == *to {
                return word.to_string();
            }
            if lower == *from {
                let prefix = &word[..word.len() - segment.len()];
                return format!("{prefix}{}", match_case(segment, to));
            }
        }

        rules
            .iter()
            .rev()
            .find_map(|rule| rule.apply(word))
            .unwrap_or_else(|| word.to_string())
    }
}

impl Inflector for RuleInflector {
    fn singularize(&self, word: &str) -> String {
        self.inflect(word, &self.singulars, true)
    }

    fn pluralize(&self, word: &str) -> String {
        self.inflect(word, &self.plurals, false)
    }
}

fn last_segment(word: &str) -> &str {
    word.rsplit('_').next().unwrap_or(word)
}

/// Carries the case of the first character of `original` over to `word`.
fn match_case(original: &str, word: &str) -> String {
    let starts_upper = original.chars().next().is_some_and(char::is_uppercase);
    if !starts_upper {
        return word.to_string();
    }
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
