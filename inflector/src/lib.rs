//! Pluggable singularize/pluralize capability.
//!
//! Field generators use an [`Inflector`] to derive the per-item accessor
//! name of a plural field (`items` → `item`). The capability is injected,
//! never global:
//!
//! - [`RuleInflector`]: ordered regex rules, irregular pairs and
//!   uncountable words. [`RuleInflector::english`] ships the English set.
//! - [`InflectionTable`]: YAML-serializable rule table that compiles into a
//!   [`RuleInflector`], optionally layered over the English rules.
//! - [`from_fn`]: adapts a plain closure.
//!
//! An inflector must return its input unchanged for words it cannot
//! singularize; that is how callers detect an invalid plural name.
//!
//! # Example
//!
//! ```
//! use dsl_factory_inflector::{Inflector, RuleInflector};
//!
//! let english = RuleInflector::english();
//! assert_eq!(english.singularize("items"), "item");
//! assert_eq!(english.singularize("categories"), "category");
//! assert_eq!(english.singularize("people"), "person");
//! assert_eq!(english.pluralize("box"), "boxes");
//!
//! // Already singular: returned unchanged.
//! assert_eq!(english.singularize("item"), "item");
//! ```

mod error;
mod rules;
mod table;

pub use error::{InflectorError, Result};
pub use rules::{Rule, RuleInflector};
pub use table::{Base, InflectionTable, IrregularWord, RuleSpec};

/// Maps words between their singular and plural forms.
pub trait Inflector: Send + Sync {
    /// Returns the singular form of `word`, or `word` unchanged if it has
    /// none.
    fn singularize(&self, word: &str) -> String;

    /// Returns the plural form of `word`, or `word` unchanged if it has
    /// none.
    fn pluralize(&self, word: &str) -> String;
}

/// Inflector backed by a singularize closure.
///
/// Created by [`from_fn`]. Pluralization is the identity.
#[derive(Clone)]
pub struct FnInflector<F> {
    singularize: F,
}

impl<F> Inflector for FnInflector<F>
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn singularize(&self, word: &str) -> String {
        (self.singularize)(word)
    }

    fn pluralize(&self, word: &str) -> String {
        word.to_string()
    }
}

/// Adapts a singularize closure into an [`Inflector`].
///
/// # Examples
///
/// ```
/// use dsl_factory_inflector::{Inflector, from_fn};
///
/// // German-ish suffix table for a domain vocabulary.
/// let inflector = from_fn(|word: &str| match word.strip_suffix("en") {
///     Some(stem) => stem.to_string(),
///     None => word.to_string(),
/// });
/// assert_eq!(inflector.singularize("posten"), "post");
/// assert_eq!(inflector.singularize("post"), "post");
/// ```
pub fn from_fn<F>(singularize: F) -> FnInflector<F>
where
    F: Fn(&str) -> String + Send + Sync,
{
    FnInflector { singularize }
}

impl<I: Inflector + ?Sized> Inflector for std::sync::Arc<I> {
    fn singularize(&self, word: &str) -> String {
        (**self).singularize(word)
    }

    fn pluralize(&self, word: &str) -> String {
        (**self).pluralize(word)
    }
}
