//! Translation rows and the diff used to reconcile them.

use std::collections::BTreeMap;
use std::fmt::{Debug, Display};

use serde::{Deserialize, Serialize};

use crate::domain::types::LanguageCode;

/// Parent entity owning a set of per-language translations.
///
/// Implemented by the category, post and tag records so the transactional
/// workflow can be written once against this trait.
pub trait Aggregate: Sized {
    /// Surrogate identifier.
    type Id: Copy + Eq + Debug + Display;
    /// Data required to insert the aggregate row.
    type New;
    /// Partial update applied to the aggregate row.
    type Changes;
    /// Language specific text fields of one translation.
    type Fields: Clone + PartialEq + Debug;

    /// Singular, lower-case entity name used in messages.
    const NAME: &'static str;

    /// Identifier of this record.
    fn id(&self) -> Self::Id;
}

/// Text fields for a single language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation<F> {
    pub language: LanguageCode,
    pub fields: F,
}

impl<F> Translation<F> {
    pub fn new(language: LanguageCode, fields: F) -> Self {
        Self { language, fields }
    }
}

/// Aggregate record together with its translation set.
#[derive(Debug, Clone)]
pub struct Translated<A: Aggregate> {
    pub entity: A,
    pub translations: Vec<Translation<A::Fields>>,
}

impl<A: Aggregate> Translated<A> {
    /// Find the translation stored for `language`.
    pub fn translation(&self, language: &str) -> Option<&A::Fields> {
        self.translations
            .iter()
            .find(|t| t.language == language)
            .map(|t| &t.fields)
    }

    /// Language codes present in the translation set, in stored order.
    pub fn languages(&self) -> Vec<&str> {
        self.translations
            .iter()
            .map(|t| t.language.as_str())
            .collect()
    }
}

/// Changes needed to turn the stored translation set into the submitted one.
///
/// Callers must apply `removed` before `changed` and `added` so the
/// `(aggregate, language)` key never holds two rows at once.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcilePlan<F> {
    /// Stored languages absent from the submission.
    pub removed: Vec<LanguageCode>,
    /// Languages present on both sides whose text differs.
    pub changed: Vec<Translation<F>>,
    /// Languages present on both sides with identical text.
    pub unchanged: Vec<Translation<F>>,
    /// Submitted languages with no stored row.
    pub added: Vec<Translation<F>>,
}

impl<F: PartialEq> ReconcilePlan<F> {
    /// Diff `existing` rows against `incoming` ones.
    ///
    /// `incoming` must already be free of duplicate languages.
    pub fn new(existing: Vec<Translation<F>>, incoming: Vec<Translation<F>>) -> Self {
        let mut stored: BTreeMap<LanguageCode, F> = existing
            .into_iter()
            .map(|t| (t.language, t.fields))
            .collect();

        let mut changed = Vec::new();
        let mut unchanged = Vec::new();
        let mut added = Vec::new();

        for translation in incoming {
            match stored.remove(&translation.language) {
                Some(fields) if fields == translation.fields => unchanged.push(translation),
                Some(_) => changed.push(translation),
                None => added.push(translation),
            }
        }

        Self {
            removed: stored.into_keys().collect(),
            changed,
            unchanged,
            added,
        }
    }

    /// Whether applying the plan would touch storage at all.
    pub fn is_noop(&self) -> bool {
        self.removed.is_empty() && self.changed.is_empty() && self.added.is_empty()
    }

    /// The translation set after the plan is applied, sorted by language.
    pub fn into_final_set(self) -> Vec<Translation<F>> {
        let mut translations: Vec<Translation<F>> = self
            .changed
            .into_iter()
            .chain(self.unchanged)
            .chain(self.added)
            .collect();
        translations.sort_by(|a, b| a.language.cmp(&b.language));
        translations
    }
}

/// Languages that occur more than once in `translations`, in first-seen order.
pub fn duplicate_languages<F>(translations: &[Translation<F>]) -> Vec<LanguageCode> {
    let mut seen = BTreeMap::new();
    let mut duplicates = Vec::new();
    for translation in translations {
        let count = seen.entry(&translation.language).or_insert(0usize);
        *count += 1;
        if *count == 2 {
            duplicates.push(translation.language.clone());
        }
    }
    duplicates
}
