use serde::{Deserialize, Serialize};

use crate::domain::types::{LanguageCode, LanguageId, LanguageName};

/// Entry of the fixed language catalog referenced by translations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Language {
    pub id: LanguageId,
    pub code: LanguageCode,
    pub name: LanguageName,
}
