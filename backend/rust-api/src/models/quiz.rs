use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

use super::Question;

/// Which questions a quiz round draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Category(i64),
}

/// Clients send ids and scores either as numbers or as numeric strings
/// (select inputs and form bodies only ever produce strings).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Number(i64),
    Text(String),
}

impl CategoryRef {
    pub fn as_i64(&self) -> Result<i64, String> {
        match self {
            CategoryRef::Number(value) => Ok(*value),
            CategoryRef::Text(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|_| format!("not an integer: {:?}", raw)),
        }
    }
}

/// `deserialize_with` helper accepting `3` or `"3"` for any integer field.
pub fn number_or_numeric_string<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    let value = CategoryRef::deserialize(deserializer)?
        .as_i64()
        .map_err(serde::de::Error::custom)?;
    T::try_from(value)
        .map_err(|_| serde::de::Error::custom(format!("integer out of range: {}", value)))
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizCategory {
    pub id: CategoryRef,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// Body of `POST /quizzes`
#[derive(Debug, Clone, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub previous_questions: Vec<i64>,
    #[serde(default)]
    pub quiz_category: Option<QuizCategory>,
}

impl QuizRequest {
    /// `None`, or an id of 0, selects every category.
    pub fn category_filter(&self) -> Result<CategoryFilter, String> {
        let Some(category) = &self.quiz_category else {
            return Ok(CategoryFilter::All);
        };

        let id = category
            .id
            .as_i64()
            .map_err(|e| format!("quiz_category.id is not a category reference: {}", e))?;

        match id {
            0 => Ok(CategoryFilter::All),
            id if id > 0 => Ok(CategoryFilter::Category(id)),
            id => Err(format!("quiz_category.id must not be negative: {}", id)),
        }
    }

    pub fn excluded_ids(&self) -> HashSet<i64> {
        self.previous_questions.iter().copied().collect()
    }
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    #[serde(rename = "previousQuestions")]
    pub previous_questions: Vec<i64>,
    pub question: Option<Question>,
}
