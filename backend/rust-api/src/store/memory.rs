use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::TriviaStore;
use crate::models::{Category, NewQuestion, Question};

#[derive(Debug, Default)]
struct Tables {
    categories: BTreeMap<i64, Category>,
    questions: BTreeMap<i64, Question>,
    next_question_id: i64,
}

/// Process-local store. BTreeMaps keep both tables in id order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(categories: Vec<Category>, questions: Vec<Question>) -> Self {
        let next_question_id = questions.iter().map(|q| q.id).max().unwrap_or(0) + 1;
        let tables = Tables {
            categories: categories.into_iter().map(|c| (c.id, c)).collect(),
            questions: questions.into_iter().map(|q| (q.id, q)).collect(),
            next_question_id,
        };
        Self {
            tables: RwLock::new(tables),
        }
    }

    /// The six categories the trivia frontend ships with.
    pub fn default_categories() -> Vec<Category> {
        ["Science", "Art", "Geography", "History", "Entertainment", "Sports"]
            .iter()
            .zip(1..)
            .map(|(kind, id)| Category {
                id,
                kind: kind.to_string(),
            })
            .collect()
    }
}

#[async_trait]
impl TriviaStore for MemoryStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let tables = self.tables.read().await;
        Ok(tables.categories.values().cloned().collect())
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>> {
        let tables = self.tables.read().await;
        Ok(tables.categories.get(&id).cloned())
    }

    async fn list_questions(&self, category: Option<i64>) -> Result<Vec<Question>> {
        let tables = self.tables.read().await;
        Ok(tables
            .questions
            .values()
            .filter(|q| category.is_none_or(|id| q.category == id))
            .cloned()
            .collect())
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>> {
        let needle = term.to_lowercase();
        let tables = self.tables.read().await;
        Ok(tables
            .questions
            .values()
            .filter(|q| q.question.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn insert_question(&self, question: NewQuestion) -> Result<Question> {
        let mut tables = self.tables.write().await;
        let id = tables.next_question_id.max(1);
        tables.next_question_id = id + 1;
        let question = question.with_id(id);
        tables.questions.insert(id, question.clone());
        Ok(question)
    }

    async fn delete_question(&self, id: i64) -> Result<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables.questions.remove(&id).is_some())
    }
}
