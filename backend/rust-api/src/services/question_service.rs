use std::sync::Arc;

use crate::error::ApiError;
use crate::metrics::QUESTIONS_MUTATIONS_TOTAL;
use crate::models::{Category, NewQuestion, Question, QUESTIONS_PER_PAGE};
use crate::store::TriviaStore;

/// Returns the 1-based `page` of `questions`, `QUESTIONS_PER_PAGE` at a time.
/// Pages past the end are empty; page 0 is treated as empty as well.
pub fn paginate(questions: &[Question], page: usize) -> &[Question] {
    if page == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(QUESTIONS_PER_PAGE);
    if start >= questions.len() {
        return &[];
    }
    let end = start.saturating_add(QUESTIONS_PER_PAGE).min(questions.len());
    &questions[start..end]
}

/// Parses the `page` query parameter: absent means 1, anything that is not a
/// positive integer is rejected.
pub fn parse_page(raw: Option<&str>) -> Result<usize, ApiError> {
    match raw {
        None => Ok(1),
        Some(value) => match value.trim().parse::<usize>() {
            Ok(page) if page >= 1 => Ok(page),
            _ => Err(ApiError::unprocessable(format!(
                "page must be a positive integer, got {:?}",
                value
            ))),
        },
    }
}

#[derive(Debug)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub categories: Vec<Category>,
}

pub struct QuestionService {
    store: Arc<dyn TriviaStore>,
}

impl QuestionService {
    pub fn new(store: Arc<dyn TriviaStore>) -> Self {
        Self { store }
    }

    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        Ok(self.store.list_categories().await?)
    }

    /// One page of the id-ordered question list. Only the first page may be
    /// empty; any later page without questions is "not found".
    pub async fn page(&self, page: usize) -> Result<QuestionPage, ApiError> {
        let all = self.store.list_questions(None).await?;
        let questions = paginate(&all, page).to_vec();

        if questions.is_empty() && page > 1 {
            return Err(ApiError::not_found(format!(
                "page {} is beyond the {} available questions",
                page,
                all.len()
            )));
        }

        let categories = self.store.list_categories().await?;
        Ok(QuestionPage {
            questions,
            total_questions: all.len(),
            categories,
        })
    }

    /// Matches the term exactly as sent, surrounding whitespace included;
    /// only an all-blank term is rejected.
    pub async fn search(&self, term: &str) -> Result<Vec<Question>, ApiError> {
        if term.trim().is_empty() {
            return Err(ApiError::unprocessable("search term must not be blank"));
        }
        Ok(self.store.search_questions(term).await?)
    }

    pub async fn by_category(&self, category_id: i64) -> Result<(Category, Vec<Question>), ApiError> {
        let category = self
            .store
            .get_category(category_id)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("category {} does not exist", category_id)))?;
        let questions = self.store.list_questions(Some(category_id)).await?;
        Ok((category, questions))
    }

    pub async fn create(&self, question: NewQuestion) -> Result<Question, ApiError> {
        if question.question.is_empty() || question.answer.is_empty() {
            return Err(ApiError::unprocessable(
                "question and answer must contain more than whitespace",
            ));
        }
        if self.store.get_category(question.category).await?.is_none() {
            return Err(ApiError::unprocessable(format!(
                "category {} does not exist",
                question.category
            )));
        }

        let created = self.store.insert_question(question).await?;
        QUESTIONS_MUTATIONS_TOTAL.with_label_values(&["create"]).inc();
        tracing::info!("Created question {} in category {}", created.id, created.category);
        Ok(created)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        if !self.store.delete_question(id).await? {
            return Err(ApiError::unprocessable(format!("question {} does not exist", id)));
        }
        QUESTIONS_MUTATIONS_TOTAL.with_label_values(&["delete"]).inc();
        tracing::info!("Deleted question {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn numbered(count: i64) -> Vec<Question> {
        (1..=count)
            .map(|id| Question {
                id,
                question: format!("Question {}", id),
                answer: "a".to_string(),
                category: 1,
                difficulty: 1,
            })
            .collect()
    }

    #[test]
    fn test_pages_are_contiguous_and_cover_everything() {
        let questions = numbered(23);
        let mut rebuilt = Vec::new();
        let mut page = 1;
        loop {
            let slice = paginate(&questions, page);
            if slice.is_empty() {
                break;
            }
            assert!(slice.len() <= QUESTIONS_PER_PAGE);
            rebuilt.extend_from_slice(slice);
            page += 1;
        }
        assert_eq!(page, 4);
        assert_eq!(rebuilt, questions);
    }

    #[test]
    fn test_paginate_out_of_range() {
        let questions = numbered(12);
        let second: Vec<i64> = paginate(&questions, 2).iter().map(|q| q.id).collect();
        assert_eq!(second, vec![11, 12]);
        assert!(paginate(&questions, 3).is_empty());
        assert!(paginate(&questions, 0).is_empty());
        assert!(paginate(&questions, usize::MAX).is_empty());
    }

    #[test]
    fn test_parse_page() {
        assert_eq!(parse_page(None).unwrap(), 1);
        assert_eq!(parse_page(Some("3")).unwrap(), 3);
        assert!(parse_page(Some("0")).is_err());
        assert!(parse_page(Some("-1")).is_err());
        assert!(parse_page(Some("two")).is_err());
    }

    #[tokio::test]
    async fn test_page_beyond_range_is_not_found() {
        let service = QuestionService::new(Arc::new(MemoryStore::with_data(
            MemoryStore::default_categories(),
            numbered(12),
        )));
        assert!(matches!(service.page(3).await, Err(ApiError::NotFound(_))));

        let empty = QuestionService::new(Arc::new(MemoryStore::new()));
        let first = empty.page(1).await.unwrap();
        assert!(first.questions.is_empty());
        assert_eq!(first.total_questions, 0);
    }

    #[tokio::test]
    async fn test_search_keeps_surrounding_whitespace() {
        let mut questions = numbered(2);
        questions[0].question = "Often cloudy in London?".to_string();
        questions[1].question = "What is the capital of Peru?".to_string();
        let service = QuestionService::new(Arc::new(MemoryStore::with_data(
            MemoryStore::default_categories(),
            questions,
        )));

        let spaced: Vec<i64> = service.search(" of").await.unwrap().iter().map(|q| q.id).collect();
        assert_eq!(spaced, vec![2]);

        let bare: Vec<i64> = service.search("of").await.unwrap().iter().map(|q| q.id).collect();
        assert_eq!(bare, vec![1, 2]);

        assert!(matches!(service.search("   ").await, Err(ApiError::Unprocessable(_))));
    }

    #[tokio::test]
    async fn test_create_requires_known_category() {
        let service = QuestionService::new(Arc::new(MemoryStore::with_data(
            MemoryStore::default_categories(),
            Vec::new(),
        )));
        let result = service
            .create(NewQuestion {
                question: "q".to_string(),
                answer: "a".to_string(),
                category: 42,
                difficulty: 1,
            })
            .await;
        assert!(matches!(result, Err(ApiError::Unprocessable(_))));
    }
}
