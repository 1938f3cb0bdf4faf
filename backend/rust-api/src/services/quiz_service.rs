use anyhow::Result;
use rand::{seq::IndexedRandom, Rng};
use std::collections::HashSet;
use std::sync::Arc;

use crate::metrics::{QUIZ_EXHAUSTED_TOTAL, QUIZ_QUESTIONS_SERVED_TOTAL};
use crate::models::{CategoryFilter, Question};
use crate::store::TriviaStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextQuestion {
    Question(Question),
    /// Every candidate has already been served this session.
    Exhausted,
}

impl NextQuestion {
    pub fn into_option(self) -> Option<Question> {
        match self {
            NextQuestion::Question(question) => Some(question),
            NextQuestion::Exhausted => None,
        }
    }
}

/// Picks one candidate whose id is not in `excluded`, uniformly at random.
pub fn choose_unseen<'a, R>(
    candidates: &'a [Question],
    excluded: &HashSet<i64>,
    rng: &mut R,
) -> Option<&'a Question>
where
    R: Rng + ?Sized,
{
    let fresh: Vec<&Question> = candidates
        .iter()
        .filter(|question| !excluded.contains(&question.id))
        .collect();
    fresh.choose(rng).copied()
}

/// Serves quiz questions. Holds no per-player state: the history arrives
/// with every request and is trusted as given.
pub struct QuizService {
    store: Arc<dyn TriviaStore>,
}

impl QuizService {
    pub fn new(store: Arc<dyn TriviaStore>) -> Self {
        Self { store }
    }

    pub async fn next_question(
        &self,
        filter: CategoryFilter,
        excluded: &HashSet<i64>,
    ) -> Result<NextQuestion> {
        let (category, scope) = match filter {
            CategoryFilter::All => (None, "all"),
            CategoryFilter::Category(id) => (Some(id), "category"),
        };
        let candidates = self.store.list_questions(category).await?;

        let picked = choose_unseen(&candidates, excluded, &mut rand::rng()).cloned();

        match picked {
            Some(question) => {
                tracing::debug!(
                    "Serving question {} ({} candidates, {} excluded)",
                    question.id,
                    candidates.len(),
                    excluded.len()
                );
                QUIZ_QUESTIONS_SERVED_TOTAL.with_label_values(&[scope]).inc();
                Ok(NextQuestion::Question(question))
            }
            None => {
                tracing::debug!("Quiz exhausted for filter {:?}", filter);
                QUIZ_EXHAUSTED_TOTAL.inc();
                Ok(NextQuestion::Exhausted)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use rand::{rngs::StdRng, SeedableRng};

    fn question(id: i64, category: i64) -> Question {
        Question {
            id,
            question: format!("Question {}", id),
            answer: format!("Answer {}", id),
            category,
            difficulty: 1,
        }
    }

    fn service(questions: Vec<Question>) -> QuizService {
        QuizService::new(Arc::new(MemoryStore::with_data(
            MemoryStore::default_categories(),
            questions,
        )))
    }

    #[test]
    fn test_choose_unseen_skips_excluded() {
        let candidates: Vec<Question> = (1..=5).map(|id| question(id, 1)).collect();
        let excluded: HashSet<i64> = [1, 2, 4, 5].into_iter().collect();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let picked = choose_unseen(&candidates, &excluded, &mut rng).unwrap();
            assert_eq!(picked.id, 3);
        }
    }

    #[test]
    fn test_choose_unseen_reaches_every_candidate() {
        let candidates: Vec<Question> = (1..=4).map(|id| question(id, 1)).collect();
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = HashSet::new();

        for _ in 0..200 {
            seen.insert(choose_unseen(&candidates, &HashSet::new(), &mut rng).unwrap().id);
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_choose_unseen_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(choose_unseen(&[], &HashSet::new(), &mut rng).is_none());
    }

    #[tokio::test]
    async fn test_category_filter_is_respected() {
        let service = service(vec![question(1, 1), question(2, 2), question(3, 2), question(4, 3)]);

        for _ in 0..20 {
            let next = service
                .next_question(CategoryFilter::Category(2), &HashSet::new())
                .await
                .unwrap();
            match next {
                NextQuestion::Question(q) => assert_eq!(q.category, 2),
                NextQuestion::Exhausted => panic!("category 2 has questions"),
            }
        }
    }

    #[tokio::test]
    async fn test_session_walks_through_every_question_then_exhausts() {
        let service = service((1..=6).map(|id| question(id, id % 2 + 1)).collect());
        let mut excluded = HashSet::new();

        for _ in 0..6 {
            let q = service
                .next_question(CategoryFilter::All, &excluded)
                .await
                .unwrap()
                .into_option()
                .unwrap();
            assert!(excluded.insert(q.id), "question {} served twice", q.id);
        }

        assert_eq!(
            service
                .next_question(CategoryFilter::All, &excluded)
                .await
                .unwrap(),
            NextQuestion::Exhausted
        );
    }

    #[tokio::test]
    async fn test_unknown_category_is_exhausted() {
        let service = service(vec![question(1, 1)]);
        let next = service
            .next_question(CategoryFilter::Category(99), &HashSet::new())
            .await
            .unwrap();
        assert_eq!(next, NextQuestion::Exhausted);
    }
}
