use serde::{Deserialize, Serialize};
use validator::Validate;

/// Questions served per page on `GET /questions`.
pub const QUESTIONS_PER_PAGE: usize = 10;

/// A trivia question as it travels over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i32,
}

/// Stored representation in the MongoDB "questions" collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionDocument {
    #[serde(rename = "_id")]
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i32,
}

impl From<QuestionDocument> for Question {
    fn from(doc: QuestionDocument) -> Self {
        Question {
            id: doc.id,
            question: doc.question,
            answer: doc.answer,
            category: doc.category,
            difficulty: doc.difficulty,
        }
    }
}

impl From<Question> for QuestionDocument {
    fn from(question: Question) -> Self {
        QuestionDocument {
            id: question.id,
            question: question.question,
            answer: question.answer,
            category: question.category,
            difficulty: question.difficulty,
        }
    }
}

/// Body of `POST /questions` (JSON or form-encoded)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, message = "Question text must not be empty"))]
    pub question: String,

    #[validate(length(min = 1, message = "Answer text must not be empty"))]
    pub answer: String,

    #[serde(deserialize_with = "super::quiz::number_or_numeric_string")]
    #[validate(range(min = 1, message = "Category must be a positive id"))]
    pub category: i64,

    #[serde(deserialize_with = "super::quiz::number_or_numeric_string")]
    #[validate(range(min = 1, max = 5, message = "Difficulty must be between 1 and 5"))]
    pub difficulty: i32,
}

/// Question fields before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i32,
}

impl NewQuestion {
    pub fn with_id(self, id: i64) -> Question {
        Question {
            id,
            question: self.question,
            answer: self.answer,
            category: self.category,
            difficulty: self.difficulty,
        }
    }
}

impl From<CreateQuestionRequest> for NewQuestion {
    fn from(req: CreateQuestionRequest) -> Self {
        NewQuestion {
            question: req.question.trim().to_string(),
            answer: req.answer.trim().to_string(),
            category: req.category,
            difficulty: req.difficulty,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateQuestionResponse {
    pub success: bool,
    pub created: i64,
}

#[derive(Debug, Serialize)]
pub struct DeleteQuestionResponse {
    pub success: bool,
    pub deleted: i64,
}

/// Query string of `GET /questions`
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// Body of `POST /questions/search`
#[derive(Debug, Deserialize, Validate)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm")]
    #[validate(length(min = 1, message = "Search term must not be empty"))]
    pub search_term: String,
}

/// Shared envelope for every question-listing route.
#[derive(Debug, Serialize)]
pub struct QuestionListResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<super::CategoryMap>,
    pub current_category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(question: &str, answer: &str) -> CreateQuestionRequest {
        CreateQuestionRequest {
            question: question.to_string(),
            answer: answer.to_string(),
            category: 1,
            difficulty: 2,
        }
    }

    #[test]
    fn test_create_request_validation() {
        assert!(request("Who painted the Mona Lisa?", "Da Vinci")
            .validate()
            .is_ok());
        assert!(request("", "Da Vinci").validate().is_err());
        assert!(request("Who painted the Mona Lisa?", "").validate().is_err());

        let mut hard = request("q", "a");
        hard.difficulty = 6;
        assert!(hard.validate().is_err());
    }

    #[test]
    fn test_new_question_trims_text() {
        let new_question: NewQuestion = request("  What is 2+2? ", " 4 ").into();
        assert_eq!(new_question.question, "What is 2+2?");
        assert_eq!(new_question.answer, "4");
        assert_eq!(new_question.with_id(7).id, 7);
    }

    #[test]
    fn test_create_request_accepts_numeric_strings() {
        let req: CreateQuestionRequest = serde_json::from_value(serde_json::json!({
            "question": "Which country hosted the 2014 World Cup?",
            "answer": "Brazil",
            "category": "6",
            "difficulty": "3"
        }))
        .unwrap();
        assert_eq!(req.category, 6);
        assert_eq!(req.difficulty, 3);

        let bad = serde_json::from_value::<CreateQuestionRequest>(serde_json::json!({
            "question": "q", "answer": "a", "category": "sports", "difficulty": 1
        }));
        assert!(bad.is_err());

        let overflow = serde_json::from_value::<CreateQuestionRequest>(serde_json::json!({
            "question": "q", "answer": "a", "category": 1, "difficulty": 9_000_000_000_i64
        }));
        assert!(overflow.is_err());
    }

    #[test]
    fn test_question_wire_format() {
        let question = Question {
            id: 5,
            question: "Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?"
                .to_string(),
            answer: "Maya Angelou".to_string(),
            category: 4,
            difficulty: 2,
        };
        let json = serde_json::to_value(&question).unwrap();
        assert_eq!(json["id"], 5);
        assert_eq!(json["category"], 4);
        assert!(json.get("_id").is_none());
    }
}
