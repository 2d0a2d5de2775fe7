use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single trivia item. Immutable once the bank is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub topic: String,
    pub prompt: String,
    pub options: [String; 4],
    pub correct_index: usize,
}

impl Question {
    fn new(topic: &str, prompt: &str, options: [&str; 4], correct_index: usize) -> Self {
        Self {
            topic: topic.to_string(),
            prompt: prompt.to_string(),
            options: options.map(str::to_string),
            correct_index,
        }
    }
}

/// Errors raised by question bank access and construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuestionError {
    #[error("question index {index} out of range (pool size {len})")]
    OutOfRange { index: usize, len: usize },
    #[error("question {index} has correct_index {correct_index}, must be 0..=3")]
    BadCorrectIndex { index: usize, correct_index: usize },
}

/// Read-only pool of trivia questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Create an empty bank (useful for construction-error tests).
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            questions: Vec::new(),
        }
    }

    /// Build a bank from pre-parsed questions.
    ///
    /// # Errors
    ///
    /// Returns an error if any question's correct answer index is out of the
    /// four-option range.
    pub fn from_questions(questions: Vec<Question>) -> Result<Self, QuestionError> {
        for (index, question) in questions.iter().enumerate() {
            if question.correct_index > 3 {
                return Err(QuestionError::BadCorrectIndex {
                    index,
                    correct_index: question.correct_index,
                });
            }
        }
        Ok(Self { questions })
    }

    /// Load a bank from a JSON array of questions.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into valid questions.
    pub fn from_json(json: &str) -> Result<Self, anyhow::Error> {
        let questions: Vec<Question> = serde_json::from_str(json)?;
        Ok(Self::from_questions(questions)?)
    }

    /// Fetch a question by index.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::OutOfRange` when the index is invalid.
    pub fn get(&self, index: usize) -> Result<&Question, QuestionError> {
        self.questions.get(index).ok_or(QuestionError::OutOfRange {
            index,
            len: self.questions.len(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// The built-in Minnesota-history pool shipped with the game.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            questions: builtin_pool(),
        }
    }
}

fn builtin_pool() -> Vec<Question> {
    vec![
        Question::new(
            "Flour Power",
            "Which city was the 'Flour Milling Capital of the World'?",
            ["Duluth", "Minneapolis", "St. Paul", "Rochester"],
            1,
        ),
        Question::new(
            "Fur Trade",
            "Which animal pelt was most prized by Voyageurs?",
            ["Bear", "Deer", "Beaver", "Wolf"],
            2,
        ),
        Question::new(
            "Iron Giants",
            "Name the largest Iron Range in MN.",
            ["Mesabi", "Cuyuna", "Vermilion", "Gunflint"],
            0,
        ),
        Question::new(
            "State Seal",
            "The phrase 'L'Etoile du Nord' means:",
            ["Land of Lakes", "Star of the North", "True North", "Cold Waters"],
            1,
        ),
        Question::new(
            "First People",
            "Which group lived in MN forests before the Ojibwe arrived?",
            ["Dakota", "Iroquois", "Apache", "Inuit"],
            0,
        ),
        Question::new(
            "Water Source",
            "Lake Itasca is the source of which river?",
            ["Minnesota", "St. Croix", "Mississippi", "Red"],
            2,
        ),
        Question::new(
            "Early Politics",
            "Who was Minnesota's first state governor?",
            ["Alexander Ramsey", "Henry Sibley", "Knute Nelson", "Hubert Humphrey"],
            1,
        ),
        Question::new(
            "Transport",
            "What was the Red River Cart known for?",
            ["Its speed", "Its squeaky wheels", "Its iron frame", "Floating"],
            1,
        ),
        Question::new(
            "Conflict",
            "The US-Dakota War took place in which year?",
            ["1812", "1862", "1900", "1776"],
            1,
        ),
        Question::new(
            "Immigration",
            "Which European group settled heavily in MN in the late 1800s?",
            ["Italians", "Scandinavians", "Spanish", "Greeks"],
            1,
        ),
        Question::new(
            "Civil War",
            "MN was the first state to offer troops to the Union. Which regiment is famous?",
            ["1st Minnesota", "Iron Brigade", "Rough Riders", "Green Mountain Boys"],
            0,
        ),
        Question::new(
            "Folklore",
            "Who is the legendary giant lumberjack of MN folklore?",
            ["Pecos Bill", "John Henry", "Paul Bunyan", "Johnny Appleseed"],
            2,
        ),
        Question::new(
            "Geography",
            "What is the largest lake entirely within Minnesota?",
            ["Mille Lacs", "Red Lake", "Leech Lake", "Lake Minnetonka"],
            1,
        ),
        Question::new(
            "Capital City",
            "Which city is the capital of Minnesota?",
            ["Minneapolis", "St. Paul", "Duluth", "Bloomington"],
            1,
        ),
        Question::new(
            "Territory",
            "Before statehood, MN was a territory. In what year did it become a territory?",
            ["1849", "1858", "1800", "1890"],
            0,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_pool_is_large_enough_for_relocation() {
        let bank = QuestionBank::builtin();
        assert_eq!(bank.len(), 15);
        assert!(bank.len() > crate::constants::SLOT_COUNT);
    }

    #[test]
    fn get_rejects_out_of_range_index() {
        let bank = QuestionBank::builtin();
        assert!(bank.get(0).is_ok());
        assert_eq!(
            bank.get(99),
            Err(QuestionError::OutOfRange { index: 99, len: 15 })
        );
    }

    #[test]
    fn from_json_parses_questions() {
        let json = r#"[{
            "topic": "Test",
            "prompt": "Pick the third option.",
            "options": ["a", "b", "c", "d"],
            "correct_index": 2
        }]"#;
        let bank = QuestionBank::from_json(json).unwrap();
        assert_eq!(bank.len(), 1);
        assert_eq!(bank.get(0).unwrap().correct_index, 2);
    }

    #[test]
    fn from_questions_rejects_bad_correct_index() {
        let question = Question::new("T", "Q", ["a", "b", "c", "d"], 4);
        let err = QuestionBank::from_questions(vec![question]).unwrap_err();
        assert_eq!(
            err,
            QuestionError::BadCorrectIndex {
                index: 0,
                correct_index: 4
            }
        );
    }
}
