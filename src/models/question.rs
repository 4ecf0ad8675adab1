//! Question and answer models.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::common::MultiLingualStr;

/// Whether answering a question is mandatory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionRequirement {
    /// May be left blank
    #[serde(rename = "optional")]
    Optional,
    /// Must be answered
    #[serde(rename = "required")]
    Required,
    /// Required once the submission deadline has passed
    #[serde(rename = "after deadline")]
    AfterDeadline,
}

/// A choice of a single- or multiple-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionOption {
    /// Option id
    pub id: u64,
    /// Option label
    pub answer: MultiLingualStr,
}

/// Reference to the question an answer belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerQuestionRef {
    /// Question id
    pub id: u64,
    /// Question text
    pub question: MultiLingualStr,
}

/// An answer given by a speaker or a reviewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    /// Answer id
    pub id: u64,
    /// The answer text
    pub answer: String,
    /// URL of an uploaded file, for file questions
    #[serde(default)]
    pub answer_file: Option<String>,
    /// The question answered
    pub question: AnswerQuestionRef,
    /// Submission code for submission questions
    #[serde(default)]
    pub submission: Option<String>,
    /// Review id for reviewer questions
    #[serde(default)]
    pub review: Option<u64>,
    /// Speaker code for speaker questions
    #[serde(default)]
    pub person: Option<String>,
    /// Selected options
    pub options: Vec<QuestionOption>,
}

/// A custom question configured for the event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Question id
    pub id: u64,
    /// Input type, e.g. "string", "choices"
    pub variant: String,
    /// Who answers: "submission", "speaker" or "reviewer"
    pub target: String,
    /// Question text
    pub question: MultiLingualStr,
    /// Help text shown below the question
    pub help_text: MultiLingualStr,
    /// When an answer is required
    pub question_required: QuestionRequirement,
    /// Deadline for `after deadline` questions
    #[serde(default)]
    pub deadline: Option<DateTime<FixedOffset>>,
    /// Whether an answer is required
    pub required: bool,
    /// Whether answers can no longer be edited
    #[serde(default)]
    pub read_only: Option<bool>,
    /// Answers are frozen after this time
    #[serde(default)]
    pub freeze_after: Option<DateTime<FixedOffset>>,
    /// Choices for choice questions
    pub options: Vec<QuestionOption>,
    /// Pre-filled answer
    #[serde(default)]
    pub default_answer: Option<String>,
    /// Whether answers count as personal data
    pub contains_personal_data: bool,
    /// Minimum answer length
    #[serde(default)]
    pub min_length: Option<u32>,
    /// Maximum answer length
    #[serde(default)]
    pub max_length: Option<u32>,
    /// Whether answers are shown publicly
    pub is_public: bool,
    /// Whether reviewers can see answers
    pub is_visible_to_reviewers: bool,
}
