//! Flatten Pretalx records into rows for review bookkeeping.
//!
//! Column names follow the conventions in [`Col`], so rows built from
//! submissions, speakers and reviews can be joined on shared columns such
//! as [`Col::SUBMISSION`] or [`Col::SPEAKER_CODE`].
//!
//! Question answers are only present when the records were fetched with
//! the `questions=all` query parameter.
//!
//! Reviewer assignments are kept as a JSON object mapping a reviewer's email
//! to the submission codes assigned to them; see [`read_assignments`] and
//! [`save_assignments`].

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::{json, Value};
use tracing::debug;

use crate::models::{Answer, Review, Speaker, Submission};
use crate::{Error, Result};

/// One flattened record, keyed by column name.
pub type Row = BTreeMap<String, Value>;

/// Reviewer email mapped to the submission codes assigned to them.
pub type Assignments = BTreeMap<String, Vec<String>>;

/// Prefix of columns holding question answers.
pub const QUESTION_PREFIX: &str = "Q: ";

/// Column-name conventions.
pub struct Col;

impl Col {
    /// `Submission`
    pub const SUBMISSION: &'static str = "Submission";
    /// `Submission type`
    pub const SUBMISSION_TYPE: &'static str = "Submission type";
    /// `Submission type id`
    pub const SUBMISSION_TYPE_ID: &'static str = "Submission type id";
    /// `Title`
    pub const TITLE: &'static str = "Title";
    /// `Duration`
    pub const DURATION: &'static str = "Duration";
    /// `Public`
    pub const PUBLIC: &'static str = "Public";
    /// `Track`
    pub const TRACK: &'static str = "Track";
    /// `Comment`
    pub const COMMENT: &'static str = "Comment";
    /// `Created`
    pub const CREATED: &'static str = "Created";
    /// `State`
    pub const STATE: &'static str = "State";
    /// `Pending state`
    pub const PENDING_STATE: &'static str = "Pending state";

    /// `Speaker name`
    pub const SPEAKER_NAME: &'static str = "Speaker name";
    /// `Speaker code`
    pub const SPEAKER_CODE: &'static str = "Speaker code";
    /// `Pretalx user`
    pub const PRETALX_USER: &'static str = "Pretalx user";
    /// `Biography`
    pub const BIOGRAPHY: &'static str = "Biography";
    /// `Affiliation`
    pub const AFFILIATION: &'static str = "Affiliation";
    /// `Email`
    pub const EMAIL: &'static str = "Email";
    /// `Availability`
    pub const AVAILABILITY: &'static str = "Availability";
    /// `Availability Comment`
    pub const AVAILABILITY_COMMENT: &'static str = "Availability Comment";

    /// `#Reviews`
    pub const NREVIEWS: &'static str = "#Reviews";
    /// `Review Score`
    pub const REVIEW_SCORE: &'static str = "Review Score";

    /// `Current Assignments`
    pub const CURR_ASSIGNMENTS: &'static str = "Current Assignments";
}

fn question_column(answer: &Answer) -> String {
    format!(
        "{QUESTION_PREFIX}{}",
        answer.question.question.text().unwrap_or_default()
    )
}

fn insert(row: &mut Row, column: &str, value: Value) {
    row.insert(column.to_string(), value);
}

/// One row per submission. With `with_questions`, every answer becomes a
/// `"Q: <question>"` column.
pub fn submission_rows<'a, I>(subs: I, with_questions: bool) -> Vec<Row>
where
    I: IntoIterator<Item = &'a Submission>,
{
    subs.into_iter()
        .map(|sub| {
            let mut row = Row::new();
            insert(&mut row, Col::SUBMISSION, json!(sub.code));
            insert(&mut row, Col::TITLE, json!(sub.title));
            insert(
                &mut row,
                Col::TRACK,
                json!(sub.track.as_ref().and_then(|track| track.en.clone())),
            );
            let codes: Vec<&str> = sub.speakers.iter().map(|s| s.code.as_str()).collect();
            let names: Vec<&str> = sub.speakers.iter().map(|s| s.name.as_str()).collect();
            insert(&mut row, Col::SPEAKER_CODE, json!(codes));
            insert(&mut row, Col::SPEAKER_NAME, json!(names));
            insert(&mut row, Col::DURATION, json!(sub.duration));
            insert(&mut row, Col::SUBMISSION_TYPE, json!(sub.submission_type.en));
            insert(&mut row, Col::SUBMISSION_TYPE_ID, json!(sub.submission_type_id));
            insert(&mut row, Col::STATE, json!(sub.state.as_str()));
            insert(
                &mut row,
                Col::PENDING_STATE,
                json!(sub.pending_state.map(|state| state.as_str())),
            );
            insert(
                &mut row,
                Col::CREATED,
                json!(sub.created.map(|created| created.to_rfc3339())),
            );

            if with_questions {
                for answer in sub.answers.iter().flatten() {
                    row.insert(question_column(answer), json!(answer.answer));
                }
            }
            row
        })
        .collect()
}

/// One row per speaker. With `with_questions`, answers to speaker questions
/// become `"Q: <question>"` columns; answers belonging to a submission are
/// skipped since a speaker may have several.
pub fn speaker_rows<'a, I>(speakers: I, with_questions: bool) -> Vec<Row>
where
    I: IntoIterator<Item = &'a Speaker>,
{
    speakers
        .into_iter()
        .map(|speaker| {
            let mut row = Row::new();
            insert(&mut row, Col::SPEAKER_CODE, json!(speaker.code));
            insert(&mut row, Col::SPEAKER_NAME, json!(speaker.name));
            insert(&mut row, Col::EMAIL, json!(speaker.email));
            insert(&mut row, Col::BIOGRAPHY, json!(speaker.biography));
            insert(&mut row, Col::SUBMISSION, json!(speaker.submissions));

            if with_questions {
                for answer in speaker.answers.iter().flatten() {
                    if answer.person.is_some() {
                        row.insert(question_column(answer), json!(answer.answer));
                    }
                }
            }
            row
        })
        .collect()
}

/// One row per review, with every field as a title-cased column. The
/// reviewer becomes [`Col::PRETALX_USER`] and the score
/// [`Col::REVIEW_SCORE`].
pub fn review_rows<'a, I>(reviews: I) -> Vec<Row>
where
    I: IntoIterator<Item = &'a Review>,
{
    reviews
        .into_iter()
        .map(|review| {
            let fields = [
                ("id", json!(review.id)),
                ("submission", json!(review.submission)),
                ("user", json!(review.user)),
                ("text", json!(review.text)),
                ("score", json!(review.score)),
                ("created", json!(review.created.to_rfc3339())),
                ("updated", json!(review.updated.to_rfc3339())),
                ("answers", json!(review.answers)),
            ];
            fields
                .into_iter()
                .map(|(field, value)| (review_column(field), value))
                .collect()
        })
        .collect()
}

fn review_column(field: &str) -> String {
    match field {
        "user" => Col::PRETALX_USER.to_string(),
        "score" => Col::REVIEW_SCORE.to_string(),
        other => title_case(other),
    }
}

/// Load reviewer assignments from a JSON file.
pub fn read_assignments(path: impl AsRef<Path>) -> Result<Assignments> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading assignments");
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(Error::schema::<Assignments>)
}

/// Write reviewer assignments to a pretty-printed JSON file, replacing it
/// if it exists.
pub fn save_assignments(path: impl AsRef<Path>, assignments: &Assignments) -> Result<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), reviewers = assignments.len(), "saving assignments");
    let content =
        serde_json::to_string_pretty(assignments).map_err(Error::schema::<Assignments>)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// One row per reviewer with [`Col::EMAIL`] and [`Col::CURR_ASSIGNMENTS`].
pub fn assignment_rows(assignments: &Assignments) -> Vec<Row> {
    assignments
        .iter()
        .map(|(email, codes)| {
            let mut row = Row::new();
            insert(&mut row, Col::EMAIL, json!(email));
            insert(&mut row, Col::CURR_ASSIGNMENTS, json!(codes));
            row
        })
        .collect()
}

/// Upper-case the first letter of every word and lower-case the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            word_start = false;
        } else {
            out.push(c);
            word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::submission::tests::submission_json;

    fn speaker() -> Speaker {
        serde_json::from_value(json!({
            "code": "SPK1",
            "name": "Ada Lovelace",
            "biography": "Counts things.",
            "avatar": null,
            "email": "ada@example.org",
            "submissions": ["MD9SLQ"],
            "answers": [
                {
                    "id": 1,
                    "answer": "Analytical Engines Ltd.",
                    "question": {"id": 9, "question": {"en": "Company"}},
                    "submission": null,
                    "review": null,
                    "person": "SPK1",
                    "options": []
                },
                {
                    "id": 2,
                    "answer": "Intermediate",
                    "question": {"id": 3, "question": {"en": "Expected audience expertise"}},
                    "submission": "MD9SLQ",
                    "review": null,
                    "person": null,
                    "options": []
                }
            ]
        }))
        .unwrap()
    }

    fn review() -> Review {
        serde_json::from_value(json!({
            "id": 42,
            "submission": "MD9SLQ",
            "user": "Grace",
            "text": "Solid.",
            "score": "2.0",
            "created": "2023-01-10T09:00:00+01:00",
            "updated": "2023-01-10T09:05:00+01:00",
            "answers": []
        }))
        .unwrap()
    }

    #[test]
    fn test_submission_rows() {
        let sub: Submission = serde_json::from_value(submission_json("MD9SLQ")).unwrap();
        let rows = submission_rows([&sub], false);

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row[Col::SUBMISSION], "MD9SLQ");
        assert_eq!(row[Col::TRACK], "PyData: Data Handling");
        assert_eq!(row[Col::SPEAKER_CODE], json!(["SPK1"]));
        assert_eq!(row[Col::STATE], "submitted");
        assert_eq!(row[Col::PENDING_STATE], Value::Null);
        assert_eq!(row[Col::DURATION], 30);
        assert!(!row.keys().any(|key| key.starts_with(QUESTION_PREFIX)));
    }

    #[test]
    fn test_submission_rows_with_questions() {
        let sub: Submission = serde_json::from_value(submission_json("MD9SLQ")).unwrap();
        let rows = submission_rows([&sub], true);
        assert_eq!(rows[0]["Q: Expected audience expertise"], "Intermediate");
    }

    #[test]
    fn test_speaker_rows_only_keep_person_answers() {
        let speaker = speaker();
        let rows = speaker_rows([&speaker], true);
        let row = &rows[0];

        assert_eq!(row[Col::EMAIL], "ada@example.org");
        assert_eq!(row[Col::SUBMISSION], json!(["MD9SLQ"]));
        assert_eq!(row["Q: Company"], "Analytical Engines Ltd.");
        assert!(!row.contains_key("Q: Expected audience expertise"));
    }

    #[test]
    fn test_review_rows_rename_columns() {
        let review = review();
        let rows = review_rows([&review]);
        let row = &rows[0];

        assert_eq!(row[Col::PRETALX_USER], "Grace");
        assert_eq!(row[Col::REVIEW_SCORE], 2.0);
        assert_eq!(row[Col::SUBMISSION], "MD9SLQ");
        assert_eq!(row["Id"], 42);
        assert!(row.contains_key("Created"));
        assert!(!row.contains_key("user"));
    }

    #[test]
    fn test_assignments_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assignments.json");

        let mut assignments = Assignments::new();
        assignments.insert(
            "grace@example.org".to_string(),
            vec!["MD9SLQ".to_string(), "AB12CD".to_string()],
        );
        assignments.insert("alan@example.org".to_string(), vec![]);

        save_assignments(&path, &assignments).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\n  \"alan@example.org\""));
        assert_eq!(read_assignments(&path).unwrap(), assignments);

        let rows = assignment_rows(&assignments);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][Col::EMAIL], "alan@example.org");
        assert_eq!(rows[1][Col::CURR_ASSIGNMENTS], json!(["MD9SLQ", "AB12CD"]));
    }

    #[test]
    fn test_read_assignments_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = read_assignments(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(missing, Error::Io(_)));

        let path = dir.path().join("broken.json");
        std::fs::write(&path, r#"{"grace@example.org": "MD9SLQ"}"#).unwrap();
        let err = read_assignments(&path).unwrap_err();
        assert!(matches!(err, Error::Schema { .. }));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("submission"), "Submission");
        assert_eq!(title_case("pending_state"), "Pending_State");
        assert_eq!(title_case("hELLO world"), "Hello World");
    }
}
