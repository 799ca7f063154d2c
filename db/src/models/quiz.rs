use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// One multiple-choice question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

/// Ordered question list, stored as a JSON column.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize, FromJsonQueryResult)]
pub struct QuizQuestions(pub Vec<QuizQuestion>);

impl QuizQuestions {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Scores an answer sheet against the question list.
    ///
    /// Answers are compared positionally by plain string equality. Returns the
    /// number of correct answers and the percentage score; an empty quiz scores 0.
    pub fn score(&self, answers: &[String]) -> (usize, f64) {
        if self.0.is_empty() {
            return (0, 0.0);
        }

        let correct = self
            .0
            .iter()
            .enumerate()
            .filter(|(i, q)| answers.get(*i).is_some_and(|a| *a == q.correct_answer))
            .count();

        (correct, (correct as f64 / self.0.len() as f64) * 100.0)
    }
}

/// Represents a quiz in the `quizzes` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "quizzes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    /// Authoring teacher; cleared if the account is deleted.
    pub created_by: Option<i64>,
    pub title: String,
    pub max_marks: i32,
    pub questions: QuizQuestions,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id"
    )]
    Course,

    #[sea_orm(has_many = "super::quiz_attempt::Entity")]
    Attempts,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::quiz_attempt::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attempts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
