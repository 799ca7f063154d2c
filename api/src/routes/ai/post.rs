use axum::{Extension, Json, extract::State, response::IntoResponse};
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use util::state::AppState;

use db::models::{
    course::Entity as CourseEntity,
    course_student,
    user::{Entity as UserEntity, Role},
};

use crate::auth::CurrentUser;
use crate::response::{ApiError, ApiResponse};
use crate::routes::ai::common::{PerformanceData, build_performance_data};
use crate::services::ai::GeminiClient;

#[derive(Debug, Deserialize)]
pub struct GenerateBlogRequest {
    pub topic: Option<String>,
    pub length: Option<String>,
    pub tone: Option<String>,
    pub target_audience: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BlogMetadata {
    pub topic: String,
    pub length: Option<String>,
    pub tone: Option<String>,
    pub target_audience: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateBlogResponse {
    pub content: String,
    pub metadata: BlogMetadata,
}

/// POST /api/ai/generate-blog
///
/// Builds a prompt from the caller's topic/length/tone/audience parameters,
/// forwards it to the completion service, and echoes the parameters back as
/// metadata.
pub async fn generate_blog(
    Json(req): Json<GenerateBlogRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let topic = req
        .topic
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::bad_request("Topic is required"))?;

    let length = req.length.as_deref().unwrap_or("medium");
    let tone = req.tone.as_deref().unwrap_or("professional");
    let audience = req.target_audience.as_deref().unwrap_or("general");

    let prompt = format!(
        "You are a professional blog writer with expertise in educational content. \
         Write a {length} length blog post about {topic}. \
         Tone should be {tone} and target audience is {audience}."
    );

    let content = GeminiClient::from_env().generate(&prompt).await?;

    Ok(Json(ApiResponse::success(
        GenerateBlogResponse {
            content,
            metadata: BlogMetadata {
                topic,
                length: req.length,
                tone: req.tone,
                target_audience: req.target_audience,
            },
        },
        "Blog generated successfully",
    )))
}

#[derive(Debug, Deserialize)]
pub struct TranslateAudioRequest {
    pub audio_url: Option<String>,
    pub mime_type: Option<String>,
    pub target_language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TranslateAudioResponse {
    pub original_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated_text: Option<String>,
    pub language: String,
}

/// POST /api/ai/translate-audio
///
/// Transcribes the referenced audio resource, then — when the target
/// language differs from English — issues a second completion call to
/// translate the transcript.
pub async fn translate_audio(
    Json(req): Json<TranslateAudioRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let audio_url = req
        .audio_url
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::bad_request("Audio URL is required"))?;

    let mime_type = req.mime_type.as_deref().unwrap_or("audio/mpeg");
    let client = GeminiClient::from_env();

    let transcript = client.transcribe(&audio_url, mime_type).await?;

    let response = match req.target_language {
        Some(ref target) if target != "en" => {
            let translated = client.translate(&transcript, target).await?;
            TranslateAudioResponse {
                original_text: transcript,
                translated_text: Some(translated),
                language: target.clone(),
            }
        }
        _ => TranslateAudioResponse {
            original_text: transcript,
            translated_text: None,
            language: "en".into(),
        },
    };

    Ok(Json(ApiResponse::success(
        response,
        "Audio translated successfully",
    )))
}

#[derive(Debug, Deserialize)]
pub struct GenerateReportRequest {
    pub student_id: i64,
    pub course_id: i64,
    pub timeframe: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateReportResponse {
    pub student_name: Option<String>,
    pub course_title: String,
    pub timeframe: Option<String>,
    pub performance_data: PerformanceData,
    pub ai_analysis: String,
}

/// POST /api/ai/generate-report
///
/// Aggregates one student's per-assignment grades and per-quiz scores for a
/// course into a structured payload, then asks the completion service for a
/// narrative analysis. Teachers and admins only.
pub async fn generate_report(
    State(state): State<AppState>,
    Extension(CurrentUser(requester)): Extension<CurrentUser>,
    Json(req): Json<GenerateReportRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if !matches!(requester.role, Role::Teacher | Role::Admin) {
        return Err(ApiError::forbidden("Unauthorized to generate reports"));
    }

    let db = state.db();

    let student = UserEntity::find_by_id(req.student_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Student not found"))?;

    let course = CourseEntity::find_by_id(req.course_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Course not found"))?;

    if !course_student::Model::is_enrolled(db, course.id, student.id).await? {
        return Err(ApiError::bad_request(
            "Student is not enrolled in this course",
        ));
    }

    let performance_data = build_performance_data(db, course.id, student.id).await?;

    let payload = serde_json::to_string(&performance_data)
        .map_err(|e| ApiError::Upstream(format!("Failed to encode report payload: {e}")))?;
    let prompt = format!(
        "You are an educational analytics expert. Generate a comprehensive student \
         progress report from the following performance data. Null scores mean the \
         item was not submitted or attempted.\n\n{payload}"
    );

    let ai_analysis = GeminiClient::from_env().generate(&prompt).await?;

    Ok(Json(ApiResponse::success(
        GenerateReportResponse {
            student_name: student.name,
            course_title: course.title,
            timeframe: req.timeframe,
            performance_data,
            ai_analysis,
        },
        "Report generated successfully",
    )))
}
