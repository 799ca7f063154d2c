use db::models::{
    course::{Column as CourseColumn, Entity as CourseEntity},
    user::{Column as UserColumn, Entity as UserEntity},
    video::{self, VideoKind},
};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use serde::Serialize;
use std::collections::HashMap;

use crate::routes::common::UserSummary;

/// A video with its uploader and course title attached.
#[derive(Debug, Serialize)]
pub struct VideoListItem {
    #[serde(flatten)]
    pub video: video::Model,
    pub uploaded_by: Option<UserSummary>,
    pub course_title: Option<String>,
}

/// Expands a batch of videos with uploader summaries and course titles,
/// fetching each referenced table once.
pub async fn expand_videos(
    db: &DatabaseConnection,
    videos: Vec<video::Model>,
) -> Result<Vec<VideoListItem>, DbErr> {
    let uploader_ids: Vec<i64> = videos.iter().filter_map(|v| v.uploaded_by).collect();
    let course_ids: Vec<i64> = videos.iter().map(|v| v.course_id).collect();

    let (uploaders, courses) = tokio::try_join!(
        UserEntity::find()
            .filter(UserColumn::Id.is_in(uploader_ids))
            .all(db),
        CourseEntity::find()
            .filter(CourseColumn::Id.is_in(course_ids))
            .all(db),
    )?;

    let uploaders: HashMap<i64, UserSummary> =
        uploaders.into_iter().map(|u| (u.id, u.into())).collect();
    let titles: HashMap<i64, String> = courses.into_iter().map(|c| (c.id, c.title)).collect();

    Ok(videos
        .into_iter()
        .map(|video| {
            let uploaded_by = video.uploaded_by.and_then(|id| uploaders.get(&id)).cloned();
            let course_title = titles.get(&video.course_id).cloned();
            VideoListItem {
                video,
                uploaded_by,
                course_title,
            }
        })
        .collect())
}

/// Parses a video kind from its wire spelling.
pub fn parse_kind(raw: &str) -> Option<VideoKind> {
    match raw {
        "lecture" => Some(VideoKind::Lecture),
        "youtube" => Some(VideoKind::Youtube),
        "live-stream" => Some(VideoKind::LiveStream),
        _ => None,
    }
}
