use db::models::{
    course::{Column as CourseColumn, Entity as CourseEntity},
    live_stream,
    user::{Column as UserColumn, Entity as UserEntity},
};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use serde::Serialize;
use std::collections::HashMap;

use crate::routes::common::UserSummary;

/// A live stream with its conductor and course title attached.
#[derive(Debug, Serialize)]
pub struct StreamListItem {
    #[serde(flatten)]
    pub stream: live_stream::Model,
    pub conducted_by: Option<UserSummary>,
    pub course_title: Option<String>,
}

/// Expands a batch of streams with conductor summaries and course titles.
pub async fn expand_streams(
    db: &DatabaseConnection,
    streams: Vec<live_stream::Model>,
) -> Result<Vec<StreamListItem>, DbErr> {
    let conductor_ids: Vec<i64> = streams.iter().filter_map(|s| s.conducted_by).collect();
    let course_ids: Vec<i64> = streams.iter().map(|s| s.course_id).collect();

    let (conductors, courses) = tokio::try_join!(
        UserEntity::find()
            .filter(UserColumn::Id.is_in(conductor_ids))
            .all(db),
        CourseEntity::find()
            .filter(CourseColumn::Id.is_in(course_ids))
            .all(db),
    )?;

    let conductors: HashMap<i64, UserSummary> =
        conductors.into_iter().map(|u| (u.id, u.into())).collect();
    let titles: HashMap<i64, String> = courses.into_iter().map(|c| (c.id, c.title)).collect();

    Ok(streams
        .into_iter()
        .map(|stream| {
            let conducted_by = stream.conducted_by.and_then(|id| conductors.get(&id)).cloned();
            let course_title = titles.get(&stream.course_id).cloned();
            StreamListItem {
                stream,
                conducted_by,
                course_title,
            }
        })
        .collect())
}
