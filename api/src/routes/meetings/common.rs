use db::models::{
    meeting, meeting_participant,
    user::{Column as UserColumn, Entity as UserEntity},
};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use serde::Serialize;

use crate::routes::common::UserSummary;

/// A meeting with organizer and participants expanded.
#[derive(Debug, Serialize)]
pub struct MeetingResponse {
    #[serde(flatten)]
    pub meeting: meeting::Model,
    pub organizer: Option<UserSummary>,
    pub participants: Vec<UserSummary>,
}

/// Expands one meeting's organizer and participant references.
pub async fn expand_meeting(
    db: &DatabaseConnection,
    meeting: meeting::Model,
) -> Result<MeetingResponse, DbErr> {
    let participant_ids = meeting_participant::Model::user_ids_for(db, meeting.id).await?;

    let (participants, organizer) = tokio::try_join!(
        UserEntity::find()
            .filter(UserColumn::Id.is_in(participant_ids))
            .all(db),
        async {
            match meeting.organizer_id {
                Some(id) => UserEntity::find_by_id(id).one(db).await,
                None => Ok(None),
            }
        },
    )?;

    Ok(MeetingResponse {
        meeting,
        organizer: organizer.map(Into::into),
        participants: participants.into_iter().map(Into::into).collect(),
    })
}
