use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202601120001_create_users::Migration),
            Box::new(migrations::m202601120002_create_courses::Migration),
            Box::new(migrations::m202601120003_create_videos::Migration),
            Box::new(migrations::m202601120004_create_assignments::Migration),
            Box::new(migrations::m202601120005_create_quizzes::Migration),
            Box::new(migrations::m202601120006_create_live_streams::Migration),
            Box::new(migrations::m202601120007_create_meetings::Migration),
        ]
    }
}
