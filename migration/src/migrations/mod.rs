pub mod m202601120001_create_users;
pub mod m202601120002_create_courses;
pub mod m202601120003_create_videos;
pub mod m202601120004_create_assignments;
pub mod m202601120005_create_quizzes;
pub mod m202601120006_create_live_streams;
pub mod m202601120007_create_meetings;
