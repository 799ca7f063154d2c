pub mod assignment;
pub mod assignment_submission;
pub mod course;
pub mod course_student;
pub mod course_subject;
pub mod live_stream;
pub mod live_stream_attendance;
pub mod meeting;
pub mod meeting_participant;
pub mod parent_child;
pub mod quiz;
pub mod quiz_attempt;
pub mod user;
pub mod video;
