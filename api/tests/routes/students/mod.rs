mod assignments_test;
mod progress_test;
mod streak_test;
