mod users_test;
