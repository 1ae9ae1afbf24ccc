mod declarations_tests;
mod limits_tests;
mod members_tests;
