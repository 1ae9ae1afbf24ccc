mod annotations_tests;
mod declarations_tests;
mod members_tests;
mod trivia_tests;
