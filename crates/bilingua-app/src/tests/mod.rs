mod controller_tests;
mod profile_tests;
