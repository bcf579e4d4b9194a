//! Database tests

mod mysql_repository_tests;
