//! different utility modules used throughout the project
/// logger setup and saving of stations/results into csv
pub mod logger;
/// charts of the margins, the approximations and the errors
pub mod plots;
/// console tables and summary
pub mod report;
/// parse document with structure like " title1 key1: value1, value2 key2: value2 title2 key3:value3, value4" into HashMap
pub mod task_parser;
