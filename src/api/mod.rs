// External collaborators: persistence and the exercise database
pub mod exercisedb;
pub mod storage;
