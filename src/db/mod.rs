pub mod diary;
pub mod recommendations;
pub mod relations;
pub mod sqlite;
