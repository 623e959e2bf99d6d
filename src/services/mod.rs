pub mod diary;
pub mod recommendations;
