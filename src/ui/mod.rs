pub mod level_list;
pub mod status_bar;
pub mod word_area;
