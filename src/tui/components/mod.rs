pub mod input_section;
pub mod status_line;
