pub mod enrollment_table;
pub mod form;
pub mod status_bar;
