pub mod dialogs;
pub mod grid;
pub mod panels;
