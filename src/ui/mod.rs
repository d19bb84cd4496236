pub mod dialogs;
pub mod filter_bar;
pub mod month_grid;
pub mod task_editor;
pub mod task_panel;
pub mod theme;
pub mod toolbar;
