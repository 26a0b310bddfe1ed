pub mod error_dialog;
pub mod footer;
pub mod task_form;
pub mod task_table;
pub mod toast;
