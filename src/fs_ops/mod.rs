//! Filesystem operations used by the relocation and transform stages.

mod file_move;
mod helpers;

pub use file_move::{move_file_into, rename_in_place, renamed_file_name, replace_file};
pub use helpers::io_error_with_help;
