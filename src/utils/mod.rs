pub mod environment;
pub mod paths;

pub use environment::get_archive_dir;
pub use paths::{format_path_with_tilde, transcript_file_name};
