mod elapsed;
mod file_mover;
mod path_validator;
mod video_scanner;

pub use elapsed::format_elapsed;
pub use file_mover::{FileMover, FsMover};
pub use path_validator::{
    ensure_directory_exists, validate_directory_exists, validate_directory_readable,
};
pub use video_scanner::scan_video_files;
