pub mod error;
pub mod formats;
pub mod fs;

pub use error::{PathError, PipelineError, PipelineResult, ValidationError};
pub use formats::{DEFAULT_EXTENSIONS, display_extensions, matches_extension, parse_extension_list};
pub use fs::{display_name, jpeg_sibling, remove_file_idempotent};
