mod convert;
mod discovery;
mod exiftool;
mod metadata;
mod pipeline;

pub use convert::{Conversion, convert_to_jpeg};
pub use discovery::discover;
pub use exiftool::ExifTool;
pub use pipeline::run;
