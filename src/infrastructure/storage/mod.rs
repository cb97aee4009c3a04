mod temp_file_staging;

pub use temp_file_staging::{TempFileStaging, sanitize_filename};
