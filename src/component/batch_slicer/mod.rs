mod main;
mod output_namer;

pub use main::{BatchResult, BatchSlicer, process_directory, slice_image_file};
pub use output_namer::{image_output_dir, slice_output_path};
