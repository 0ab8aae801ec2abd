mod column_energy;
mod image_scanner;
mod image_slicer;
mod path_validator;
mod run_log;
mod segment_partitioner;
mod slice_error;
mod smart_splitter;
mod split_selector;

pub use column_energy::column_energy_profile;
pub use image_scanner::{ImageFileInfo, scan_image_files};
pub use image_slicer::{ImageSlice, ImageSlicer, SliceMode, SliceRegion};
pub use path_validator::{ensure_directory_exists, validate_directory_exists};
pub use run_log::RunLog;
pub use segment_partitioner::partition;
pub use slice_error::SliceError;
pub use smart_splitter::SmartSplitter;
pub use split_selector::select_split_columns;
