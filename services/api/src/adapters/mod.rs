pub mod json_file;
pub mod local_insight;
pub mod memory;

pub use json_file::JsonFileStorage;
pub use local_insight::LocalInsightAdapter;
pub use memory::MemoryStorage;
