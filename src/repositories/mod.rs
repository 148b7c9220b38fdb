mod in_memory_profile_repository;
mod json_file_profile_repository;
mod snapshot;
mod traits;

pub use in_memory_profile_repository::InMemoryProfileRepository;
pub use json_file_profile_repository::JsonFileProfileRepository;
pub use traits::ProfileRepository;
