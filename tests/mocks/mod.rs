//! Test doubles shared by the integration tests.

pub mod mock_profile_repository;

pub use mock_profile_repository::MockProfileRepository;
