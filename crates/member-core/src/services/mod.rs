//! Domain services (business logic)

pub mod member_directory;

pub use member_directory::MemberDirectory;
