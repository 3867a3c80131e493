pub mod image_repo;
pub mod pack_repo;
pub mod user_repo;

pub use image_repo::GeneratedImageRepo;
pub use pack_repo::PackRepo;
pub use user_repo::UserRepo;
