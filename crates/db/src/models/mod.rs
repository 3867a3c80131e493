pub mod image;
pub mod pack;
pub mod user;
