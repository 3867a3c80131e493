pub mod character;
pub mod pack;
pub mod prompt;
