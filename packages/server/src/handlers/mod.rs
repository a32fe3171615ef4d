pub mod compose;
pub mod media;
pub mod posts;
