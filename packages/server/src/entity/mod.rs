pub mod author;
pub mod category;
pub mod document;
pub mod post;
pub mod post_author;
pub mod post_image;
