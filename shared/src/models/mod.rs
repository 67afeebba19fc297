//! Data models
//!
//! Wire shapes of the site API collections. JSON field names are camelCase;
//! ids are opaque server-assigned strings (`id`, or `_id` from older
//! documents).

pub mod banner;
pub mod blog_post;
pub mod booking;
pub mod gallery_image;
pub mod proposal;
pub mod restaurant;
pub mod room;
pub mod testimonial;

// Re-exports
pub use banner::*;
pub use blog_post::*;
pub use booking::*;
pub use gallery_image::*;
pub use proposal::*;
pub use restaurant::*;
pub use room::*;
pub use testimonial::*;

pub(crate) fn default_true() -> bool {
    true
}
