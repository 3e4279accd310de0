pub mod session;
pub mod testimonial;
pub mod availability;
pub mod about;

pub use session::{CoachingSession, Package, sessions};
pub use testimonial::{Testimonial, TestimonialRotator, testimonials};
pub use availability::{SampleSlot, sample_slots};
pub use about::{AboutPage, Coach, Outcome, about_page};

/// Catalog-related errors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Index {index} out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Catalog is empty")]
    Empty,
}
