pub mod booking;
pub mod camp;
pub mod content;
pub mod course;
pub mod media;
pub mod tournament;
pub mod user;

pub use booking::{
    BookingConfirmation, BookingRequest, BookingSummary, BookingType, CheckoutSession,
    ConfirmationDetails, CustomerDetails,
};
pub use camp::{Camp, CampDraft};
pub use content::{render_blocks, BlogPost, BlogPostDraft, ContentBlock};
pub use course::{Category, CategoryGroup, Course, CourseCategoryMapping};
pub use media::MediaItem;
pub use tournament::Tournament;
pub use user::UserData;
