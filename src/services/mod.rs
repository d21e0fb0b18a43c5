pub mod catalog;
pub mod checkout;
pub mod confirmation;

pub use catalog::{group_courses, CatalogService};
pub use checkout::{CheckoutService, ReturnParams};
pub use confirmation::{
    ConfirmationError, ConfirmationPoller, ConfirmationRequest, ConfirmationTask, PollState,
    RetryPolicy, CONFIRMATION_FALLBACK_MESSAGE,
};
