//! Client side of the payment redirect handshake: create the pending
//! booking, hand the session to the payment SDK, and pick the booking back
//! up when the provider redirects the customer to the confirmation route.

use std::sync::Arc;

use reqwest::Url;
use tracing::info;

use crate::api::BackendClient;
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::models::{BookingRequest, CheckoutSession};
use crate::services::confirmation::ConfirmationRequest;

pub struct CheckoutService {
    client: Arc<dyn BackendClient>,
    config: ApiConfig,
}

impl CheckoutService {
    pub fn new(client: Arc<dyn BackendClient>, config: ApiConfig) -> Self {
        Self { client, config }
    }

    /// Validates the form locally and creates the pending booking. The
    /// returned session carries everything the payment SDK needs; the
    /// booking stays invisible until the provider's webhook confirms it.
    pub async fn begin(&self, request: &BookingRequest) -> Result<CheckoutSession, ApiError> {
        request.validate()?;
        let session = self.client.create_booking(request).await?;
        info!(
            "created pending booking {} for course {}",
            session.booking_id, request.course_id
        );
        Ok(session)
    }

    /// Where the payment provider sends the customer after paying. The
    /// confirmation route reads the booking id back out of this URL.
    pub fn confirmation_return_url(&self, booking_id: &str) -> String {
        format!(
            "{}/booking/confirmation?bookingId={}",
            self.config.site_url, booking_id
        )
    }
}

/// Query parameters of the post-redirect confirmation route. The provider
/// appends parameters of its own; only ours are read, the rest is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnParams {
    pub booking_id: String,
    pub token: Option<String>,
}

impl ReturnParams {
    pub fn from_url(url: &str) -> Result<Self, ApiError> {
        let parsed = Url::parse(url)
            .map_err(|e| ApiError::Validation(format!("invalid confirmation url: {}", e)))?;

        let mut booking_id = None;
        let mut token = None;
        for (key, value) in parsed.query_pairs() {
            match key.as_ref() {
                "bookingId" => booking_id = Some(value.into_owned()),
                "token" => token = Some(value.into_owned()),
                _ => {}
            }
        }

        let booking_id = booking_id.filter(|id| !id.is_empty()).ok_or_else(|| {
            ApiError::Validation("confirmation url is missing bookingId".to_string())
        })?;

        Ok(Self { booking_id, token })
    }

    /// The poll request this redirect resolves to. A token means the booking
    /// was a package purchase.
    pub fn into_confirmation_request(self) -> ConfirmationRequest {
        match self.token {
            Some(token) => ConfirmationRequest::Package {
                booking_id: self.booking_id,
                token,
            },
            None => ConfirmationRequest::Course {
                booking_id: self.booking_id,
            },
        }
    }
}
