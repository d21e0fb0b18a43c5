use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use courtside::api::BackendClient;
use courtside::config::ApiConfig;
use courtside::error::ApiError;
use courtside::models::{
    BookingConfirmation, BookingRequest, Category, CheckoutSession, Course,
    CourseCategoryMapping, CustomerDetails,
};
use courtside::services::{CheckoutService, ConfirmationRequest, ReturnParams};

struct RecordingCheckoutClient {
    calls: AtomicUsize,
}

impl RecordingCheckoutClient {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl BackendClient for RecordingCheckoutClient {
    async fn fetch_courses(&self) -> Result<Vec<Course>, ApiError> {
        Ok(Vec::new())
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, ApiError> {
        Ok(Vec::new())
    }

    async fn fetch_course_category_mappings(
        &self,
    ) -> Result<Vec<CourseCategoryMapping>, ApiError> {
        Ok(Vec::new())
    }

    async fn fetch_confirmation(
        &self,
        _booking_id: &str,
    ) -> Result<BookingConfirmation, ApiError> {
        Err(ApiError::NotFound)
    }

    async fn fetch_package_confirmation(
        &self,
        _booking_id: &str,
        _token: &str,
    ) -> Result<BookingConfirmation, ApiError> {
        Err(ApiError::NotFound)
    }

    async fn create_booking(
        &self,
        _request: &BookingRequest,
    ) -> Result<CheckoutSession, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(CheckoutSession {
            booking_id: "bk_42".to_string(),
            client_secret: "cs_test_secret".to_string(),
            publishable_key: Some("pk_test_key".to_string()),
        })
    }
}

fn valid_request() -> BookingRequest {
    BookingRequest {
        course_id: 7,
        dates: vec![NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()],
        participants: 1,
        customer: CustomerDetails {
            full_name: "Jamie Rivera".to_string(),
            email: "jamie@example.test".to_string(),
            phone: None,
        },
    }
}

fn service(client: Arc<RecordingCheckoutClient>) -> CheckoutService {
    let mut config = ApiConfig::new("https://api.example.test");
    config.site_url = "https://courtside.example".to_string();
    CheckoutService::new(client, config)
}

#[tokio::test]
async fn test_begin_creates_a_pending_booking() {
    let client = Arc::new(RecordingCheckoutClient::new());
    let checkout = service(client.clone());

    let session = checkout
        .begin(&valid_request())
        .await
        .expect("Failed to start checkout");

    assert_eq!(session.booking_id, "bk_42");
    assert_eq!(session.client_secret, "cs_test_secret");
    assert_eq!(client.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_invalid_requests_never_reach_the_backend() {
    let client = Arc::new(RecordingCheckoutClient::new());
    let checkout = service(client.clone());

    let mut request = valid_request();
    request.dates.clear();
    let err = checkout
        .begin(&request)
        .await
        .expect_err("a request without dates must be rejected");
    assert!(matches!(err, ApiError::Validation(_)), "got {:?}", err);

    let mut request = valid_request();
    request.participants = 0;
    assert!(checkout.begin(&request).await.is_err());

    let mut request = valid_request();
    request.customer.email = "not-an-email".to_string();
    assert!(checkout.begin(&request).await.is_err());

    assert_eq!(
        client.calls.load(Ordering::SeqCst),
        0,
        "validation failures must stay local"
    );
}

#[tokio::test]
async fn test_return_url_round_trips_the_booking_id() {
    let client = Arc::new(RecordingCheckoutClient::new());
    let checkout = service(client);

    let url = checkout.confirmation_return_url("bk_42");
    assert_eq!(
        url,
        "https://courtside.example/booking/confirmation?bookingId=bk_42"
    );

    let params = ReturnParams::from_url(&url).expect("Failed to parse return URL");
    assert_eq!(params.booking_id, "bk_42");
    assert_eq!(params.token, None);
}

#[test]
fn test_return_params_ignore_provider_parameters() {
    let url = "https://courtside.example/booking/confirmation\
        ?bookingId=bk_42\
        &token=tok_abc\
        &payment_intent=pi_123\
        &payment_intent_client_secret=pi_123_secret\
        &redirect_status=succeeded";

    let params = ReturnParams::from_url(url).expect("Failed to parse return URL");

    assert_eq!(params.booking_id, "bk_42");
    assert_eq!(params.token.as_deref(), Some("tok_abc"));
}

#[test]
fn test_return_params_require_a_booking_id() {
    let err = ReturnParams::from_url(
        "https://courtside.example/booking/confirmation?redirect_status=succeeded",
    )
    .expect_err("a return URL without bookingId must be rejected");
    assert!(matches!(err, ApiError::Validation(_)), "got {:?}", err);

    let err = ReturnParams::from_url(
        "https://courtside.example/booking/confirmation?bookingId=",
    )
    .expect_err("an empty bookingId must be rejected");
    assert!(matches!(err, ApiError::Validation(_)), "got {:?}", err);
}

#[test]
fn test_token_selects_the_package_confirmation_flow() {
    let with_token = ReturnParams {
        booking_id: "bk_9".to_string(),
        token: Some("tok_xyz".to_string()),
    };
    match with_token.into_confirmation_request() {
        ConfirmationRequest::Package { booking_id, token } => {
            assert_eq!(booking_id, "bk_9");
            assert_eq!(token, "tok_xyz");
        }
        other => panic!("expected the package flow, got {:?}", other),
    }

    let without_token = ReturnParams {
        booking_id: "bk_9".to_string(),
        token: None,
    };
    match without_token.into_confirmation_request() {
        ConfirmationRequest::Course { booking_id } => assert_eq!(booking_id, "bk_9"),
        other => panic!("expected the course flow, got {:?}", other),
    }
}
