pub mod dto;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::models::{
    BlogPost, BlogPostDraft, BookingConfirmation, BookingRequest, BookingSummary, Camp, CampDraft,
    Category, CheckoutSession, Course, CourseCategoryMapping, MediaItem, Tournament, UserData,
};
use crate::session::{MemorySessionStore, SessionData, SessionStore};

/// The slice of the backend contract the booking and catalog services sit on
/// top of. Kept as a trait so the services can be exercised without a
/// network.
#[async_trait]
pub trait BackendClient: Send + Sync {
    async fn fetch_courses(&self) -> Result<Vec<Course>, ApiError>;

    async fn fetch_categories(&self) -> Result<Vec<Category>, ApiError>;

    async fn fetch_course_category_mappings(&self)
        -> Result<Vec<CourseCategoryMapping>, ApiError>;

    /// Reads a course-booking confirmation. Answers `ApiError::NotReady`
    /// while the payment webhook has not landed yet.
    async fn fetch_confirmation(&self, booking_id: &str)
        -> Result<BookingConfirmation, ApiError>;

    /// Package and package-renewal confirmations; these require the access
    /// token carried through the payment redirect.
    async fn fetch_package_confirmation(
        &self,
        booking_id: &str,
        token: &str,
    ) -> Result<BookingConfirmation, ApiError>;

    /// Creates a pending booking and the payment intent behind it, returning
    /// what the payment SDK needs for the redirect.
    async fn create_booking(&self, request: &BookingRequest) -> Result<CheckoutSession, ApiError>;
}

pub struct HttpBackendClient {
    client: Client,
    config: ApiConfig,
    session: Arc<dyn SessionStore>,
}

impl HttpBackendClient {
    const COURSES_PATH: &'static str = "/api/public_api/courses";
    const CATEGORIES_PATH: &'static str = "/api/public/categories";
    const MAPPINGS_PATH: &'static str = "/api/public/course-category-mappings";
    const CONFIRMATION_PATH: &'static str = "/api/public/booking-data/confirmation";
    const PACKAGE_CONFIRMATION_PATH: &'static str =
        "/api/public/booking-data/confirmation-package";
    const CHECKOUT_PATH: &'static str = "/api/public/booking-data/checkout";
    const BLOG_PATH: &'static str = "/api/public/blog-posts";
    const CAMPS_PATH: &'static str = "/api/public/camps";
    const TOURNAMENTS_PATH: &'static str = "/api/public/tournaments";
    const LOGIN_PATH: &'static str = "/api/admin/login";
    const ADMIN_MEDIA_PATH: &'static str = "/api/admin/media";
    const ADMIN_BLOG_PATH: &'static str = "/api/admin/blog-posts";
    const ADMIN_BOOKINGS_PATH: &'static str = "/api/admin/bookings";
    const ADMIN_CAMPS_PATH: &'static str = "/api/admin/camps";

    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        Self::with_session_store(config, Arc::new(MemorySessionStore::new()))
    }

    pub fn with_session_store(
        config: ApiConfig,
        session: Arc<dyn SessionStore>,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build http client: {}", e)))?;
        Ok(Self {
            client,
            config,
            session,
        })
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    // ---- Public content ----

    pub async fn fetch_blog_posts(&self) -> Result<Vec<BlogPost>, ApiError> {
        self.get_json(Self::BLOG_PATH).await
    }

    pub async fn fetch_blog_post(&self, slug: &str) -> Result<BlogPost, ApiError> {
        self.get_json(&format!("{}/{}", Self::BLOG_PATH, slug)).await
    }

    pub async fn fetch_camps(&self) -> Result<Vec<Camp>, ApiError> {
        self.get_json(Self::CAMPS_PATH).await
    }

    pub async fn fetch_tournaments(&self) -> Result<Vec<Tournament>, ApiError> {
        self.get_json(Self::TOURNAMENTS_PATH).await
    }

    // ---- Auth ----

    /// Signs in and stores the returned token and user in the session store
    /// for the admin calls that follow.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserData, ApiError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let response = self
            .client
            .post(self.config.endpoint(Self::LOGIN_PATH))
            .json(&body)
            .send()
            .await?;
        let response = self.check_status(response).await?;

        let parsed: dto::LoginResponseDto = self.parse_json(response).await?;
        let token = parsed
            .token
            .ok_or_else(|| ApiError::Decode("login response is missing token".to_string()))?;
        let user = parsed
            .user
            .ok_or_else(|| ApiError::Decode("login response is missing user".to_string()))?;

        self.session.store(SessionData {
            token,
            user: user.clone(),
        });
        Ok(user)
    }

    /// No server-side session exists; logging out is dropping the token.
    pub fn logout(&self) {
        self.session.clear();
    }

    // ---- Admin: media library ----

    pub async fn list_media(&self) -> Result<Vec<MediaItem>, ApiError> {
        let response = self.authed_get(Self::ADMIN_MEDIA_PATH).await?;
        self.parse_json(response).await
    }

    pub async fn upload_media(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<MediaItem, ApiError> {
        let token = self.bearer_token()?;
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.config.endpoint(Self::ADMIN_MEDIA_PATH))
            .header("Authorization", format!("Bearer {}", token))
            .multipart(form)
            .send()
            .await?;
        let response = self.check_authed_status(response).await?;
        self.parse_json(response).await
    }

    pub async fn delete_media(&self, id: i64) -> Result<(), ApiError> {
        self.authed_delete(&format!("{}/{}", Self::ADMIN_MEDIA_PATH, id))
            .await
    }

    // ---- Admin: blog editor ----

    pub async fn list_blog_posts(&self, include_drafts: bool) -> Result<Vec<BlogPost>, ApiError> {
        let token = self.bearer_token()?;
        let response = self
            .client
            .get(self.config.endpoint(Self::ADMIN_BLOG_PATH))
            .header("Authorization", format!("Bearer {}", token))
            .query(&[("includeDrafts", include_drafts)])
            .send()
            .await?;
        let response = self.check_authed_status(response).await?;
        self.parse_json(response).await
    }

    pub async fn create_blog_post(&self, draft: &BlogPostDraft) -> Result<BlogPost, ApiError> {
        let response = self.authed_post_json(Self::ADMIN_BLOG_PATH, draft).await?;
        self.parse_json(response).await
    }

    pub async fn update_blog_post(
        &self,
        id: i64,
        draft: &BlogPostDraft,
    ) -> Result<BlogPost, ApiError> {
        let response = self
            .authed_put_json(&format!("{}/{}", Self::ADMIN_BLOG_PATH, id), draft)
            .await?;
        self.parse_json(response).await
    }

    pub async fn delete_blog_post(&self, id: i64) -> Result<(), ApiError> {
        self.authed_delete(&format!("{}/{}", Self::ADMIN_BLOG_PATH, id))
            .await
    }

    // ---- Admin: booking calendar ----

    pub async fn bookings_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<BookingSummary>, ApiError> {
        let token = self.bearer_token()?;
        let response = self
            .client
            .get(self.config.endpoint(Self::ADMIN_BOOKINGS_PATH))
            .header("Authorization", format!("Bearer {}", token))
            .query(&[("from", from.to_string()), ("to", to.to_string())])
            .send()
            .await?;
        let response = self.check_authed_status(response).await?;
        self.parse_json(response).await
    }

    // ---- Admin: camps ----

    pub async fn create_camp(&self, draft: &CampDraft) -> Result<Camp, ApiError> {
        let response = self.authed_post_json(Self::ADMIN_CAMPS_PATH, draft).await?;
        self.parse_json(response).await
    }

    pub async fn update_camp(&self, id: i64, draft: &CampDraft) -> Result<Camp, ApiError> {
        let response = self
            .authed_put_json(&format!("{}/{}", Self::ADMIN_CAMPS_PATH, id), draft)
            .await?;
        self.parse_json(response).await
    }

    pub async fn delete_camp(&self, id: i64) -> Result<(), ApiError> {
        self.authed_delete(&format!("{}/{}", Self::ADMIN_CAMPS_PATH, id))
            .await
    }

    // ---- Plumbing ----

    fn bearer_token(&self) -> Result<String, ApiError> {
        // Read before each authorized request, never cached on this struct.
        self.session.token().ok_or(ApiError::Unauthorized)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.client.get(self.config.endpoint(path)).send().await?;
        let response = self.check_status(response).await?;
        self.parse_json(response).await
    }

    async fn authed_get(&self, path: &str) -> Result<Response, ApiError> {
        let token = self.bearer_token()?;
        let response = self
            .client
            .get(self.config.endpoint(path))
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await?;
        self.check_authed_status(response).await
    }

    async fn authed_post_json<B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, ApiError> {
        let token = self.bearer_token()?;
        let response = self
            .client
            .post(self.config.endpoint(path))
            .header("Authorization", format!("Bearer {}", token))
            .json(body)
            .send()
            .await?;
        self.check_authed_status(response).await
    }

    async fn authed_put_json<B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, ApiError> {
        let token = self.bearer_token()?;
        let response = self
            .client
            .put(self.config.endpoint(path))
            .header("Authorization", format!("Bearer {}", token))
            .json(body)
            .send()
            .await?;
        self.check_authed_status(response).await
    }

    async fn authed_delete(&self, path: &str) -> Result<(), ApiError> {
        let token = self.bearer_token()?;
        let response = self
            .client
            .delete(self.config.endpoint(path))
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await?;
        self.check_authed_status(response).await?;
        Ok(())
    }

    async fn check_status(&self, response: Response) -> Result<Response, ApiError> {
        if response.status().is_success() {
            return Ok(response);
        }
        Err(self.error_from(response).await)
    }

    /// `check_status` for requests that carried a bearer token. A 401 here
    /// means the backend rejected that token, so the stored session is also
    /// cleared and never replayed. Public endpoints say nothing about the
    /// token and leave the session alone.
    async fn check_authed_status(&self, response: Response) -> Result<Response, ApiError> {
        if response.status() == StatusCode::UNAUTHORIZED {
            self.session.clear();
        }
        self.check_status(response).await
    }

    /// Folds a non-2xx response into the error taxonomy.
    async fn error_from(&self, response: Response) -> ApiError {
        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::NOT_FOUND => ApiError::NotFound,
            _ => {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<dto::ErrorBody>(&body)
                    .ok()
                    .and_then(|b| b.message.or(b.error))
                    .unwrap_or(body);
                ApiError::Backend {
                    status: status.as_u16(),
                    message,
                }
            }
        }
    }

    async fn parse_json<T: DeserializeOwned>(&self, response: Response) -> Result<T, ApiError> {
        let body = response.text().await?;
        serde_json::from_str::<T>(&body).map_err(|e| {
            tracing::error!("failed to parse backend response: {}", e);
            ApiError::Decode(e.to_string())
        })
    }

    async fn confirmation_from(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<BookingConfirmation, ApiError> {
        let response = request.send().await?;
        match response.status() {
            // The backend answers 403 until the payment webhook has made the
            // record readable. Transient, not a failure.
            StatusCode::FORBIDDEN => Err(ApiError::NotReady),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            status if status.is_success() => {
                let parsed: dto::ConfirmationDto = self.parse_json(response).await?;
                parsed.into_confirmation().map_err(ApiError::Decode)
            }
            _ => Err(self.error_from(response).await),
        }
    }
}

#[async_trait]
impl BackendClient for HttpBackendClient {
    async fn fetch_courses(&self) -> Result<Vec<Course>, ApiError> {
        let records: Vec<dto::CourseDto> = self.get_json(Self::COURSES_PATH).await?;
        let mut courses = Vec::with_capacity(records.len());
        for record in records {
            match record.into_course() {
                Ok(course) => courses.push(course),
                Err(reason) => warn!("skipping malformed course record: {}", reason),
            }
        }
        Ok(courses)
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, ApiError> {
        let records: Vec<dto::CategoryDto> = self.get_json(Self::CATEGORIES_PATH).await?;
        let mut categories = Vec::with_capacity(records.len());
        for record in records {
            match record.into_category() {
                Ok(category) => categories.push(category),
                Err(reason) => warn!("skipping malformed category record: {}", reason),
            }
        }
        Ok(categories)
    }

    async fn fetch_course_category_mappings(
        &self,
    ) -> Result<Vec<CourseCategoryMapping>, ApiError> {
        let records: Vec<dto::MappingDto> = self.get_json(Self::MAPPINGS_PATH).await?;
        let mut mappings = Vec::with_capacity(records.len());
        for record in records {
            match record.into_mapping() {
                Ok(mapping) => mappings.push(mapping),
                Err(reason) => warn!("skipping malformed mapping record: {}", reason),
            }
        }
        Ok(mappings)
    }

    async fn fetch_confirmation(
        &self,
        booking_id: &str,
    ) -> Result<BookingConfirmation, ApiError> {
        let url = self
            .config
            .endpoint(&format!("{}/{}", Self::CONFIRMATION_PATH, booking_id));
        self.confirmation_from(self.client.get(url)).await
    }

    async fn fetch_package_confirmation(
        &self,
        booking_id: &str,
        token: &str,
    ) -> Result<BookingConfirmation, ApiError> {
        let url = self
            .config
            .endpoint(&format!("{}/{}", Self::PACKAGE_CONFIRMATION_PATH, booking_id));
        self.confirmation_from(self.client.get(url).query(&[("token", token)]))
            .await
    }

    async fn create_booking(&self, request: &BookingRequest) -> Result<CheckoutSession, ApiError> {
        let response = self
            .client
            .post(self.config.endpoint(Self::CHECKOUT_PATH))
            .json(request)
            .send()
            .await?;
        let response = self.check_status(response).await?;
        let parsed: dto::CheckoutSessionDto = self.parse_json(response).await?;
        parsed.into_session().map_err(ApiError::Decode)
    }
}

/// Inert client: empty catalog, no confirmations, checkout unavailable.
pub struct NoopBackendClient;

#[async_trait]
impl BackendClient for NoopBackendClient {
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
        Err(ApiError::Backend {
            status: 503,
            message: "checkout is not available".to_string(),
        })
    }
}
