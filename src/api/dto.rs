//! Per-endpoint response schemas. The backend's JSON is consumed loosely
//! (camelCase, optional everything) and converted into the strict domain
//! models here, so the rest of the crate never touches half-formed records.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{
    BookingConfirmation, BookingType, Category, CheckoutSession, ConfirmationDetails, Course,
    CourseCategoryMapping, UserData,
};

/// Error body the backend attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDto {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub sport: Option<String>,
    pub location: Option<String>,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub base_price: Option<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    pub is_active: Option<bool>,
}

impl CourseDto {
    pub fn into_course(self) -> Result<Course, String> {
        Ok(Course {
            id: self.id.ok_or("course is missing id")?,
            name: self.name.ok_or("course is missing name")?,
            sport: self.sport.ok_or("course is missing sport")?,
            location: self.location,
            short_description: self.short_description,
            long_description: self.long_description,
            base_price: self.base_price.unwrap_or_default(),
            image_urls: self.image_urls,
            // A course the backend did not flag either way is not shown.
            is_active: self.is_active.unwrap_or(false),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub is_publicly_visible: Option<bool>,
    pub display_order: Option<i32>,
}

impl CategoryDto {
    pub fn into_category(self) -> Result<Category, String> {
        Ok(Category {
            id: self.id.ok_or("category is missing id")?,
            name: self.name.ok_or("category is missing name")?,
            is_publicly_visible: self.is_publicly_visible.unwrap_or(false),
            display_order: self.display_order.unwrap_or(0),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingDto {
    pub course_id: Option<i64>,
    pub category_id: Option<i64>,
}

impl MappingDto {
    pub fn into_mapping(self) -> Result<CourseCategoryMapping, String> {
        Ok(CourseCategoryMapping {
            course_id: self.course_id.ok_or("mapping is missing courseId")?,
            category_id: self.category_id.ok_or("mapping is missing categoryId")?,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationDto {
    pub booking_id: Option<String>,
    pub reference: Option<String>,
    pub booking_type: Option<BookingType>,
    pub participants: Option<u32>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub final_amount: Option<Decimal>,
    pub currency: Option<String>,
    // Course-type fields.
    pub course_name: Option<String>,
    #[serde(default)]
    pub booked_dates: Vec<chrono::NaiveDate>,
    // Package-type fields.
    pub package_name: Option<String>,
    #[serde(default)]
    pub included_courses: Vec<String>,
}

impl ConfirmationDto {
    pub fn into_confirmation(self) -> Result<BookingConfirmation, String> {
        let booking_type = self.booking_type.ok_or("confirmation is missing bookingType")?;

        let details = match booking_type {
            BookingType::Course => ConfirmationDetails::Course {
                course_name: self.course_name.ok_or("confirmation is missing courseName")?,
                booked_dates: self.booked_dates,
            },
            BookingType::Package | BookingType::PackageRenewal => ConfirmationDetails::Package {
                package_name: self.package_name.ok_or("confirmation is missing packageName")?,
                included_courses: self.included_courses,
            },
        };

        Ok(BookingConfirmation {
            booking_id: self.booking_id.ok_or("confirmation is missing bookingId")?,
            reference: self.reference.ok_or("confirmation is missing reference")?,
            booking_type,
            participants: self.participants.unwrap_or(1),
            final_amount: self.final_amount.ok_or("confirmation is missing finalAmount")?,
            currency: self.currency.ok_or("confirmation is missing currency")?,
            details,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionDto {
    pub booking_id: Option<String>,
    pub client_secret: Option<String>,
    pub publishable_key: Option<String>,
}

impl CheckoutSessionDto {
    pub fn into_session(self) -> Result<CheckoutSession, String> {
        Ok(CheckoutSession {
            booking_id: self.booking_id.ok_or("checkout response is missing bookingId")?,
            client_secret: self
                .client_secret
                .ok_or("checkout response is missing clientSecret")?,
            publishable_key: self.publishable_key,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponseDto {
    pub token: Option<String>,
    pub user: Option<UserData>,
}
