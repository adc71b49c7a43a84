//! Guest entity model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use innkeep_core::types::GuestId;

/// A registered guest.
///
/// Bookings reference guests by id only; the availability logic never reads
/// or changes guest records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    /// Unique guest identifier.
    pub id: GuestId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Middle name.
    #[serde(default)]
    pub middle_name: Option<String>,
    /// Passport or national id number.
    pub identification_no: String,
    /// Date of birth.
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    /// Country of residence.
    #[serde(default)]
    pub country: Option<String>,
    /// Home address.
    #[serde(default)]
    pub home_address: Option<String>,
    /// Mobile phone number.
    #[serde(default)]
    pub mobile_no: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email_address: Option<String>,
    /// Employer, for corporate stays.
    #[serde(default)]
    pub company_name: Option<String>,
    /// Emergency contact name.
    #[serde(default)]
    pub emergency_contact_name: Option<String>,
    /// Emergency contact phone number.
    #[serde(default)]
    pub emergency_contact_number: Option<String>,
}

impl Guest {
    /// "Last, First" as printed on registration cards.
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }

    /// Case-insensitive match against first, middle or last name.
    pub fn matches_name(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        [
            Some(self.first_name.as_str()),
            self.middle_name.as_deref(),
            Some(self.last_name.as_str()),
        ]
        .into_iter()
        .flatten()
        .any(|name| name.to_lowercase().contains(&query))
    }
}

/// Data required to register a guest.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NewGuest {
    /// Given name.
    #[validate(length(min = 1, message = "first name is required"))]
    pub first_name: String,
    /// Family name.
    #[validate(length(min = 1, message = "last name is required"))]
    pub last_name: String,
    /// Middle name.
    pub middle_name: Option<String>,
    /// Passport or national id number.
    #[validate(length(min = 1, message = "identification number is required"))]
    pub identification_no: String,
    /// Date of birth.
    pub birth_date: Option<NaiveDate>,
    /// Country of residence.
    pub country: Option<String>,
    /// Home address.
    pub home_address: Option<String>,
    /// Mobile phone number.
    pub mobile_no: Option<String>,
    /// Email address.
    #[validate(email)]
    pub email_address: Option<String>,
    /// Employer.
    pub company_name: Option<String>,
    /// Emergency contact name.
    pub emergency_contact_name: Option<String>,
    /// Emergency contact phone number.
    pub emergency_contact_number: Option<String>,
}

impl NewGuest {
    /// Turn the request into a stored record with a fresh id.
    pub fn into_guest(self) -> Guest {
        self.into_guest_with_id(GuestId::new())
    }

    /// Turn the request into the stored record `id`, replacing every field.
    pub fn into_guest_with_id(self, id: GuestId) -> Guest {
        Guest {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            middle_name: self.middle_name,
            identification_no: self.identification_no,
            birth_date: self.birth_date,
            country: self.country,
            home_address: self.home_address,
            mobile_no: self.mobile_no,
            email_address: self.email_address,
            company_name: self.company_name,
            emergency_contact_name: self.emergency_contact_name,
            emergency_contact_number: self.emergency_contact_number,
        }
    }
}
