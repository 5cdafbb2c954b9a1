//! Shared payload types for the clinic REST API.
//!
//! Every struct mirrors one JSON shape exchanged with the backend. The WASM
//! frontend deserializes straight into these; keeping them in a plain library
//! crate keeps them (and the validation rules in [`validate`]) testable on
//! the host toolchain.

pub mod validate;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Field-scoped server errors, e.g. `{"email": ["Enter a valid email."]}`.
pub type FieldErrors = HashMap<String, Vec<String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Doctor,
    Patient,
}

/// The authenticated user as reported by `GET /api/auth/check/`.
///
/// The backend session cookie is the source of truth; the client only caches
/// this per page load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub user_type: Option<UserType>,
}

impl SessionUser {
    /// Preferred display name: `full_name` when present, otherwise
    /// `first_name last_name` with surrounding whitespace trimmed.
    pub fn display_name(&self) -> String {
        if let Some(full) = &self.full_name {
            if !full.trim().is_empty() {
                return full.trim().to_owned();
            }
        }
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }

    pub fn is_doctor(&self) -> bool {
        self.user_type == Some(UserType::Doctor)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthCheckResponse {
    #[serde(default)]
    pub is_authenticated: bool,
    #[serde(default)]
    pub user: Option<SessionUser>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub user: Option<SessionUser>,
    #[serde(default)]
    pub redirect_url: Option<String>,
    #[serde(default)]
    pub errors: Option<FieldErrors>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Doctors come back with the account name nested under `user`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DoctorUser {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Doctor {
    pub id: u64,
    #[serde(default)]
    pub user: DoctorUser,
    #[serde(default)]
    pub speciality: Option<String>,
}

impl Doctor {
    /// Select-option label: `Dr. First Last`, with the speciality appended
    /// when the API provides one.
    pub fn display_name(&self) -> String {
        let mut name = format!("Dr. {} {}", self.user.first_name, self.user.last_name);
        if let Some(speciality) = &self.speciality {
            if !speciality.is_empty() {
                name.push_str(" - ");
                name.push_str(speciality);
            }
        }
        name
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Service {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Envelope for `GET /api/doctors/` and `GET /api/services/`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Body of `POST /api/appointments/`. Doctor and service carry the raw
/// select values (stringly ids), matching what the form submits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AppointmentRequest {
    pub date: String,
    pub time: String,
    pub doctor: String,
    pub service: String,
    pub notes: String,
}

/// One row of `GET /api/doctor/appointments/`. Every field defaults so a
/// backend that omits a column still parses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Appointment {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub patient_name: String,
    #[serde(default)]
    pub service_name: String,
    #[serde(default)]
    pub notes: String,
}

/// Envelope for the doctor appointment list. Unlike the doctors/services
/// lists, the payload key is `appointments`, not `data`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppointmentsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub appointments: Vec<Appointment>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppointmentResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<FieldErrors>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// `GET /api/user/profile/` payload; also the shape the PUT echoes back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileData {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub address: String,
}

impl ProfileData {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileUpdateRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub date_of_birth: String,
    pub address: String,
}

/// `localStorage` key holding the last booked appointment, read by the
/// confirmation page. Overwritten on each booking, never expired.
pub const BOOKING_SUMMARY_KEY: &str = "lastAppointmentBooking";

/// Denormalized summary of a successful booking. Serialized with the legacy
/// camelCase keys so stored entries stay readable across deployments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    pub date: String,
    pub time: String,
    pub doctor_name: Option<String>,
    pub service_name: Option<String>,
    #[serde(default)]
    pub notes: String,
}

/// Hardcoded stand-in list used when `GET /api/doctors/` fails, so the
/// booking form stays usable.
pub fn fallback_doctors() -> Vec<Doctor> {
    vec![
        Doctor {
            id: 1,
            user: DoctorUser {
                first_name: "John".into(),
                last_name: "Smith".into(),
            },
            speciality: Some("General Practice".into()),
        },
        Doctor {
            id: 2,
            user: DoctorUser {
                first_name: "Sarah".into(),
                last_name: "Johnson".into(),
            },
            speciality: Some("Gynecology".into()),
        },
    ]
}

/// Stand-in list for `GET /api/services/` failures.
pub fn fallback_services() -> Vec<Service> {
    vec![
        Service {
            id: 1,
            name: "General Consultation".into(),
            description: "General health checkup".into(),
        },
        Service {
            id: 2,
            name: "Prenatal Care".into(),
            description: "Pregnancy care and monitoring".into(),
        },
        Service {
            id: 3,
            name: "Gynecological Exam".into(),
            description: "Women's health examination".into(),
        },
        Service {
            id: 4,
            name: "Follow-up Visit".into(),
            description: "Follow-up after treatment".into(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_prefers_full_name() {
        let user = SessionUser {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            full_name: Some("Countess Ada".into()),
            ..Default::default()
        };
        assert_eq!(user.display_name(), "Countess Ada");
    }

    #[test]
    fn display_name_falls_back_to_name_parts() {
        let user = SessionUser {
            first_name: "Ada".into(),
            full_name: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(user.display_name(), "Ada");
    }

    #[test]
    fn doctor_label_appends_speciality() {
        let doctors = fallback_doctors();
        assert_eq!(doctors[0].display_name(), "Dr. John Smith - General Practice");

        let plain = Doctor {
            id: 9,
            user: DoctorUser {
                first_name: "Jane".into(),
                last_name: "Doe".into(),
            },
            speciality: None,
        };
        assert_eq!(plain.display_name(), "Dr. Jane Doe");
    }

    #[test]
    fn booking_summary_uses_legacy_camel_case_keys() {
        let summary = BookingSummary {
            date: "2026-09-01".into(),
            time: "10:30".into(),
            doctor_name: Some("Dr. John Smith".into()),
            service_name: Some("Prenatal Care".into()),
            notes: "first visit".into(),
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["doctorName"], "Dr. John Smith");
        assert_eq!(json["serviceName"], "Prenatal Care");

        let back: BookingSummary = serde_json::from_value(json).unwrap();
        assert_eq!(back, summary);
    }

    #[test]
    fn auth_check_tolerates_missing_user() {
        let resp: AuthCheckResponse =
            serde_json::from_str(r#"{"is_authenticated": false}"#).unwrap();
        assert!(!resp.is_authenticated);
        assert!(resp.user.is_none());
    }

    #[test]
    fn login_response_field_errors_deserialize() {
        let resp: LoginResponse = serde_json::from_str(
            r#"{"success": false, "errors": {"email": ["Unknown account"]}}"#,
        )
        .unwrap();
        let errors = resp.errors.unwrap();
        assert_eq!(errors["email"], vec!["Unknown account".to_owned()]);
    }

    #[test]
    fn doctor_appointments_envelope_uses_the_appointments_key() {
        let resp: AppointmentsResponse = serde_json::from_str(
            r#"{"success": true, "appointments": [
                {"id": 7, "date": "2026-09-01", "time": "10:30",
                 "status": "scheduled", "patient_name": "Ada Lovelace"}
            ]}"#,
        )
        .unwrap();
        assert!(resp.success);
        assert_eq!(resp.appointments.len(), 1);
        assert_eq!(resp.appointments[0].patient_name, "Ada Lovelace");
        // Omitted columns fall back to defaults.
        assert_eq!(resp.appointments[0].service_name, "");
    }

    #[test]
    fn fallback_lists_match_documented_sizes() {
        assert_eq!(fallback_doctors().len(), 2);
        assert_eq!(fallback_services().len(), 4);
    }
}
