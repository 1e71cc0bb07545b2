use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

// column widths of the employee table
const MAX_TEXT_LEN: usize = 100;
const MAX_EMAIL_LEN: usize = 254;
const MAX_CONTACT_LEN: usize = 32;
const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
        }
    }
}

impl FromStr for Gender {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MALE" => Ok(Gender::Male),
            "FEMALE" => Ok(Gender::Female),
            "" => Err(ServiceError::Validation("gender required".into())),
            other => Err(ServiceError::Validation(format!("unknown gender `{other}`"))),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Department {
    Hr,
    It,
    Finance,
    Sales,
}

impl Department {
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Hr => "HR",
            Department::It => "IT",
            Department::Finance => "FINANCE",
            Department::Sales => "SALES",
        }
    }
}

impl FromStr for Department {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "HR" => Ok(Department::Hr),
            "IT" => Ok(Department::It),
            "FINANCE" => Ok(Department::Finance),
            "SALES" => Ok(Department::Sales),
            "" => Err(ServiceError::Validation("department required".into())),
            other => Err(ServiceError::Validation(format!("unknown department `{other}`"))),
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Domain employee (business view, as persisted by a store)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i32,
    pub name: String,
    pub gender: Gender,
    pub department: Department,
    pub designation: String,
    pub email: String,
    pub password_hash: String,
    pub contact: String,
    pub salary: f64,
}

impl Employee {
    pub fn new(id: i32, profile: EmployeeProfile, password_hash: String) -> Self {
        Self {
            id,
            name: profile.name,
            gender: profile.gender,
            department: profile.department,
            designation: profile.designation,
            email: profile.email,
            password_hash,
            contact: profile.contact,
            salary: profile.salary,
        }
    }
}

/// Validated profile fields shared by create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeProfile {
    pub name: String,
    pub gender: Gender,
    pub department: Department,
    pub designation: String,
    pub email: String,
    pub contact: String,
    pub salary: f64,
}

/// Record handed to a store on insert. `id: None` asks the store to assign one.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub id: Option<i32>,
    pub profile: EmployeeProfile,
    pub password_hash: String,
}

impl NewEmployee {
    pub fn with_id(self, id: i32) -> Employee { Employee::new(id, self.profile, self.password_hash) }
}

/// Create/update input as sent by clients.
///
/// Form-driven clients post numbers as strings, so `id` and `salary` accept
/// either; an empty string counts as unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeInput {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub designation: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub contact: String,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub salary: Option<f64>,
}

impl EmployeeInput {
    /// Check every profile field; the first failure wins.
    pub fn validate_profile(&self) -> Result<EmployeeProfile, ServiceError> {
        let name = required_text("name", &self.name)?;
        let gender: Gender = self.gender.parse()?;
        let department: Department = self.department.parse()?;
        let designation = required_text("designation", &self.designation)?;
        let email = validate_email(&self.email)?;
        let contact = validate_contact(&self.contact)?;
        let salary = validate_salary(self.salary)?;
        Ok(EmployeeProfile { name, gender, department, designation, email, contact, salary })
    }

    /// Password to (re)hash, if any. Required on create, optional on update.
    pub fn validated_password(&self, required: bool) -> Result<Option<&str>, ServiceError> {
        match self.password.as_deref().filter(|p| !p.is_empty()) {
            None if required => Err(ServiceError::Validation("password required".into())),
            None => Ok(None),
            Some(p) if p.chars().count() < MIN_PASSWORD_LEN => {
                Err(ServiceError::Validation(format!("password too short (>={MIN_PASSWORD_LEN})")))
            }
            Some(p) => Ok(Some(p)),
        }
    }
}

fn required_text(field: &str, value: &str) -> Result<String, ServiceError> {
    let v = value.trim();
    if v.is_empty() {
        return Err(ServiceError::Validation(format!("{field} required")));
    }
    if v.chars().count() > MAX_TEXT_LEN {
        return Err(ServiceError::Validation(format!("{field} longer than {MAX_TEXT_LEN} characters")));
    }
    Ok(v.to_string())
}

fn validate_email(value: &str) -> Result<String, ServiceError> {
    let v = value.trim();
    if v.is_empty() {
        return Err(ServiceError::Validation("email required".into()));
    }
    if v.chars().count() > MAX_EMAIL_LEN {
        return Err(ServiceError::Validation(format!("email longer than {MAX_EMAIL_LEN} characters")));
    }
    let invalid = || ServiceError::Validation("invalid email".into());
    let (local, domain) = v.split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.contains('@')
        || v.chars().any(char::is_whitespace)
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
    {
        return Err(invalid());
    }
    Ok(v.to_string())
}

fn validate_contact(value: &str) -> Result<String, ServiceError> {
    let v = value.trim();
    if v.is_empty() {
        return Err(ServiceError::Validation("contact required".into()));
    }
    if v.chars().count() > MAX_CONTACT_LEN {
        return Err(ServiceError::Validation(format!("contact longer than {MAX_CONTACT_LEN} characters")));
    }
    let body = v.strip_prefix('+').unwrap_or(v);
    if !body.chars().all(|c| c.is_ascii_digit() || c == ' ' || c == '-') {
        return Err(ServiceError::Validation("contact may only hold digits, spaces, '-' and a leading '+'".into()));
    }
    let digits = body.chars().filter(char::is_ascii_digit).count();
    if !(7..=15).contains(&digits) {
        return Err(ServiceError::Validation("contact must have 7 to 15 digits".into()));
    }
    Ok(v.to_string())
}

fn validate_salary(value: Option<f64>) -> Result<f64, ServiceError> {
    match value {
        None => Err(ServiceError::Validation("salary required".into())),
        Some(s) if !s.is_finite() || s < 0.0 => Err(ServiceError::Validation("salary must be a non-negative number".into())),
        Some(s) => Ok(s),
    }
}

mod lenient {
    use serde::{de::Error, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrText {
        Int(i64),
        Float(f64),
        Text(String),
    }

    pub fn id<'de, D: Deserializer<'de>>(d: D) -> Result<i32, D::Error> {
        let raw = Option::<NumOrText>::deserialize(d)?;
        let n = match raw {
            None => return Ok(0),
            Some(NumOrText::Int(i)) => i,
            Some(NumOrText::Float(f)) if f.fract() == 0.0 => f as i64,
            Some(NumOrText::Float(f)) => return Err(D::Error::custom(format!("id must be an integer, got {f}"))),
            Some(NumOrText::Text(s)) if s.trim().is_empty() => return Ok(0),
            Some(NumOrText::Text(s)) => s.trim().parse::<i64>().map_err(|_| D::Error::custom(format!("id must be an integer, got `{s}`")))?,
        };
        i32::try_from(n).map_err(|_| D::Error::custom(format!("id {n} out of range")))
    }

    pub fn amount<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        match Option::<NumOrText>::deserialize(d)? {
            None => Ok(None),
            Some(NumOrText::Int(i)) => Ok(Some(i as f64)),
            Some(NumOrText::Float(f)) => Ok(Some(f)),
            Some(NumOrText::Text(s)) if s.trim().is_empty() => Ok(None),
            Some(NumOrText::Text(s)) => s
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("salary must be a number, got `{s}`"))),
        }
    }
}
