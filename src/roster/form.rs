//! # Form View-Model
//!
//! [`FormState`] is the whole editable half of the screen as plain data: the
//! raw text of every input, the chosen start date and the member currently
//! loaded for editing. Actions in [`crate::commands`] take a `FormState` and
//! return a new one; renderers only read it.
//!
//! Text is stored exactly as typed. Trimming happens once, in
//! [`FormState::read`], when the form is turned into [`MemberFields`].

use crate::model::{Member, MemberFields};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The six text inputs of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormField {
    FirstName,
    LastName,
    Address,
    PostalCode,
    Phone,
    Email,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::FirstName,
        FormField::LastName,
        FormField::Address,
        FormField::PostalCode,
        FormField::Phone,
        FormField::Email,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FormField::FirstName => "first-name",
            FormField::LastName => "last-name",
            FormField::Address => "address",
            FormField::PostalCode => "postal-code",
            FormField::Phone => "phone",
            FormField::Email => "email",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::FirstName => "First name",
            FormField::LastName => "Last name",
            FormField::Address => "Address",
            FormField::PostalCode => "Postal code",
            FormField::Phone => "Phone",
            FormField::Email => "Email",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "first-name" | "first" | "firstname" => Ok(FormField::FirstName),
            "last-name" | "last" | "lastname" => Ok(FormField::LastName),
            "address" => Ok(FormField::Address),
            "postal-code" | "postal" | "postalcode" | "zip" => Ok(FormField::PostalCode),
            "phone" => Ok(FormField::Phone),
            "email" => Ok(FormField::Email),
            other => Err(format!(
                "Unknown field: {} (expected one of: {})",
                other,
                FormField::ALL
                    .iter()
                    .map(FormField::name)
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub postal_code: String,
    pub phone: String,
    pub email: String,
    pub membership_start: Option<NaiveDate>,
    pub selected: Option<Member>,
}

impl FormState {
    /// Empty inputs, start date set to `today`, nothing selected.
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            membership_start: Some(today),
            ..Self::default()
        }
    }

    /// Load a member into the form for editing.
    pub fn populate(&mut self, member: &Member) {
        let fields = &member.fields;
        self.first_name = fields.first_name.clone();
        self.last_name = fields.last_name.clone();
        self.address = fields.address.clone();
        self.postal_code = fields.postal_code.clone();
        self.phone = fields.phone.clone();
        self.email = fields.email.clone();
        self.membership_start = Some(fields.membership_start);
        self.selected = Some(member.clone());
    }

    /// The trimmed form contents. An unset date becomes `today`.
    pub fn read(&self, today: NaiveDate) -> MemberFields {
        MemberFields {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            address: self.address.trim().to_string(),
            postal_code: self.postal_code.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            membership_start: self.membership_start.unwrap_or(today),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::Address => &self.address,
            FormField::PostalCode => &self.postal_code,
            FormField::Phone => &self.phone,
            FormField::Email => &self.email,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::FirstName => self.first_name = value,
            FormField::LastName => self.last_name = value,
            FormField::Address => self.address = value,
            FormField::PostalCode => self.postal_code = value,
            FormField::Phone => self.phone = value,
            FormField::Email => self.email = value,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.selected.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MemberId;
    use crate::store::memory::fixtures::{sample_date, valid_fields};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
    }

    #[test]
    fn blank_form_defaults_date_to_today() {
        let form = FormState::blank(today());
        assert_eq!(form.membership_start, Some(today()));
        assert!(form.first_name.is_empty());
        assert!(!form.is_editing());
    }

    #[test]
    fn read_trims_every_field() {
        let mut form = FormState::blank(today());
        form.set(FormField::FirstName, "  Matti ");
        form.set(FormField::PostalCode, "00100\n");
        form.set(FormField::Email, " matti@example.fi");

        let fields = form.read(today());
        assert_eq!(fields.first_name, "Matti");
        assert_eq!(fields.postal_code, "00100");
        assert_eq!(fields.email, "matti@example.fi");
    }

    #[test]
    fn read_defaults_missing_date_to_today() {
        let form = FormState::default();
        assert_eq!(form.read(today()).membership_start, today());
    }

    #[test]
    fn populate_copies_all_fields_and_selects() {
        let member = Member::new(
            MemberId::generate(),
            valid_fields("Aino", "Aalto")
                .with_address("Esplanadi 1")
                .with_phone("040 123 4567"),
        );
        let mut form = FormState::blank(today());
        form.populate(&member);

        assert_eq!(form.read(today()), member.fields);
        assert_eq!(form.membership_start, Some(sample_date()));
        assert_eq!(form.selected.as_ref(), Some(&member));
        assert_eq!(form.get(FormField::Address), "Esplanadi 1");
    }

    #[test]
    fn parses_field_names_and_aliases() {
        assert_eq!("first-name".parse(), Ok(FormField::FirstName));
        assert_eq!("first_name".parse(), Ok(FormField::FirstName));
        assert_eq!("LAST".parse(), Ok(FormField::LastName));
        assert_eq!("postal".parse(), Ok(FormField::PostalCode));
        assert!("nickname".parse::<FormField>().is_err());
    }

    #[test]
    fn form_state_serializes() {
        let form = FormState::blank(today());
        let json = serde_json::to_string(&form).unwrap();
        let back: FormState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, form);
    }
}
