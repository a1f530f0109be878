use std::fmt;

use lazy_regex::regex_is_match;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::domain::pledge::ValidatedPledge;
use crate::view::pledge::{AmountInput, PledgeSubmission};

pub const PHONE_DIGITS: usize = 10;

/// Largest pledge the store can hold, its amount column is a signed 64-bit
/// integer.
pub const MAX_AMOUNT: u64 = i64::MAX as u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PledgeField {
    Name,
    Email,
    Phone,
    Amount,
    Artwork,
}

/// Why a single field of a pledge was refused. The messages are shown as-is
/// next to the form fields.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Name is required")]
    MissingName,
    #[error("Please enter a valid email")]
    InvalidEmail,
    #[error("Please enter a valid 10-digit phone number")]
    InvalidPhone,
    #[error("Bid amount is required")]
    MissingAmount,
    #[error("Please enter a valid whole amount")]
    NotANumber,
    #[error("Your pledge must be at least {minimum}")]
    BelowMinimum { minimum: u64 },
    #[error("This artwork has already been promised to a donor")]
    ArtworkClosed,
}

impl FieldError {
    pub fn field(&self) -> PledgeField {
        match self {
            FieldError::MissingName => PledgeField::Name,
            FieldError::InvalidEmail => PledgeField::Email,
            FieldError::InvalidPhone => PledgeField::Phone,
            FieldError::MissingAmount
            | FieldError::NotANumber
            | FieldError::BelowMinimum { .. } => PledgeField::Amount,
            FieldError::ArtworkClosed => PledgeField::Artwork,
        }
    }
}

/// Every problem found in a submission, reported at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn errors(&self) -> &[FieldError] { &self.0 }

    pub fn contains(&self, error: &FieldError) -> bool {
        self.0.contains(error)
    }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages =
            self.0.iter().map(ToString::to_string).collect::<Vec<_>>();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

/// `{ "email": "Please enter a valid email", ... }`
impl Serialize for FieldErrors {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for error in &self.0 {
            map.serialize_entry(&error.field(), &error.to_string())?;
        }
        map.end()
    }
}

/// Check a submission against the format rules and the current floor.
///
/// A closed artwork only yields [`FieldError::ArtworkClosed`]; otherwise all
/// the failing fields are reported together.
pub fn validate(
    submission: &PledgeSubmission,
    next_minimum_bid: u64,
    artwork_closed: bool,
) -> Result<ValidatedPledge, FieldErrors> {
    if artwork_closed {
        return Err(FieldErrors(vec![FieldError::ArtworkClosed]));
    }

    let mut errors = Vec::new();

    let name = submission.name.trim();
    if name.is_empty() {
        errors.push(FieldError::MissingName);
    }

    let email = submission.email.trim();
    if !regex_is_match!(r"^[^\s@]+@[^\s@]+\.[^\s@]+$", email) {
        errors.push(FieldError::InvalidEmail);
    }

    let phone = normalize_phone(&submission.phone);
    if phone.len() != PHONE_DIGITS {
        errors.push(FieldError::InvalidPhone);
    }

    let amount = parse_amount(submission.amount.as_ref()).and_then(|amount| {
        if amount < next_minimum_bid {
            Err(FieldError::BelowMinimum { minimum: next_minimum_bid })
        } else {
            Ok(amount)
        }
    });
    let amount = match amount {
        Ok(amount) => Some(amount),
        Err(err) => {
            errors.push(err);
            None
        }
    };

    match amount {
        Some(amount) if errors.is_empty() => Ok(ValidatedPledge {
            name: name.to_string(),
            email: email.to_string(),
            phone,
            amount,
        }),
        _ => Err(FieldErrors(errors)),
    }
}

pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// Whole amount typed by the donor. Grouping commas, blanks, a leading
/// currency symbol and a zero decimal part are tolerated.
fn parse_amount(input: Option<&AmountInput>) -> Result<u64, FieldError> {
    let amount = match input {
        None => return Err(FieldError::MissingAmount),
        Some(AmountInput::Number(value)) => whole_number(*value),
        Some(AmountInput::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Err(FieldError::MissingAmount);
            }
            let digits = text
                .trim_start_matches(['₹', '$'])
                .chars()
                .filter(|c| *c != ',' && !c.is_whitespace())
                .collect::<String>();
            let (units, decimals) =
                digits.split_once('.').unwrap_or((digits.as_str(), ""));
            if decimals.chars().all(|c| c == '0') {
                units.parse::<u64>().ok()
            } else {
                None
            }
        }
    };

    amount
        .filter(|amount| *amount <= MAX_AMOUNT)
        .ok_or(FieldError::NotANumber)
}

fn whole_number(value: f64) -> Option<u64> {
    let in_range = value >= 0.0 && value < MAX_AMOUNT as f64;
    (in_range && value.fract() == 0.0).then_some(value as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    fn submission(amount: &str) -> PledgeSubmission {
        PledgeSubmission {
            name:   "Asha Rao".to_string(),
            email:  "asha@example.org".to_string(),
            phone:  "98765 43210".to_string(),
            amount: Some(AmountInput::Text(amount.to_string())),
        }
    }

    #[test]
    fn test_valid_submission() {
        let pledge = validate(&submission("550"), 550, false).unwrap();
        assert_eq!(
            pledge,
            ValidatedPledge {
                name:   "Asha Rao".to_string(),
                email:  "asha@example.org".to_string(),
                phone:  "9876543210".to_string(),
                amount: 550,
            }
        );
    }

    #[test]
    fn test_one_below_minimum() {
        let errors = validate(&submission("549"), 550, false).unwrap_err();
        assert_eq!(
            errors.errors(),
            &[FieldError::BelowMinimum { minimum: 550 }]
        );
        assert!(errors.to_string().contains("must be at least 550"));
    }

    #[test]
    fn test_errors_are_collected() {
        let mut form = submission("600");
        form.phone = "12345".to_string();
        form.email = "not-an-email".to_string();
        let errors = validate(&form, 550, false).unwrap_err();
        assert_eq!(
            errors.errors(),
            &[FieldError::InvalidEmail, FieldError::InvalidPhone]
        );
    }

    #[test]
    fn test_everything_wrong() {
        let errors =
            validate(&PledgeSubmission::default(), 550, false).unwrap_err();
        assert_eq!(
            errors.errors(),
            &[
                FieldError::MissingName,
                FieldError::InvalidEmail,
                FieldError::InvalidPhone,
                FieldError::MissingAmount,
            ]
        );
    }

    #[test]
    fn test_closed_short_circuits() {
        let errors =
            validate(&PledgeSubmission::default(), 550, true).unwrap_err();
        assert_eq!(errors.errors(), &[FieldError::ArtworkClosed]);

        let errors = validate(&submission("100000"), 550, true).unwrap_err();
        assert_eq!(errors.errors(), &[FieldError::ArtworkClosed]);
    }

    #[parameterized(
        plain = {"550", 550},
        grouped = {"1,000", 1_000},
        indian_grouping = {"1,00,000", 100_000},
        rupee = {"₹ 2,500", 2_500},
        dollar = {"$700", 700},
        padded = {"  650 ", 650},
        decimal_zero = {"600.0", 600},
        beyond_f64_precision = {"9007199254740993", 9_007_199_254_740_993},
        largest_storable = {"9223372036854775807", MAX_AMOUNT}
    )]
    fn test_amount_parsing(text: &str, expected: u64) {
        let pledge = validate(&submission(text), 550, false).unwrap();
        assert_eq!(pledge.amount, expected);
    }

    #[parameterized(
        letters = {"abc"},
        fraction = {"550.5"},
        nan = {"NaN"},
        infinite = {"inf"},
        exponent = {"1e25"},
        negative = {"-550"},
        beyond_store = {"9223372036854775808"},
        beyond_u64 = {"18446744073709551616"}
    )]
    fn test_not_a_number(text: &str) {
        let errors = validate(&submission(text), 550, false).unwrap_err();
        assert_eq!(errors.errors(), &[FieldError::NotANumber]);
    }

    #[test]
    fn test_blank_amount_is_missing() {
        let errors = validate(&submission("   "), 550, false).unwrap_err();
        assert_eq!(errors.errors(), &[FieldError::MissingAmount]);
    }

    #[parameterized(
        negative = {-5.0},
        fraction = {550.5},
        huge = {1e25},
        infinite = {f64::INFINITY}
    )]
    fn test_numeric_amount_not_a_number(value: f64) {
        let mut form = submission("0");
        form.amount = Some(AmountInput::Number(value));
        let errors = validate(&form, 550, false).unwrap_err();
        assert_eq!(errors.errors(), &[FieldError::NotANumber]);
    }

    #[test]
    fn test_numeric_amount() {
        let mut form = submission("0");
        form.amount = Some(AmountInput::Number(600.0));
        assert_eq!(validate(&form, 550, false).unwrap().amount, 600);
    }

    #[test]
    fn test_one_below_minimum_beyond_f64_precision() {
        let minimum = 9_007_199_254_740_993;
        let errors =
            validate(&submission("9007199254740992"), minimum, false)
                .unwrap_err();
        assert_eq!(errors.errors(), &[FieldError::BelowMinimum { minimum }]);
        let pledge =
            validate(&submission("9007199254740993"), minimum, false).unwrap();
        assert_eq!(pledge.amount, minimum);
    }

    #[parameterized(
        simple = {"a@b.co", true},
        subdomain = {"first.last@mail.example.in", true},
        no_at = {"not-an-email", false},
        no_dot = {"asha@example", false},
        blank_local = {" @example.org", false},
        spaces = {"asha rao@example.org", false},
        two_ats = {"a@b@c.org", false}
    )]
    fn test_email_shape(email: &str, valid: bool) {
        let mut form = submission("550");
        form.email = email.to_string();
        assert_eq!(validate(&form, 550, false).is_ok(), valid);
    }

    #[parameterized(
        dashes = {"987-654-3210", true},
        parens = {"(987) 654 3210", true},
        short = {"12345", false},
        country_code = {"+91 98765 43210", false},
        empty = {"", false}
    )]
    fn test_phone_shape(phone: &str, valid: bool) {
        let mut form = submission("550");
        form.phone = phone.to_string();
        assert_eq!(validate(&form, 550, false).is_ok(), valid);
    }

    #[test]
    fn test_serialize_as_field_map() {
        let mut form = submission("549");
        form.name = " ".to_string();
        let errors = validate(&form, 550, false).unwrap_err();
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            serde_json::json!({
                "name": "Name is required",
                "amount": "Your pledge must be at least 550"
            })
        );
    }
}
