use lazy_static::lazy_static;
use regex::Regex;

/// `local@domain.tld` shape; deliberately permissive beyond that.
pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// E.164-style check applied to the digits of the input: first digit 1-9,
/// then 1 to 14 more. Formatting characters (spaces, dashes, parens, the
/// leading `+`) are ignored here; the raw string is what gets stored and
/// matched against the repository.
pub(crate) fn is_valid_phone(phone: &str) -> bool {
    lazy_static! {
        static ref PHONE_RE: Regex = Regex::new(r"^\+?[1-9]\d{1,14}$").unwrap();
    }
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    PHONE_RE.is_match(&digits)
}
