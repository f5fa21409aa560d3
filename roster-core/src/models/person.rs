use serde::{Deserialize, Serialize};

/// Number of digits in a person's id number.
pub const ID_NUMBER_LEN: usize = 7;

/// A person travelling with the convoy.
///
/// People are never edited in place. Re-adding a person with the same
/// `id_number` after removing them produces a fresh entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Unique key, exactly seven ASCII digits.
    pub id_number: String,
    pub full_name: String,
}

impl Person {
    pub fn new(id_number: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            id_number: id_number.into(),
            full_name: full_name.into(),
        }
    }
}

/// Returns true if `s` is a well-formed person id number.
pub fn is_valid_id_number(s: &str) -> bool {
    s.len() == ID_NUMBER_LEN && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_seven_digits() {
        assert!(is_valid_id_number("1234567"));
    }

    #[test]
    fn rejects_wrong_length_or_non_digits() {
        assert!(!is_valid_id_number("123456"));
        assert!(!is_valid_id_number("12345678"));
        assert!(!is_valid_id_number("12345a7"));
        assert!(!is_valid_id_number(""));
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let json = serde_json::to_value(Person::new("1234567", "Dana Levi")).unwrap();
        assert_eq!(json["idNumber"], "1234567");
        assert_eq!(json["fullName"], "Dana Levi");
    }
}
