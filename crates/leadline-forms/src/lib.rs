// SPDX-FileCopyrightText: 2026 Leadline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Form handling for the Leadline service: per-variant field sets,
//! validation with the page's Ukrainian messages, and the draft-aware
//! capture flow that produces validated submissions.

pub mod capture;
pub mod fields;
pub mod validate;

pub use capture::FormCapture;
pub use fields::{fields_for, Field};
pub use validate::{
    normalize_phone, validate_field, validate_form, validate_phone, FieldError,
};

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use crate::validate::{normalize_phone, validate_name, validate_phone};

    proptest! {
        /// Any 9 digits after a valid prefix form a valid number.
        #[test]
        fn valid_prefixed_phones_always_pass(digits in "[0-9]{9}") {
            for prefix in ["+380", "380", "0"] {
                let phone = format!("{prefix}{digits}");
                prop_assert_eq!(validate_phone(&phone), None);
            }
        }

        /// Separators never change whether a phone validates.
        #[test]
        fn separators_do_not_affect_validity(digits in "[0-9]{9}") {
            let spaced = format!("+380 ({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]);
            prop_assert_eq!(validate_phone(&spaced), None);
            prop_assert_eq!(normalize_phone(&spaced), format!("+380{digits}"));
        }

        /// Wrong digit counts never pass, regardless of prefix.
        #[test]
        fn wrong_length_always_fails(digits in "[0-9]{1,8}") {
            let phone = format!("+380{digits}");
            prop_assert!(validate_phone(&phone).is_some());
        }

        /// Names of letters, two or more characters, always pass.
        #[test]
        fn letter_names_always_pass(name in "[а-яА-ЯіІїЇєЄa-zA-Z]{2,20}") {
            prop_assert_eq!(validate_name(&name), None);
        }

        /// Digits anywhere in a name always fail.
        #[test]
        fn digit_in_name_always_fails(prefix in "[a-zA-Z]{1,5}", digit in "[0-9]", suffix in "[a-zA-Z]{1,5}") {
            let name = format!("{prefix}{digit}{suffix}");
            prop_assert!(validate_name(&name).is_some());
        }
    }
}
