// SPDX-FileCopyrightText: 2026 Leadline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Field sets per form variant.

use leadline_core::FormKind;

/// One field of a form variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub required: bool,
}

const QUICK: &[Field] = &[
    Field { name: "name", required: true },
    Field { name: "phone", required: true },
];

const DETAILED: &[Field] = &[
    Field { name: "name", required: true },
    Field { name: "phone", required: true },
    Field { name: "instagram", required: false },
    Field { name: "birthdate", required: true },
    Field { name: "question", required: true },
];

const NEWSLETTER: &[Field] = &[
    Field { name: "name", required: true },
    Field { name: "email", required: true },
];

const POPUP: &[Field] = &[
    Field { name: "name", required: true },
    Field { name: "phone", required: true },
    Field { name: "email", required: false },
];

/// The fields a form variant renders, in display order.
pub fn fields_for(kind: FormKind) -> &'static [Field] {
    match kind {
        FormKind::Quick => QUICK,
        FormKind::Detailed => DETAILED,
        FormKind::Newsletter => NEWSLETTER,
        FormKind::Popup => POPUP,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_has_a_name_field_first() {
        for kind in [
            FormKind::Quick,
            FormKind::Detailed,
            FormKind::Newsletter,
            FormKind::Popup,
        ] {
            assert_eq!(fields_for(kind)[0].name, "name");
        }
    }

    #[test]
    fn detailed_form_carries_the_full_set() {
        let names: Vec<_> = fields_for(FormKind::Detailed).iter().map(|f| f.name).collect();
        assert_eq!(names, ["name", "phone", "instagram", "birthdate", "question"]);
    }

    #[test]
    fn newsletter_requires_email_not_phone() {
        let fields = fields_for(FormKind::Newsletter);
        assert!(fields.iter().any(|f| f.name == "email" && f.required));
        assert!(!fields.iter().any(|f| f.name == "phone"));
    }
}
