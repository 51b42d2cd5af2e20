//! Section completion tracking.
//!
//! Completion updates are incremental: only the section containing the
//! changed field is recomputed, and callers may rely on every other section's
//! flag staying put. A section with visible required fields is complete when
//! all of them are answered. A section with *no* visible required fields falls
//! back to "complete once any of its fields has an answer" — otherwise a
//! section of only optional questions could never be marked complete.

use crate::types::{FormValues, SectionDefinition};
use crate::visibility::is_visible;

/// Recompute the completion flag of the section containing `changed_field`.
/// Sections not containing it are left untouched.
pub fn update_section_completion(
    changed_field: &str,
    values: &FormValues,
    sections: &mut [SectionDefinition],
) {
    for section in sections.iter_mut() {
        if !section.contains_field(changed_field) {
            continue;
        }
        let complete = section_complete(section, values);
        section.is_complete = complete;
    }
}

/// Recompute every section's flag, e.g. after loading a stored record.
pub fn refresh_section_completion(values: &FormValues, sections: &mut [SectionDefinition]) {
    for section in sections.iter_mut() {
        let complete = section_complete(section, values);
        section.is_complete = complete;
    }
}

fn section_complete(section: &SectionDefinition, values: &FormValues) -> bool {
    let mut has_visible_required = false;
    let mut all_answered = true;
    for field in &section.fields {
        if field.required && is_visible(field, values) {
            has_visible_required = true;
            if !values.is_answered(&field.id) {
                all_answered = false;
            }
        }
    }
    if has_visible_required {
        all_answered
    } else {
        section.fields.iter().any(|f| values.is_answered(&f.id))
    }
}
