mod common;

use common::filled_case_report;
use spasi_core::{case_report_sections, is_visible, validate_form, validate_section};

#[test]
fn a_fully_filled_form_validates_clean() {
    let sections = case_report_sections();
    let values = filled_case_report("Siti Rahayu");
    let errors = validate_form(&values, &sections);
    assert!(errors.is_empty(), "unexpected errors: {errors}");
}

#[test]
fn every_missing_required_field_is_reported_with_its_label() {
    let sections = case_report_sections();
    let mut values = filled_case_report("Siti Rahayu");
    values.set("Nama_kasus", "");
    values.set("Kabupaten", "");
    let errors = validate_form(&values, &sections);
    assert_eq!(errors.get("Nama_kasus"), Some("Nama Lengkap Pasien is required."));
    assert_eq!(errors.get("Kabupaten"), Some("Kabupaten/Kota is required."));
    assert_eq!(errors.len(), 2);
}

#[test]
fn errors_never_reference_hidden_fields() {
    let sections = case_report_sections();
    let mut values = filled_case_report("Siti Rahayu");
    // Out-of-range answer on a field that is hidden while Kehamilan = Tidak.
    values.set("Umur_kehamilan", "50");
    let errors = validate_form(&values, &sections);
    assert!(errors.is_empty(), "unexpected errors: {errors}");

    // Once the controlling answer reveals it, the range rule applies.
    values.set("Kehamilan", "Ya");
    let errors = validate_form(&values, &sections);
    assert_eq!(
        errors.get("Umur_kehamilan"),
        Some("Gestational age must be between 0 and 42 weeks.")
    );

    let visible_ids: Vec<&str> = sections
        .iter()
        .flat_map(|s| s.fields.iter())
        .filter(|f| is_visible(f, &values))
        .map(|f| f.id.as_str())
        .collect();
    for field in errors.fields() {
        assert!(visible_ids.contains(&field), "{field} is hidden but flagged");
    }
}

#[test]
fn required_visible_set_never_includes_unsatisfied_dependents() {
    let sections = case_report_sections();
    let values = filled_case_report("Siti Rahayu");
    for section in &sections {
        for field in &section.fields {
            if field.depends_on.is_some() && !is_visible(field, &values) {
                let errors = validate_section(&values, section);
                assert!(
                    !errors.contains(&field.id),
                    "{} flagged while hidden",
                    field.id
                );
            }
        }
    }
}

#[test]
fn section_validation_only_covers_that_section() {
    let sections = case_report_sections();
    let values = filled_case_report("Siti Rahayu");
    // Empty the patient section's answers; the reporter section must still
    // validate clean on its own.
    let mut gutted = values.clone();
    gutted.set("Nama_kasus", "");
    let reporter_errors = validate_section(&gutted, &sections[0]);
    assert!(reporter_errors.is_empty());
    let patient_errors = validate_section(&gutted, &sections[1]);
    assert!(patient_errors.contains("Nama_kasus"));
}
