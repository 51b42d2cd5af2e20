//! Interactive form session state.
//!
//! One [`FormSession`] per open form: it owns the answer bag, the wizard
//! position, per-field errors and the derived section flags. Setting a value
//! clears that field's error, refreshes computed fields and recomputes only
//! the affected section's completion. [`spawn_autosave`] drives the periodic
//! draft save; a tick is skipped outright when a save is already in flight.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::completion;
use crate::error::{Result, SpasiError};
use crate::forms;
use crate::sync::SyncEngine;
use crate::types::{
    CaseRecord, Disease, FieldValue, FormKind, FormValues, SectionDefinition, ValidationErrors,
};
use crate::validation;

pub struct FormSession {
    disease: Disease,
    form: FormKind,
    case_id: Option<String>,
    sections: Vec<SectionDefinition>,
    values: FormValues,
    errors: ValidationErrors,
    current_step: usize,
    last_saved: Option<DateTime<Utc>>,
}

impl FormSession {
    /// Open a session on the built-in case-report form.
    pub fn new(disease: Disease, form: FormKind) -> Self {
        Self::with_sections(disease, form, forms::case_report_sections())
    }

    /// Open a session on a custom section list.
    pub fn with_sections(
        disease: Disease,
        form: FormKind,
        sections: Vec<SectionDefinition>,
    ) -> Self {
        Self {
            disease,
            form,
            case_id: None,
            sections,
            values: FormValues::new(),
            errors: ValidationErrors::new(),
            current_step: 0,
            last_saved: None,
        }
    }

    pub fn disease(&self) -> Disease {
        self.disease
    }

    pub fn form(&self) -> FormKind {
        self.form
    }

    pub fn case_id(&self) -> Option<&str> {
        self.case_id.as_deref()
    }

    pub fn set_case_id(&mut self, id: impl Into<String>) {
        self.case_id = Some(id.into());
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn sections(&self) -> &[SectionDefinition] {
        &self.sections
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn current_section(&self) -> &SectionDefinition {
        &self.sections[self.current_step]
    }

    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.last_saved
    }

    /// Resume editing a stored record.
    pub fn load_record(&mut self, record: &CaseRecord) {
        self.case_id = Some(record.id.clone());
        self.values = record.values.clone();
        self.errors = ValidationErrors::new();
        completion::refresh_section_completion(&self.values, &mut self.sections);
    }

    /// Record an answer. Clears the field's error, refreshes computed fields
    /// and the containing section's completion flag.
    ///
    /// Fails fast on a field id the form does not declare.
    pub fn set_value(&mut self, field_id: &str, value: impl Into<FieldValue>) -> Result<()> {
        if !self.sections.iter().any(|s| s.contains_field(field_id)) {
            return Err(SpasiError::unknown_field(field_id));
        }
        self.values.set(field_id, value);
        self.errors.remove(field_id);
        self.apply_computed_fields(field_id);
        completion::update_section_completion(field_id, &self.values, &mut self.sections);
        Ok(())
    }

    fn apply_computed_fields(&mut self, changed_field: &str) {
        let mut updates: Vec<(String, FieldValue)> = Vec::new();
        for section in &self.sections {
            for field in &section.fields {
                let Some(rule) = field.compute else { continue };
                if rule.source_field() != changed_field {
                    continue;
                }
                let computed = self
                    .values
                    .text(changed_field)
                    .and_then(validation::parse_date)
                    .and_then(|birth| {
                        validation::calculate_age(birth, Utc::now().date_naive())
                    });
                if let Some(age) = computed {
                    updates.push((field.id.clone(), FieldValue::from(age)));
                }
            }
        }
        for (field_id, value) in updates {
            self.values.set(field_id, value);
        }
    }

    /// Validate the current section, storing any errors on the session.
    pub fn validate_current_section(&mut self) -> bool {
        self.errors = validation::validate_section(&self.values, self.current_section());
        self.errors.is_empty()
    }

    /// Move to the next wizard step if the current section validates.
    pub fn advance(&mut self) -> bool {
        if !self.validate_current_section() {
            return false;
        }
        self.sections[self.current_step].is_complete = true;
        self.current_step = (self.current_step + 1).min(self.sections.len() - 1);
        true
    }

    pub fn back(&mut self) {
        self.current_step = self.current_step.saturating_sub(1);
    }

    /// Jump to an already-visited or completed step.
    pub fn jump_to(&mut self, step: usize) -> bool {
        if step >= self.sections.len() {
            return false;
        }
        if step <= self.current_step || self.sections[step].is_complete {
            self.current_step = step;
            true
        } else {
            false
        }
    }
}

/// Drive the periodic draft autosave for a session.
///
/// Ticks with nothing entered yet do nothing; ticks while a save is in
/// flight are skipped entirely rather than queued. The task runs until the
/// returned handle is aborted.
pub fn spawn_autosave(
    session: Arc<RwLock<FormSession>>,
    engine: Arc<SyncEngine>,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick of an interval fires immediately; consume it so the
        // first save happens one full period after opening the form.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let (values, disease, form, case_id) = {
                let session = session.read().await;
                (
                    session.values.clone(),
                    session.disease,
                    session.form,
                    session.case_id.clone(),
                )
            };
            if values.is_empty() {
                continue;
            }
            match engine
                .try_save_draft(&values, disease, form, case_id.as_deref())
                .await
            {
                Ok(Some(outcome)) => {
                    let mut session = session.write().await;
                    session.case_id = Some(outcome.id);
                    session.last_saved = Some(Utc::now());
                }
                Ok(None) => {}
                Err(err) => tracing::warn!(error = %err, "autosave failed"),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldKind;
    use chrono::Datelike;

    fn session() -> FormSession {
        FormSession::new(Disease::CampakRubela, FormKind::Mr01)
    }

    #[test]
    fn set_value_rejects_undeclared_fields() {
        let mut session = session();
        let err = session.set_value("No_such_field", "x").unwrap_err();
        assert!(matches!(err, SpasiError::UnknownField { .. }));
    }

    #[test]
    fn entering_a_birth_date_fills_the_age_field() {
        let mut session = session();
        let birth_year = Utc::now().year() - 6;
        session
            .set_value("Tanggal_lahir", format!("{birth_year}-01-15"))
            .unwrap();
        let age = session.values().number("Umur").expect("age is computed");
        assert!((5.0..=6.0).contains(&age));
    }

    #[test]
    fn setting_a_value_clears_its_error() {
        let mut session = session();
        assert!(!session.advance());
        assert!(session.errors().contains("Kabupaten"));
        session.set_value("Kabupaten", "Bogor").unwrap();
        assert!(!session.errors().contains("Kabupaten"));
    }

    #[test]
    fn advance_requires_a_valid_current_section() {
        let mut session = session();
        assert!(!session.advance());
        assert_eq!(session.current_step(), 0);

        session.set_value("Kabupaten", "Bogor").unwrap();
        session.set_value("Nomor_EPID", "EPID-2025-001").unwrap();
        session.set_value("Kasus_KLB", "Tidak").unwrap();
        session.set_value("Sumber_laporan", "Puskesmas").unwrap();
        session.set_value("Nama_unit_pelapor", "Puskesmas Menteng").unwrap();
        session.set_value("Tanggal_terima_laporan", "2025-01-10").unwrap();
        session.set_value("Tanggal_pelacakan", "2025-01-11").unwrap();
        assert!(session.advance());
        assert_eq!(session.current_step(), 1);
        assert!(session.sections()[0].is_complete);
    }

    #[test]
    fn jump_only_reaches_visited_or_completed_steps() {
        let mut session = session();
        assert!(!session.jump_to(3));
        assert!(session.jump_to(0));
        assert!(!session.jump_to(99));
    }
}
