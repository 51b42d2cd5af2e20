//! Declarative form model.
//!
//! A case-report form is an ordered list of [`SectionDefinition`]s, each an
//! ordered list of [`FieldDefinition`]s. Field ids are unique across the whole
//! form, not just within a section, because dependency references
//! ([`FieldDefinition::depends_on`]) are global.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Input kind of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    Text,
    Phone,
    Integer,
    Multiline,
    /// Single choice rendered inline (yes/no style questions).
    Radio,
    /// Single choice from a longer option list.
    Select,
    Date,
    /// Derived from another field via a [`ComputeRule`]; never edited directly.
    Computed,
    ReadOnly,
}

/// Rule for filling a [`FieldKind::Computed`] field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComputeRule {
    #[serde(rename = "age-from-birthdate")]
    AgeFromBirthDate,
}

impl ComputeRule {
    /// Field whose value feeds this computation.
    pub fn source_field(self) -> &'static str {
        match self {
            ComputeRule::AgeFromBirthDate => "Tanggal_lahir",
        }
    }
}

/// A single form field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Unique id across the whole form.
    pub id: String,
    /// Human-readable label, also used in validation messages.
    pub label: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    /// Allowed answers for [`FieldKind::Radio`] / [`FieldKind::Select`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Id of the controlling field gating this field's visibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compute: Option<ComputeRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

impl FieldDefinition {
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            required: false,
            options: Vec::new(),
            depends_on: None,
            compute: None,
            placeholder: None,
            tooltip: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_options(mut self, options: &[&str]) -> Self {
        self.options = options.iter().map(|o| (*o).to_string()).collect();
        self
    }

    pub fn with_dependency(mut self, controlling_field: impl Into<String>) -> Self {
        self.depends_on = Some(controlling_field.into());
        self
    }

    pub fn with_compute(mut self, rule: ComputeRule) -> Self {
        self.compute = Some(rule);
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }
}

/// One step of the multi-section wizard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionDefinition {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<FieldDefinition>,
    /// UI-only flag; callers may freely toggle it on their copy.
    #[serde(default)]
    pub is_expanded: bool,
    /// Derived by the completion tracker, never set by hand.
    #[serde(default)]
    pub is_complete: bool,
}

impl SectionDefinition {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            fields: Vec::new(),
            is_expanded: false,
            is_complete: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_fields(mut self, fields: Vec<FieldDefinition>) -> Self {
        self.fields = fields;
        self
    }

    pub fn expanded(mut self) -> Self {
        self.is_expanded = true;
        self
    }

    pub fn contains_field(&self, field_id: &str) -> bool {
        self.fields.iter().any(|f| f.id == field_id)
    }

    pub fn field(&self, field_id: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.id == field_id)
    }
}

/// Notifiable disease this deployment records cases for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Disease {
    #[serde(rename = "campak-rubela")]
    CampakRubela,
    #[serde(rename = "difteri")]
    Difteri,
    #[serde(rename = "pertusis")]
    Pertusis,
    #[serde(rename = "tetanus")]
    Tetanus,
    #[serde(rename = "polio")]
    Polio,
    #[serde(rename = "hepatitis")]
    Hepatitis,
}

impl Disease {
    pub fn tag(self) -> &'static str {
        match self {
            Disease::CampakRubela => "campak-rubela",
            Disease::Difteri => "difteri",
            Disease::Pertusis => "pertusis",
            Disease::Tetanus => "tetanus",
            Disease::Polio => "polio",
            Disease::Hepatitis => "hepatitis",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Disease::CampakRubela => "Campak-Rubela",
            Disease::Difteri => "Difteri",
            Disease::Pertusis => "Pertusis",
            Disease::Tetanus => "Tetanus",
            Disease::Polio => "Polio",
            Disease::Hepatitis => "Hepatitis",
        }
    }

    pub fn all() -> &'static [Disease] {
        &[
            Disease::CampakRubela,
            Disease::Difteri,
            Disease::Pertusis,
            Disease::Tetanus,
            Disease::Polio,
            Disease::Hepatitis,
        ]
    }
}

impl fmt::Display for Disease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Reporting form variant within a disease programme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FormKind {
    #[serde(rename = "mr-01")]
    Mr01,
    #[serde(rename = "mr-01-ld")]
    Mr01Ld,
    #[serde(rename = "mr-04")]
    Mr04,
    #[serde(rename = "formulir-05")]
    Formulir05,
    #[serde(rename = "pemantauan-kontak")]
    PemantauanKontak,
    #[serde(rename = "hasil-lab")]
    HasilLab,
}

impl FormKind {
    pub fn tag(self) -> &'static str {
        match self {
            FormKind::Mr01 => "mr-01",
            FormKind::Mr01Ld => "mr-01-ld",
            FormKind::Mr04 => "mr-04",
            FormKind::Formulir05 => "formulir-05",
            FormKind::PemantauanKontak => "pemantauan-kontak",
            FormKind::HasilLab => "hasil-lab",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            FormKind::Mr01 => "MR-01 - Formulir Pencatatan Kasus",
            FormKind::Mr01Ld => "MR-01 LD - Formulir Pencatatan Kasus Lanjutan",
            FormKind::Mr04 => "MR-04 - Formulir Investigasi",
            FormKind::Formulir05 => "Formulir 05 - Formulir Pelaporan Mingguan",
            FormKind::PemantauanKontak => "Pemantauan Kontak - Pencatatan Kontak Erat",
            FormKind::HasilLab => "Hasil Lab - Hasil Laboratorium",
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
