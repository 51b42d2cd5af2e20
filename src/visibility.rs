//! Field visibility resolution.
//!
//! A field with no dependency is always visible. A dependent field is gated by
//! a rule looked up in [`DEPENDENCY_RULES`], keyed by the *pair* of
//! (controlling field, dependent field): the same controlling field can gate
//! several dependents with different conditions. Pairs not listed fall back to
//! [`VisibilityRule::Equals`]`("Ya")`.
//!
//! The table is the single source of dependency semantics; validation and
//! section completion both resolve visibility through it.

use crate::types::{FieldDefinition, FormValues};

pub const YES: &str = "Ya";
pub const NO: &str = "Tidak";

/// How a dependent field reacts to its controlling field's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityRule {
    /// Visible when the controlling answer equals the given option.
    Equals(&'static str),
    /// Visible once the controlling question is answered "Ya" or "Tidak".
    /// An explicit "Tidak Tahu" keeps the dependent hidden.
    AnsweredYesNo,
}

use VisibilityRule::{AnsweredYesNo, Equals};

/// Dependency rule table: (controlling field, dependent field, rule).
static DEPENDENCY_RULES: &[(&str, &str, VisibilityRule)] = &[
    ("Kasus_KLB", "KLB_ke", Equals(YES)),
    ("Kasus_KLB", "Nomor_KLB", Equals(YES)),
    ("Demam", "Tanggal_mulai_demam", Equals(YES)),
    ("Ruam_makulopopular", "Tanggal_mulai_rash", Equals(YES)),
    ("Adenopathy", "Lokasi_Adenopathy", Equals(YES)),
    ("Arthralgia", "Bagian_Sendi_Arthralgia", Equals(YES)),
    ("Kehamilan", "Umur_kehamilan", Equals(YES)),
    ("Lainnya", "Sebutkan_gejala_lainnya", Equals(YES)),
    ("Apakah_kasus_dirawat_di_RS", "Nama_Rumah_Sakit", Equals(YES)),
    ("Apakah_kasus_dirawat_di_RS", "Tanggal_masuk_rawat_inap", Equals(YES)),
    ("Apakah_kasus_dirawat_di_RS", "Nomor_rekam_medik", Equals(YES)),
    ("Apakah_kasus_dirawat_di_RS", "Tanggal_keluar", Equals(YES)),
    ("Imunisasi_campak_MR_9_bulan", "Sumber_info_MR_9_bulan", AnsweredYesNo),
    ("Imunisasi_campak_MR_18_bulan", "Sumber_info_MR_18_bulan", AnsweredYesNo),
    ("Imunisasi_campak_MR_kelas_1_SD", "Sumber_info_MR_kelas_1_SD", AnsweredYesNo),
    ("Pernah_MMR_sebelumnya", "Sumber_info_MMR_sebelumnya", AnsweredYesNo),
    ("Pernah_MR_kampanye", "Sumber_info_MR_kampanye", AnsweredYesNo),
    ("Ada_anggota_sakit_sama", "Jumlah", Equals(YES)),
    ("Berpergian_1_bulan_terakhir", "Lokasi_perjalanan", Equals(YES)),
    ("Berpergian_1_bulan_terakhir", "Tanggal_pergi", Equals(YES)),
    ("Berpergian_1_bulan_terakhir", "Tanggal_kembali", Equals(YES)),
    ("Spesimen_darah_diambil", "Jenis_sampel_darah", Equals(YES)),
    ("Spesimen_darah_diambil", "Tanggal_ambil_spesimen_darah", Equals(YES)),
    (
        "Spesimen_darah_diambil",
        "Tanggal_pengiriman_spesimen_darah_ke_lab",
        Equals(YES),
    ),
    ("Spesimen_lain_diambil", "Jenis_spesimen_lain", Equals(YES)),
    ("Spesimen_lain_diambil", "Tanggal_ambil_spesimen_lain", Equals(YES)),
    (
        "Spesimen_lain_diambil",
        "Tanggal_pengiriman_spesimen_lain_ke_lab",
        Equals(YES),
    ),
];

/// Rule governing a (controlling, dependent) pair. Unlisted pairs default to
/// `Equals("Ya")`.
pub fn rule_for(controlling_field: &str, dependent_field: &str) -> VisibilityRule {
    DEPENDENCY_RULES
        .iter()
        .find(|(controlling, dependent, _)| {
            *controlling == controlling_field && *dependent == dependent_field
        })
        .map(|(_, _, rule)| *rule)
        .unwrap_or(Equals(YES))
}

/// Whether a field currently applies, given the form's answers.
///
/// An unanswered controlling field hides all of its dependents.
pub fn is_visible(field: &FieldDefinition, values: &FormValues) -> bool {
    let Some(controlling) = field.depends_on.as_deref() else {
        return true;
    };
    let answer = match values.text(controlling) {
        Some(text) if !text.trim().is_empty() => text,
        _ => return false,
    };
    match rule_for(controlling, &field.id) {
        Equals(expected) => answer == expected,
        AnsweredYesNo => answer == YES || answer == NO,
    }
}
