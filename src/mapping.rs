//! Translation boundary between dynamic form values and the remote row shape.
//!
//! The remote store keeps cases in one flat table ([`CaseRow`]) with a fixed
//! column set, while forms carry a field-id-keyed value bag whose keys have
//! drifted across schema revisions. Every logical column therefore resolves
//! through an ordered alias list - first present key wins - and that lookup
//! happens here and nowhere else. The rest of the crate works with clean
//! field ids.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::types::{
    CaseRecord, CaseStatus, CaseSummary, Disease, FieldValue, FormKind, FormValues,
};
use crate::validation::parse_date;

/// Historical names of the patient-name field, highest priority first.
pub const PATIENT_NAME_ALIASES: &[&str] = &[
    "pasien_nama",
    "Pasien_nama",
    "nama_pasien",
    "Nama_pasien",
    "Nama_kasus",
];

/// Flat case row as the remote store persists it. Every data column is
/// optional; absent columns are omitted from the wire format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disease: Option<Disease>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<FormKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CaseStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    // Reporter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pelapor_nama: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pelapor_jabatan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pelapor_telp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pelapor_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tanggal_lapor: Option<String>,

    // Patient
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pasien_nama: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pasien_nik: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pasien_tgl_lahir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pasien_umur: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pasien_jk: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pasien_alamat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pasien_rt_rw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pasien_kelurahan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pasien_kecamatan: Option<String>,

    // Clinical
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tanggal_onset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gejala_demam: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gejala_ruam: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gejala_batuk: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gejala_pilek: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gejala_mata_merah: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gejala_lain: Option<String>,

    // Treatment history
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sedang_dirawat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rumah_sakit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tanggal_dirawat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obat_yang_diminum: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub riwayat_rawat_inap: Option<String>,

    // Vaccination history
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_imunisasi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vaksin_terakhir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tanggal_vaksin_terakhir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tempat_imunisasi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catatan_imunisasi: Option<String>,

    // Epidemiology
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kontak_kasus_lain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bepergian_2_minggu: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tempat_bepergian: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tanggal_bepergian: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sumber_infeksi: Option<String>,

    // Specimens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spesimen_diambil: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jenis_spesimen: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tanggal_pengambilan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tempat_pemeriksaan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hasil_lab: Option<String>,

    // Outcome
    #[serde(skip_serializing_if = "Option::is_none")]
    pub klasifikasi_akhir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kondisi_akhir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tanggal_meninggal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub penyebab_kematian: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tindak_lanjut: Option<String>,

    // Close contacts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jumlah_kontak: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kontak_keluarga: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kontak_sekolah: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kontak_lain: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catatan_kontak: Option<String>,

    // Attending officer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub petugas_nama: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub petugas_nip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub petugas_jabatan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tanggal_pengisian: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tanda_tangan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub koordinat_lokasi: Option<String>,

    // Bookkeeping
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_sync: Option<bool>,
}

fn text_of(values: &FormValues, names: &[&str]) -> Option<String> {
    values.first_of(names).map(|v| match v {
        FieldValue::Text(s) => s.clone(),
        FieldValue::Number(n) => n.to_string(),
    })
}

fn number_of(values: &FormValues, names: &[&str]) -> Option<f64> {
    values.first_of(names).and_then(FieldValue::as_number)
}

fn date_of(values: &FormValues, names: &[&str]) -> Option<String> {
    text_of(values, names)
        .as_deref()
        .and_then(format_date_for_db)
}

/// Normalize an arbitrary date answer to `YYYY-MM-DD`; unparsable input is
/// dropped rather than sent to the remote store.
pub fn format_date_for_db(raw: &str) -> Option<String> {
    parse_date(raw).map(|d| d.format("%Y-%m-%d").to_string())
}

/// Patient name under the alias-priority lookup; blank candidates are
/// skipped so an emptied canonical column does not shadow an older alias.
pub fn patient_name(values: &FormValues) -> Option<String> {
    PATIENT_NAME_ALIASES
        .iter()
        .filter_map(|name| values.text(name))
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_string)
}

/// Build the index row for a record.
pub fn summarize(record: &CaseRecord) -> CaseSummary {
    CaseSummary {
        id: record.id.clone(),
        disease: record.disease,
        form: record.form,
        status: record.status,
        patient_name: patient_name(&record.values),
        owner_user_id: record.owner_user_id.clone(),
        created_at: record.created_at,
        last_modified_at: record.last_modified_at,
        submitted_at: record.submitted_at,
        pending_sync: record.pending_sync,
    }
}

/// Index row for a remote row, when it carries enough identity to list.
pub fn summarize_row(row: &CaseRow) -> Option<CaseSummary> {
    let id = row.id.clone()?;
    let disease = row.disease?;
    let form = row.form?;
    let status = row.status?;
    let modified = row
        .last_modified
        .or(row.updated_at)
        .or(row.created_at)
        .unwrap_or_else(Utc::now);
    Some(CaseSummary {
        id,
        disease,
        form,
        status,
        patient_name: patient_name(&values_from_case_row(row)),
        owner_user_id: row.user_id.clone().unwrap_or_default(),
        created_at: row.created_at.unwrap_or(modified),
        last_modified_at: modified,
        submitted_at: None,
        pending_sync: row.pending_sync.unwrap_or(false),
    })
}

/// Translate a value bag into the flat row, on top of `base` (id, disease,
/// form, status, owner and timestamps supplied by the caller). Each column
/// checks its alias list in priority order; the first present key wins.
pub fn case_row_from_values(values: &FormValues, base: CaseRow) -> CaseRow {
    CaseRow {
        pelapor_nama: text_of(
            values,
            &["pelapor_nama", "Pelapor_nama", "nama_pelapor", "Nama_pelapor"],
        ),
        pelapor_jabatan: text_of(values, &["pelapor_jabatan", "Pelapor_jabatan"]),
        pelapor_telp: text_of(values, &["pelapor_telp", "Pelapor_telp"]),
        pelapor_email: text_of(values, &["pelapor_email", "Pelapor_email"]),
        tanggal_lapor: date_of(values, &["tanggal_lapor", "Tanggal_lapor"]),

        pasien_nama: text_of(values, PATIENT_NAME_ALIASES),
        pasien_nik: text_of(
            values,
            &["pasien_nik", "Pasien_nik", "nik_pasien", "NIK_pasien"],
        ),
        pasien_tgl_lahir: date_of(
            values,
            &[
                "pasien_tgl_lahir",
                "Pasien_tgl_lahir",
                "tgl_lahir_pasien",
                "Tanggal_lahir_pasien",
                "Tanggal_lahir",
            ],
        ),
        pasien_umur: number_of(
            values,
            &["pasien_umur", "Pasien_umur", "umur_pasien", "Umur_pasien", "Umur"],
        ),
        pasien_jk: text_of(
            values,
            &["pasien_jk", "Pasien_jk", "jenis_kelamin", "Jenis_kelamin"],
        ),
        pasien_alamat: text_of(
            values,
            &["pasien_alamat", "Pasien_alamat", "alamat_pasien", "Alamat_pasien", "Alamat"],
        ),
        pasien_rt_rw: text_of(values, &["pasien_rt_rw", "Pasien_rt_rw"]),
        pasien_kelurahan: text_of(values, &["pasien_kelurahan", "Pasien_kelurahan", "Kelurahan"]),
        pasien_kecamatan: text_of(values, &["pasien_kecamatan", "Pasien_kecamatan", "Kecamatan"]),

        tanggal_onset: date_of(values, &["tanggal_onset", "Tanggal_onset"]),
        gejala_demam: text_of(values, &["gejala_demam", "Gejala_demam", "demam", "Demam"]),
        gejala_ruam: text_of(
            values,
            &["gejala_ruam", "Gejala_ruam", "ruam", "Ruam", "Ruam_makulopopular"],
        ),
        gejala_batuk: text_of(values, &["gejala_batuk", "Gejala_batuk", "batuk", "Batuk"]),
        gejala_pilek: text_of(values, &["gejala_pilek", "Gejala_pilek", "pilek", "Pilek"]),
        gejala_mata_merah: text_of(
            values,
            &["gejala_mata_merah", "Gejala_mata_merah", "Mata_Merah"],
        ),
        gejala_lain: text_of(
            values,
            &["gejala_lain", "Gejala_lain", "Sebutkan_gejala_lainnya"],
        ),

        sedang_dirawat: text_of(
            values,
            &["sedang_dirawat", "Sedang_dirawat", "Apakah_kasus_dirawat_di_RS"],
        ),
        rumah_sakit: text_of(values, &["rumah_sakit", "Rumah_sakit", "Nama_Rumah_Sakit"]),
        tanggal_dirawat: date_of(
            values,
            &["tanggal_dirawat", "Tanggal_dirawat", "Tanggal_masuk_rawat_inap"],
        ),
        obat_yang_diminum: text_of(values, &["obat_yang_diminum", "Obat_yang_diminum"]),
        riwayat_rawat_inap: text_of(values, &["riwayat_rawat_inap", "Riwayat_rawat_inap"]),

        status_imunisasi: text_of(values, &["status_imunisasi", "Status_imunisasi"]),
        vaksin_terakhir: text_of(values, &["vaksin_terakhir", "Vaksin_terakhir"]),
        tanggal_vaksin_terakhir: date_of(
            values,
            &["tanggal_vaksin_terakhir", "Tanggal_vaksin_terakhir"],
        ),
        tempat_imunisasi: text_of(values, &["tempat_imunisasi", "Tempat_imunisasi"]),
        catatan_imunisasi: text_of(values, &["catatan_imunisasi", "Catatan_imunisasi"]),

        kontak_kasus_lain: text_of(
            values,
            &["kontak_kasus_lain", "Kontak_kasus_lain", "Ada_anggota_sakit_sama"],
        ),
        bepergian_2_minggu: text_of(
            values,
            &["bepergian_2_minggu", "Bepergian_2_minggu", "Berpergian_1_bulan_terakhir"],
        ),
        tempat_bepergian: text_of(
            values,
            &["tempat_bepergian", "Tempat_bepergian", "Lokasi_perjalanan"],
        ),
        tanggal_bepergian: date_of(
            values,
            &["tanggal_bepergian", "Tanggal_bepergian", "Tanggal_pergi"],
        ),
        sumber_infeksi: text_of(values, &["sumber_infeksi", "Sumber_infeksi"]),

        spesimen_diambil: text_of(
            values,
            &["spesimen_diambil", "Spesimen_diambil", "Spesimen_darah_diambil", "Spesimen_lain_diambil"],
        ),
        jenis_spesimen: text_of(
            values,
            &["jenis_spesimen", "Jenis_spesimen", "Jenis_sampel_darah", "Jenis_spesimen_lain"],
        ),
        tanggal_pengambilan: date_of(
            values,
            &[
                "tanggal_pengambilan",
                "Tanggal_pengambilan",
                "Tanggal_ambil_spesimen_darah",
                "Tanggal_ambil_spesimen_lain",
            ],
        ),
        tempat_pemeriksaan: text_of(values, &["tempat_pemeriksaan", "Tempat_pemeriksaan"]),
        hasil_lab: text_of(values, &["hasil_lab", "Hasil_lab"]),

        klasifikasi_akhir: text_of(values, &["klasifikasi_akhir", "Klasifikasi_akhir"]),
        kondisi_akhir: text_of(
            values,
            &["kondisi_akhir", "Kondisi_akhir", "Keadaan_saat_ini"],
        ),
        tanggal_meninggal: date_of(values, &["tanggal_meninggal", "Tanggal_meninggal"]),
        penyebab_kematian: text_of(values, &["penyebab_kematian", "Penyebab_kematian"]),
        tindak_lanjut: text_of(values, &["tindak_lanjut", "Tindak_lanjut"]),

        jumlah_kontak: number_of(values, &["jumlah_kontak", "Jumlah_kontak", "Jumlah"]),
        kontak_keluarga: number_of(values, &["kontak_keluarga", "Kontak_keluarga"]),
        kontak_sekolah: number_of(values, &["kontak_sekolah", "Kontak_sekolah"]),
        kontak_lain: number_of(values, &["kontak_lain", "Kontak_lain"]),
        catatan_kontak: text_of(values, &["catatan_kontak", "Catatan_kontak"]),

        petugas_nama: text_of(values, &["petugas_nama", "Petugas_nama"]),
        petugas_nip: text_of(values, &["petugas_nip", "Petugas_nip"]),
        petugas_jabatan: text_of(values, &["petugas_jabatan", "Petugas_jabatan"]),
        tanggal_pengisian: date_of(values, &["tanggal_pengisian", "Tanggal_pengisian"]),
        tanda_tangan: text_of(values, &["tanda_tangan", "Tanda_tangan"]),
        koordinat_lokasi: text_of(values, &["koordinat_lokasi", "Koordinat_lokasi"]),

        ..base
    }
}

/// Columns that are bookkeeping, not form data.
const META_COLUMNS: &[&str] = &[
    "id",
    "disease",
    "form",
    "status",
    "user_id",
    "created_at",
    "updated_at",
    "last_modified",
    "pending_sync",
];

/// Read a remote row back into a value bag keyed by canonical column names.
pub fn values_from_case_row(row: &CaseRow) -> FormValues {
    let mut values = FormValues::new();
    if let Ok(JsonValue::Object(columns)) = serde_json::to_value(row) {
        for (column, value) in columns {
            if META_COLUMNS.contains(&column.as_str()) {
                continue;
            }
            match value {
                JsonValue::String(text) => values.set(column, text),
                JsonValue::Number(number) => {
                    if let Some(number) = number.as_f64() {
                        values.set(column, number);
                    }
                }
                _ => {}
            }
        }
    }
    values
}
