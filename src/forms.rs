//! Built-in case-report form definitions.
//!
//! The MR-01 form is declared here in one place: every section, field and
//! inter-field dependency. [`case_report_sections`] builds a fresh copy on
//! each call so callers may toggle UI flags (`is_expanded`, `is_complete`)
//! without touching anyone else's copy.

use crate::types::{ComputeRule, FieldDefinition, FieldKind, SectionDefinition};

pub const YA_TIDAK: &[&str] = &["Ya", "Tidak"];
pub const YA_TIDAK_TIDAK_TAHU: &[&str] = &["Ya", "Tidak", "Tidak Tahu"];

const KABUPATEN_OPTIONS: &[&str] = &[
    "Jakarta Pusat",
    "Jakarta Utara",
    "Jakarta Selatan",
    "Jakarta Timur",
    "Jakarta Barat",
    "Bogor",
    "Depok",
    "Tangerang",
    "Bekasi",
    "Bandung",
    "Surabaya",
    "Medan",
    "Makassar",
];

const KECAMATAN_OPTIONS: &[&str] = &[
    "Menteng",
    "Tanah Abang",
    "Gambir",
    "Sawah Besar",
    "Kemayoran",
    "Senen",
    "Cempaka Putih",
    "Johar Baru",
    "Kelapa Gading",
    "Tanjung Priok",
];

const SUMBER_INFO_OPTIONS: &[&str] = &[
    "Kartu/buku imunisasi",
    "Ingatan ibu/keluarga",
    "Catatan medis",
    "Tidak tahu",
];

fn field(id: &str, label: &str, kind: FieldKind) -> FieldDefinition {
    FieldDefinition::new(id, label, kind)
}

/// Full MR-01 section list, freshly built on every call.
pub fn case_report_sections() -> Vec<SectionDefinition> {
    vec![
        SectionDefinition::new("info-pelapor", "INFO PELAPOR")
            .with_description("Informasi pelapor dan sumber laporan")
            .expanded()
            .with_fields(vec![
                field("Kabupaten", "Kabupaten/Kota", FieldKind::Select)
                    .required()
                    .with_options(KABUPATEN_OPTIONS),
                field("Nomor_EPID", "Nomor EPID", FieldKind::Text)
                    .required()
                    .with_placeholder("Contoh: EPID-2025-001"),
                field(
                    "Kasus_KLB",
                    "Apakah kasus ini bagian dari KLB?",
                    FieldKind::Radio,
                )
                .required()
                .with_options(YA_TIDAK),
                field("KLB_ke", "KLB ke-", FieldKind::Integer)
                    .with_dependency("Kasus_KLB")
                    .with_placeholder("Nomor urut KLB"),
                field("Nomor_KLB", "Nomor KLB", FieldKind::Text)
                    .with_dependency("Kasus_KLB")
                    .with_placeholder("Contoh: KLB-2025-001"),
                field("Sumber_laporan", "Sumber Laporan", FieldKind::Select)
                    .required()
                    .with_options(&[
                        "Puskesmas",
                        "Rumah Sakit",
                        "Praktek Swasta",
                        "Masyarakat",
                        "Lainnya",
                    ]),
                field("Nama_unit_pelapor", "Nama Unit Pelapor", FieldKind::Text)
                    .required()
                    .with_placeholder("Nama fasilitas kesehatan"),
                field(
                    "Tanggal_terima_laporan",
                    "Tanggal Terima Laporan",
                    FieldKind::Date,
                )
                .required(),
                field("Tanggal_pelacakan", "Tanggal Pelacakan", FieldKind::Date).required(),
            ]),
        SectionDefinition::new("info-kasus", "INFO KASUS")
            .with_description("Data identitas dan demografi pasien")
            .with_fields(vec![
                field("Nama_kasus", "Nama Lengkap Pasien", FieldKind::Text)
                    .required()
                    .with_placeholder("Nama lengkap sesuai KTP/KK"),
                field("Jenis_kelamin", "Jenis Kelamin", FieldKind::Radio)
                    .required()
                    .with_options(&["Laki-laki", "Perempuan"]),
                field("Tanggal_lahir", "Tanggal Lahir", FieldKind::Date).required(),
                field("Umur", "Umur (tahun)", FieldKind::Computed)
                    .with_compute(ComputeRule::AgeFromBirthDate)
                    .with_tooltip("Umur akan dihitung otomatis berdasarkan tanggal lahir"),
                field("Alamat", "Alamat Lengkap", FieldKind::Multiline)
                    .required()
                    .with_placeholder("Alamat tempat tinggal saat ini"),
                field("Kecamatan", "Kecamatan", FieldKind::Select)
                    .required()
                    .with_options(KECAMATAN_OPTIONS),
                field("Kelurahan", "Kelurahan/Desa", FieldKind::Text)
                    .required()
                    .with_placeholder("Nama kelurahan/desa"),
                field("Nama_orangtua_wali", "Nama Orangtua/Wali", FieldKind::Text)
                    .required()
                    .with_placeholder("Untuk pasien di bawah 18 tahun"),
                field(
                    "No_kontak_orangtua_wali",
                    "No. Kontak Orangtua/Wali",
                    FieldKind::Phone,
                )
                .required()
                .with_placeholder("Nomor telepon yang bisa dihubungi"),
            ]),
        SectionDefinition::new("info-klinis", "INFO KLINIS")
            .with_description("Gejala klinis dan manifestasi penyakit")
            .with_fields(vec![
                field("Demam", "Demam", FieldKind::Radio)
                    .required()
                    .with_options(YA_TIDAK),
                field("Tanggal_mulai_demam", "Tanggal Mulai Demam", FieldKind::Date)
                    .with_dependency("Demam"),
                field("Ruam_makulopopular", "Ruam Makulopopular", FieldKind::Radio)
                    .required()
                    .with_options(YA_TIDAK)
                    .with_tooltip(
                        "Ruam berupa bintik-bintik merah yang datar atau sedikit menonjol",
                    ),
                field("Tanggal_mulai_rash", "Tanggal Mulai Ruam", FieldKind::Date)
                    .with_dependency("Ruam_makulopopular"),
                field("Gejala_lain", "Ada Gejala Lain?", FieldKind::Radio)
                    .required()
                    .with_options(YA_TIDAK),
                field("Batuk", "Batuk", FieldKind::Radio)
                    .required()
                    .with_options(YA_TIDAK),
                field("Pilek", "Pilek", FieldKind::Radio)
                    .required()
                    .with_options(YA_TIDAK),
                field("Mata_Merah", "Mata Merah (Konjungtivitis)", FieldKind::Radio)
                    .required()
                    .with_options(YA_TIDAK),
                field(
                    "Adenopathy",
                    "Pembesaran Kelenjar Getah Bening",
                    FieldKind::Radio,
                )
                .required()
                .with_options(YA_TIDAK)
                .with_tooltip("Pembesaran kelenjar getah bening (lymphadenopathy)"),
                field(
                    "Lokasi_Adenopathy",
                    "Lokasi Pembesaran Kelenjar",
                    FieldKind::Select,
                )
                .with_options(&["Leher", "Ketiak", "Selangkangan", "Multiple", "Lainnya"])
                .with_dependency("Adenopathy"),
                field("Arthralgia", "Nyeri Sendi", FieldKind::Radio)
                    .required()
                    .with_options(YA_TIDAK)
                    .with_tooltip("Nyeri pada persendian (arthralgia)"),
                field(
                    "Bagian_Sendi_Arthralgia",
                    "Bagian Sendi yang Nyeri",
                    FieldKind::Select,
                )
                .with_options(&["Tangan", "Kaki", "Lutut", "Siku", "Multiple", "Lainnya"])
                .with_dependency("Arthralgia"),
                field(
                    "Kehamilan",
                    "Sedang Hamil? (untuk perempuan)",
                    FieldKind::Radio,
                )
                .required()
                .with_options(YA_TIDAK_TIDAK_TAHU),
                field("Umur_kehamilan", "Umur Kehamilan (minggu)", FieldKind::Integer)
                    .with_dependency("Kehamilan")
                    .with_placeholder("Dalam minggu"),
                field("Lainnya", "Gejala Lainnya", FieldKind::Radio)
                    .required()
                    .with_options(YA_TIDAK),
                field(
                    "Sebutkan_gejala_lainnya",
                    "Sebutkan Gejala Lainnya",
                    FieldKind::Multiline,
                )
                .with_dependency("Lainnya")
                .with_placeholder("Jelaskan gejala lain yang dialami"),
            ]),
        SectionDefinition::new("riwayat-pengobatan", "RIWAYAT PENGOBATAN")
            .with_description("Riwayat perawatan dan pengobatan")
            .with_fields(vec![
                field(
                    "Apakah_kasus_dirawat_di_RS",
                    "Apakah Kasus Dirawat di RS?",
                    FieldKind::Radio,
                )
                .required()
                .with_options(YA_TIDAK),
                field("Nama_Rumah_Sakit", "Nama Rumah Sakit", FieldKind::Text)
                    .with_dependency("Apakah_kasus_dirawat_di_RS")
                    .with_placeholder("Nama lengkap rumah sakit"),
                field(
                    "Tanggal_masuk_rawat_inap",
                    "Tanggal Masuk Rawat Inap",
                    FieldKind::Date,
                )
                .with_dependency("Apakah_kasus_dirawat_di_RS"),
                field("Nomor_rekam_medik", "Nomor Rekam Medik", FieldKind::Text)
                    .with_dependency("Apakah_kasus_dirawat_di_RS")
                    .with_placeholder("Nomor RM di rumah sakit"),
                field("Tanggal_keluar", "Tanggal Keluar RS", FieldKind::Date)
                    .with_dependency("Apakah_kasus_dirawat_di_RS"),
            ]),
        SectionDefinition::new("riwayat-vaksinasi", "RIWAYAT VAKSINASI")
            .with_description("Riwayat imunisasi campak dan rubela")
            .with_fields(vec![
                field(
                    "Imunisasi_campak_MR_9_bulan",
                    "Imunisasi Campak/MR 9 Bulan",
                    FieldKind::Radio,
                )
                .required()
                .with_options(YA_TIDAK_TIDAK_TAHU),
                field(
                    "Sumber_info_MR_9_bulan",
                    "Sumber Informasi MR 9 Bulan",
                    FieldKind::Select,
                )
                .with_options(SUMBER_INFO_OPTIONS)
                .with_dependency("Imunisasi_campak_MR_9_bulan"),
                field(
                    "Imunisasi_campak_MR_18_bulan",
                    "Imunisasi Campak/MR 18 Bulan",
                    FieldKind::Radio,
                )
                .required()
                .with_options(YA_TIDAK_TIDAK_TAHU),
                field(
                    "Sumber_info_MR_18_bulan",
                    "Sumber Informasi MR 18 Bulan",
                    FieldKind::Select,
                )
                .with_options(SUMBER_INFO_OPTIONS)
                .with_dependency("Imunisasi_campak_MR_18_bulan"),
                field(
                    "Imunisasi_campak_MR_kelas_1_SD",
                    "Imunisasi Campak/MR Kelas 1 SD",
                    FieldKind::Radio,
                )
                .required()
                .with_options(YA_TIDAK_TIDAK_TAHU),
                field(
                    "Sumber_info_MR_kelas_1_SD",
                    "Sumber Informasi MR Kelas 1 SD",
                    FieldKind::Select,
                )
                .with_options(SUMBER_INFO_OPTIONS)
                .with_dependency("Imunisasi_campak_MR_kelas_1_SD"),
                field(
                    "Pernah_MMR_sebelumnya",
                    "Pernah MMR Sebelumnya",
                    FieldKind::Radio,
                )
                .required()
                .with_options(YA_TIDAK_TIDAK_TAHU),
                field(
                    "Sumber_info_MMR_sebelumnya",
                    "Sumber Informasi MMR",
                    FieldKind::Select,
                )
                .with_options(SUMBER_INFO_OPTIONS)
                .with_dependency("Pernah_MMR_sebelumnya"),
                field("Pernah_MR_kampanye", "Pernah MR Kampanye", FieldKind::Radio)
                    .required()
                    .with_options(YA_TIDAK_TIDAK_TAHU),
                field(
                    "Sumber_info_MR_kampanye",
                    "Sumber Informasi MR Kampanye",
                    FieldKind::Select,
                )
                .with_options(SUMBER_INFO_OPTIONS)
                .with_dependency("Pernah_MR_kampanye"),
                field(
                    "Tanggal_vaksinasi_rubella_terakhir",
                    "Tanggal Vaksinasi Rubella Terakhir",
                    FieldKind::Date,
                ),
            ]),
        SectionDefinition::new("info-epidemiologi", "INFO EPIDEMIOLOGI")
            .with_description("Faktor risiko dan riwayat paparan")
            .with_fields(vec![
                field("Pemberian_vitamin_A", "Pemberian Vitamin A", FieldKind::Radio)
                    .required()
                    .with_options(YA_TIDAK_TIDAK_TAHU),
                field(
                    "Ada_anggota_sakit_sama",
                    "Ada Anggota Keluarga/Kontak Sakit Sama?",
                    FieldKind::Radio,
                )
                .required()
                .with_options(YA_TIDAK),
                field("Jumlah", "Jumlah Orang yang Sakit Sama", FieldKind::Integer)
                    .with_dependency("Ada_anggota_sakit_sama")
                    .with_placeholder("Jumlah orang"),
                field(
                    "Berpergian_1_bulan_terakhir",
                    "Berpergian 1 Bulan Terakhir?",
                    FieldKind::Radio,
                )
                .required()
                .with_options(YA_TIDAK),
                field("Lokasi_perjalanan", "Lokasi Perjalanan", FieldKind::Text)
                    .with_dependency("Berpergian_1_bulan_terakhir")
                    .with_placeholder("Kota/provinsi/negara tujuan"),
                field("Tanggal_pergi", "Tanggal Berangkat", FieldKind::Date)
                    .with_dependency("Berpergian_1_bulan_terakhir"),
                field("Tanggal_kembali", "Tanggal Kembali", FieldKind::Date)
                    .with_dependency("Berpergian_1_bulan_terakhir"),
                field(
                    "Hubungan_epidemiologi",
                    "Hubungan Epidemiologi",
                    FieldKind::Select,
                )
                .required()
                .with_options(&[
                    "Ya, ada hubungan",
                    "Tidak ada hubungan",
                    "Sedang diselidiki",
                ]),
                field("Rujuk_ke_nomor_KLB", "Rujuk ke Nomor KLB", FieldKind::Text)
                    .with_placeholder("Nomor KLB terkait jika ada"),
            ]),
        SectionDefinition::new("info-spesimen", "INFO SPESIMEN")
            .with_description("Pengambilan dan pengiriman spesimen laboratorium")
            .with_fields(vec![
                field(
                    "Spesimen_darah_diambil",
                    "Spesimen Darah Diambil?",
                    FieldKind::Radio,
                )
                .required()
                .with_options(YA_TIDAK),
                field("Jenis_sampel_darah", "Jenis Sampel Darah", FieldKind::Select)
                    .with_options(&["Serum", "Whole Blood", "DBS (Dried Blood Spot)"])
                    .with_dependency("Spesimen_darah_diambil"),
                field(
                    "Tanggal_ambil_spesimen_darah",
                    "Tanggal Ambil Spesimen Darah",
                    FieldKind::Date,
                )
                .with_dependency("Spesimen_darah_diambil"),
                field(
                    "Tanggal_pengiriman_spesimen_darah_ke_lab",
                    "Tanggal Kirim Spesimen Darah ke Lab",
                    FieldKind::Date,
                )
                .with_dependency("Spesimen_darah_diambil"),
                field(
                    "Spesimen_lain_diambil",
                    "Spesimen Lain Diambil?",
                    FieldKind::Radio,
                )
                .required()
                .with_options(YA_TIDAK),
                field("Jenis_spesimen_lain", "Jenis Spesimen Lain", FieldKind::Select)
                    .with_options(&[
                        "Urin",
                        "Swab Tenggorok",
                        "Swab Hidung",
                        "Cairan Serebrospinal",
                        "Lainnya",
                    ])
                    .with_dependency("Spesimen_lain_diambil"),
                field(
                    "Tanggal_ambil_spesimen_lain",
                    "Tanggal Ambil Spesimen Lain",
                    FieldKind::Date,
                )
                .with_dependency("Spesimen_lain_diambil"),
                field(
                    "Tanggal_pengiriman_spesimen_lain_ke_lab",
                    "Tanggal Kirim Spesimen Lain ke Lab",
                    FieldKind::Date,
                )
                .with_dependency("Spesimen_lain_diambil"),
            ]),
        SectionDefinition::new("info-kondisi-akhir", "INFO KONDISI AKHIR")
            .with_description("Kondisi dan klasifikasi akhir kasus")
            .with_fields(vec![
                field("Keadaan_saat_ini", "Keadaan Pasien Saat Ini", FieldKind::Select)
                    .required()
                    .with_options(&[
                        "Sembuh",
                        "Dalam perawatan",
                        "Meninggal",
                        "Tidak diketahui",
                    ]),
            ]),
    ]
}
