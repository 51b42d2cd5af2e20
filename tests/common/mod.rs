#![allow(dead_code)]

use spasi_core::{FormValues, LocalStore, MemoryBackend};
use std::sync::Arc;

pub fn memory_store() -> Arc<LocalStore> {
    Arc::new(LocalStore::open(MemoryBackend::new()))
}

/// A complete MR-01 answer set: every required field filled, every
/// conditional branch answered so that no dependent field becomes required.
pub fn filled_case_report(patient_name: &str) -> FormValues {
    let mut values = FormValues::new();

    // INFO PELAPOR
    values.set("Kabupaten", "Bogor");
    values.set("Nomor_EPID", "EPID-2025-014");
    values.set("Kasus_KLB", "Tidak");
    values.set("Sumber_laporan", "Puskesmas");
    values.set("Nama_unit_pelapor", "Puskesmas Menteng");
    values.set("Tanggal_terima_laporan", "2025-01-10");
    values.set("Tanggal_pelacakan", "2025-01-11");

    // INFO KASUS
    values.set("Nama_kasus", patient_name);
    values.set("Jenis_kelamin", "Perempuan");
    values.set("Tanggal_lahir", "2019-05-04");
    values.set("Alamat", "Jl. Kenanga No. 5");
    values.set("Kecamatan", "Menteng");
    values.set("Kelurahan", "Pegangsaan");
    values.set("Nama_orangtua_wali", "Rahmat Hidayat");
    values.set("No_kontak_orangtua_wali", "+62 812-3456-7890");

    // INFO KLINIS
    values.set("Demam", "Tidak");
    values.set("Ruam_makulopopular", "Tidak");
    values.set("Gejala_lain", "Tidak");
    values.set("Batuk", "Tidak");
    values.set("Pilek", "Tidak");
    values.set("Mata_Merah", "Tidak");
    values.set("Adenopathy", "Tidak");
    values.set("Arthralgia", "Tidak");
    values.set("Kehamilan", "Tidak");
    values.set("Lainnya", "Tidak");

    // RIWAYAT PENGOBATAN
    values.set("Apakah_kasus_dirawat_di_RS", "Tidak");

    // RIWAYAT VAKSINASI ("Tidak Tahu" keeps the source questions hidden)
    values.set("Imunisasi_campak_MR_9_bulan", "Tidak Tahu");
    values.set("Imunisasi_campak_MR_18_bulan", "Tidak Tahu");
    values.set("Imunisasi_campak_MR_kelas_1_SD", "Tidak Tahu");
    values.set("Pernah_MMR_sebelumnya", "Tidak Tahu");
    values.set("Pernah_MR_kampanye", "Tidak Tahu");

    // INFO EPIDEMIOLOGI
    values.set("Pemberian_vitamin_A", "Tidak");
    values.set("Ada_anggota_sakit_sama", "Tidak");
    values.set("Berpergian_1_bulan_terakhir", "Tidak");
    values.set("Hubungan_epidemiologi", "Tidak ada hubungan");

    // INFO SPESIMEN
    values.set("Spesimen_darah_diambil", "Tidak");
    values.set("Spesimen_lain_diambil", "Tidak");

    // INFO KONDISI AKHIR
    values.set("Keadaan_saat_ini", "Sembuh");

    values
}
