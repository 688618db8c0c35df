// Code generated by assetfs 0.1.0. DO NOT EDIT.
//
// 3 files in 1 directories.

#[allow(dead_code, unused_imports, clippy::all, clippy::pedantic)]
pub mod assets {
    use std::sync::{Arc, LazyLock};

    use assetfs_core::{DirRecord, FileRecord, LocalOverride, Manifest, ManifestEntry};
    use assetfs_vfs::{AssetTable, StaticFs};

    static TABLE: LazyLock<Arc<AssetTable>> =
        LazyLock::new(|| Arc::new(AssetTable::from_manifest(manifest())));

    /// Returns a filesystem over the embedded assets.
    ///
    /// Entries are decoded on first open and cached for the life of the
    /// process. The cache is shared by every filesystem returned here.
    pub fn static_fs(local: LocalOverride) -> StaticFs {
        StaticFs::new(Arc::clone(&TABLE), local)
    }

    fn manifest() -> Manifest {
        Manifest {
            entries: vec![
                ManifestEntry::File(FileRecord {
                    path: "/css/site.css".into(),
                    local: "tests/fixtures/site/css/site.css".into(),
                    size: 15,
                    mod_time: 0,
                    compressed: r"
H4sIAAAAAAAA/0vKT6mszk0sSs/MszKo5QIAv2itSg8AAAA=
".into(),
                }),
                ManifestEntry::File(FileRecord {
                    path: "/empty.txt".into(),
                    local: "tests/fixtures/site/empty.txt".into(),
                    size: 0,
                    mod_time: 0,
                    compressed: String::new(),
                }),
                ManifestEntry::File(FileRecord {
                    path: "/index.html".into(),
                    local: "tests/fixtures/site/index.html".into(),
                    size: 13,
                    mod_time: 0,
                    compressed: r"
H4sIAAAAAAAA/7MpsMtIzcnJt9EvsOMCAOEttEMNAAAA
".into(),
                }),
                ManifestEntry::Dir(DirRecord {
                    path: "/css".into(),
                    local: "tests/fixtures/site/css".into(),
                }),
            ],
        }
    }
}
