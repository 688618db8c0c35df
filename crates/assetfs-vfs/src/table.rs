//! In-process asset table with per-entry lazy decoding.
//!
//! Every embedded file owns its own one-shot decode cell. The first open of
//! a file runs the decoder; concurrent opens of the same file block on that
//! cell until it is filled, while opens of other files proceed
//! independently. A filled cell never changes: a decoded entry is served
//! from memory for the life of the process, and a failed entry keeps
//! failing with the same error.

use crate::types::{EntryState, FileInfo, Result, VfsError};
use assetfs_core::{DirRecord, FileRecord, Manifest, ManifestEntry, clean, codec};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::{error, warn};

type Decoded = Result<Arc<[u8]>>;

/// One embedded file and its decode cell.
#[derive(Debug)]
pub(crate) struct FileNode {
    pub(crate) record: FileRecord,
    loading: AtomicBool,
    data: OnceLock<Decoded>,
}

/// Outcome of [`FileNode::load`].
pub(crate) struct Load {
    pub(crate) data: Decoded,
    /// Whether this call ran the decoder
    pub(crate) decoded_here: bool,
}

impl FileNode {
    fn new(record: FileRecord) -> Self {
        Self {
            record,
            loading: AtomicBool::new(false),
            data: OnceLock::new(),
        }
    }

    /// Returns the decoded bytes, decoding on first use.
    pub(crate) fn load(&self) -> Load {
        let mut decoded_here = false;
        let data = self
            .data
            .get_or_init(|| {
                decoded_here = true;
                self.loading.store(true, Ordering::Release);
                self.decode()
            })
            .clone();
        Load { data, decoded_here }
    }

    fn decode(&self) -> Decoded {
        let record = &self.record;
        if record.size == 0 {
            return Ok(Arc::from(Vec::new()));
        }

        let result = codec::decode(&record.compressed)
            .map_err(|e| e.to_string())
            .and_then(|bytes| {
                if bytes.len() as u64 == record.size {
                    Ok(bytes)
                } else {
                    Err(format!(
                        "decoded {} bytes, expected {}",
                        bytes.len(),
                        record.size
                    ))
                }
            });

        match result {
            Ok(bytes) => Ok(Arc::from(bytes)),
            Err(message) => {
                error!(path = %record.path, %message, "failed to decode embedded file");
                Err(VfsError::Decode {
                    path: record.path.clone(),
                    message,
                })
            }
        }
    }

    fn state(&self) -> EntryState {
        match self.data.get() {
            Some(Ok(_)) => EntryState::Loaded,
            Some(Err(_)) => EntryState::Failed,
            None if self.loading.load(Ordering::Acquire) => EntryState::Loading,
            None => EntryState::Unloaded,
        }
    }

    pub(crate) fn info(&self) -> FileInfo {
        FileInfo::file(
            base_name(&self.record.path),
            self.record.size,
            self.record.mod_time,
        )
    }
}

#[derive(Debug)]
pub(crate) enum Node {
    File(FileNode),
    Dir(DirRecord),
}

impl Node {
    pub(crate) fn info(&self) -> FileInfo {
        match self {
            Self::File(file) => file.info(),
            Self::Dir(dir) => FileInfo::dir(base_name(&dir.path)),
        }
    }
}

/// Read-only table of embedded entries, shared by every filesystem built
/// on it.
///
/// # Examples
///
/// ```
/// use assetfs_core::{FileRecord, Manifest, ManifestEntry, codec};
/// use assetfs_vfs::{AssetTable, EntryState};
///
/// let manifest = Manifest {
///     entries: vec![ManifestEntry::File(FileRecord {
///         path: "/hello.txt".to_string(),
///         local: "public/hello.txt".to_string(),
///         size: 5,
///         mod_time: 0,
///         compressed: codec::encode(b"hello").unwrap(),
///     })],
/// };
///
/// let table = AssetTable::from_manifest(manifest);
/// assert_eq!(table.state("/hello.txt"), Some(EntryState::Unloaded));
/// assert_eq!(table.state("/missing"), None);
/// ```
#[derive(Debug, Default)]
pub struct AssetTable {
    nodes: HashMap<String, Node>,
    children: HashMap<String, Vec<String>>,
}

impl AssetTable {
    /// Builds a table from a manifest.
    ///
    /// Entry paths are cleaned. If two entries share a path the first one
    /// wins and the rest are logged and dropped.
    #[must_use]
    pub fn from_manifest(manifest: Manifest) -> Self {
        let mut nodes = HashMap::with_capacity(manifest.len());
        let mut children: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for entry in manifest.entries {
            let path = clean(entry.path());
            if nodes.contains_key(&path) {
                warn!(%path, "duplicate manifest entry ignored");
                continue;
            }
            if path != "/" {
                children
                    .entry(parent_of(&path).to_string())
                    .or_default()
                    .push(path.clone());
            }
            let node = match entry {
                ManifestEntry::File(mut record) => {
                    record.path.clone_from(&path);
                    Node::File(FileNode::new(record))
                }
                ManifestEntry::Dir(mut record) => {
                    record.path.clone_from(&path);
                    Node::Dir(record)
                }
            };
            nodes.insert(path, node);
        }

        let children = children
            .into_iter()
            .map(|(dir, mut list)| {
                list.sort();
                (dir, list)
            })
            .collect();

        Self { nodes, children }
    }

    /// Parses a JSON manifest and builds a table from it.
    ///
    /// # Errors
    ///
    /// Returns `assetfs_core::Error::Decode` if the JSON is not a manifest.
    pub fn from_json(json: &str) -> assetfs_core::Result<Self> {
        Manifest::from_json(json).map(Self::from_manifest)
    }

    /// Returns the decode state of the file at `path`, or `None` if there is
    /// no such file.
    #[must_use]
    pub fn state(&self, path: &str) -> Option<EntryState> {
        match self.nodes.get(&clean(path))? {
            Node::File(file) => Some(file.state()),
            Node::Dir(_) => None,
        }
    }

    /// Returns `true` if an entry (file or directory) exists at `path`.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.nodes.contains_key(&clean(path))
    }

    /// Returns the number of entries, files and directories together.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks up a node by already-cleaned path.
    pub(crate) fn node(&self, path: &str) -> Option<&Node> {
        self.nodes.get(path)
    }

    /// Stat information for the direct children of a directory, sorted by
    /// path.
    pub(crate) fn list(&self, dir: &str) -> Vec<FileInfo> {
        self.children.get(dir).map_or_else(Vec::new, |paths| {
            paths
                .iter()
                .filter_map(|p| self.nodes.get(p))
                .map(Node::info)
                .collect()
        })
    }
}

fn parent_of(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => "/",
        Some(pos) => &path[..pos],
    }
}

pub(crate) fn base_name(path: &str) -> &str {
    if path == "/" {
        return path;
    }
    path.rsplit('/').next().unwrap_or(path)
}
