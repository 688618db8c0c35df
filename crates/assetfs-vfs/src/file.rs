//! Open file handles.

use crate::types::{FileInfo, Result, VfsError};
use std::fs;
use std::io::{self, Cursor, Read, Seek, SeekFrom};
use std::sync::Arc;

#[derive(Debug)]
enum Handle {
    Embedded(Cursor<Arc<[u8]>>),
    Dir(Vec<FileInfo>),
    Local(fs::File),
}

/// A handle returned by [`StaticFs::open`](crate::StaticFs::open).
///
/// Embedded files read from the shared decoded buffer; each handle keeps
/// its own position. Local override files read straight from disk.
/// Directories cannot be read, only listed.
#[derive(Debug)]
pub struct VfsFile {
    path: String,
    info: FileInfo,
    handle: Handle,
}

impl VfsFile {
    pub(crate) fn embedded(path: String, info: FileInfo, data: Arc<[u8]>) -> Self {
        Self {
            path,
            info,
            handle: Handle::Embedded(Cursor::new(data)),
        }
    }

    pub(crate) fn dir(path: String, info: FileInfo, children: Vec<FileInfo>) -> Self {
        Self {
            path,
            info,
            handle: Handle::Dir(children),
        }
    }

    pub(crate) fn local(path: String, info: FileInfo, file: fs::File) -> Self {
        Self {
            path,
            info,
            handle: Handle::Local(file),
        }
    }

    /// Returns the cleaned virtual path this handle was opened with.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns stat information for this handle.
    #[must_use]
    pub const fn metadata(&self) -> &FileInfo {
        &self.info
    }

    /// Returns `true` if this handle reads from the override directory.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self.handle, Handle::Local(_))
    }

    /// Lists a directory's direct children, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns `VfsError::NotADirectory` for files.
    pub fn read_dir(&self) -> Result<Vec<FileInfo>> {
        match &self.handle {
            Handle::Dir(children) => Ok(children.clone()),
            Handle::Embedded(_) | Handle::Local(_) => Err(VfsError::NotADirectory {
                path: self.path.clone(),
            }),
        }
    }

    /// Returns the full decoded content of an embedded file.
    ///
    /// `None` for directories and override files.
    #[must_use]
    pub fn contents(&self) -> Option<&[u8]> {
        match &self.handle {
            Handle::Embedded(cursor) => Some(&cursor.get_ref()[..]),
            Handle::Dir(_) | Handle::Local(_) => None,
        }
    }
}

fn is_a_directory(path: &str) -> io::Error {
    io::Error::new(io::ErrorKind::IsADirectory, format!("{path} is a directory"))
}

impl Read for VfsFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.handle {
            Handle::Embedded(cursor) => cursor.read(buf),
            Handle::Local(file) => file.read(buf),
            Handle::Dir(_) => Err(is_a_directory(&self.path)),
        }
    }
}

impl Seek for VfsFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match &mut self.handle {
            Handle::Embedded(cursor) => cursor.seek(pos),
            Handle::Local(file) => file.seek(pos),
            Handle::Dir(_) => Err(is_a_directory(&self.path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn embedded(data: &[u8]) -> VfsFile {
        VfsFile::embedded(
            "/a.txt".to_string(),
            FileInfo::file("a.txt", data.len() as u64, 0),
            Arc::from(data),
        )
    }

    #[test]
    fn test_read_and_seek() {
        let mut file = embedded(b"hello world");

        let mut buf = [0u8; 5];
        file.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"hello");

        file.seek(SeekFrom::End(-5)).unwrap();
        let mut rest = String::new();
        file.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "world");

        assert_eq!(file.seek(SeekFrom::Start(0)).unwrap(), 0);
        assert_eq!(file.contents(), Some(&b"hello world"[..]));
    }

    #[test]
    fn test_handles_have_independent_positions() {
        let data: Arc<[u8]> = Arc::from(&b"abc"[..]);
        let info = FileInfo::file("a", 3, 0);
        let mut one = VfsFile::embedded("/a".to_string(), info.clone(), Arc::clone(&data));
        let mut two = VfsFile::embedded("/a".to_string(), info, data);

        let mut byte = [0u8; 1];
        one.read_exact(&mut byte).unwrap();
        one.read_exact(&mut byte).unwrap();
        two.read_exact(&mut byte).unwrap();
        assert_eq!(&byte, b"a");
    }

    #[test]
    fn test_directory_cannot_be_read() {
        let mut dir = VfsFile::dir("/css".to_string(), FileInfo::dir("css"), Vec::new());
        let mut buf = [0u8; 4];
        let err = dir.read(&mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::IsADirectory);
        assert!(dir.contents().is_none());
        assert!(dir.read_dir().unwrap().is_empty());
    }

    #[test]
    fn test_file_is_not_a_directory() {
        let file = embedded(b"x");
        assert!(file.read_dir().unwrap_err().is_not_directory());
        assert!(!file.is_local());
        assert_eq!(file.path(), "/a.txt");
        assert_eq!(file.metadata().size, 1);
    }
}
