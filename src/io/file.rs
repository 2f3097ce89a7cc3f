use std::fs::File;
use std::path::Path;

use async_trait::async_trait;

use super::Resource;
use crate::error::{CapabilityError, ReadError};

/// Local file resource with positional reads.
pub struct FileResource {
    file: File,
    size: u64,
    regular: bool,
}

impl FileResource {
    /// Open a file for range reading.
    ///
    /// The file's length is recorded here; it is treated as immutable for
    /// the resource's lifetime.
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = File::open(path)?;
        let meta = file.metadata()?;
        Ok(Self {
            size: meta.len(),
            regular: meta.is_file(),
            file,
        })
    }
}

#[async_trait]
impl Resource for FileResource {
    fn validate(&self) -> Result<(), CapabilityError> {
        // Directories and pipes report no meaningful length, so a range
        // read over them cannot be bounded.
        if !self.regular {
            return Err(CapabilityError::new(
                "not a regular file; cannot serve bounded range reads",
            ));
        }
        Ok(())
    }

    fn len(&self) -> u64 {
        self.size
    }

    async fn fetch(&self, offset: u64, length: u64) -> Result<Vec<u8>, ReadError> {
        let mut buf = vec![0u8; length as usize];

        #[cfg(unix)]
        {
            use std::os::unix::fs::FileExt;
            self.file.read_exact_at(&mut buf, offset)?;
        }

        #[cfg(not(unix))]
        {
            use std::io::{Read, Seek, SeekFrom};
            // No pread on this platform; fall back to seek + read. Not safe
            // under concurrent fetches on the same handle.
            let mut file = &self.file;
            file.seek(SeekFrom::Start(offset))?;
            file.read_exact(&mut buf)?;
        }

        Ok(buf)
    }
}
