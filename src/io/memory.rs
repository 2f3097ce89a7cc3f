use async_trait::async_trait;

use super::Resource;
use crate::error::{CapabilityError, ReadError};

/// In-memory resource, the moral equivalent of a host-provided blob.
///
/// Always satisfies the capability contract; slicing is a copy of the
/// requested subrange.
pub struct BytesResource {
    data: Vec<u8>,
}

impl BytesResource {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }
}

impl From<Vec<u8>> for BytesResource {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

#[async_trait]
impl Resource for BytesResource {
    fn validate(&self) -> Result<(), CapabilityError> {
        Ok(())
    }

    fn len(&self) -> u64 {
        self.data.len() as u64
    }

    async fn fetch(&self, offset: u64, length: u64) -> Result<Vec<u8>, ReadError> {
        let start = usize::try_from(offset).map_err(|_| bounds_error(offset, length))?;
        let end = usize::try_from(length)
            .ok()
            .and_then(|len| start.checked_add(len))
            .filter(|&end| end <= self.data.len())
            .ok_or_else(|| bounds_error(offset, length))?;
        Ok(self.data[start..end].to_vec())
    }
}

fn bounds_error(offset: u64, length: u64) -> ReadError {
    ReadError::Io(std::io::Error::new(
        std::io::ErrorKind::InvalidInput,
        format!("range [{offset}, {offset}+{length}) is outside the resource"),
    ))
}
