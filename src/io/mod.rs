//! Random-access byte-range reading over host-supplied resources.
//!
//! The host may hand us anything that satisfies the [`Resource`] contract:
//! an in-memory blob, a local file, a remote object behind HTTP Range
//! requests. [`RangeReader`] wraps exactly one resource and presents the
//! uniform `(offset, length) -> bytes` contract that container-format
//! parsers read through.

mod file;
mod http;
mod memory;

pub use file::FileResource;
pub use http::HttpResource;
pub use memory::BytesResource;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{CapabilityError, ReadError};

/// Capability contract for a host-supplied resource.
///
/// A resource is an immutable, byte-addressable container of known total
/// length. The host retains ownership; readers hold only a shared reference
/// for the duration of their reads. Implementations must tolerate any number
/// of outstanding `fetch` calls over the same resource.
#[async_trait]
pub trait Resource: Send + Sync + 'static {
    /// Confirm the resource can actually serve range reads.
    ///
    /// Called once by [`open`](crate::open()) before any read is issued.
    fn validate(&self) -> Result<(), CapabilityError>;

    /// Total byte length of the resource.
    fn len(&self) -> u64;

    /// Materialize `[offset, offset + length)` into an owned buffer.
    ///
    /// When called through [`RangeReader`] the range never extends past
    /// [`len`](Resource::len); implementations may rely on that. Resolves
    /// exactly once, with either the full buffer or a [`ReadError`],
    /// never both.
    async fn fetch(&self, offset: u64, length: u64) -> Result<Vec<u8>, ReadError>;
}

/// Uniform random-access byte-range reading over one [`Resource`].
///
/// The resource's total length is cached at construction and never changes
/// for the reader's lifetime. Beyond that the reader holds no state at all,
/// so any number of reads may be outstanding concurrently with no locking;
/// their completions may arrive in any order relative to issue order.
pub struct RangeReader<R: Resource> {
    resource: Arc<R>,
    size: u64,
}

impl<R: Resource> RangeReader<R> {
    /// Wrap a resource, caching its total length.
    pub fn new(resource: Arc<R>) -> Self {
        let size = resource.len();
        Self { resource, size }
    }

    /// Total byte length of the underlying resource.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Read `length` bytes starting at `offset`.
    ///
    /// A range running past the end of the resource is clamped to the
    /// available bytes, so the returned buffer may be shorter than
    /// requested; callers that require full-length buffers should check
    /// [`size`](RangeReader::size) first. A zero-length request resolves
    /// to an empty buffer without touching the resource.
    pub async fn read(&self, offset: u64, length: u64) -> Result<Vec<u8>, ReadError> {
        if length == 0 || offset >= self.size {
            return Ok(Vec::new());
        }

        let length = length.min(self.size - offset);
        let buf = self.resource.fetch(offset, length).await?;
        if buf.len() as u64 != length {
            return Err(ReadError::Aborted(format!(
                "resource returned {} bytes for a {length} byte range",
                buf.len()
            )));
        }
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::{BytesResource, RangeReader, Resource};
    use crate::error::{CapabilityError, ReadError};

    fn reader_over(content: Vec<u8>) -> RangeReader<BytesResource> {
        RangeReader::new(Arc::new(BytesResource::new(content)))
    }

    #[tokio::test]
    async fn reads_exact_slices() {
        let content: Vec<u8> = (0..1024u32).map(|i| (i % 251) as u8).collect();
        let reader = reader_over(content.clone());

        assert_eq!(reader.size(), 1024);

        let head = reader.read(0, 10).await.unwrap();
        assert_eq!(head, &content[0..10]);

        let tail = reader.read(1014, 10).await.unwrap();
        assert_eq!(tail, &content[1014..1024]);

        let middle = reader.read(300, 100).await.unwrap();
        assert_eq!(middle, &content[300..400]);
    }

    #[tokio::test]
    async fn zero_length_read_is_empty_not_a_failure() {
        let reader = reader_over(b"abcdef".to_vec());
        assert_eq!(reader.read(0, 0).await.unwrap(), Vec::<u8>::new());
        assert_eq!(reader.read(6, 0).await.unwrap(), Vec::<u8>::new());
    }

    #[tokio::test]
    async fn past_eof_reads_clamp_to_available_bytes() {
        let reader = reader_over(b"0123456789".to_vec());

        let short = reader.read(7, 100).await.unwrap();
        assert_eq!(short, b"789");

        let none = reader.read(10, 5).await.unwrap();
        assert!(none.is_empty());

        let none = reader.read(500, 5).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn empty_resource() {
        let reader = reader_over(Vec::new());
        assert_eq!(reader.size(), 0);
        assert_eq!(reader.read(0, 0).await.unwrap(), Vec::<u8>::new());
        assert_eq!(reader.read(0, 10).await.unwrap(), Vec::<u8>::new());
    }

    #[tokio::test]
    async fn concurrent_overlapping_reads_do_not_cross_contaminate() {
        let content: Vec<u8> = (0..512u32).map(|i| (i * 7 % 256) as u8).collect();
        let reader = reader_over(content.clone());

        let (a, b, c) = tokio::join!(
            reader.read(0, 256),
            reader.read(128, 256),
            reader.read(200, 312),
        );

        assert_eq!(a.unwrap(), &content[0..256]);
        assert_eq!(b.unwrap(), &content[128..384]);
        assert_eq!(c.unwrap(), &content[200..512]);
    }

    struct RevokedResource {
        size: u64,
    }

    #[async_trait]
    impl Resource for RevokedResource {
        fn validate(&self) -> Result<(), CapabilityError> {
            Ok(())
        }

        fn len(&self) -> u64 {
            self.size
        }

        async fn fetch(&self, _offset: u64, _length: u64) -> Result<Vec<u8>, ReadError> {
            Err(ReadError::Revoked)
        }
    }

    struct ShortResource {
        size: u64,
    }

    #[async_trait]
    impl Resource for ShortResource {
        fn validate(&self) -> Result<(), CapabilityError> {
            Ok(())
        }

        fn len(&self) -> u64 {
            self.size
        }

        async fn fetch(&self, _offset: u64, length: u64) -> Result<Vec<u8>, ReadError> {
            Ok(vec![0u8; (length / 2) as usize])
        }
    }

    #[tokio::test]
    async fn wrong_length_resource_buffers_are_rejected() {
        let reader = RangeReader::new(Arc::new(ShortResource { size: 32 }));
        assert!(matches!(reader.read(0, 8).await, Err(ReadError::Aborted(_))));
    }

    #[tokio::test]
    async fn fetch_failures_surface_without_a_buffer() {
        let reader = RangeReader::new(Arc::new(RevokedResource { size: 16 }));
        assert!(matches!(reader.read(0, 8).await, Err(ReadError::Revoked)));

        // A zero-length read never reaches the resource at all.
        assert_eq!(reader.read(4, 0).await.unwrap(), Vec::<u8>::new());
    }

    #[tokio::test]
    async fn size_is_constant_across_reads() {
        let reader = reader_over(vec![0u8; 64]);
        let before = reader.size();
        reader.read(0, 64).await.unwrap();
        reader.read(32, 64).await.unwrap();
        assert_eq!(reader.size(), before);
    }
}
