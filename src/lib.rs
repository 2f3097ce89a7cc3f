//! # blobread
//!
//! Random-access byte-range reading over host-provided binary resources,
//! with an open handshake for container-format parsers.
//!
//! A host environment hands over an opaque, possibly very large file-like
//! resource — an in-memory blob, a local file, a remote object behind HTTP
//! Range requests — whose only primitives are "slice a byte range" and
//! "asynchronously materialize that slice into memory". This crate adapts
//! such a resource into a uniform `(offset, length) -> bytes` read contract
//! and drives the two-phase initialization that lets a downstream parser
//! read its header and index structures before the caller gets a handle.
//!
//! ## Components
//!
//! - [`Resource`]: the capability contract a host resource must satisfy
//! - [`RangeReader`]: uniform random-access reads over one resource
//! - [`open`]: validate a resource, build a reader, and await the parser's
//!   own [`ContainerParser::open`] routine
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use blobread::{BytesResource, ContainerParser, RangeReader, Resource};
//!
//! /// A parser for a trivial container: 4-byte magic, then payload.
//! struct DemoParser {
//!     payload_len: u64,
//! }
//!
//! #[async_trait]
//! impl<R: Resource> ContainerParser<R> for DemoParser {
//!     async fn open(reader: RangeReader<R>) -> anyhow::Result<Self> {
//!         let magic = reader.read(0, 4).await?;
//!         anyhow::ensure!(magic == b"DEMO", "not a demo container");
//!         Ok(Self {
//!             payload_len: reader.size() - 4,
//!         })
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> anyhow::Result<()> {
//! let resource = Arc::new(BytesResource::new(b"DEMO....".to_vec()));
//! let parser = blobread::open::<_, DemoParser>(resource).await?;
//! assert_eq!(parser.payload_len, 4);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod io;
pub mod open;

pub use error::{CapabilityError, OpenError, ReadError};
pub use io::{BytesResource, FileResource, HttpResource, RangeReader, Resource};
pub use open::{ContainerParser, ParserHandle, open};
