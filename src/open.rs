//! The open handshake: validate a host resource, wire it into a fresh
//! [`RangeReader`], and await the parser's own opening protocol.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::OpenError;
use crate::io::{RangeReader, Resource};

/// A container-format parser that opens itself over a [`RangeReader`].
///
/// The reader is the parser's sole means of reading bytes. The open routine
/// may issue any number of reads, in any order, including concurrently,
/// before it resolves; typically it locates and validates the container's
/// header and index structures. Reads complete in no particular order, so
/// dependent reads must be awaited in sequence.
#[async_trait]
pub trait ContainerParser<R: Resource>: Sized + Send {
    /// Open the container, consuming the reader.
    async fn open(reader: RangeReader<R>) -> anyhow::Result<Self>;
}

/// A ready-to-use parser, produced only after a fully successful open.
///
/// Owns the parser and, transitively, its reader; the reader must not be
/// shared with a second parser instance. Derefs to the parser for
/// format-specific operations.
pub struct ParserHandle<P> {
    parser: P,
}

impl<P> ParserHandle<P> {
    /// Consume the handle, returning the parser itself.
    pub fn into_inner(self) -> P {
        self.parser
    }
}

impl<P> Deref for ParserHandle<P> {
    type Target = P;

    fn deref(&self) -> &P {
        &self.parser
    }
}

impl<P> DerefMut for ParserHandle<P> {
    fn deref_mut(&mut self) -> &mut P {
        &mut self.parser
    }
}

/// Open a container parser over a host-supplied resource.
///
/// Strictly sequential: the resource's capability contract is checked first
/// (an [`OpenError::CapabilityMismatch`] resolves before any read is
/// issued), then a [`RangeReader`] is built over the resource and handed to
/// the parser's [`open`](ContainerParser::open) routine. Parser failure is
/// forwarded verbatim as [`OpenError::Parser`]; either way a failed open
/// never yields a handle.
pub async fn open<R, P>(resource: Arc<R>) -> Result<ParserHandle<P>, OpenError>
where
    R: Resource,
    P: ContainerParser<R>,
{
    resource.validate()?;
    let reader = RangeReader::new(resource);
    let parser = P::open(reader).await.map_err(OpenError::Parser)?;
    Ok(ParserHandle { parser })
}
