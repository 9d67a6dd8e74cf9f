use crate::error::{Error, Result};
use futures_util::{Stream, StreamExt};
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Largest slice written to disk at a time; progress is reported once per slice.
pub const CHUNK_SIZE: usize = 8 * 1024;

/// Copies `stream` into a freshly created (or truncated) file at `destination`.
///
/// `on_chunk` receives the running byte total after every chunk. When the stream
/// fails part way, whatever was already written stays on disk.
pub async fn copy_stream<S, B, E>(
    stream: S,
    destination: &Path,
    mut on_chunk: impl FnMut(u64),
) -> Result<u64>
where
    S: Stream<Item = std::result::Result<B, E>>,
    B: AsRef<[u8]>,
    Error: From<E>,
{
    let mut stream = std::pin::pin!(stream);
    let mut file = tokio::fs::File::create(destination).await?;
    let mut written = 0u64;

    while let Some(received) = stream.next().await {
        let received = match received {
            Ok(received) => received,
            Err(e) => {
                file.flush().await?;
                return Err(e.into());
            }
        };
        for chunk in received.as_ref().chunks(CHUNK_SIZE) {
            file.write_all(chunk).await?;
            written += chunk.len() as u64;
            on_chunk(written);
        }
    }

    file.flush().await?;
    Ok(written)
}
