use immune_expressions::Expression;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use super::{ExchangeError, Framing};

/// Sent by a fetching node before it half-closes; the content is ignored.
pub const REQUEST_TOKEN: &[u8] = b"BATCH\n";

/// JSON array of expressions. Expressions holding non-finite numbers have no
/// JSON form and are left out.
pub fn encode_batch(batch: &[Expression]) -> Result<Vec<u8>, ExchangeError> {
    let finite: Vec<&Expression> = batch.iter().filter(|e| e.root.all_numbers_finite()).collect();
    if finite.len() < batch.len() {
        debug!(
            skipped = batch.len() - finite.len(),
            kept = finite.len(),
            "leaving out expressions with non-finite numbers"
        );
    }
    Ok(serde_json::to_vec(&finite)?)
}

/// An empty payload decodes to an empty batch.
pub fn decode_batch(payload: &[u8]) -> Result<Vec<Expression>, ExchangeError> {
    if payload.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_slice(payload)?)
}

pub async fn write_message<W>(writer: &mut W, payload: &[u8], framing: Framing) -> Result<(), ExchangeError>
where
    W: AsyncWrite + Unpin,
{
    if framing == Framing::LengthPrefixed {
        let len = u32::try_from(payload.len()).map_err(|_| ExchangeError::FrameTooLarge {
            len: payload.len(),
            max: u32::MAX as usize,
        })?;
        writer.write_u32(len).await?;
    }
    writer.write_all(payload).await?;
    writer.flush().await?;
    Ok(())
}

pub async fn read_message<R>(reader: &mut R, framing: Framing, max_len: usize) -> Result<Vec<u8>, ExchangeError>
where
    R: AsyncRead + Unpin,
{
    match framing {
        Framing::CloseDelimited => {
            let mut buf = Vec::new();
            let limit = u64::try_from(max_len).unwrap_or(u64::MAX).saturating_add(1);
            reader.take(limit).read_to_end(&mut buf).await?;
            if buf.len() > max_len {
                return Err(ExchangeError::FrameTooLarge { len: buf.len(), max: max_len });
            }
            Ok(buf)
        }
        Framing::LengthPrefixed => {
            let len = reader.read_u32().await? as usize;
            if len > max_len {
                return Err(ExchangeError::FrameTooLarge { len, max: max_len });
            }
            let mut buf = vec![0u8; len];
            reader.read_exact(&mut buf).await?;
            Ok(buf)
        }
    }
}
