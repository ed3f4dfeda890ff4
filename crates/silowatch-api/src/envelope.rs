// Response envelope normalization.
//
// The two backends disagree about response shape: the database mirror
// mostly returns payloads directly, while some routes (and the PLC
// gateway under certain proxies) wrap them as `{ success, data }`.
// Every response body passes through `decode` so callers never see the
// wrapper. A `success` flag that is not `true` is always a failure.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::Error;

/// The `{ success, data }` wrapper used by some routes.
///
/// `success` is a required field, so direct payloads (which never carry
/// one) fail this parse and fall through to the plain decode.
#[derive(Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
struct Wrapped<T> {
    success: bool,
    #[serde(default)]
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
}

/// Acknowledgement-only envelope for write endpoints (`{ success }`).
#[derive(Deserialize)]
struct Ack {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

/// Decode a response body that may be a direct payload or a
/// `{ success, data }` wrapper, returning the inner payload either way.
pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    if let Ok(wrapped) = serde_json::from_str::<Wrapped<T>>(body) {
        if !wrapped.success {
            return Err(Error::Backend {
                message: wrapped
                    .message
                    .unwrap_or_else(|| "success flag was false".into()),
            });
        }
        return wrapped.data.ok_or_else(|| Error::Deserialization {
            message: "envelope reported success but carried no data".into(),
            body: body.to_owned(),
        });
    }

    serde_json::from_str(body).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", preview(body)),
        body: body.to_owned(),
    })
}

/// Clip a body to at most 200 bytes for error previews, backing off to
/// a char boundary so multibyte text cannot split the slice.
pub(crate) fn preview(body: &str) -> &str {
    const LIMIT: usize = 200;
    let mut end = body.len().min(LIMIT);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

/// Decode an acknowledgement-only response (`{ success }`).
pub(crate) fn decode_ack(body: &str) -> Result<(), Error> {
    let ack: Ack = serde_json::from_str(body).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", preview(body)),
        body: body.to_owned(),
    })?;

    if ack.success {
        Ok(())
    } else {
        Err(Error::Backend {
            message: ack.message.unwrap_or_else(|| "success flag was false".into()),
        })
    }
}
