//! System clipboard for the terminal host.
//!
//! Writes go to the OS clipboard through `arboard`. When no clipboard is reachable (headless
//! session, SSH) the text is sent to the terminal as an OSC 52 sequence instead.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64_STD;
use ide_core::{Clipboard, ClipboardError};
use std::io::{self, Write};

const MAX_OSC52_BYTES: usize = 100 * 1024;

#[derive(Default)]
pub(crate) struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    fn system(&mut self) -> Option<&mut arboard::Clipboard> {
        if self.inner.is_none() {
            match arboard::Clipboard::new() {
                Ok(clipboard) => self.inner = Some(clipboard),
                Err(err) => tracing::debug!(%err, "system clipboard unavailable"),
            }
        }
        self.inner.as_mut()
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if let Some(clipboard) = self.system() {
            match clipboard.set_text(text.to_string()) {
                Ok(()) => return Ok(()),
                Err(err) => tracing::warn!(%err, "system clipboard write failed, trying OSC 52"),
            }
        }
        osc52_copy(text).map_err(|err| ClipboardError(err.to_string()))
    }
}

fn osc52_copy(text: &str) -> io::Result<()> {
    let mut payload = text.as_bytes();
    let truncated = payload.len() > MAX_OSC52_BYTES;
    if truncated {
        payload = &payload[..MAX_OSC52_BYTES];
    }
    let mut buf = Vec::with_capacity(payload.len() + 16);
    buf.extend_from_slice(payload);
    if truncated {
        buf.extend_from_slice(b"...(truncated)");
    }

    let seq = format!("\x1b]52;c;{}\x07", BASE64_STD.encode(&buf));
    let mut out = io::stdout();
    out.write_all(seq.as_bytes())?;
    out.flush()
}
