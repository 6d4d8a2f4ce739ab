/// Turns raw body chunks into complete `\n`-terminated lines.
///
/// Chunk boundaries are unrelated to line boundaries (and to UTF-8 character
/// boundaries), so the decoder carries two pieces of state between calls: the
/// text of the line still being assembled, and the leading bytes of a
/// multi-byte character cut off at the end of the previous chunk.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChunkedLineDecoder {
    pending: String,
    partial_char: Vec<u8>,
}

impl ChunkedLineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes `chunk` and returns every line completed by it, in order.
    ///
    /// The text after the last terminator stays buffered, even when empty.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.decode_into_pending(chunk);

        let Some(last_break) = self.pending.rfind('\n') else {
            return Vec::new();
        };
        let rest = self.pending.split_off(last_break + 1);
        let complete = std::mem::replace(&mut self.pending, rest);
        complete[..last_break]
            .split('\n')
            .map(ToOwned::to_owned)
            .collect()
    }

    /// Flushes the unterminated tail at end of stream and resets the decoder.
    pub fn finalize(&mut self) -> Option<String> {
        if !self.partial_char.is_empty() {
            // The stream ended inside a character.
            self.partial_char.clear();
            self.pending.push(char::REPLACEMENT_CHARACTER);
        }
        let line = std::mem::take(&mut self.pending);
        (!line.is_empty()).then_some(line)
    }

    /// True when nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.partial_char.is_empty()
    }

    fn decode_into_pending(&mut self, chunk: &[u8]) {
        let joined;
        let mut bytes = if self.partial_char.is_empty() {
            chunk
        } else {
            self.partial_char.extend_from_slice(chunk);
            joined = std::mem::take(&mut self.partial_char);
            joined.as_slice()
        };

        loop {
            match std::str::from_utf8(bytes) {
                Ok(text) => {
                    self.pending.push_str(text);
                    return;
                }
                Err(err) => {
                    let (valid, rest) = bytes.split_at(err.valid_up_to());
                    if let Ok(text) = std::str::from_utf8(valid) {
                        self.pending.push_str(text);
                    }
                    match err.error_len() {
                        Some(invalid_len) => {
                            self.pending.push(char::REPLACEMENT_CHARACTER);
                            bytes = &rest[invalid_len..];
                        }
                        None => {
                            // Incomplete sequence at the end; wait for the next chunk.
                            self.partial_char.extend_from_slice(rest);
                            return;
                        }
                    }
                }
            }
        }
    }
}
