//! Text encoding candidates and strict/lossy decoding with `encoding_rs`.

use encoding_rs::{DecoderResult, Encoding};

/// A candidate encoding together with the bytes it should decode
/// (a detected byte-order mark is already stripped).
pub(super) struct Candidate<'a> {
    pub encoding: &'static Encoding,
    pub body: &'a [u8],
}

/// Strictly decoded prefix of a byte buffer.
pub(super) struct StrictPrefix {
    /// Text decoded before the first malformed sequence
    pub text: String,
    /// Offset of the first malformed byte, `None` if the whole input decoded
    pub malformed_at: Option<usize>,
}

impl StrictPrefix {
    /// Text safe to scan for whole lines.
    ///
    /// When decoding stopped early the trailing partial line is dropped, so a
    /// line is never matched against a truncated version of itself.
    pub fn complete_lines(&self) -> &str {
        match self.malformed_at {
            None => &self.text,
            Some(_) => match self.text.rfind('\n') {
                Some(pos) => &self.text[..=pos],
                None => "",
            },
        }
    }
}

/// Build the ordered list of encodings to try.
///
/// A byte-order mark overrides the configured list entirely. Labels that
/// `encoding_rs` does not know are reported through `on_unknown` and skipped;
/// labels resolving to an encoding already listed are dropped.
pub(super) fn candidates<'a>(
    bytes: &'a [u8],
    labels: &[String],
    mut on_unknown: impl FnMut(&str),
) -> Vec<Candidate<'a>> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        return vec![Candidate {
            encoding,
            body: &bytes[bom_len..],
        }];
    }

    let mut out: Vec<Candidate<'a>> = Vec::with_capacity(labels.len());
    for label in labels {
        match Encoding::for_label(label.trim().as_bytes()) {
            Some(encoding) => {
                if !out.iter().any(|c| c.encoding == encoding) {
                    out.push(Candidate {
                        encoding,
                        body: bytes,
                    });
                }
            }
            None => on_unknown(label),
        }
    }
    out
}

/// Decode without replacement, stopping at the first malformed sequence.
pub(super) fn decode_strict(encoding: &'static Encoding, body: &[u8]) -> StrictPrefix {
    let mut decoder = encoding.new_decoder_without_bom_handling();
    let capacity = decoder
        .max_utf8_buffer_length_without_replacement(body.len())
        .unwrap_or(body.len().saturating_mul(3));
    let mut text = String::with_capacity(capacity);
    let mut consumed = 0;

    loop {
        let (result, read) =
            decoder.decode_to_string_without_replacement(&body[consumed..], &mut text, true);
        consumed += read;
        match result {
            DecoderResult::InputEmpty => {
                return StrictPrefix {
                    text,
                    malformed_at: None,
                };
            }
            DecoderResult::Malformed(bad, after) => {
                let start = consumed.saturating_sub(usize::from(bad) + usize::from(after));
                return StrictPrefix {
                    text,
                    malformed_at: Some(start),
                };
            }
            DecoderResult::OutputFull => {
                let more = decoder
                    .max_utf8_buffer_length_without_replacement(body.len() - consumed)
                    .unwrap_or(4096);
                text.reserve(more.max(4));
            }
        }
    }
}

/// Decode the whole body, replacing malformed sequences with U+FFFD.
pub(super) fn decode_lossy(encoding: &'static Encoding, body: &[u8]) -> String {
    let (text, had_errors) = encoding.decode_without_bom_handling(body);
    if had_errors {
        log::debug!(
            "{}: malformed sequences past the header replaced with U+FFFD",
            encoding.name()
        );
    }
    text.into_owned()
}
