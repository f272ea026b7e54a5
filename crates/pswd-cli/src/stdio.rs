//! One-shot package decryption between a reader and a writer
//!
//! Default contract: the plaintext (or nothing) is written, a failure is
//! logged as a single `error <description>` event, and the exit status is
//! 0 either way. `strict` keeps the output and log line but reports the
//! failure class through the exit status.

use std::io::{self, Read, Write};

use pswd_crypto::{DecryptError, ErrorClass, Key};

/// Exit status for success, and for every failure when not strict
pub const EXIT_OK: u8 = 0;

/// Strict mode: the package did not authenticate under the key
pub const EXIT_AUTHENTICATION: u8 = 1;

/// Strict mode: the key or package could not be used (sysexits EX_DATAERR)
pub const EXIT_MALFORMED: u8 = 65;

/// Read the whole package from `input`, decrypt it and write the text to
/// `output` in a single write with no trailing newline.
///
/// Only I/O errors on `input`/`output` are returned as `Err`.
pub fn decrypt_stream<R: Read, W: Write>(
    key_hex: &str,
    strict: bool,
    mut input: R,
    mut output: W,
) -> io::Result<u8> {
    let mut data = Vec::new();
    input.read_to_end(&mut data)?;
    tracing::debug!(bytes = data.len(), "package read");

    let key = match Key::from_hex(key_hex) {
        Ok(key) => key,
        Err(e) => return Ok(report(&e, strict)),
    };

    if !strict {
        let text = pswd_crypto::decrypt(key.as_bytes(), &data);
        write_text(&mut output, &text)?;
        return Ok(EXIT_OK);
    }

    match pswd_crypto::open(key.as_bytes(), &data) {
        Ok(plaintext) => {
            write_text(&mut output, &String::from_utf8_lossy(&plaintext))?;
            Ok(EXIT_OK)
        }
        Err(e) => Ok(report(&e, strict)),
    }
}

fn report(e: &DecryptError, strict: bool) -> u8 {
    tracing::error!("error {e}");
    exit_code(e, strict)
}

/// Exit status for a failed decryption.
pub fn exit_code(e: &DecryptError, strict: bool) -> u8 {
    if !strict {
        return EXIT_OK;
    }
    match e.class() {
        ErrorClass::Authentication => EXIT_AUTHENTICATION,
        ErrorClass::Malformed => EXIT_MALFORMED,
    }
}

fn write_text<W: Write>(output: &mut W, text: &str) -> io::Result<()> {
    if !text.is_empty() {
        output.write_all(text.as_bytes())?;
    }
    output.flush()
}
