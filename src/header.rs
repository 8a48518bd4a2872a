//! Leading header record of a compressed file.
//!
//! One text line precedes the token stream:
//! `<offset_bits> <len_bits> <timestamp_seconds> <file_name> \n`, fields
//! separated by single spaces. It carries everything the decoder needs to
//! rebuild the writer's context, so no out-of-band configuration exists.
//! The header is trusted verbatim; there is no magic number or checksum.

use std::io::{Read, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::context::PzypContext;
use crate::error::{Error, Result};

/// Longest header line accepted before the reader gives up.
const MAX_HEADER_LEN: usize = 1024;

/// Parameters recorded at the start of a compressed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Bit width of the distance field used when the file was written.
    pub offset_bits: u8,
    /// Bit width of the length field used when the file was written.
    pub len_bits: u8,
    /// Creation time, integral seconds since the Unix epoch.
    pub timestamp: u64,
    /// Name of the original input file.
    pub file_name: String,
}

impl Header {
    /// Build a header for `file_name` from a context, stamped with the
    /// current time.
    pub fn new(ctx: &PzypContext, file_name: &str) -> Result<Self> {
        if file_name.is_empty() || file_name.contains(char::is_whitespace) {
            return Err(Error::InvalidHeader(format!(
                "file name {:?} must be non-empty and contain no whitespace",
                file_name
            )));
        }
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Ok(Self {
            offset_bits: ctx.encoded_offset_size(),
            len_bits: ctx.encoded_len_size(),
            timestamp,
            file_name: file_name.to_owned(),
        })
    }

    /// Rebuild the context the writer used.
    pub fn context(&self) -> Result<PzypContext> {
        PzypContext::new(self.offset_bits, self.len_bits)
    }

    /// Write the header line to `out`.
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        let line = format!(
            "{} {} {} {} \n",
            self.offset_bits, self.len_bits, self.timestamp, self.file_name
        );
        out.write_all(line.as_bytes())?;
        Ok(())
    }

    /// Read one header line from `input`, consuming exactly up to and
    /// including the terminating newline.
    pub fn read_from<R: Read>(input: &mut R) -> Result<Self> {
        let mut line = Vec::new();
        let mut byte = [0u8; 1];
        loop {
            if input.read(&mut byte)? == 0 {
                return Err(Error::InvalidHeader(
                    "end of input before header newline".into(),
                ));
            }
            if byte[0] == b'\n' {
                break;
            }
            line.push(byte[0]);
            if line.len() > MAX_HEADER_LEN {
                return Err(Error::InvalidHeader("header line too long".into()));
            }
        }

        let line = String::from_utf8(line)
            .map_err(|_| Error::InvalidHeader("header is not valid UTF-8".into()))?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 4 {
            return Err(Error::InvalidHeader(format!(
                "expected 4 fields, found {}",
                fields.len()
            )));
        }

        let offset_bits = fields[0]
            .parse()
            .map_err(|_| Error::InvalidHeader(format!("bad offset width {:?}", fields[0])))?;
        let len_bits = fields[1]
            .parse()
            .map_err(|_| Error::InvalidHeader(format!("bad length width {:?}", fields[1])))?;
        let timestamp = fields[2]
            .parse()
            .map_err(|_| Error::InvalidHeader(format!("bad timestamp {:?}", fields[2])))?;

        Ok(Self {
            offset_bits,
            len_bits,
            timestamp,
            file_name: fields[3].to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_roundtrip() {
        let header = Header {
            offset_bits: 12,
            len_bits: 4,
            timestamp: 1_700_000_000,
            file_name: "a.txt".into(),
        };
        let mut buf = Vec::new();
        header.write_to(&mut buf).unwrap();
        assert_eq!(buf, b"12 4 1700000000 a.txt \n");

        let parsed = Header::read_from(&mut buf.as_slice()).unwrap();
        assert_eq!(parsed, header);
    }

    #[test]
    fn test_header_reads_exactly_one_line() {
        let mut input: &[u8] = b"10 4 123 data.bin \n\xDE\xAD";
        let header = Header::read_from(&mut input).unwrap();
        assert_eq!(header.offset_bits, 10);
        assert_eq!(header.file_name, "data.bin");
        // The token stream after the newline is untouched.
        assert_eq!(input, &[0xDE, 0xAD]);
    }

    #[test]
    fn test_header_context() {
        let header = Header {
            offset_bits: 14,
            len_bits: 5,
            timestamp: 0,
            file_name: "x".into(),
        };
        let ctx = header.context().unwrap();
        assert_eq!(ctx.window_size(), 16384);
        assert_eq!(ctx.max_string_size(), 34);
    }

    #[test]
    fn test_header_bad_field_count() {
        let mut input: &[u8] = b"12 4 123\n";
        assert!(matches!(
            Header::read_from(&mut input),
            Err(Error::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_header_bad_numbers() {
        let mut input: &[u8] = b"twelve 4 123 a.txt \n";
        assert!(matches!(
            Header::read_from(&mut input),
            Err(Error::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_header_missing_newline() {
        let mut input: &[u8] = b"12 4 123 a.txt ";
        assert!(matches!(
            Header::read_from(&mut input),
            Err(Error::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_header_rejects_whitespace_file_name() {
        let ctx = PzypContext::default();
        assert!(Header::new(&ctx, "my file.txt").is_err());
        assert!(Header::new(&ctx, "").is_err());
        assert!(Header::new(&ctx, "my_file.txt").is_ok());
    }
}
