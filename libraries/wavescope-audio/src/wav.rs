//! WAVE container header parsing
//!
//! Reads the fixed RIFF/WAVE/`fmt ` header, skips any sub-chunks that precede
//! `data`, and leaves the reader on the first sample byte. Skipping reads and
//! discards, so the parser also works on pipes and standard input.
//!
//! All integer fields are little-endian on the wire and are decoded with
//! `from_le_bytes`, independent of host byte order.

use crate::error::{AudioError, Result};
use std::io::{self, Read};
use tracing::debug;
use wavescope_core::{SampleFormat, StreamDescriptor};

/// RIFF form tag
pub const RIFF_TAG: [u8; 4] = *b"RIFF";
/// WAVE form type
pub const WAVE_TAG: [u8; 4] = *b"WAVE";
/// Format sub-chunk tag
pub const FMT_TAG: [u8; 4] = *b"fmt ";
/// Sample data sub-chunk tag
pub const DATA_TAG: [u8; 4] = *b"data";

/// Encoding code for linear PCM
pub const WAVE_FORMAT_PCM: u16 = 1;

/// Bytes of the `fmt ` payload this parser reads
const FMT_FIELDS_LEN: u32 = 16;

/// Result of a successful header parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    /// Stream parameters recovered from the `fmt ` chunk
    pub descriptor: StreamDescriptor,
    /// Declared size of the `data` chunk in bytes
    ///
    /// Informational only; streaming runs until the input ends.
    pub data_len: u32,
    /// Number of sub-chunks skipped between `fmt ` and `data`
    pub skipped_chunks: usize,
}

/// Parse a WAVE header
///
/// On success the reader is positioned exactly at the first byte of sample
/// data. Any tag mismatch, unsupported field or short read is an error and the
/// reader is left wherever the failure occurred.
pub fn parse_header<R: Read>(reader: &mut R) -> Result<WavHeader> {
    let mut header = HeaderReader { inner: reader };

    header.require_tag(RIFF_TAG, "RIFF")?;
    let _file_len = header.read_u32("file size")?;
    header.require_tag(WAVE_TAG, "WAVE")?;
    header.require_tag(FMT_TAG, "fmt ")?;

    let fmt_len = header.read_u32("format chunk size")?;
    if fmt_len < FMT_FIELDS_LEN {
        return Err(AudioError::InvalidHeader(format!(
            "format chunk too small ({fmt_len} bytes)"
        )));
    }

    let encoding = header.read_u16("audio format")?;
    if encoding != WAVE_FORMAT_PCM {
        return Err(AudioError::UnsupportedEncoding(encoding));
    }

    let channels = header.read_u16("channel count")?;
    let sample_rate = header.read_u32("sample rate")?;
    let _byte_rate = header.read_u32("byte rate")?;
    let _block_align = header.read_u16("block alignment")?;

    let bits_per_sample = header.read_u16("bits per sample")?;
    let format = match bits_per_sample {
        16 => SampleFormat::S16Le,
        other => return Err(AudioError::UnsupportedBitDepth(other)),
    };

    let descriptor = StreamDescriptor::new(sample_rate, channels, format)
        .map_err(|e| AudioError::InvalidHeader(e.to_string()))?;

    // WAVEFORMATEX and friends append fields after bits-per-sample
    if fmt_len > FMT_FIELDS_LEN {
        header.skip(fmt_len - FMT_FIELDS_LEN, "format chunk extension")?;
    }

    let mut skipped_chunks = 0;
    loop {
        let id = header.read_tag("chunk id")?;
        let len = header.read_u32("chunk size")?;

        if id == DATA_TAG {
            debug!(
                descriptor = %descriptor,
                data_len = len,
                skipped_chunks,
                "Found WAVE data chunk"
            );
            return Ok(WavHeader {
                descriptor,
                data_len: len,
                skipped_chunks,
            });
        }

        debug!(
            tag = %String::from_utf8_lossy(&id),
            len,
            "Skipping WAVE chunk"
        );
        header.skip(len, "chunk payload")?;
        skipped_chunks += 1;
    }
}

/// Little-endian field reader over the header bytes
struct HeaderReader<'a, R> {
    inner: &'a mut R,
}

impl<R: Read> HeaderReader<'_, R> {
    fn read_array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.inner.read_exact(&mut buf).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => AudioError::Truncated(field),
            _ => AudioError::HeaderIo(e),
        })?;
        Ok(buf)
    }

    fn read_tag(&mut self, field: &'static str) -> Result<[u8; 4]> {
        self.read_array::<4>(field)
    }

    fn require_tag(&mut self, expected: [u8; 4], name: &'static str) -> Result<()> {
        let found = self.read_tag(name)?;
        if found != expected {
            return Err(AudioError::TagMismatch {
                expected: name,
                found: String::from_utf8_lossy(&found).into_owned(),
            });
        }
        Ok(())
    }

    fn read_u16(&mut self, field: &'static str) -> Result<u16> {
        self.read_array::<2>(field).map(u16::from_le_bytes)
    }

    fn read_u32(&mut self, field: &'static str) -> Result<u32> {
        self.read_array::<4>(field).map(u32::from_le_bytes)
    }

    fn skip(&mut self, len: u32, field: &'static str) -> Result<()> {
        let wanted = u64::from(len);
        let skipped = io::copy(&mut self.inner.by_ref().take(wanted), &mut io::sink())
            .map_err(AudioError::HeaderIo)?;
        if skipped < wanted {
            return Err(AudioError::Truncated(field));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Build a header with a 16-byte `fmt ` chunk, optional extra chunks and
    /// an empty `data` chunk followed by `payload`
    fn header_bytes(
        encoding: u16,
        channels: u16,
        sample_rate: u32,
        bits: u16,
        extra: &[(&[u8; 4], &[u8])],
        payload: &[u8],
    ) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(b"WAVE");
        bytes.extend_from_slice(b"fmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&encoding.to_le_bytes());
        bytes.extend_from_slice(&channels.to_le_bytes());
        bytes.extend_from_slice(&sample_rate.to_le_bytes());
        bytes.extend_from_slice(&(sample_rate * u32::from(channels) * 2).to_le_bytes());
        bytes.extend_from_slice(&(channels * 2).to_le_bytes());
        bytes.extend_from_slice(&bits.to_le_bytes());
        for (tag, body) in extra {
            bytes.extend_from_slice(*tag);
            bytes.extend_from_slice(&(body.len() as u32).to_le_bytes());
            bytes.extend_from_slice(body);
        }
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        bytes.extend_from_slice(payload);
        bytes
    }

    #[test]
    fn parses_minimal_header() {
        let bytes = header_bytes(1, 2, 44_100, 16, &[], &[]);
        let header = parse_header(&mut Cursor::new(bytes)).unwrap();

        assert_eq!(header.descriptor.sample_rate(), 44_100);
        assert_eq!(header.descriptor.channels(), 2);
        assert_eq!(header.descriptor.format(), SampleFormat::S16Le);
        assert_eq!(header.data_len, 0);
        assert_eq!(header.skipped_chunks, 0);
    }

    #[test]
    fn leaves_cursor_on_first_sample() {
        let bytes = header_bytes(1, 1, 8_000, 16, &[(b"LIST", b"INFOabcd")], &[0x34, 0x12]);
        let mut cursor = Cursor::new(bytes);
        let header = parse_header(&mut cursor).unwrap();

        assert_eq!(header.skipped_chunks, 1);
        assert_eq!(header.data_len, 2);

        let mut rest = Vec::new();
        cursor.read_to_end(&mut rest).unwrap();
        assert_eq!(rest, vec![0x34, 0x12]);
    }

    #[test]
    fn skips_several_chunks() {
        let bytes = header_bytes(
            1,
            2,
            48_000,
            16,
            &[(b"fact", &[0; 4]), (b"LIST", &[7; 26]), (b"junk", &[])],
            &[],
        );
        let header = parse_header(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(header.skipped_chunks, 3);
        assert_eq!(header.descriptor.sample_rate(), 48_000);
    }

    #[test]
    fn rejects_non_pcm_encoding() {
        // 3 = IEEE float
        let bytes = header_bytes(3, 2, 44_100, 32, &[], &[]);
        let err = parse_header(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, AudioError::UnsupportedEncoding(3)));
    }

    #[test]
    fn rejects_unsupported_bit_depth() {
        let bytes = header_bytes(1, 2, 44_100, 24, &[], &[]);
        let err = parse_header(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, AudioError::UnsupportedBitDepth(24)));
    }

    #[test]
    fn rejects_wrong_form_tag() {
        let mut bytes = header_bytes(1, 2, 44_100, 16, &[], &[]);
        bytes[..4].copy_from_slice(b"RIFX");
        let err = parse_header(&mut Cursor::new(bytes)).unwrap_err();
        match err {
            AudioError::TagMismatch { expected, found } => {
                assert_eq!(expected, "RIFF");
                assert_eq!(found, "RIFX");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_wrong_form_type() {
        let mut bytes = header_bytes(1, 2, 44_100, 16, &[], &[]);
        bytes[8..12].copy_from_slice(b"AVI ");
        let err = parse_header(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, AudioError::TagMismatch { expected: "WAVE", .. }));
    }

    #[test]
    fn rejects_zero_channels() {
        let bytes = header_bytes(1, 0, 44_100, 16, &[], &[]);
        let err = parse_header(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, AudioError::InvalidHeader(_)));
    }

    #[test]
    fn truncated_header_is_an_error() {
        let bytes = header_bytes(1, 2, 44_100, 16, &[], &[]);
        for len in [0, 3, 11, 20, 30, 39] {
            let err = parse_header(&mut Cursor::new(&bytes[..len])).unwrap_err();
            assert!(
                matches!(err, AudioError::Truncated(_)),
                "prefix of {len} bytes gave {err}"
            );
        }
    }

    #[test]
    fn chunk_running_past_end_is_an_error() {
        let mut bytes = header_bytes(1, 2, 44_100, 16, &[], &[]);
        // Replace the data chunk with a LIST chunk that claims 100 bytes
        let data_at = bytes.len() - 8;
        bytes.truncate(data_at);
        bytes.extend_from_slice(b"LIST");
        bytes.extend_from_slice(&100u32.to_le_bytes());
        bytes.extend_from_slice(&[0; 10]);

        let err = parse_header(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, AudioError::Truncated("chunk payload")));
    }

    #[test]
    fn skips_format_extension() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(b"WAVE");
        bytes.extend_from_slice(b"fmt ");
        bytes.extend_from_slice(&18u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.extend_from_slice(&22_050u32.to_le_bytes());
        bytes.extend_from_slice(&44_100u32.to_le_bytes());
        bytes.extend_from_slice(&2u16.to_le_bytes());
        bytes.extend_from_slice(&16u16.to_le_bytes());
        bytes.extend_from_slice(&0u16.to_le_bytes()); // cbSize
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&0u32.to_le_bytes());

        let header = parse_header(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(header.descriptor.sample_rate(), 22_050);
        assert_eq!(header.descriptor.channels(), 1);
    }

    #[test]
    fn rejects_short_format_chunk() {
        let mut bytes = header_bytes(1, 2, 44_100, 16, &[], &[]);
        bytes[16..20].copy_from_slice(&14u32.to_le_bytes());
        let err = parse_header(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, AudioError::InvalidHeader(_)));
    }
}
