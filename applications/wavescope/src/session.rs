//! Input selection and stream format resolution

use crate::cli::Cli;
use std::fs::File;
use std::io::{self, BufReader, Read};
use wavescope_audio::parse_header;
use wavescope_core::{Result, ScopeError, StreamDescriptor};

/// Byte source the pipeline reads from
pub type Input = Box<dyn Read>;

/// Open the input named on the command line (`-` is standard input)
pub fn open_input(cli: &Cli) -> Result<Input> {
    if cli.reads_stdin() {
        tracing::debug!("Reading from standard input");
        return Ok(Box::new(io::stdin().lock()));
    }

    let file = File::open(&cli.input).map_err(|e| {
        ScopeError::stream_io(format!(
            "Failed to open input file {}: {}",
            cli.input.display(),
            e
        ))
    })?;
    tracing::debug!("Reading from {}", cli.input.display());
    Ok(Box::new(BufReader::new(file)))
}

/// Stream format from the command line, or else from the WAVE header
///
/// With an explicit format the input is raw PCM and nothing is consumed.
/// Otherwise the header is parsed and `input` is left on the first sample.
pub fn resolve_descriptor<R: Read>(
    explicit: Option<StreamDescriptor>,
    input: &mut R,
) -> Result<StreamDescriptor> {
    if let Some(descriptor) = explicit {
        tracing::info!("Raw input: {}", descriptor);
        return Ok(descriptor);
    }

    let header = parse_header(input)?;
    tracing::info!(
        "WAVE input: {} ({} data bytes, {} chunk(s) skipped)",
        header.descriptor,
        header.data_len,
        header.skipped_chunks
    );
    Ok(header.descriptor)
}
