use thiserror::Error;

/// Failures of the transcript export path. Everything else in the browsing
/// core degrades to an empty result instead of erroring: a query before
/// populate completes yields nothing, an out-of-range row resolves to no
/// contact, and the post-populate save is logged only.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The assembled transcript cannot be encoded for a text destination.
    #[error("transcript text cannot be encoded for output")]
    Encoding,
    #[error("failed to write transcript")]
    Io(#[from] std::io::Error),
}
