// Error taxonomy for the panel pipeline - each error is scoped to one panel's fetch attempt
use thiserror::Error;

/// Failures at the remote-fetch boundary.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("could not encode request body for {url}: {source}")]
    Encode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures while turning a payload into marks.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderError {
    #[error("unparsable date label '{0}'")]
    UnparsableDate(String),

    #[error("render target '{0}' has no table body")]
    MissingTableBody(String),
}

/// Why one fetch+render attempt left its panel in the failed state.
#[derive(Debug, Error)]
pub enum PanelError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("render failed: {0}")]
    Render(#[from] RenderError),
}
