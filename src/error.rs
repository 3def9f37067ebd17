//! Fatal error taxonomy for the pipeline.
//!
//! Only failures that make the final report impossible live here: running
//! out of article candidates, losing the selected article, or exhausting the
//! extraction cascade. Per-fetch failures against individual feeds are
//! recovered at the call site (logged and skipped, next fallback tried) and
//! never surface as an error value.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CourtsideError {
    /// No Power Rankings article link was found on any index page.
    #[error("no Power Rankings article links found on any index page")]
    NoCandidates,

    /// The article chosen by the selector could not be downloaded.
    #[error("failed to download the selected article at {url}: {source}")]
    ArticleDownload {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The full strategy cascade resolved fewer ranks than requested.
    #[error("could not extract the top {wanted} teams from {url} ({resolved} of {wanted} ranks resolved)")]
    Extraction {
        url: String,
        wanted: usize,
        resolved: usize,
    },
}
