//! Library components of the cogres CLI: logging setup and the composites
//! pipeline, exposed for integration tests.

pub mod logging;
pub mod pipeline;
