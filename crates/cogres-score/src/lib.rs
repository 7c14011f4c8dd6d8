//! Questionnaire scorers for cognitive-reserve proxy data.
//!
//! Each scorer takes a cleaned input frame and returns a per-subject score
//! frame. Layout conventions differ per instrument: CRIq and IPAQ use fixed
//! column positions, SNI and CSAQ match columns by name.

mod common;
pub mod criq;
pub mod csaq;
pub mod ipaq;
pub mod sni;

pub use criq::score_criq;
pub use csaq::score_csaq;
pub use ipaq::score_ipaq;
pub use sni::score_sni;
