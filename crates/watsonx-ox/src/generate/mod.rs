//! Request and response types for the text generation endpoint.

pub mod request;
pub mod response;

pub use request::{DecodingMethod, TextGenParameters, TextGenerationRequest};
pub use response::{GeneratedText, StopReason, TextGenerationResponse};
