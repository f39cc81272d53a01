/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Elemental Live adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod http;
pub mod parse;
pub mod types;

// Re-export commonly used types from http
pub use http::{
    ClientConfig,
    Credentials,
    ElementalClient,
    ElementalError,
    RequestSigner,
    Result,
};

// Re-export all types
pub use types::*;
