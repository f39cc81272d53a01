/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST/XML API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod devices;
pub mod error;
pub mod events;
pub mod preview;
pub mod signature;

pub use error::{ElementalError, Result};
pub use signature::{Credentials, RequestSigner};

pub use client::{ClientConfig, ElementalClient};
