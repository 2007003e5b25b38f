//! Progress indicators for assistant requests

pub mod reporter;
