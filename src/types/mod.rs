// src/types/mod.rs
pub mod response;
pub mod search;

pub use response::{GenerateContentRequest, GenerateContentResponse, GroundingChunk};
pub use search::*;
