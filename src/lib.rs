//! Stub `doga` model provider: a host plugin whose LLM adapter answers with
//! canned text.

pub mod config;
pub mod paths;
pub mod provider;
