//! ecoinvent-over-WISER implementation of the LCA provider port

mod client;
mod dto;

pub use client::WiserClient;
