//! Infrastructure layer - storage and the external LCA database

pub mod lca;
pub mod storage;
