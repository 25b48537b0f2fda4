// handlers/mod.rs - HTTP handlers split by security tier
//
// Public (no auth) -> Protected (JWT auth, scoped to the user in the path)

pub mod protected;
pub mod public;
