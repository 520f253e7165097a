// Pipeline stages — clean (CSV -> artifact) and map (artifact -> HTML).

pub mod clean;
pub mod map;
