//! Challenge variants, in play order.

pub mod cd_maze;
pub mod cd_permissions;
pub mod deepest;
pub mod tab_completion;
