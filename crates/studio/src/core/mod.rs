pub mod effects;
pub mod executor;
pub mod reducer;
pub mod state;
pub mod ticker;
