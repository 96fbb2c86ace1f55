pub mod draft_order;
pub mod export;
pub mod persist;
pub mod picks;
pub mod sample;
pub mod schedule;
pub mod schedule_fetch;
pub mod standings;
pub mod state;
pub mod strength;
