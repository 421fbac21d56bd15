//! Latency aggregation for completed requests.
mod aggregate;
mod collector;


pub use aggregate::AggregateStats;
pub use collector::{LatencySender, latency_channel_capacity, setup_latency_collector};
