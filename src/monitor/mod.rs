mod aggregator;
mod collector;
mod gateway;

#[cfg(test)]
pub mod testing;

pub use aggregator::capture;
pub use collector::SystemCollector;
pub use gateway::{GatewayError, GpuGateway, NvmlGateway};
