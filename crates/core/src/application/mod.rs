// Application Layer - Use Cases and Business Logic

pub mod hosts;
pub mod relay; // endpoint side
pub mod selection; // client side
pub mod shutdown;

// Re-exports
pub use hosts::HostCatalog;
pub use relay::RelayService;
pub use selection::{Input, Reply, SelectionProtocol};
pub use shutdown::{shutdown_channel, ShutdownSender, ShutdownToken};
