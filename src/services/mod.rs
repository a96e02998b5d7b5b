// Service exports
pub mod driver;
pub mod latency;
pub mod local;
pub mod remote;
pub mod store;

pub use driver::{AiDriver, EngineError};
pub use latency::LatencySimulator;
pub use local::LocalDriver;
pub use remote::RemoteDriver;
pub use store::{InMemoryStore, StoreError};
