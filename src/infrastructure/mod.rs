pub mod dto;
pub mod services;

pub use dto::{PoolSnapshotDto, parse_pool_snapshot};
pub use services::{BrowserTimeProvider, ConsoleLogger};
