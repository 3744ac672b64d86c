pub mod assessment;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod error;
pub mod filter;
pub mod io;
pub mod kanban;
pub mod paths;
pub mod recent;
pub mod report;
pub mod roadmap;
pub mod routes;
pub mod storage;
pub mod types;

pub use error::{ReadinessError, Result};
