pub mod assessment;
pub mod catalog;
pub mod events;
pub mod pages;
pub mod playground;
pub mod report;
pub mod roadmap;
pub mod search;
pub mod state;
