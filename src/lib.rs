//! Task, category, priority and reminder tracking with flat JSON
//! persistence. The stores own the collections, the planner owns every
//! cross-store consistency rule, and the CLI in `main.rs` is just a caller.

pub mod category_store;
pub mod cli;
pub mod config;
pub mod logging;
pub mod models;
pub mod planner;
pub mod priority_store;
pub mod reminder_store;
pub mod storage;
pub mod task_store;
