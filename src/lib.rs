//! Website screening pipeline: extract page text, score it against keywords
//! with a generation model, and mail the review result to each site owner.

pub mod ai;
pub mod app;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod store;
pub mod tasks;
pub mod web_content;
