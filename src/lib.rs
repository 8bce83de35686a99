// src/lib.rs
//! Question/choice voting web app: index, detail, results and vote pages.

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod poll;
pub mod repository;
pub mod routes;
pub mod seed;
pub mod templates;
