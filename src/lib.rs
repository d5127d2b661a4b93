//! Duke - Mediated Two-Party Conversations
//!
//! This crate implements turn-based conversations between two participants,
//! with an AI mediator stepping in once both sides have shared their view.

pub mod adapters;
pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
