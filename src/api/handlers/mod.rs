//! HTTP request handlers for API endpoints.
//!
//! This module contains all request handlers organized by resource type.

pub mod company;
pub mod followed_stocks;
pub mod health;
pub mod users;
