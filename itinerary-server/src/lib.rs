//! Rail itinerary planner server.
//!
//! A web application that answers: "which trains get me from this station
//! to that one, with at most one change, and what will it cost?"

pub mod cache;
pub mod domain;
pub mod planner;
pub mod store;
pub mod web;
