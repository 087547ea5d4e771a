//! Metro route planner server.
//!
//! A web application that answers: "What is the fastest, cheapest or
//! least-transfer way across the metro from this station to that one?"

pub mod amenities;
pub mod config;
pub mod congestion;
pub mod domain;
pub mod graph;
pub mod planner;
pub mod stations;
pub mod web;
