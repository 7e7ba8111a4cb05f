//! zerowaste: terminal companion for Zero Waste Grocery, with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
