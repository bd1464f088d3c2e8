//! 基础设施层

pub mod adapters;
pub mod http;
pub mod persistence;
