//! Demo application: state plus event plumbing.

pub mod demo;
pub mod event;
pub mod handler;
pub mod state;
