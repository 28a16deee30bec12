//! Core types: text metrics, measurement, anchors, splitting, debouncing and smart copy.

pub mod anchor;
pub mod clipboard;
pub mod component;
pub mod debounce;
pub mod error;
pub mod measure;
pub mod split;
pub mod text;
