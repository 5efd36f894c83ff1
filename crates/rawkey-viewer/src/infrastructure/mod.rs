//! Infrastructure layer for the viewer.
//!
//! Contains the adapters that touch the outside world: input sources (trace
//! replay, test mock) and file-system storage.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `rawkey_core`, but MUST NOT be imported by the core library.

pub mod input_source;
pub mod storage;
