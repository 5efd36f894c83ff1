//! Application layer use cases for the viewer.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (here: `rawkey_core`) and the infrastructure (trace files, config files).
//!
//! Use cases in this layer:
//!
//! - **Orchestrate** domain objects to fulfil a user goal (e.g., "show every
//!   key I pressed, with its names in my input library").
//! - **Contain no OS calls and no file system access**.
//!
//! # Sub-modules
//!
//! - **`capture_session`** – Feeds raw-input records through the normalizer
//!   and keeps the log of packed event handles.
//!
//! - **`display`** – Renders a packed handle into a row of names and numbers.

pub mod capture_session;
pub mod display;
