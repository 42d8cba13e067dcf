//! Interactive explorer for US bikeshare trip data.
//!
//! ```text
//!  prompt ──► choices ──► data::loader ──► data::filter ──► stats ──► export
//!     ▲                                                       │
//!     └──────────────────── app (menu loop) ◄─────────────────┘
//! ```

pub mod app;
pub mod choices;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod prompt;
pub mod state;
pub mod stats;
