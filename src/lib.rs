//! OwlTune: a terminal client for browsing and managing playlists served by
//! the OwlTune web backend.

pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod model;
pub mod view;
