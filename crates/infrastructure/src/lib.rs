//! Ferrous Recursor Infrastructure Layer
pub mod dns;
