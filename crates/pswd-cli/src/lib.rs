//! Shared pieces of the pswd binaries

pub mod stdio;
