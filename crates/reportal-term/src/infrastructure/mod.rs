//! Infrastructure layer: the reporting backend client and the Google
//! sign-in gate.

pub mod auth;
pub mod clients;
