//! Cancello forces visitors to authenticate before viewing any page of the
//! site it serves, content feeds included. The login and signup screens are
//! the only entry points reachable without a session; everything else is
//! answered with a redirect to the login screen that preserves the original
//! destination for the post-login return.

pub mod api;
pub mod cli;
pub mod gate;
pub mod session;
pub mod site;
