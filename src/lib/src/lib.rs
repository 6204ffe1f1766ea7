//! Web-API-shaped globals (`btoa`/`atob`, hashing, HMAC, hex and URL encoding,
//! `crypto.*`, `setTimeout`/`setInterval`, a fake `Worker`) for an embedded
//! scripting environment.

// The actual primitives live behind the `HostOps` op table. `NativeOps` is the default one.
// `Environment::install()` is the entry point most embedders should use: it fills the gaps
// left by the host and exposes everything else unconditionally.

#![forbid(unsafe_code)]

mod algorithm;
mod crypto;
mod deferred;
mod env;
mod error;
mod ops;
mod worker;

pub use algorithm::*;
pub use crypto::*;
pub use deferred::*;
pub use env::*;
pub use error::*;
pub use ops::*;
pub use worker::*;

pub mod reexports {
    pub use {anyhow, ct_codecs, getrandom, hmac_sha256, log, percent_encoding, thiserror, uuid};
}
