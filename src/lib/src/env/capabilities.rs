use crate::error::*;

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// A global that is only installed when the host doesn't already provide it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Capability {
    EncodeUriComponent,
    DecodeUriComponent,
    EncodeUri,
    DecodeUri,
    /// `setTimeout`, `setInterval`, `clearTimeout` and `clearInterval`, probed as a whole.
    Timers,
    Worker,
    RandomUuid,
    GetRandomValues,
}

impl Capability {
    /// Every capability, in installation order.
    pub const ALL: [Capability; 8] = [
        Capability::EncodeUriComponent,
        Capability::DecodeUriComponent,
        Capability::EncodeUri,
        Capability::DecodeUri,
        Capability::Timers,
        Capability::Worker,
        Capability::RandomUuid,
        Capability::GetRandomValues,
    ];

    /// The name of the global probed for this capability.
    pub fn global_name(&self) -> &'static str {
        match self {
            Capability::EncodeUriComponent => "encodeURIComponent",
            Capability::DecodeUriComponent => "decodeURIComponent",
            Capability::EncodeUri => "encodeURI",
            Capability::DecodeUri => "decodeURI",
            Capability::Timers => "setTimeout",
            Capability::Worker => "Worker",
            Capability::RandomUuid => "crypto.randomUUID",
            Capability::GetRandomValues => "crypto.getRandomValues",
        }
    }

    /// Every global name defined when this capability is installed.
    pub fn global_names(&self) -> &'static [&'static str] {
        match self {
            Capability::EncodeUriComponent => &["encodeURIComponent"],
            Capability::DecodeUriComponent => &["decodeURIComponent"],
            Capability::EncodeUri => &["encodeURI"],
            Capability::DecodeUri => &["decodeURI"],
            Capability::Timers => &["setTimeout", "setInterval", "clearTimeout", "clearInterval"],
            Capability::Worker => &["Worker"],
            Capability::RandomUuid => &["crypto.randomUUID"],
            Capability::GetRandomValues => &["crypto.getRandomValues"],
        }
    }
}

impl FromStr for Capability {
    type Err = ShimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Capability::ALL
            .iter()
            .find(|capability| capability.global_names().contains(&s))
            .copied()
            .ok_or(ShimError::InvalidArgument)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.global_name())
    }
}

/// The set of capabilities the host environment already provides natively.
///
/// This is the bootstrap configuration of an `Environment`: everything not in this set gets a
/// polyfill.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostCapabilities {
    provided: HashSet<Capability>,
}

impl HostCapabilities {
    /// A bare host, providing none of the capabilities.
    pub fn none() -> Self {
        Self::default()
    }

    /// A host providing every capability.
    pub fn all() -> Self {
        HostCapabilities {
            provided: Capability::ALL.iter().copied().collect(),
        }
    }

    /// Parse a comma-separated list of global names, such as `"setTimeout, Worker"`.
    ///
    /// Any member of the timer family selects all the timers.
    pub fn parse(names: &str) -> Result<Self, ShimError> {
        let mut host = Self::none();
        for name in names.split(',').map(str::trim).filter(|name| !name.is_empty()) {
            host.insert(name.parse()?);
        }
        Ok(host)
    }

    /// Add a capability to the set.
    pub fn insert(&mut self, capability: Capability) -> &mut Self {
        self.provided.insert(capability);
        self
    }

    /// Return the set with `capability` added.
    pub fn with(mut self, capability: Capability) -> Self {
        self.insert(capability);
        self
    }

    /// Return `true` if the host provides `capability`.
    pub fn provides(&self, capability: Capability) -> bool {
        self.provided.contains(&capability)
    }

    /// Return the number of provided capabilities.
    pub fn len(&self) -> usize {
        self.provided.len()
    }

    /// Return `true` if the host provides none of the capabilities.
    pub fn is_empty(&self) -> bool {
        self.provided.is_empty()
    }
}
