mod capabilities;

pub use capabilities::*;

use crate::algorithm::*;
use crate::crypto::*;
use crate::deferred::*;
use crate::error::*;
use crate::ops::*;
use crate::worker::*;

use log::*;
use std::collections::HashSet;
use std::fmt;

/// Global name defined once the shim has been installed.
pub const EXTENSIONS_LOADED_MARKER: &str = "__WEBSHIM_EXTENSIONS_LOADED__";

const UNCONDITIONAL_GLOBALS: [&str; 9] = [
    "btoa",
    "atob",
    "md5",
    "sha1",
    "sha256",
    "sha512",
    "CryptoUtils",
    "cryptoRandom",
    EXTENSIONS_LOADED_MARKER,
];

/// An installed shim.
///
/// The environment owns the op table and the deferred callback queues. Several environments can
/// coexist: nothing is shared between them.
pub struct Environment {
    ops: Box<dyn HostOps>,
    installed: HashSet<Capability>,
    microtasks: MicrotaskQueue,
    timers: TimerQueue,
}

impl Environment {
    /// Install the shim over the native op table, polyfilling whatever `host` doesn't provide.
    pub fn install(host: &HostCapabilities) -> Self {
        Self::install_with_ops(host, NativeOps)
    }

    /// Install the shim over a custom op table.
    pub fn install_with_ops(host: &HostCapabilities, ops: impl HostOps + 'static) -> Self {
        let microtasks = MicrotaskQueue::new();
        let timers = TimerQueue::new(microtasks.clone());
        let mut installed = HashSet::new();
        for capability in Capability::ALL {
            if host.provides(capability) {
                debug!("[{}] is provided by the host", capability);
            } else {
                debug!("Installing a polyfill for [{}]", capability);
                installed.insert(capability);
            }
        }
        debug!(
            "Shim installed: {} polyfill(s), {} host-provided capability(ies)",
            installed.len(),
            Capability::ALL.len() - installed.len()
        );
        Environment {
            ops: Box::new(ops),
            installed,
            microtasks,
            timers,
        }
    }

    /// Return `true` if a polyfill was installed for `capability`.
    pub fn is_installed(&self, capability: Capability) -> bool {
        self.installed.contains(&capability)
    }

    /// Return the installed polyfills, in installation order.
    pub fn installed(&self) -> Vec<Capability> {
        Capability::ALL
            .iter()
            .copied()
            .filter(|capability| self.is_installed(*capability))
            .collect()
    }

    /// Return every global name defined by the shim.
    pub fn global_names(&self) -> Vec<&'static str> {
        let mut names = UNCONDITIONAL_GLOBALS.to_vec();
        for capability in self.installed() {
            names.extend_from_slice(capability.global_names());
        }
        names
    }

    /// Return the op table.
    pub fn ops(&self) -> &dyn HostOps {
        self.ops.as_ref()
    }

    fn check(&self, capability: Capability) -> Result<(), ShimError> {
        if self.is_installed(capability) {
            Ok(())
        } else {
            Err(ShimError::ProvidedByHost(capability))
        }
    }

    /// `btoa()`
    pub fn btoa(&self, input: impl fmt::Display) -> Result<String, ShimError> {
        self.ops.base64_encode(&input.to_string())
    }

    /// `atob()`
    pub fn atob(&self, input: impl fmt::Display) -> Result<String, ShimError> {
        self.ops.base64_decode(&input.to_string())
    }

    pub fn md5(&self, input: impl fmt::Display) -> Result<String, ShimError> {
        self.ops.digest(HashAlgorithm::Md5, &input.to_string())
    }

    pub fn sha1(&self, input: impl fmt::Display) -> Result<String, ShimError> {
        self.ops.digest(HashAlgorithm::Sha1, &input.to_string())
    }

    pub fn sha256(&self, input: impl fmt::Display) -> Result<String, ShimError> {
        self.ops.digest(HashAlgorithm::Sha256, &input.to_string())
    }

    pub fn sha512(&self, input: impl fmt::Display) -> Result<String, ShimError> {
        self.ops.digest(HashAlgorithm::Sha512, &input.to_string())
    }

    /// The `CryptoUtils` namespace.
    pub fn crypto_utils(&self) -> CryptoUtils<'_> {
        CryptoUtils::new(self.ops())
    }

    /// `cryptoRandom()`: a random number in `[0, 1)`.
    pub fn crypto_random(&self) -> Result<f64, ShimError> {
        self.ops.random_scalar()
    }

    pub fn encode_uri_component(&self, input: impl fmt::Display) -> Result<String, ShimError> {
        self.check(Capability::EncodeUriComponent)?;
        self.ops.encode_uri_component(&input.to_string())
    }

    pub fn decode_uri_component(&self, input: impl fmt::Display) -> Result<String, ShimError> {
        self.check(Capability::DecodeUriComponent)?;
        self.ops.decode_uri_component(&input.to_string())
    }

    pub fn encode_uri(&self, input: impl fmt::Display) -> Result<String, ShimError> {
        self.check(Capability::EncodeUri)?;
        self.ops.encode_uri(&input.to_string())
    }

    pub fn decode_uri(&self, input: impl fmt::Display) -> Result<String, ShimError> {
        self.check(Capability::DecodeUri)?;
        self.ops.decode_uri(&input.to_string())
    }

    /// `setTimeout`, `setInterval`, `clearTimeout` and `clearInterval`.
    ///
    /// Delays are ignored: callbacks run in scheduling order on the next `run_microtasks()`.
    pub fn timers(&self) -> Result<&TimerQueue, ShimError> {
        self.check(Capability::Timers)?;
        Ok(&self.timers)
    }

    /// `new Worker(scriptURL)`
    ///
    /// The script is never loaded. Messages posted to the worker are delivered to its own
    /// `onmessage` handler through the environment's timer queue.
    pub fn spawn_worker<M: 'static>(
        &self,
        script_url: impl Into<String>,
    ) -> Result<Worker<M>, ShimError> {
        self.check(Capability::Worker)?;
        let id = (self.ops.random_scalar()? * 1_000_000.0) as u32;
        let worker = Worker::new(id.min(999_999), script_url, self.timers.clone());
        debug!("Worker {} created for [{}]", worker.id(), worker.script_url());
        Ok(worker)
    }

    /// The `crypto` global.
    pub fn crypto(&self) -> Crypto<'_> {
        Crypto::new(self)
    }

    /// Run pending microtasks, including the ones they schedule, until the queue is empty.
    ///
    /// Returns the number of tasks that ran.
    pub fn run_microtasks(&self) -> usize {
        self.microtasks.run_until_idle()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Environment")
            .field("installed", &self.installed())
            .field("microtasks", &self.microtasks)
            .field("timers", &self.timers)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn bare_host_gets_everything() {
        let env = Environment::install(&HostCapabilities::none());
        assert_eq!(env.installed(), Capability::ALL.to_vec());
        let names = env.global_names();
        for name in ["btoa", "setInterval", "clearTimeout", "Worker", EXTENSIONS_LOADED_MARKER] {
            assert!(names.contains(&name), "missing {}", name);
        }
    }

    #[test]
    fn only_gaps_are_filled() {
        let host = HostCapabilities::parse("setTimeout,encodeURI").unwrap();
        let env = Environment::install(&host);
        assert!(!env.is_installed(Capability::Timers));
        assert!(!env.is_installed(Capability::EncodeUri));
        assert!(env.is_installed(Capability::DecodeUri));
        assert!(!env.global_names().contains(&"setInterval"));
        assert!(env.global_names().contains(&"btoa"));
        assert!(matches!(
            env.timers(),
            Err(ShimError::ProvidedByHost(Capability::Timers))
        ));
        assert!(matches!(
            env.encode_uri("a b"),
            Err(ShimError::ProvidedByHost(Capability::EncodeUri))
        ));
        assert_eq!(env.decode_uri("a%20b").unwrap(), "a b");
    }

    #[test]
    fn unconditional_globals() {
        let env = Environment::install(&HostCapabilities::all());
        assert!(env.installed().is_empty());
        assert_eq!(env.btoa("hello").unwrap(), "aGVsbG8=");
        assert_eq!(env.atob("aGVsbG8=").unwrap(), "hello");
        assert_eq!(env.md5("").unwrap(), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(
            env.sha1("").unwrap(),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
        let r = env.crypto_random().unwrap();
        assert!((0.0..1.0).contains(&r));
    }

    #[test]
    fn decode_uri_uses_the_component_decoder() {
        let env = Environment::install(&HostCapabilities::none());
        assert_eq!(env.decode_uri("a%2Fb%3F").unwrap(), "a/b?");
        assert_eq!(env.encode_uri("a/b?c d").unwrap(), "a/b?c%20d");
        assert_eq!(env.encode_uri_component("a/b").unwrap(), "a%2Fb");
        assert!(matches!(
            env.decode_uri_component("%E0%A4%A"),
            Err(ShimError::DecodeError(_))
        ));
    }

    #[test]
    fn workers_share_the_timer_queue() {
        let env = Environment::install(&HostCapabilities::none());
        let worker = env.spawn_worker::<&'static str>("worker.js").unwrap();
        assert!(worker.id() < 1_000_000);
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let log = log.clone();
            env.timers()
                .unwrap()
                .set_timeout(move || log.borrow_mut().push("timer"), 1000);
        }
        {
            let log = log.clone();
            worker.set_onmessage(Some(Rc::new(move |event: &MessageEvent<&'static str>| {
                log.borrow_mut().push(event.data)
            })));
        }
        worker.post_message("message").unwrap();
        assert_eq!(env.run_microtasks(), 2);
        assert_eq!(*log.borrow(), vec!["timer", "message"]);
    }

    #[test]
    fn environments_are_independent() {
        let first = Environment::install(&HostCapabilities::none());
        let second = Environment::install(&HostCapabilities::none());
        first.timers().unwrap().set_timeout(|| {}, 0);
        assert_eq!(first.timers().unwrap().len(), 1);
        assert!(second.timers().unwrap().is_empty());
        assert_eq!(second.run_microtasks(), 0);
        assert_eq!(first.run_microtasks(), 1);
        assert!(first.timers().unwrap().is_empty());
    }
}
