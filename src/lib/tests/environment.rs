use webshim::reexports::anyhow;
use webshim::*;

use std::cell::RefCell;
use std::rc::Rc;

fn bare() -> Environment {
    Environment::install(&HostCapabilities::none())
}

fn recorder<T: 'static>() -> (Rc<RefCell<Vec<T>>>, impl Fn(T) + Clone) {
    let log: Rc<RefCell<Vec<T>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = {
        let log = log.clone();
        move |value: T| log.borrow_mut().push(value)
    };
    (log, sink)
}

#[test]
fn chained_updates_concatenate() {
    let env = bare();
    let utils = env.crypto_utils();
    for algorithm in ["md5", "sha1", "sha256", "sha512"] {
        let mut h = utils.create_hash(algorithm);
        h.update("first half, ").update("second half");
        let mut one_shot = utils.create_hash(algorithm);
        one_shot.update("first half, second half");
        assert_eq!(h.digest().unwrap(), one_shot.digest().unwrap());
    }
}

#[test]
fn base64_digest_transcodes_the_hex_string() {
    let env = bare();
    let mut h = env.crypto_utils().create_hash("sha256");
    h.update("abc");
    let hex = h.digest().unwrap();
    assert_eq!(
        hex,
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    let base64 = h.digest_encoded(DigestEncoding::Base64).unwrap();
    assert_eq!(base64, env.btoa(&hex).unwrap());
    assert_eq!(env.atob(&base64).unwrap(), hex);
    assert_eq!(
        h.digest_encoded(DigestEncoding::from_name("latin1")).unwrap(),
        hex
    );
}

#[test]
fn unknown_algorithm_fails_only_at_digest_time() {
    let env = bare();
    let h = env.crypto_utils().create_hash("unknown");
    assert!(matches!(
        h.digest(),
        Err(ShimError::UnsupportedAlgorithm(name)) if name == "unknown"
    ));
    let mac = env.crypto_utils().create_hmac("sha512", "key");
    assert!(matches!(
        mac.digest(),
        Err(ShimError::UnsupportedAlgorithm(_))
    ));
}

#[test]
fn delays_do_not_reorder_callbacks() {
    let env = bare();
    let timers = env.timers().unwrap();
    let (log, sink) = recorder();
    {
        let sink = sink.clone();
        timers.set_timeout(move || sink("cb1"), 1000);
    }
    timers.set_timeout(move || sink("cb2"), 0);
    env.run_microtasks();
    assert_eq!(*log.borrow(), vec!["cb1", "cb2"]);
}

#[test]
fn cancelled_callbacks_never_fire() {
    let env = bare();
    let timers = env.timers().unwrap();
    let (log, sink) = recorder();
    let id = timers.set_timeout(move || sink(()), 0);
    timers.clear_timeout(id);
    timers.clear_timeout(id);
    timers.clear_interval(TimerId(12345));
    env.run_microtasks();
    assert!(log.borrow().is_empty());
    assert!(timers.is_empty());
}

#[test]
fn intervals_fire_once() {
    let env = bare();
    let timers = env.timers().unwrap();
    let (log, sink) = recorder();
    let id = timers.set_interval(move || sink(()), 10);
    env.run_microtasks();
    env.run_microtasks();
    assert_eq!(log.borrow().len(), 1);
    assert_eq!(timers.state(id), Some(TimerState::Fired));
    timers.clear_interval(id);
    assert!(timers.is_empty());
}

#[test]
fn callbacks_can_schedule_more_work() {
    let env = bare();
    let timers = env.timers().unwrap().clone();
    let (log, sink) = recorder();
    {
        let inner_timers = timers.clone();
        let sink = sink.clone();
        timers.set_timeout(
            move || {
                sink("outer");
                inner_timers.set_timeout(move || sink("inner"), 0);
            },
            0,
        );
    }
    assert_eq!(env.run_microtasks(), 2);
    assert_eq!(*log.borrow(), vec!["outer", "inner"]);
}

#[test]
fn worker_messages_are_delivered_once() {
    let env = bare();
    let worker = env.spawn_worker::<String>("worker.js").unwrap();
    let (log, sink) = recorder();
    worker.set_onmessage(Some(Rc::new(move |event: &MessageEvent<String>| {
        sink((event.type_, event.data.clone(), event.origin.clone()))
    })));
    worker.post_message("ping".to_string()).unwrap();
    env.run_microtasks();
    env.run_microtasks();
    assert_eq!(
        *log.borrow(),
        vec![("message", "ping".to_string(), String::new())]
    );

    worker.terminate();
    worker.terminate();
    assert!(matches!(
        worker.post_message("late".to_string()),
        Err(ShimError::WorkerTerminated)
    ));
}

#[test]
fn worker_delivery_is_skipped_after_terminate() {
    let env = bare();
    let worker = env.spawn_worker::<u32>("worker.js").unwrap();
    let (log, sink) = recorder();
    worker.set_onmessage(Some(Rc::new(move |event: &MessageEvent<u32>| {
        sink(event.data)
    })));
    worker.post_message(1).unwrap();
    worker.terminate();
    env.run_microtasks();
    assert!(log.borrow().is_empty());
}

#[test]
fn installer_fills_only_the_gaps() {
    let host = HostCapabilities::parse("setTimeout,Worker,crypto.randomUUID").unwrap();
    let env = Environment::install(&host);
    assert_eq!(
        env.installed(),
        vec![
            Capability::EncodeUriComponent,
            Capability::DecodeUriComponent,
            Capability::EncodeUri,
            Capability::DecodeUri,
            Capability::GetRandomValues,
        ]
    );
    assert!(matches!(
        env.timers(),
        Err(ShimError::ProvidedByHost(Capability::Timers))
    ));
    assert!(matches!(
        env.spawn_worker::<()>("worker.js"),
        Err(ShimError::ProvidedByHost(Capability::Worker))
    ));
    assert!(matches!(
        env.crypto().random_uuid(),
        Err(ShimError::ProvidedByHost(Capability::RandomUuid))
    ));
    let mut values = [0u32; 8];
    assert_eq!(env.crypto().get_random_values(&mut values).unwrap().len(), 8);
    assert!(values.iter().all(|&v| v <= 255));
    assert_eq!(env.encode_uri_component("a&b").unwrap(), "a%26b");
    assert!(env.global_names().contains(&EXTENSIONS_LOADED_MARKER));
}

struct FailingOps;

impl HostOps for FailingOps {
    fn digest(&self, _algorithm: HashAlgorithm, _input: &str) -> Result<String, ShimError> {
        Err(anyhow::anyhow!("digest op unavailable").into())
    }

    fn hmac(&self, algorithm: HmacAlgorithm, key: &str, input: &str) -> Result<String, ShimError> {
        NativeOps.hmac(algorithm, key, input)
    }

    fn base64_encode(&self, input: &str) -> Result<String, ShimError> {
        NativeOps.base64_encode(input)
    }

    fn base64_decode(&self, input: &str) -> Result<String, ShimError> {
        NativeOps.base64_decode(input)
    }

    fn hex_encode(&self, input: &str) -> Result<String, ShimError> {
        NativeOps.hex_encode(input)
    }

    fn hex_decode(&self, input: &str) -> Result<String, ShimError> {
        NativeOps.hex_decode(input)
    }

    fn url_encode(&self, input: &str) -> Result<String, ShimError> {
        NativeOps.url_encode(input)
    }

    fn url_decode(&self, input: &str) -> Result<String, ShimError> {
        NativeOps.url_decode(input)
    }

    fn encode_uri_component(&self, input: &str) -> Result<String, ShimError> {
        NativeOps.encode_uri_component(input)
    }

    fn decode_uri_component(&self, input: &str) -> Result<String, ShimError> {
        NativeOps.decode_uri_component(input)
    }

    fn encode_uri(&self, input: &str) -> Result<String, ShimError> {
        NativeOps.encode_uri(input)
    }

    fn random_uuid(&self) -> Result<String, ShimError> {
        Ok("00000000-0000-4000-8000-000000000000".to_string())
    }

    fn random_bytes(&self, len: usize) -> Result<String, ShimError> {
        Ok("ab".repeat(len))
    }

    fn random_scalar(&self) -> Result<f64, ShimError> {
        Ok(0.5)
    }
}

#[test]
fn custom_op_tables() {
    let env = Environment::install_with_ops(&HostCapabilities::none(), FailingOps);
    assert!(matches!(env.sha256("abc"), Err(ShimError::HostError(_))));
    let mut h = env.crypto_utils().create_hash("md5");
    h.update("abc");
    assert!(matches!(h.digest(), Err(ShimError::HostError(_))));

    assert_eq!(
        env.crypto().random_uuid().unwrap(),
        "00000000-0000-4000-8000-000000000000"
    );
    let mut values = [0u16; 3];
    assert_eq!(
        env.crypto().get_random_values(&mut values).unwrap(),
        &[0xabu16; 3]
    );
    assert_eq!(env.spawn_worker::<()>("w.js").unwrap().id(), 500_000);
    assert_eq!(env.crypto_random().unwrap(), 0.5);
}
