//! Shared transport handle integration tests.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use gatecall_auth::{SignedHeaderSet, headers, verify_signed_headers};
    use gatecall_core::SdkConfig;
    use gatecall_ws::{
        Binding, CallError, CallInterceptor, Envelope, HandlerChain, LocalHandle,
        ProtocolHandler, RequestContext, SecurityHeaderHandler,
    };

    use crate::{
        SECRET_KEY, capture_logs, collect_signed, credentials, init_tracing, order_query,
        unique_fingerprint,
    };

    #[derive(Debug)]
    struct AuditHandler;

    impl ProtocolHandler for AuditHandler {
        fn name(&self) -> &str {
            "audit"
        }

        fn handle_outbound(&self, envelope: &mut Envelope) {
            envelope.headers.push(("x-audit".to_owned(), "on".to_owned()));
        }
    }

    fn handle_with_audit() -> LocalHandle {
        let handle = LocalHandle::new();
        handle.set_handler_chain(vec![Arc::new(AuditHandler)]).unwrap();
        handle
    }

    fn same_chain(a: &HandlerChain, b: &HandlerChain) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| Arc::ptr_eq(x, y))
    }

    fn envelope_interceptor() -> CallInterceptor {
        let config = SdkConfig::builder().headers_in_envelope(true).build();
        CallInterceptor::new(config, credentials(), order_query())
    }

    #[test]
    fn test_should_inject_verifiable_headers_into_handle() {
        init_tracing();
        let handle = LocalHandle::new();
        let interceptor = CallInterceptor::new(SdkConfig::default(), credentials(), order_query());
        let fp = unique_fingerprint("ws");

        let dispatched = interceptor
            .invoke(&handle, &fp, |_| Ok::<_, String>(handle.dispatch(&b"<q/>"[..])))
            .unwrap();

        let received = collect_signed(&dispatched.request_headers);
        assert_eq!(received.get(headers::TIMESTAMP), Some(fp.as_str()));
        assert_eq!(verify_signed_headers(SECRET_KEY, &received), Ok(()));
        assert!(dispatched.envelope.headers.is_empty());
    }

    #[test]
    fn test_should_carry_signed_headers_in_envelope_and_restore_chain() {
        init_tracing();
        let handle = handle_with_audit();
        let original = handle.handler_chain();
        let interceptor = envelope_interceptor();

        for _ in 0..3 {
            let fp = unique_fingerprint("ws");
            let dispatched = interceptor
                .invoke(&handle, &fp, |_| Ok::<_, String>(handle.dispatch(&b"<q/>"[..])))
                .unwrap();

            let envelope = &dispatched.envelope;
            assert_eq!(envelope.header("x-audit"), Some("on"));
            assert_eq!(envelope.header(headers::TIMESTAMP), Some(fp.as_str()));
            let from_envelope = SignedHeaderSet::from_headers(
                envelope.headers.iter().map(|(n, v)| (n.as_str(), v.as_str())),
            );
            assert_eq!(verify_signed_headers(SECRET_KEY, &from_envelope), Ok(()));

            assert!(same_chain(&handle.handler_chain(), &original));
        }
    }

    #[test]
    fn test_should_isolate_concurrent_calls_on_shared_handle() {
        init_tracing();
        let handle = Arc::new(handle_with_audit());
        let original = handle.handler_chain();
        let interceptor = Arc::new(envelope_interceptor());

        let workers: Vec<_> = (0..8)
            .map(|_| {
                let handle = Arc::clone(&handle);
                let interceptor = Arc::clone(&interceptor);
                thread::spawn(move || {
                    for _ in 0..25 {
                        let fp = unique_fingerprint("mt");
                        let dispatched = interceptor
                            .invoke(handle.as_ref(), &fp, |_| {
                                let chain = handle.handler_chain();
                                let installed = chain
                                    .iter()
                                    .filter(|h| h.name() == SecurityHeaderHandler::NAME)
                                    .count();
                                if installed == 1 {
                                    Ok(handle.dispatch(&b"<q/>"[..]))
                                } else {
                                    Err(format!("{installed} security handlers installed"))
                                }
                            })
                            .unwrap();

                        let timestamps: Vec<_> = dispatched
                            .envelope
                            .headers
                            .iter()
                            .filter(|(n, _)| n == headers::TIMESTAMP)
                            .map(|(_, v)| v.as_str())
                            .collect();
                        assert_eq!(timestamps, vec![fp.as_str()]);

                        let received = collect_signed(&dispatched.request_headers);
                        assert_eq!(received.get(headers::TIMESTAMP), Some(fp.as_str()));
                    }
                })
            })
            .collect();

        for worker in workers {
            worker.join().unwrap();
        }
        assert!(same_chain(&handle.handler_chain(), &original));
    }

    #[test]
    fn test_should_return_transport_error_with_handle_restored() {
        init_tracing();
        let handle = handle_with_audit();
        let original = handle.handler_chain();
        let interceptor = envelope_interceptor();

        let result: Result<(), CallError<String>> =
            interceptor.invoke(&handle, &unique_fingerprint("ws"), |_| {
                Err("gateway unreachable".to_owned())
            });

        assert!(matches!(result, Err(CallError::Transport(ref e)) if e == "gateway unreachable"));
        assert!(same_chain(&handle.handler_chain(), &original));
        // Injected request headers stay on the handle until the next call.
        assert!(handle.request_headers().contains_key(headers::SIGNATURE));
    }

    #[test]
    fn test_should_dump_signed_headers_with_signature_masked() {
        init_tracing();
        let config = SdkConfig::builder().dump_headers(true).build();
        let interceptor = CallInterceptor::new(config, credentials(), order_query());
        let handle = LocalHandle::new();

        let (signed, logs) = capture_logs(|| {
            interceptor
                .invoke(&handle, &unique_fingerprint("ws"), |signed| {
                    Ok::<_, String>(signed.clone())
                })
                .unwrap()
        });

        let signature = signed.get(headers::SIGNATURE).unwrap();
        assert!(logs.contains("Signed gateway headers"), "no dump in: {logs}");
        assert!(logs.contains(headers::ACCESS_KEY));
        assert!(logs.contains(headers::SIGNATURE));
        assert!(!logs.contains(signature));
        assert!(!logs.contains(SECRET_KEY));
    }

    #[test]
    fn test_should_not_dump_signed_headers_by_default() {
        init_tracing();
        let interceptor = CallInterceptor::new(SdkConfig::default(), credentials(), order_query());
        let handle = LocalHandle::new();

        let ((), logs) = capture_logs(|| {
            interceptor
                .invoke(&handle, &unique_fingerprint("ws"), |_| Ok::<_, String>(()))
                .unwrap();
        });

        assert!(logs.contains("Armed gateway call"), "nothing captured: {logs}");
        assert!(!logs.contains("Signed gateway headers"));
        assert!(!logs.contains(SECRET_KEY));
    }
}
