//! HTTP call assembly integration tests.

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use gatecall_auth::{
        HmacSigner, SignedHeaderSet, Signer, SigningError, headers, verify_signed_headers,
    };
    use gatecall_core::SdkConfig;
    use gatecall_http::{
        ConfigurationError, ContentBody, ParameterSet, ParameterSetBuilder, build_request,
    };

    use crate::{ACCESS_KEY, SECRET_KEY, init_tracing, unique_fingerprint};

    fn order_query_params() -> ParameterSetBuilder {
        ParameterSet::builder()
            .api("orderQuery")
            .version("1.0")
            .access_key(ACCESS_KEY)
            .secret_key(SECRET_KEY)
            .request_url("http://gateway.local:8086/order")
    }

    /// The gateway headers as the server would collect them off the wire.
    fn received(request: &http::Request<Bytes>) -> SignedHeaderSet {
        SignedHeaderSet::from_headers(
            request
                .headers()
                .iter()
                .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.as_str(), v))),
        )
    }

    #[test]
    fn test_should_build_signed_request_accepted_by_gateway() {
        init_tracing();
        let params = order_query_params()
            .method("post")
            .unwrap()
            .body(ContentBody::json(r#"{"orderId":"o-1"}"#))
            .put_param("channel", "web")
            .build();

        let fp = unique_fingerprint("http");
        let signed = HmacSigner.sign(&params.signing_input(&fp, false)).unwrap();
        let request = build_request(&params, &signed).unwrap();

        assert_eq!(request.method(), http::Method::POST);
        assert_eq!(request.uri().query(), Some("channel=web"));

        let received = received(&request);
        assert_eq!(received.get(headers::TIMESTAMP), Some(fp.as_str()));
        assert_eq!(verify_signed_headers(SECRET_KEY, &received), Ok(()));
        assert_eq!(
            verify_signed_headers("other-secret", &received),
            Err(SigningError::SignatureDoesNotMatch)
        );
    }

    #[test]
    fn test_should_sign_each_call_with_its_own_fingerprint() {
        init_tracing();
        let builder = order_query_params();
        let first = builder.build();
        let second = builder.put_param("page", "2").build();

        let fp1 = unique_fingerprint("http");
        let fp2 = unique_fingerprint("http");
        let s1 = HmacSigner.sign(&first.signing_input(&fp1, false)).unwrap();
        let s2 = HmacSigner.sign(&second.signing_input(&fp2, false)).unwrap();

        assert_ne!(s1.get(headers::SIGNATURE), s2.get(headers::SIGNATURE));
        assert!(first.params().is_empty());
        assert_eq!(second.params().len(), 1);
    }

    #[test]
    fn test_should_leave_api_name_out_when_configured() {
        init_tracing();
        let config = SdkConfig::builder().skip_api_name_signing(true).build();
        let params = order_query_params().build();
        let fp = unique_fingerprint("http");

        let input = params.signing_input(&fp, false).with_config(&config);
        let signed = HmacSigner.sign(&input).unwrap();
        let request = build_request(&params, &signed).unwrap();

        assert!(request.headers().get(headers::API_NAME).is_none());
        assert_eq!(verify_signed_headers(SECRET_KEY, &received(&request)), Ok(()));
    }

    #[test]
    fn test_should_refuse_invalid_parameters_before_signing() {
        init_tracing();
        let params = ParameterSet::builder()
            .api("orderQuery")
            .access_key(ACCESS_KEY)
            .secret_key(SECRET_KEY)
            .build();

        assert_eq!(params.validate(), Err(ConfigurationError::MissingRequestUrl));
        assert!(
            order_query_params()
                .method("DELETE")
                .is_err_and(|e| matches!(e, ConfigurationError::UnsupportedMethod(_)))
        );
    }
}
