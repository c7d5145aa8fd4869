use thanos_operator_lib::scheme::{documents, from_yaml, to_yaml};
use thanos_operator_lib::{PullPolicy, Thanos, ThanosSpec, Tls, SCHEME};


const FULL_MANIFEST: &str = r#"
apiVersion: monitoring.banzaicloud.io/v1alpha1
kind: Thanos
metadata:
  name: federation
  namespace: monitoring
spec:
  object_store: s3-bucket
  remote:
    urls:
      - https://thanos-eu.example.com:10901
    tls:
      certificate:
        valueFrom:
          secretKeyRef:
            name: thanos-client
            key: tls.crt
  local:
    urls:
      - thanos-sidecar.monitoring.svc:10901
    tls:
      managedTLS: {}
  thanosDiscovery:
    labelSelector:
      matchLabels:
        app.kubernetes.io/name: thanos-sidecar
  query:
    image:
      repository: quay.io/thanos/thanos
      tag: v0.9.0
      pullPolicy: Always
    logLevel: debug
    logFormat: logfmt
    httpAddress: 0.0.0.0:10902
    http_grace_period: 2m
    grpcAddress: 0.0.0.0:10901
    grpcGracePeriod: 2m
    webRoutePrefix: /thanos
    queryTimeout: 2m
    queryMaxConcurrent: 20
    queryReplicaLabel:
      replica: prometheus_replica
    selectorLabels:
      cluster: eu-west-1
    stores:
      - dnssrv+_grpc._tcp.thanos-store.monitoring.svc
    storeSDDNSInterval: 30s
    storeUnhealthyTimeout: 5m
    queryAutoDownsampling: true
    queryPartialResponse: false
    queryDefaultEvaluationInterval: 1m
    storeResponseTimeout: 0ms
  storeGateway:
    httpAddress: 0.0.0.0:10902
    grpcAddress: 0.0.0.0:10901
    indexCacheSize: 250MB
    chunkPoolSize: 2GB
    storeGRPCSeriesSampleLimit: "0"
    storeGRPCSeriesMaxConcurrency: 20
    syncBlockDuration: 3m
    blockSyncConcurrency: 20
    timeRanges:
      - maxTime: -2w
      - minTime: -2w
        maxTime: -1h
  rule:
    labels:
      ruler_cluster: eu-west-1
    rules: |
      groups:
        - name: example
          rules:
            - record: job:up:sum
              expr: sum by (job) (up)
    resendDelay: 1m
    evalInterval: 30s
    tsdbBlockDuration: 2h
    tsdbRetention: 48h
    alertmanagersURLs:
      - dnssrv+http://alertmanager.monitoring.svc
    alertmanagersSendTimeout: 10s
    alertmanagersSDDNSInterval: 30s
    alertQueryUrl: https://thanos.example.com
    alertLabelDrop:
      replica: ""
    queries:
      - thanos-query.monitoring.svc:10902
    querySddnsInterval: 30s
"#;


fn decode_full() -> Thanos {
    let docs = documents(FULL_MANIFEST).unwrap();
    assert_eq!(docs.len(), 1);
    SCHEME.decode(docs[0].clone()).unwrap()
}

#[test]
fn test_full_manifest_decodes() {
    let thanos = decode_full();
    let spec = &thanos.spec;

    let query = spec.query.as_ref().unwrap();
    assert_eq!(query.base.image.as_ref().unwrap().pull_policy, PullPolicy::Always);
    assert_eq!(query.flags.http_grace_period, "2m");
    assert_eq!(query.query_max_concurrent, Some(20));
    assert_eq!(query.query_replica_labels.get("replica").unwrap(), "prometheus_replica");
    assert_eq!(query.store_sd_dns_interval.as_deref(), Some("30s"));
    assert_eq!(query.query_partial_response, Some(false));

    let store = spec.store_gateway.as_ref().unwrap();
    assert_eq!(store.index_cache_size, "250MB");
    assert_eq!(store.store_grpc_series_sample_limit.as_deref(), Some("0"));
    assert_eq!(store.time_ranges.len(), 2);
    assert_eq!(store.time_ranges[0].min_time, None);
    assert_eq!(store.time_ranges[1].max_time.as_deref(), Some("-1h"));

    let rule = spec.rule.as_ref().unwrap();
    assert!(rule.rules.as_ref().unwrap().contains("job:up:sum"));
    assert_eq!(rule.alertmanagers_urls.len(), 1);
    assert_eq!(rule.alert_label_drop.get("replica").unwrap(), "");
    assert_eq!(rule.flags.http_address, "");

    match spec.remote.as_ref().unwrap().tls.as_ref().unwrap() {
        Tls::Certificate(secret) => {
            let key_ref = secret.value_from.as_ref().unwrap().secret_key_ref.as_ref().unwrap();
            assert_eq!(key_ref.name, "thanos-client");
            assert_eq!(key_ref.key, "tls.crt");
        },
        other => panic!("unexpected tls {:?}", other),
    }
    assert!(matches!(spec.local.as_ref().unwrap().tls, Some(Tls::Managed(_))));

    let selector = &spec.thanos_discovery.as_ref().unwrap().label_selector;
    assert_eq!(
        selector.match_labels.as_ref().unwrap().get("app.kubernetes.io/name").unwrap(),
        "thanos-sidecar"
    );
}

#[test]
fn test_full_manifest_yaml_round_trip() {
    let _ = env_logger::builder().is_test(true).try_init();
    let thanos = decode_full();

    let yaml = SCHEME.encode(&thanos).unwrap();
    assert!(yaml.contains("managedTLS: {}"));
    assert!(yaml.contains("alertmanagersURLs:"));

    let docs = documents(&yaml).unwrap();
    let decoded: Thanos = SCHEME.decode(docs[0].clone()).unwrap();
    assert_eq!(decoded.spec, thanos.spec);
    assert_eq!(decoded.metadata.name, thanos.metadata.name);
}

#[test]
fn test_spec_round_trip_through_yaml_helpers() {
    let spec = decode_full().spec;
    let yaml = to_yaml(&spec).unwrap();
    let decoded: ThanosSpec = from_yaml(&yaml).unwrap();
    assert_eq!(decoded, spec);
}

#[test]
fn test_spec_round_trip_json() {
    let spec = decode_full().spec;
    let json = serde_json::to_string_pretty(&spec).unwrap();
    let decoded: ThanosSpec = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, spec);
}

#[test]
fn test_empty_spec_has_no_components() {
    let docs = documents(
        "apiVersion: monitoring.banzaicloud.io/v1alpha1\nkind: Thanos\nmetadata:\n  name: empty\nspec: {}\n",
    ).unwrap();
    let thanos: Thanos = SCHEME.decode(docs[0].clone()).unwrap();
    assert_eq!(thanos.spec, ThanosSpec::default());
    assert!(thanos.spec.components().is_empty());
    assert!(thanos.status.is_none());
}

#[test]
fn test_list_manifest_decodes() {
    let list = format!(
        "apiVersion: monitoring.banzaicloud.io/v1alpha1\nkind: ThanosList\nmetadata: {{}}\nitems:\n{}",
        FULL_MANIFEST
            .trim_start_matches('\n')
            .lines()
            .enumerate()
            .map(|(i, line)| if i == 0 { format!("  - {}\n", line) } else { format!("    {}\n", line) })
            .collect::<String>()
    );
    let docs = documents(&list).unwrap();
    let decoded = SCHEME.decode_list::<Thanos>(docs[0].clone()).unwrap();
    assert_eq!(decoded.items.len(), 1);
    assert_eq!(decoded.items[0].spec, decode_full().spec);
}
