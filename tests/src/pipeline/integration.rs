use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use subscout_common::liveness::{HostResolver, HttpProbe, LivenessCheck};
use subscout_common::network::probe::{Protocol, ProbeResult};
use subscout_common::sources::{SourceFetcher, SourceStatus};
use subscout_core::collection::{Collection, CollectionService};
use subscout_core::probe::{self, LivenessProber, ProbeOrchestrator};
use subscout_core::report::{self, Summary};
use subscout_core::sources::{CrtSh, Endpoint, HackerTarget, SourceClient};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::support::{self, DenyListResolver, FixedSource, ScriptedHttp};

fn fixed(name: &'static str, hosts: Vec<&'static str>) -> Arc<dyn SourceFetcher> {
    Arc::new(FixedSource { name, hosts })
}

/// Two sources with noisy output collapse to the two real subdomains.
#[tokio::test]
async fn stub_sources_yield_validated_candidates() {
    let service: CollectionService = CollectionService::new(vec![
        fixed(
            "first",
            vec!["www.example.com", "*.dev.example.com", "EXAMPLE.COM", "evil-example.com"],
        ),
        fixed("second", vec!["api.example.com"]),
    ]);

    let collection: Collection = service.aggregate(&support::domain()).await;

    let expected: BTreeSet<String> = ["api.example.com", "www.example.com"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(collection.candidates, expected);
}

/// One host fails DNS, one only answers HTTP, one answers HTTPS.
#[tokio::test]
async fn three_host_run_writes_sorted_report() {
    let candidates: BTreeSet<String> = ["www.example.com", "gone.example.com", "legacy.example.com"]
        .into_iter()
        .map(String::from)
        .collect();

    let resolver = DenyListResolver {
        unresolvable: vec!["gone.example.com"],
    };
    let http: ScriptedHttp = ScriptedHttp::answering(&[
        ("https://www.example.com", 200),
        ("http://legacy.example.com", 302),
    ]);
    let log = http.call_log();
    let checker: Arc<dyn LivenessCheck> = Arc::new(LivenessProber::new(resolver, http));
    let orchestrator: ProbeOrchestrator = ProbeOrchestrator::new(checker, 2);

    let results: Vec<ProbeResult> = orchestrator.probe_all(&candidates, |_| {}).await;

    assert_eq!(support::calls_for(&log, "gone.example.com"), 0);
    assert_eq!(results[1], ProbeResult::working("legacy.example.com", Protocol::Http));
    assert_eq!(results[2], ProbeResult::working("www.example.com", Protocol::Https));

    let dir: TempDir = tempfile::tempdir().unwrap();
    let out: PathBuf = dir.path().join(support::domain().report_file_name());
    report::save(&out, &results).unwrap();

    let csv: String = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Subdomain,Working",
            "gone.example.com,N",
            "legacy.example.com,Y",
            "www.example.com,Y",
        ]
    );
    assert_eq!(
        Summary::from_results(&results),
        Summary {
            total: 3,
            working: 2,
            not_working: 1,
        }
    );
}

/// Without a usable system resolver or HTTP client the run still writes its report.
#[tokio::test]
async fn unbuildable_resolver_still_writes_report() {
    let candidates: BTreeSet<String> = ["api.example.com", "www.example.com"]
        .into_iter()
        .map(String::from)
        .collect();

    let resolver: anyhow::Result<Box<dyn HostResolver>> = Err(anyhow::anyhow!("no nameservers configured"));
    let http: anyhow::Result<Box<dyn HttpProbe>> = Ok(Box::new(ScriptedHttp::default()));
    let checker: Arc<dyn LivenessCheck> = probe::assemble_checker(resolver, http);

    let results: Vec<ProbeResult> = ProbeOrchestrator::new(checker, 2).probe_all(&candidates, |_| {}).await;

    let dir: TempDir = tempfile::tempdir().unwrap();
    let out: PathBuf = dir.path().join(support::domain().report_file_name());
    report::save(&out, &results).unwrap();

    let csv: String = std::fs::read_to_string(&out).unwrap();
    assert_eq!(
        csv.lines().collect::<Vec<&str>>(),
        vec!["Subdomain,Working", "api.example.com,N", "www.example.com,N"]
    );
}

/// Real source parsers behind a mock server, plus one source that is down.
#[tokio::test]
async fn live_parsers_merge_and_tolerate_a_dead_source() {
    let server: MockServer = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"[{"name_value":"www.example.com\nmail.example.com"},{"name_value":"*.example.com"}]"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/hostsearch/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("mail.example.com,192.0.2.1\nvpn.example.com,192.0.2.2\n"),
        )
        .mount(&server)
        .await;

    let http: SourceClient = SourceClient::new().unwrap();
    let timeout: Duration = Duration::from_secs(2);
    let service: CollectionService = CollectionService::new(vec![
        Arc::new(CrtSh::with_endpoint(Endpoint::new(http.clone(), server.uri(), timeout))),
        Arc::new(HackerTarget::with_endpoint(Endpoint::new(http.clone(), server.uri(), timeout))),
        Arc::new(HackerTarget::with_endpoint(Endpoint::new(http, "http://127.0.0.1:9", timeout))),
    ]);

    let collection: Collection = service.aggregate(&support::domain()).await;

    let names: Vec<&str> = collection.candidates.iter().map(String::as_str).collect();
    assert_eq!(names, vec!["mail.example.com", "vpn.example.com", "www.example.com"]);
    assert_eq!(
        collection
            .reports
            .iter()
            .filter(|r| r.status == SourceStatus::Empty)
            .count(),
        1
    );
}

#[tokio::test]
async fn apex_alone_leaves_nothing_to_check() {
    let service: CollectionService = CollectionService::new(vec![
        fixed("apex-only", vec!["example.com", "www.example.com."]),
        fixed("silent", vec![]),
    ]);

    let collection: Collection = service.aggregate(&support::domain()).await;

    // `www.` survives; only the apex itself is dropped.
    assert_eq!(collection.candidates.len(), 1);

    let service: CollectionService = CollectionService::new(vec![fixed("apex-only", vec!["example.com"])]);
    assert!(service.aggregate(&support::domain()).await.candidates.is_empty());
}
