//! End-to-end console behaviour against a mocked backend.

use dirview_console::dom::Element;
use dirview_console::status::ConnectionState;
use dirview_console::{ClickOutcome, ConsoleContext, NodePath};
use dirview_core::config::{ConsoleConfig, PollingConfig};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ROOT: &str = "DC=corp,DC=local";

fn console(server: &MockServer) -> ConsoleContext {
    let config = ConsoleConfig::new(server.uri())
        .unwrap()
        .with_polling(PollingConfig::new().disabled());
    ConsoleContext::connect(config).unwrap()
}

async fn mount_domain_info(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/get/domaininfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "root_dn": ROOT,
            "domain": "corp.local",
            "flatName": "CORP"
        })))
        .mount(server)
        .await;
}

async fn mount_query(server: &MockServer, searchbase: &str, scope: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/api/get/domainobject"))
        .and(body_json(json!({"searchbase": searchbase, "search_scope": scope})))
        .respond_with(response)
        .mount(server)
        .await;
}

fn ok(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

fn domain_children() -> Value {
    json!([
        {
            "dn": "CN=Domain Admins,CN=Users,DC=corp,DC=local",
            "attributes": {
                "name": "Domain Admins",
                "objectClass": ["top", "user", "group"],
                "sAMAccountName": "Domain Admins",
                "member": [
                    "CN=Administrator,CN=Users,DC=corp,DC=local",
                    "CN=Backup,CN=Users,DC=corp,DC=local"
                ]
            }
        },
        {
            "dn": "CN=WS01,CN=Computers,DC=corp,DC=local",
            "attributes": {"name": "WS01", "objectClass": ["top", "person", "user", "computer"]}
        },
        {
            "dn": "OU=Staff,DC=corp,DC=local",
            "attributes": {"objectClass": ["top", "organizationalUnit"]}
        }
    ])
}

fn row<'a>(page: &'a Element, dn: &str) -> &'a Element {
    page.find(|e| e.attr("data-dn") == Some(dn))
        .unwrap_or_else(|| panic!("no row for {dn}"))
}

fn subtree_count(page: &Element) -> usize {
    page.find_all(|e| e.has_class("subtree")).len()
}

#[tokio::test]
async fn roots_are_seeded_only_where_base_query_finds_something() {
    let server = MockServer::start().await;
    mount_domain_info(&server).await;
    mount_query(&server, ROOT, "BASE", ok(json!([{"dn": ROOT, "attributes": {"name": "corp"}}]))).await;
    mount_query(&server, "CN=Configuration,DC=corp,DC=local", "BASE", ok(json!([]))).await;
    mount_query(
        &server,
        "DC=DomainDnsZones,DC=corp,DC=local",
        "BASE",
        ok(json!({"dn": "DC=DomainDnsZones,DC=corp,DC=local", "attributes": {}})),
    )
    .await;
    mount_query(&server, "DC=ForestDnsZones,DC=corp,DC=local", "BASE", ok(Value::Null)).await;
    // Schema is left unmatched, so the backend answers 404.

    let console = console(&server);
    console.initialize().await.unwrap();

    let page = console.snapshot();
    let roots: Vec<_> = page.tree.roots().iter().map(|node| node.dn().to_string()).collect();
    assert_eq!(roots, vec![ROOT, "DC=DomainDnsZones,DC=corp,DC=local"]);

    let html = console.render_page();
    assert!(html.contains("<span id=\"domain-name\" class=\"font-semibold\">CORP</span>"));
}

#[tokio::test]
async fn roots_use_the_root_dn_exactly_as_reported() {
    let spaced = "DC=corp, DC=local";
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/get/domaininfo"))
        .respond_with(ok(json!({"root_dn": spaced, "domain": "corp.local", "flatName": "CORP"})))
        .mount(&server)
        .await;
    mount_query(&server, spaced, "BASE", ok(json!([{"dn": spaced, "attributes": {}}]))).await;
    mount_query(
        &server,
        "CN=Configuration,DC=corp, DC=local",
        "BASE",
        ok(json!([{"dn": "CN=Configuration,DC=corp, DC=local", "attributes": {}}])),
    )
    .await;

    let console = console(&server);
    console.initialize().await.unwrap();

    let roots: Vec<_> = console
        .snapshot()
        .tree
        .roots()
        .iter()
        .map(|node| node.dn().to_string())
        .collect();
    assert_eq!(roots, vec![spaced, "CN=Configuration,DC=corp, DC=local"]);
}

#[tokio::test]
async fn expand_collapse_and_expand_again_refetches() {
    let server = MockServer::start().await;
    mount_domain_info(&server).await;
    mount_query(&server, ROOT, "BASE", ok(json!([{"dn": ROOT, "attributes": {"name": "corp"}}]))).await;
    Mock::given(method("POST"))
        .and(path("/api/get/domainobject"))
        .and(body_json(json!({"searchbase": ROOT, "search_scope": "LEVEL"})))
        .respond_with(ok(domain_children()))
        .expect(2)
        .mount(&server)
        .await;

    let console = console(&server);
    console.initialize().await.unwrap();
    let root = NodePath::root(0);

    assert_eq!(console.click_node(&root).await, ClickOutcome::Expanded);
    let page = console.snapshot().render();
    assert_eq!(subtree_count(&page), 1);

    let admins = row(&page, "CN=Domain Admins,CN=Users,DC=corp,DC=local");
    assert!(admins.find(|e| e.has_class("fa-users")).is_some());
    let workstation = row(&page, "CN=WS01,CN=Computers,DC=corp,DC=local");
    assert!(workstation.find(|e| e.has_class("fa-desktop")).is_some());
    let staff = row(&page, "OU=Staff,DC=corp,DC=local");
    assert!(staff.find(|e| e.has_class("fa-building")).is_some());
    assert_eq!(staff.text_content(), "OU=Staff,DC=corp,DC=local");

    assert_eq!(console.click_node(&root).await, ClickOutcome::Collapsed);
    assert_eq!(subtree_count(&console.snapshot().render()), 0);

    assert_eq!(console.click_node(&root).await, ClickOutcome::Expanded);
    let page = console.snapshot().render();
    assert_eq!(subtree_count(&page), 1);
    assert_eq!(page.find_all(|e| e.attr("data-path").is_some()).len(), 4);
}

#[tokio::test]
async fn results_panel_links_reference_attributes_only() {
    let server = MockServer::start().await;
    mount_domain_info(&server).await;
    mount_query(&server, ROOT, "BASE", ok(json!([{"dn": ROOT, "attributes": {"name": "corp"}}]))).await;
    mount_query(&server, ROOT, "LEVEL", ok(domain_children())).await;
    let admins = "CN=Domain Admins,CN=Users,DC=corp,DC=local";
    let children = domain_children();
    mount_query(&server, admins, "BASE", ok(json!([children[0].clone()]))).await;
    mount_query(&server, admins, "LEVEL", ok(json!([]))).await;
    mount_query(
        &server,
        "CN=Administrator,CN=Users,DC=corp,DC=local",
        "BASE",
        ok(json!([{
            "dn": "CN=Administrator,CN=Users,DC=corp,DC=local",
            "attributes": {"name": "Administrator", "memberOf": [admins]}
        }])),
    )
    .await;

    let console = console(&server);
    console.initialize().await.unwrap();
    console.click_node(&NodePath::root(0)).await;
    assert_eq!(
        console.click_node(&NodePath::root(0).child(0)).await,
        ClickOutcome::Expanded
    );

    let page = console.snapshot().render();
    let results = page.find_by_id("results-panel").unwrap();
    let identities: Vec<_> = results
        .find_all(|e| e.has_class("ldap-link"))
        .iter()
        .filter_map(|a| a.attr("data-identity"))
        .collect();
    assert_eq!(
        identities,
        vec![
            "CN=Administrator,CN=Users,DC=corp,DC=local",
            "CN=Backup,CN=Users,DC=corp,DC=local"
        ]
    );
    assert!(results
        .render()
        .contains("CN=Administrator,CN=Users,DC=corp,DC=local</a><br><a"));
    assert!(!results.render().contains("data-identity=\"Domain Admins\""));

    assert!(console.follow_reference("CN=Administrator,CN=Users,DC=corp,DC=local").await);
    let page = console.snapshot().render();
    let details = page.find_by_id("details-panel").unwrap();
    assert!(!details.is_hidden());
    assert_eq!(
        details.find(|e| e.tag() == "h2").map(Element::text_content),
        Some("Administrator".to_string())
    );
}

#[tokio::test]
async fn latest_log_poll_deduplicates_and_prepends() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/logs"))
        .and(query_param("limit", "1"))
        .respond_with(ok(json!({"logs": [{
            "timestamp": "2024-05-01 10:00:03",
            "log_type": "SUCCESS",
            "debug_message": "Get-DomainUser -Identity Administrator"
        }]})))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/logs"))
        .respond_with(ok(json!({"logs": [
            {"timestamp": "2024-05-01 10:00:02", "log_type": "INFO", "debug_message": "Get-DomainGroup"},
            {"timestamp": "2024-05-01 10:00:01", "log_type": "WEIRD", "debug_message": "Get-DomainGPO"}
        ]})))
        .mount(&server)
        .await;

    let console = console(&server);
    assert!(console.toggle_command_history().await);
    assert_eq!(console.poll_latest_log().await, 1);
    assert_eq!(console.poll_latest_log().await, 0);

    let page = console.snapshot().render();
    let entries = page.find_by_id("command-history-entries").unwrap();
    let messages: Vec<_> = entries
        .find_all(|e| e.tag() == "code")
        .iter()
        .map(|code| code.text_content())
        .collect();
    assert_eq!(
        messages,
        vec!["Get-DomainUser -Identity Administrator", "Get-DomainGPO", "Get-DomainGroup"]
    );
    assert!(entries.find(|e| e.has_class("bg-gray-100")).is_some());
}

#[tokio::test]
async fn status_indicator_tracks_backend() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ok(json!({"status": "OK"})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let console = console(&server);
    assert_eq!(console.refresh_status().await, ConnectionState::Ok);
    let page = console.snapshot().render();
    let status = page.find_by_id("connection-status").unwrap();
    assert_eq!(status.text_content(), "Connection Status: OK");
    assert!(status.has_class("text-green-500"));

    assert_eq!(console.refresh_status().await, ConnectionState::Ko);
    let page = console.snapshot().render();
    let status = page.find_by_id("connection-status").unwrap();
    assert_eq!(status.text_content(), "Connection Status: KO");
    assert!(status.has_class("text-red-500"));
}

#[tokio::test]
async fn domain_info_failures_surface_alert_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/get/domaininfo"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "Not bound"})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/get/domaininfo"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let console = console(&server);
    let err = console.initialize().await.unwrap_err();
    console.report_error(&err);
    assert_eq!(console.snapshot().error_alert.message(), "Not bound");

    let err = console.initialize().await.unwrap_err();
    console.report_error(&err);
    let page = console.snapshot();
    assert_eq!(page.error_alert.message(), "HTTP error! status: 502");
    assert!(page.tree.roots().is_empty());
    assert!(!page.render().find(|e| e.attr("role") == Some("alert-error")).unwrap().is_hidden());
}
