use agora_domain::config::{ApiConfig, ForumsConfig, ServerConfig, SessionConfig};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let server = ServerConfig::default();
    assert_eq!(server.port, 4583);
    assert!(server.ssl.is_none());

    let session = SessionConfig::default();
    assert_eq!(session.cookie_name, "agora-session");

    let forums = ForumsConfig::default();
    assert_eq!(forums.page_size, 20);
    assert_eq!(forums.preview_length, 100);
    assert_eq!(forums.seed.len(), 1);
    assert_eq!(forums.seed[0].slug, "general");
}

#[test]
fn api_config_deserializes_partial_sections() {
    let raw = json!({
        "server": { "address": "::", "port": 8080 },
        "forums": {
            "page_size": 5,
            "public_base_url": "https://forums.example.com",
            "seed": [
                { "slug": "news", "title": "News" },
                { "slug": "archive", "title": "Archive", "active": false }
            ]
        }
    });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.forums.page_size, 5);
    assert_eq!(cfg.forums.preview_length, 100, "missing keys fall back to defaults");
    assert!(cfg.forums.seed[0].active);
    assert!(!cfg.forums.seed[1].active);
    assert_eq!(cfg.logging.level, "info");
}

#[test]
fn mutation_does_not_leak_into_clones() {
    let original = ApiConfig::default();
    let mut copy = original.clone();
    copy.forums.page_size = 3;

    assert_eq!(original.forums.page_size, 20);
    assert_eq!(copy.forums.page_size, 3);
}
