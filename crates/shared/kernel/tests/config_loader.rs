use agora_domain::config::ApiConfig;
use agora_kernel::config::{load_config, load_config_with_env};
use std::collections::HashMap;
use std::io::Write;

fn write_toml(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn missing_default_file_falls_back_to_defaults() {
    let cfg: ApiConfig = load_config(None::<&str>).unwrap();
    assert_eq!(cfg.forums.page_size, 20);
    assert_eq!(cfg.forums.preview_length, 100);
}

#[test]
fn explicit_missing_file_is_an_error() {
    let result: Result<ApiConfig, _> = load_config(Some("/definitely/not/here.toml"));
    assert!(result.is_err());
}

#[test]
fn file_values_override_defaults() {
    let file = write_toml(
        r#"
        [server]
        port = 8080

        [forums]
        page_size = 5
        public_base_url = "https://forum.example"

        [[forums.seed]]
        slug = "rust"
        title = "Rust"
        "#,
    );

    let cfg: ApiConfig = load_config(Some(file.path())).unwrap();
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.forums.page_size, 5);
    assert_eq!(cfg.forums.public_base_url, "https://forum.example");
    assert_eq!(cfg.forums.seed.len(), 1);
    assert!(cfg.forums.seed[0].active);
    assert_eq!(cfg.session.cookie_name, "agora-session");
}

#[test]
fn environment_overrides_file() {
    let file = write_toml("[forums]\npage_size = 5\n");
    let env = HashMap::from([
        ("AGORA__FORUMS__PAGE_SIZE".to_owned(), "7".to_owned()),
        ("AGORA__SERVER__PORT".to_owned(), "9090".to_owned()),
    ]);

    let cfg: ApiConfig = load_config_with_env(Some(file.path()), Some(env)).unwrap();
    assert_eq!(cfg.forums.page_size, 7);
    assert_eq!(cfg.server.port, 9090);
}
