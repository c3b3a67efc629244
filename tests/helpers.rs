//! Test utility functions for jobforge

#![allow(dead_code)]

use jobforge::{Orchestrator, OrchestratorConfig, StateStore};
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Config rooted in a throwaway directory, pointed at a mock registry
pub fn test_config(data_dir: &Path, registry_url: &str) -> OrchestratorConfig {
    OrchestratorConfig {
        data_dir: data_dir.to_path_buf(),
        registry_url: registry_url.to_string(),
        poll_interval_secs: 1,
    }
}

/// Orchestrator over a fresh temp store; keep the TempDir alive
pub fn orchestrator(registry_url: &str) -> (TempDir, Orchestrator) {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path(), registry_url);
    let orchestrator = Orchestrator::new(&config);
    (dir, orchestrator)
}

/// Drop a schema file into an app's formats directory
pub fn publish_format(store: &StateStore, app: &str, file: &str, body: &str) {
    store.ensure_app_dirs(app).unwrap();
    std::fs::write(store.app_formats_dir(app).join(file), body).unwrap();
}

/// Build a zip archive of plain text files in memory
pub fn zip_archive(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut writer = zip::ZipWriter::new(std::io::Cursor::new(&mut buf));
        let options = zip::write::FileOptions::default();
        for (name, contents) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(contents.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }
    buf
}

/// Build a zip archive carrying one executable shell script
#[cfg(unix)]
pub fn zip_with_executable(name: &str, script: &str) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut writer = zip::ZipWriter::new(std::io::Cursor::new(&mut buf));
        let options = zip::write::FileOptions::default().unix_permissions(0o755);
        writer.start_file(name, options).unwrap();
        writer.write_all(script.as_bytes()).unwrap();
        writer.finish().unwrap();
    }
    buf
}

/// Serve a registry catalog document at `/appsRegistry.json`
pub async fn mount_registry(server: &MockServer, catalog: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/appsRegistry.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog))
        .mount(server)
        .await;
}

/// URL of the mounted registry document
pub fn registry_url(server: &MockServer) -> String {
    format!("{}/appsRegistry.json", server.uri())
}

/// Serve zip bytes at the given path
pub async fn mount_zip(server: &MockServer, zip_path: &str, bytes: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(zip_path))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(bytes))
        .mount(server)
        .await;
}

/// Catalog entry pointing its download at the mock server
pub fn catalog_entry(server: &MockServer, name: &str, zip_path: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "version": "1.0.0",
        "github": format!("https://github.com/example/{}", name),
        "zipDownload": format!("{}{}", server.uri(), zip_path),
    })
}
