//! End-to-end add-step: install on demand, create channels, start the app

mod helpers;

use helpers::*;
use jobforge::store::layout::Channel;
use jobforge::{OrchestratorError, ProcessKey};
use wiremock::MockServer;

#[tokio::test]
#[cfg(unix)]
async fn test_add_step_installs_and_starts_app() {
    let server = MockServer::start().await;
    mount_registry(
        &server,
        serde_json::json!([catalog_entry(&server, "csv-reader", "/csv-reader.zip")]),
    )
    .await;
    mount_zip(
        &server,
        "/csv-reader.zip",
        zip_with_executable("csv-reader.sh", "#!/bin/sh\nsleep 30\n"),
    )
    .await;

    let (_dir, forge) = orchestrator(&registry_url(&server));
    forge.add_job("Pipeline1").unwrap();

    let ordinal = forge.add_step("Pipeline1", "csv-reader").await.unwrap();
    assert_eq!(ordinal, 1);

    // app was installed through the catalog
    assert!(forge.store().app_installed("csv-reader"));

    // step directory carries all four channels
    let step = forge.store().find_step("Pipeline1", 1).unwrap();
    for channel in Channel::ALL {
        assert!(step.channel(channel).is_dir());
    }

    // the step's process is tracked
    let key = ProcessKey::step("Pipeline1", 1, "csv-reader");
    assert!(forge.supervisor().is_running(&key).await);

    // a second step reuses the installation and gets its own process
    let ordinal = forge.add_step("Pipeline1", "csv-reader").await.unwrap();
    assert_eq!(ordinal, 2);
    let key = ProcessKey::step("Pipeline1", 2, "csv-reader");
    assert!(forge.supervisor().is_running(&key).await);
}

#[tokio::test]
async fn test_add_step_surfaces_missing_executable() {
    let server = MockServer::start().await;
    mount_registry(
        &server,
        serde_json::json!([catalog_entry(&server, "docs-only", "/docs-only.zip")]),
    )
    .await;
    mount_zip(
        &server,
        "/docs-only.zip",
        zip_archive(&[("readme.txt", "no binary here")]),
    )
    .await;

    let (_dir, forge) = orchestrator(&registry_url(&server));
    forge.add_job("Pipeline1").unwrap();

    let result = forge.add_step("Pipeline1", "docs-only").await;
    assert!(matches!(
        result,
        Err(OrchestratorError::ExecutableNotFound(_))
    ));

    // install itself succeeded and the step remains for a later retry
    assert!(forge.store().app_installed("docs-only"));
    assert!(forge.store().find_step("Pipeline1", 1).is_ok());
}

#[tokio::test]
async fn test_add_step_with_unknown_app() {
    let server = MockServer::start().await;
    mount_registry(&server, serde_json::json!([])).await;

    let (_dir, forge) = orchestrator(&registry_url(&server));
    forge.add_job("Pipeline1").unwrap();

    assert!(matches!(
        forge.add_step("Pipeline1", "ghost").await,
        Err(OrchestratorError::DescriptorNotFound(_))
    ));
    // no step was created
    assert!(forge.list_jobs_and_steps().unwrap()[0].steps.is_empty());
}

#[tokio::test]
async fn test_add_step_when_registry_down() {
    let (_dir, forge) = orchestrator("http://127.0.0.1:1/appsRegistry.json");
    forge.add_job("Pipeline1").unwrap();

    assert!(matches!(
        forge.add_step("Pipeline1", "csv-reader").await,
        Err(OrchestratorError::RegistryUnavailable(_))
    ));
}
