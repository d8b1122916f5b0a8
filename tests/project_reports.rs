//! Reports over a loaded project: sources, helper settings and a fake runtime.

mod fixtures;

use std::fs;
use std::path::Path;

use fixtures::{graalvm, openjdk, release_fixture, FakeJdk};
use native_build_helper::config::ConfigOrigin;
use native_build_helper::runtime::{EnvironmentValidator, RuntimeDetector};
use native_build_helper::{
    BuildDetail, BuildOverview, ContextOptions, EnvironmentCheck, ExitCode, NativeBuildConfig,
    ProjectContext, RunnerCheck,
};
use tempfile::TempDir;

fn project_with_properties(dir: &Path) {
    fs::copy(
        fixtures::project_path("basic").join("gradle.properties"),
        dir.join("gradle.properties"),
    )
    .unwrap();
}

fn options(dir: &Path) -> ContextOptions {
    ContextOptions {
        project_dir: dir.to_path_buf(),
        user_config: Some(dir.join("missing-user-settings.toml")),
        ..Default::default()
    }
}

#[test]
fn test_overview_flags_override_mismatch() {
    let dir = TempDir::new().unwrap();
    project_with_properties(dir.path());

    let mut opts = options(dir.path());
    opts.defines = vec!["quarkus.native.enabled=false".to_string()];
    let ctx = ProjectContext::load(&opts).unwrap();

    let overview = BuildOverview::collect(&ctx.resolver());
    assert!(overview.has_mismatch());

    let human = overview.to_human();
    assert!(human.contains("quarkus.native.enabled: Mismatch: System=disabled, Local=enabled"));
    assert!(human.contains("quarkus.package.jar.enabled: Enabled"));
    assert!(human.contains(
        "Builder Image: quay.io/quarkus/ubi-quarkus-mandrel-builder-image:jdk-21"
    ));
}

#[test]
fn test_detail_with_graalvm_installation() {
    let dir = TempDir::new().unwrap();
    project_with_properties(dir.path());
    let ctx = ProjectContext::load(&options(dir.path())).unwrap();

    let jdk = FakeJdk::new(dir.path().join("graalvm-21"))
        .with_release(&release_fixture("graalvm"))
        .with_java()
        .with_image_tool();
    let validator = EnvironmentValidator::new(graalvm(jdk.environment()));

    let detail = BuildDetail::collect(&ctx.resolver(), &validator, &ctx.settings.settings);
    assert!(detail.environment_valid);
    assert_eq!(detail.image_tool.path, Some(jdk.image_tool_path()));

    let human = detail.to_human();
    assert!(human.contains("Native Image Memory: 6g"));
    assert!(human.contains("Native JVM Type: GraalVM"));
    assert!(human.contains(&format!("Java Home: {}", jdk.home_str())));
}

#[test]
fn test_check_reports_remediation_for_plain_jdk() {
    let root = TempDir::new().unwrap();
    let jdk = FakeJdk::new(root.path().join("jdk")).with_release(&release_fixture("temurin"));
    let detector = RuntimeDetector::new(openjdk(jdk.environment()));

    let check = EnvironmentCheck::collect(&detector);
    assert!(!check.ready);
    assert!(check
        .release_highlights
        .iter()
        .any(|h| h.key == "IMPLEMENTOR" && h.value == "Eclipse Adoptium"));

    let human = check.to_human();
    assert!(human.contains("To enable native builds:"));
    assert!(human.contains("native-image --version"));
}

#[test]
fn test_settings_layers_and_config_report() {
    let dir = TempDir::new().unwrap();
    let user = dir.path().join("user-helper.toml");
    fs::write(&user, "[native]\nimage_xmx = \"6g\"\n").unwrap();
    fs::create_dir_all(dir.path().join(".nbh")).unwrap();
    fs::write(
        dir.path().join(".nbh").join("helper.toml"),
        "[native]\ncontainer_build = true\n",
    )
    .unwrap();

    let mut opts = options(dir.path());
    opts.user_config = Some(user);
    opts.settings = vec!["native.image_xmx=8g".to_string()];
    let ctx = ProjectContext::load(&opts).unwrap();

    let origins: Vec<ConfigOrigin> = ctx.settings.sources.iter().map(|s| s.origin).collect();
    assert_eq!(
        origins,
        vec![
            ConfigOrigin::Builtin,
            ConfigOrigin::User,
            ConfigOrigin::Project,
            ConfigOrigin::Cli
        ]
    );

    let detector = RuntimeDetector::new(openjdk(
        FakeJdk::new(dir.path().join("jdk")).environment(),
    ));
    let config = NativeBuildConfig::collect(&ctx.settings, &detector);
    assert_eq!(config.settings.native.image_xmx, "8g");
    assert!(config.settings.native.container_build);

    let human = config.to_human();
    assert!(human.contains("Native Image Memory: 8g"));
    assert!(human.contains("Native JVM Type: Unknown"));
}

#[test]
fn test_validation_can_be_disabled_in_settings() {
    let dir = TempDir::new().unwrap();
    let mut opts = options(dir.path());
    opts.settings = vec!["validation.validate_native_environment=false".to_string()];

    let ctx = ProjectContext::load(&opts).unwrap();
    assert!(!ctx.validation_enabled());
}

#[test]
fn test_invalid_project_settings_file() {
    let dir = TempDir::new().unwrap();
    let settings = dir.path().join("custom.toml");
    fs::write(&settings, "[native]\nnative_only = true\nenabled = false\n").unwrap();

    let mut opts = options(dir.path());
    opts.config = Some(settings);
    let err = ProjectContext::load(&opts).unwrap_err();
    assert_eq!(err.exit_code(), ExitCode::Config);
    assert!(err.to_string().contains("native_only"));
}

#[test]
fn test_runner_uses_local_version() {
    let dir = TempDir::new().unwrap();
    let project = dir.path().join("greeting-app");
    fs::create_dir_all(project.join("build")).unwrap();
    project_with_properties(&project);
    fs::write(
        project.join("build").join("greeting-app-1.0.0-SNAPSHOT-runner"),
        vec![0u8; 2048],
    )
    .unwrap();

    let ctx = ProjectContext::load(&options(&project)).unwrap();
    let check = RunnerCheck::check(ctx.project_dir(), None, None, &ctx.local);
    assert!(check.found);
    assert_eq!(check.name, "greeting-app");
    assert_eq!(check.version, "1.0.0-SNAPSHOT");
    assert!(check.to_human().contains("Size: 0.00 MB"));

    let missing = RunnerCheck::check(ctx.project_dir(), None, Some("9.9.9"), &ctx.local);
    assert!(!missing.found);
}
