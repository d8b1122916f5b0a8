//! Runtime detection and the native build gate against on-disk installations.

mod fixtures;

use fixtures::{graalvm, openjdk, release_fixture, FakeJdk};
use native_build_helper::runtime::{
    EnvironmentValidator, RuntimeClassification, RuntimeDetector, StaticEnvironment,
    ValidationOutcome, JAVA_VENDOR, JAVA_VM_VERSION, NO_RELEASE_FILE,
};
use tempfile::TempDir;

#[test]
fn test_graalvm_with_tool_is_valid() {
    let root = TempDir::new().unwrap();
    let jdk = FakeJdk::new(root.path().join("graalvm-community-21"))
        .with_release(&release_fixture("graalvm"))
        .with_image_tool();

    let validator = EnvironmentValidator::new(graalvm(jdk.environment()));
    assert!(validator.validate().is_ok());
    assert_eq!(
        validator.detector().classify(),
        RuntimeClassification::GraalVm
    );
}

#[test]
fn test_mandrel_vendor_without_release_file() {
    let root = TempDir::new().unwrap();
    let jdk = FakeJdk::new(root.path().join("jdk")).with_image_tool();
    let env = jdk
        .environment()
        .with_property(JAVA_VENDOR, "Eclipse Mandrel 23.1");

    let detector = RuntimeDetector::new(&env);
    assert!(detector.is_mandrel());
    assert!(!detector.is_graalvm());
    assert_eq!(detector.classify(), RuntimeClassification::Mandrel);
    assert_eq!(detector.snapshot().release_content, NO_RELEASE_FILE);

    assert!(EnvironmentValidator::new(&env).validate().is_ok());
}

#[test]
fn test_mandrel_recognised_from_release_file_only() {
    let root = TempDir::new().unwrap();
    let jdk = FakeJdk::new(root.path().join("jdk-21"))
        .with_release(&release_fixture("mandrel"))
        .with_image_tool();

    let env = openjdk(jdk.environment()).with_property(JAVA_VENDOR, "Red Hat, Inc.");
    let detector = RuntimeDetector::new(&env);
    assert!(detector.is_mandrel());
    assert!(!detector.snapshot().mandrel_in_path);
    assert!(EnvironmentValidator::new(&env).evaluate().is_valid());
}

#[test]
fn test_mandrel_recognised_from_installation_path() {
    let root = TempDir::new().unwrap();
    let jdk = FakeJdk::new(root.path().join("mandrel-java21-23.1.2.0-Final"));

    let detector = RuntimeDetector::new(openjdk(jdk.environment()));
    assert!(detector.is_mandrel());
    assert!(detector.snapshot().mandrel_in_path);
}

#[test]
fn test_plain_jdk_with_modules_is_not_native_capable() {
    let root = TempDir::new().unwrap();
    let jdk = FakeJdk::new(root.path().join("temurin").join("jdk-21"))
        .with_release(&release_fixture("temurin"))
        .with_modules()
        .with_image_tool();

    let validator = EnvironmentValidator::new(openjdk(jdk.environment()));
    let err = validator.validate().unwrap_err();
    let payload = err.payload();
    assert!(!payload.native_capable);
    assert!(payload.image_tool_available);
    assert_eq!(payload.classification, RuntimeClassification::Unknown);
    assert!(payload.info.release_content.contains("Temurin"));
}

#[test]
fn test_capable_runtime_without_tool_fails() {
    let root = TempDir::new().unwrap();
    let jdk = FakeJdk::new(root.path().join("graalvm-ce")).with_release(&release_fixture("graalvm"));

    let err = EnvironmentValidator::new(graalvm(jdk.environment()))
        .validate()
        .unwrap_err();
    assert!(err.payload().native_capable);
    assert!(!err.payload().image_tool_available);
    assert_eq!(err.payload().classification, RuntimeClassification::GraalVm);

    let message = err.to_string();
    assert!(message.contains("GraalVM detected"));
    assert!(message.contains("Native Image: Not available"));
    assert!(message.contains("GRAALVM_VERSION=\"23.1.2\""));
}

#[test]
fn test_tool_found_on_path_outside_installation() {
    let root = TempDir::new().unwrap();
    let jdk = FakeJdk::new(root.path().join("graalvm"));
    let bin = root.path().join("tools").join("bin");
    fixtures::make_executable(&bin.join("native-image"));

    let env = graalvm(jdk.environment()).with_env(
        "PATH",
        format!("/nonexistent/bin:{}", bin.display()),
    );
    let detector = RuntimeDetector::new(&env);
    assert_eq!(
        detector.locate_image_tool(),
        Some(bin.join("native-image"))
    );
    assert!(EnvironmentValidator::new(&env).validate().is_ok());
}

#[test]
fn test_nothing_detected_failure_payload() {
    let env = StaticEnvironment::new()
        .with_property(JAVA_VENDOR, "Eclipse Adoptium")
        .with_env("PATH", "/nonexistent/a:/nonexistent/b");

    match EnvironmentValidator::new(&env).evaluate() {
        ValidationOutcome::Invalid(invalid) => {
            assert_eq!(invalid.classification, RuntimeClassification::Unknown);
            assert!(!invalid.image_tool_available);
            assert!(!invalid.detection.graalvm);
            assert!(!invalid.detection.mandrel);
            assert!(!invalid.detection.native_capable);
            assert!(!invalid.detection.image_tool_available);
            assert_eq!(invalid.info.vendor.as_deref(), Some("Eclipse Adoptium"));
            assert!(invalid.info.java_home.is_none());
        }
        ValidationOutcome::Valid => panic!("Expected invalid outcome"),
    }
}

#[test]
fn test_graalvm_takes_precedence_over_mandrel() {
    let env = StaticEnvironment::new()
        .with_property(JAVA_VENDOR, "GraalVM Community")
        .with_property(JAVA_VM_VERSION, "21.0.2+13-mandrel");
    let detector = RuntimeDetector::new(env);
    assert!(detector.is_graalvm());
    assert!(detector.is_mandrel());
    assert_eq!(detector.classify(), RuntimeClassification::GraalVm);
}

#[test]
fn test_failure_payload_serializes() {
    let root = TempDir::new().unwrap();
    let jdk = FakeJdk::new(root.path().join("jdk")).with_release(&release_fixture("temurin"));

    let err = EnvironmentValidator::new(openjdk(jdk.environment()))
        .validate()
        .unwrap_err();
    let json: serde_json::Value = serde_json::from_str(&err.to_json().unwrap()).unwrap();

    assert_eq!(json["classification"], "Unknown");
    assert_eq!(json["info"]["vendor"], "Eclipse Adoptium");
    assert_eq!(json["info"]["java_home"], jdk.home_str());
    for key in ["graalvm", "mandrel", "native_capable", "image_tool_available"] {
        assert_eq!(json["detection"][key], false, "{}", key);
    }
}
