//! Shared fixtures: sample projects, JDK release files, and fake runtime
//! installations laid out on disk.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use native_build_helper::runtime::{
    StaticEnvironment, JAVA_HOME, JAVA_RUNTIME_NAME, JAVA_VENDOR, JAVA_VERSION, JAVA_VM_NAME,
    JAVA_VM_VERSION,
};

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

pub fn project_path(name: &str) -> PathBuf {
    fixtures_dir().join("projects").join(name)
}

pub fn release_fixture(name: &str) -> String {
    fs::read_to_string(fixtures_dir().join("releases").join(format!("{}.release", name)))
        .expect("release fixture")
}

pub fn make_executable(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"#!/bin/sh\n").unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }
}

/// A runtime installation under construction.
pub struct FakeJdk {
    pub home: PathBuf,
}

impl FakeJdk {
    pub fn new(home: PathBuf) -> Self {
        fs::create_dir_all(&home).unwrap();
        Self { home }
    }

    pub fn with_release(self, content: &str) -> Self {
        fs::write(self.home.join("release"), content).unwrap();
        self
    }

    pub fn with_image_tool(self) -> Self {
        make_executable(&self.image_tool_path());
        self
    }

    pub fn with_java(self) -> Self {
        make_executable(&self.home.join("bin").join("java"));
        self
    }

    pub fn with_modules(self) -> Self {
        let lib = self.home.join("lib");
        fs::create_dir_all(&lib).unwrap();
        fs::write(lib.join("modules"), b"").unwrap();
        self
    }

    pub fn image_tool_path(&self) -> PathBuf {
        self.home.join("bin").join("native-image")
    }

    pub fn home_str(&self) -> &str {
        self.home.to_str().unwrap()
    }

    /// Environment reporting this installation as `java.home`, with an
    /// empty `PATH` so only the installation itself is searched.
    pub fn environment(&self) -> StaticEnvironment {
        StaticEnvironment::new()
            .with_property(JAVA_HOME, self.home_str())
            .with_env("PATH", "")
    }
}

/// Identification strings of a stock OpenJDK build.
pub fn openjdk(env: StaticEnvironment) -> StaticEnvironment {
    env.with_property(JAVA_VENDOR, "Eclipse Adoptium")
        .with_property(JAVA_RUNTIME_NAME, "OpenJDK Runtime Environment")
        .with_property(JAVA_VM_NAME, "OpenJDK 64-Bit Server VM")
        .with_property(JAVA_VM_VERSION, "21.0.2+13-LTS")
        .with_property(JAVA_VERSION, "21.0.2")
}

/// Identification strings of GraalVM Community.
pub fn graalvm(env: StaticEnvironment) -> StaticEnvironment {
    env.with_property(JAVA_VENDOR, "GraalVM Community")
        .with_property(JAVA_RUNTIME_NAME, "OpenJDK Runtime Environment")
        .with_property(JAVA_VM_NAME, "OpenJDK 64-Bit Server VM")
        .with_property(JAVA_VM_VERSION, "21.0.2+13-jvmci-23.1-b30")
        .with_property(JAVA_VERSION, "21.0.2")
}
