//! Base Package Resolution Integration Tests
//!
//! Tests for resolving the packages to scan:
//! - Host defaults when nothing is configured
//! - Explicit packages with blank filtering and deduplication
//! - Package list files through classpath patterns
//! - Partial failure: unreadable files are skipped

mod common;

use common::{TestFixture, packages};
use serde_json::json;

// =============================================================================
// Defaults
// =============================================================================

#[test]
fn test_nothing_configured_returns_host_default() {
    let fixture = TestFixture::new();
    let autoconfig = fixture.autoconfig();

    let default = packages(&["com.example.app"]);
    assert_eq!(
        autoconfig.resolver().resolve_base_packages(default.clone()),
        default
    );
}

#[test]
fn test_empty_lists_count_as_unset() {
    let fixture = TestFixture::new()
        .with_property("mybatis.repositories-base-packages", json!([]))
        .with_property("mybatis.repositories-base-packages-file", json!([]));
    let autoconfig = fixture.autoconfig();

    assert_eq!(
        autoconfig
            .resolver()
            .resolve_base_packages(packages(&["com.default"])),
        packages(&["com.default"])
    );
}

// =============================================================================
// Explicit packages
// =============================================================================

#[test]
fn test_explicit_packages_replace_default() {
    let fixture = TestFixture::new().with_property(
        "mybatis.repositories-base-packages",
        json!(["com.a", "", "com.b", "com.a"]),
    );
    let autoconfig = fixture.autoconfig();

    assert_eq!(
        autoconfig
            .resolver()
            .resolve_base_packages(packages(&["com.default"])),
        packages(&["com.a", "com.b"])
    );
}

#[test]
fn test_comma_separated_packages() {
    let fixture =
        TestFixture::new().with_property("mybatis.repositories-base-packages", "com.a, com.b");
    let autoconfig = fixture.autoconfig();

    assert_eq!(
        autoconfig
            .resolver()
            .resolve_base_packages(packages(&[])),
        packages(&["com.a", "com.b"])
    );
}

// =============================================================================
// Package files
// =============================================================================

#[test]
fn test_package_file_lines_are_trimmed_and_deduplicated() {
    let fixture = TestFixture::new().with_property(
        "mybatis.repositories-base-packages-file",
        json!(["classpath:packages.txt"]),
    );
    fixture.write_file("packages.txt", "com.a\n\n  com.b  \ncom.a");
    let autoconfig = fixture.autoconfig();

    assert_eq!(
        autoconfig
            .resolver()
            .resolve_base_packages(packages(&["com.default"])),
        packages(&["com.a", "com.b"])
    );
}

#[test]
fn test_windows_line_endings() {
    let fixture = TestFixture::new().with_property(
        "mybatis.repositories-base-packages-file",
        "classpath:packages.txt",
    );
    fixture.write_file("packages.txt", "com.a\r\ncom.b\r\n");
    let autoconfig = fixture.autoconfig();

    assert_eq!(
        autoconfig.resolver().resolve_base_packages(packages(&[])),
        packages(&["com.a", "com.b"])
    );
}

#[test]
fn test_pattern_expands_to_several_files() {
    let fixture = TestFixture::new()
        .with_property("mybatis.repositories-base-packages", json!(["com.explicit"]))
        .with_property(
            "mybatis.repositories-base-packages-file",
            json!(["classpath:repositories/*.list"]),
        );
    fixture.write_file("repositories/orders.list", "com.shop.orders\n");
    fixture.write_file("repositories/users.list", "com.shop.users\ncom.shop.orders\n");
    fixture.write_file("repositories/ignored.txt", "com.never");
    let autoconfig = fixture.autoconfig();

    assert_eq!(
        autoconfig.resolver().resolve_base_packages(packages(&[])),
        packages(&["com.explicit", "com.shop.orders", "com.shop.users"])
    );
}

#[test]
fn test_pattern_without_matches_contributes_nothing() {
    let fixture = TestFixture::new()
        .with_property("mybatis.repositories-base-packages", json!(["com.a"]))
        .with_property(
            "mybatis.repositories-base-packages-file",
            json!(["classpath:none/*.list"]),
        );
    let autoconfig = fixture.autoconfig();

    assert_eq!(
        autoconfig.resolver().resolve_base_packages(packages(&[])),
        packages(&["com.a"])
    );
}

// =============================================================================
// Partial failure
// =============================================================================

#[test]
fn test_unreadable_file_does_not_block_others() {
    let fixture = TestFixture::new().with_property(
        "mybatis.repositories-base-packages-file",
        json!([
            "classpath:first.txt",
            "classpath:missing.txt",
            "classpath:binary.txt",
            "classpath:bad[pattern",
            "",
            "classpath:second.txt"
        ]),
    );
    fixture.write_file("first.txt", "com.first");
    fixture.write_file("binary.txt", [0xff_u8, 0xfe, 0xfd]);
    fixture.write_file("second.txt", "com.second");
    let autoconfig = fixture.autoconfig();

    assert_eq!(
        autoconfig.resolver().resolve_base_packages(packages(&[])),
        packages(&["com.first", "com.second"])
    );
}

#[test]
fn test_file_location_outside_classpath() {
    let fixture = TestFixture::new();
    let path = fixture.write_file("etc/packages.txt", "com.external");
    let fixture = fixture.with_property(
        "mybatis.repositories-base-packages-file",
        format!("file:{}", path.display()),
    );
    let autoconfig = fixture.autoconfig();

    assert_eq!(
        autoconfig.resolver().resolve_base_packages(packages(&[])),
        packages(&["com.external"])
    );
}
