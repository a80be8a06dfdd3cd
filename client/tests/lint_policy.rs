//! Guardrail for the workspace lint policy the client opts into.
//!
//! Clippy enforces the lints themselves; these checks keep the levels from
//! being relaxed in the manifests.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use camino::Utf8PathBuf;
use globaldorm_client::test_support::cap_fs::read_file_to_string;
use rstest::{fixture, rstest};

fn read_manifest(relative: &str) -> String {
    let path = Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative);
    read_file_to_string(&path).expect("read manifest")
}

fn lint_level<'a>(manifest: &'a str, lint: &str) -> Option<&'a str> {
    manifest.lines().find_map(|line| {
        let (name, level) = line.split_once('=')?;
        (name.trim() == lint).then_some(level.trim().trim_matches('"'))
    })
}

#[fixture]
fn workspace_manifest() -> String {
    read_manifest("../Cargo.toml")
}

#[rstest]
#[case("shadow_reuse")]
#[case("shadow_same")]
#[case("shadow_unrelated")]
#[case("must_use_candidate")]
#[case("missing_const_for_fn")]
#[case("expect_used")]
#[case("unwrap_used")]
#[case("missing_docs")]
fn strict_lints_stay_denied(workspace_manifest: String, #[case] lint: &str) {
    assert_eq!(lint_level(&workspace_manifest, lint), Some("deny"), "{lint}");
}

#[rstest]
fn unsafe_code_stays_forbidden(workspace_manifest: String) {
    assert_eq!(lint_level(&workspace_manifest, "unsafe_code"), Some("forbid"));
}

#[test]
fn client_inherits_workspace_lints() {
    let manifest = read_manifest("Cargo.toml");
    assert!(manifest.contains("[lints]\nworkspace = true"));
}
