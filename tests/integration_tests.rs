/// Integration tests for mrename
///
/// These tests run the library on real temporary directories and check the
/// resulting file layout and counts.
///
/// Test categories:
/// 1. Bulk rename workflows
/// 2. Bulk copy workflows
/// 3. Format hints
/// 4. Idempotence and collisions
use mrename::output::{Action, SummaryKind, summary_line};
use mrename::transfer::{
    Outcome, Report, TransferCounts, copy, copy_all, rename, rename_all, rename_one,
};
use mrename::{FormatHint, list_candidates};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

/// A temporary directory with helpers to create and inspect files.
struct TestFixture {
    temp_dir: TempDir,
}

impl TestFixture {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        TestFixture { temp_dir }
    }

    fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    fn create_text_file(&self, name: &str, content: &str) {
        fs::write(self.path().join(name), content).expect("Failed to write file");
    }

    fn create_files(&self, names: &[&str]) {
        for name in names {
            self.create_text_file(name, name);
        }
    }

    fn create_subdir(&self, name: &str) {
        fs::create_dir(self.path().join(name)).expect("Failed to create subdirectory");
    }

    fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path().join(name)).expect("Failed to read file")
    }

    fn assert_file_exists(&self, name: &str) {
        let path = self.path().join(name);
        assert!(path.is_file(), "File should exist: {}", path.display());
    }

    fn assert_file_not_exists(&self, name: &str) {
        let path = self.path().join(name);
        assert!(!path.exists(), "File should not exist: {}", path.display());
    }

    /// Sorted names of the direct children of the directory.
    fn entries(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.path())
            .expect("Failed to read directory")
            .flatten()
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }
}

fn counts(succeeded: usize, skipped: usize) -> TransferCounts {
    TransferCounts { succeeded, skipped }
}

// ============================================================================
// 1. Bulk rename workflows
// ============================================================================

#[test]
fn test_rename_mixed_directory() {
    let fixture = TestFixture::new();
    fixture.create_files(&["img003.png", "img7.png", "notes.txt", ".hidden"]);
    fixture.create_subdir("sub");

    let result = rename_all(fixture.path(), "photo", None).unwrap();

    assert_eq!(result, counts(2, 1));
    assert_eq!(
        fixture.entries(),
        vec![".hidden", "notes.txt", "photo03.png", "photo07.png", "sub"]
    );
    assert_eq!(fixture.read("photo03.png"), "img003.png");
    assert_eq!(fixture.read("photo07.png"), "img7.png");
}

#[test]
fn test_rename_counts_match_candidates() {
    let fixture = TestFixture::new();
    fixture.create_files(&[
        "a1.txt", "b2.txt", "c.txt", "photo5.txt", "d5.txt", "e100.txt", ".x1",
    ]);
    fixture.create_subdir("dir9");

    let candidates = list_candidates(fixture.path()).unwrap().len();
    let result = rename_all(fixture.path(), "photo", None).unwrap();

    assert_eq!(candidates, 6);
    assert_eq!(result.total(), candidates);
    assert_eq!(result.succeeded + result.skipped, result.total());
    // c.txt has no index and photo5.txt is already formatted.
    // d5.txt targets photo05.txt, which does not clash with photo5.txt.
    fixture.assert_file_exists("photo01.txt");
    fixture.assert_file_exists("photo02.txt");
    fixture.assert_file_exists("photo05.txt");
    fixture.assert_file_exists("photo100.txt");
    fixture.assert_file_exists("photo5.txt");
    fixture.assert_file_exists("c.txt");
    assert_eq!(result, counts(4, 2));
}

#[test]
fn test_rename_empty_directory() {
    let fixture = TestFixture::new();
    let result = rename_all(fixture.path(), "p", None).unwrap();
    assert_eq!(result, counts(0, 0));
    assert_eq!(SummaryKind::of(&result), SummaryKind::NoneProcessed);
}

#[test]
fn test_rename_dispatch_summary() {
    let fixture = TestFixture::new();
    fixture.create_files(&["a1.txt", "b.txt"]);

    let report = rename(fixture.path(), "p", None).unwrap();
    let Report::Bulk(result) = report else {
        panic!("expected a bulk report, got {report:?}");
    };
    assert_eq!(SummaryKind::of(&result), SummaryKind::Partial);
    assert!(summary_line(Action::Rename, &result).starts_with("2 files processed."));
}

// ============================================================================
// 2. Bulk copy workflows
// ============================================================================

#[test]
fn test_copy_all_leaves_sources_untouched() {
    let source = TestFixture::new();
    let dest = TestFixture::new();
    source.create_files(&["ep1.mkv", "ep2.mkv", "readme.md"]);

    let result = copy_all(source.path(), dest.path(), "show", None).unwrap();

    assert_eq!(result, counts(2, 1));
    assert_eq!(source.entries(), vec!["ep1.mkv", "ep2.mkv", "readme.md"]);
    assert_eq!(dest.entries(), vec!["show01.mkv", "show02.mkv"]);
    assert_eq!(dest.read("show02.mkv"), "ep2.mkv");
}

#[test]
fn test_copy_never_overwrites() {
    let source = TestFixture::new();
    let dest = TestFixture::new();
    source.create_files(&["img4.png", "img5.png"]);
    dest.create_text_file("p04.png", "keep me");

    let result = copy_all(source.path(), dest.path(), "p", None).unwrap();

    assert_eq!(result, counts(1, 1));
    assert_eq!(dest.read("p04.png"), "keep me");
    assert_eq!(dest.read("p05.png"), "img5.png");
}

#[test]
fn test_copy_twice_copies_nothing_new() {
    let source = TestFixture::new();
    let dest = TestFixture::new();
    source.create_files(&["img4.png", "img5.png"]);

    assert_eq!(
        copy_all(source.path(), dest.path(), "p", None).unwrap(),
        counts(2, 0)
    );
    assert_eq!(
        copy_all(source.path(), dest.path(), "p", None).unwrap(),
        counts(0, 2)
    );
}

#[test]
fn test_copy_single_file() {
    let source = TestFixture::new();
    let dest = TestFixture::new();
    source.create_text_file("track9.flac", "audio");

    let report = copy(&source.path().join("track9.flac"), dest.path(), "t", None).unwrap();

    assert_eq!(report, Report::Single(Outcome::Copied));
    assert_eq!(dest.read("t09.flac"), "audio");
}

// ============================================================================
// 3. Format hints
// ============================================================================

#[test]
fn test_hint_skips_leading_number() {
    let fixture = TestFixture::new();
    fixture.create_files(&["99scan_042.jpg"]);
    let hint = FormatHint::new("scan_{}.jpg").unwrap();

    let outcome = rename_one(&fixture.path().join("99scan_042.jpg"), "p", Some(&hint)).unwrap();

    assert_eq!(outcome, Outcome::Renamed);
    fixture.assert_file_exists("p42.jpg");
    fixture.assert_file_not_exists("99scan_042.jpg");
}

#[test]
fn test_hint_on_directory() {
    let fixture = TestFixture::new();
    fixture.create_files(&["2024_ep_3.mkv", "2024_ep_11.mkv", "2024_notes.txt"]);
    let hint = FormatHint::new("2024_ep_{}").unwrap();

    let result = rename_all(fixture.path(), "ep", Some(&hint)).unwrap();

    assert_eq!(result, counts(2, 1));
    fixture.assert_file_exists("ep03.mkv");
    fixture.assert_file_exists("ep11.mkv");
    fixture.assert_file_exists("2024_notes.txt");
}

// ============================================================================
// 4. Idempotence and collisions
// ============================================================================

#[test]
fn test_second_rename_is_noop() {
    let fixture = TestFixture::new();
    fixture.create_files(&["img003.png", "img7.png", "notes.txt"]);

    assert_eq!(
        rename_all(fixture.path(), "photo", None).unwrap(),
        counts(2, 1)
    );
    let after_first = fixture.entries();

    assert_eq!(
        rename_all(fixture.path(), "photo", None).unwrap(),
        counts(0, 3)
    );
    assert_eq!(fixture.entries(), after_first);
}

#[test]
fn test_rename_collision_keeps_both_files() {
    let fixture = TestFixture::new();
    fixture.create_files(&["a3.txt", "b03.txt"]);

    let result = rename_all(fixture.path(), "p", None).unwrap();

    // Whichever file is listed first takes p03.txt; the other is skipped.
    assert_eq!(result, counts(1, 1));
    fixture.assert_file_exists("p03.txt");
    assert_eq!(fixture.entries().len(), 2);
}

#[test]
fn test_multi_part_extension_keeps_last_suffix() {
    let fixture = TestFixture::new();
    fixture.create_files(&["backup_7.tar.gz"]);

    rename_all(fixture.path(), "b", None).unwrap();

    fixture.assert_file_exists("b07.gz");
}
