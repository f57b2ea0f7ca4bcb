//! Recognises Kotlin and Java test sources by path.

use std::sync::LazyLock;

use regex::RegexSet;

/// Path patterns that mark a file as a test; any single match suffices.
const TEST_FILE_PATTERNS: [&str; 8] = [
    r"^.*Test\.kt$",
    r"^.*Test\.java$",
    r"^.*Tests\.kt$",
    r"^.*Tests\.java$",
    r"^.*/test/.*\.kt$",
    r"^.*/test/.*\.java$",
    r"^.*/androidTest/.*\.kt$",
    r"^.*/androidTest/.*\.java$",
];

#[expect(
    clippy::expect_used,
    reason = "the patterns are fixed literals covered by unit tests"
)]
static TEST_FILES: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new(TEST_FILE_PATTERNS).expect("test file patterns should compile")
});

/// Returns true when `path` looks like a unit or instrumentation test.
///
/// # Example
///
/// ```
/// use prscout::scan::is_test_file;
///
/// assert!(is_test_file("app/src/test/java/com/example/FooTest.java"));
/// assert!(!is_test_file("app/src/main/java/com/example/Foo.java"));
/// ```
#[must_use]
pub fn is_test_file(path: &str) -> bool {
    TEST_FILES.is_match(path)
}
