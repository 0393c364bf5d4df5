//! Mock execution of a file against its test cases.
//!
//! Nothing is compiled or interpreted. [`MockExecutionEngine`] looks for the language's fixed
//! greeting statement in the source and produces a canned transcript; anything else "runs
//! successfully". The engine is a fixture for driving the pass/fail UI.
//!
//! A run has two halves so the host can put a delay between them:
//! [`RunSnapshot::capture`] freezes what is being run, [`RunSnapshot::evaluate`] produces the
//! per-test results later.

use crate::files::CodeFile;
use crate::test_cases::{TestCaseId, TestStatus};
use ide_core_lang::Language;

/// Output produced when the source has no recognizable greeting.
pub const FALLBACK_OUTPUT: &str = "Program executed successfully";

/// Produces program output for a given source and input.
pub trait ExecutionEngine {
    /// Run `source` written in `language` with `input` on stdin and return its output.
    fn execute(&self, language: Language, source: &str, input: &str) -> String;
}

/// Substring-matching stand-in for real execution.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockExecutionEngine;

impl ExecutionEngine for MockExecutionEngine {
    fn execute(&self, language: Language, source: &str, input: &str) -> String {
        if !source.contains(language.greeting_marker()) {
            return FALLBACK_OUTPUT.to_string();
        }

        let name = input.trim();
        let mut output = String::from("Hello, World!\n");
        if !name.is_empty() {
            match language {
                Language::Cpp => output.push_str(&format!("Enter your name: Hello, {name}!")),
                Language::Python => output.push_str(&format!("Hello, {name}!\n")),
                Language::JavaScript => output.push_str(&format!("Hello, {name}!")),
            }
        }
        output.trim().to_string()
    }
}

/// Compare an actual output against an optional expectation.
///
/// An undefined or empty expectation always passes; otherwise both sides are trimmed and must
/// match exactly.
pub fn judge(actual: &str, expected: Option<&str>) -> TestStatus {
    match expected.filter(|e| !e.is_empty()) {
        Some(expected) if actual.trim() == expected.trim() => TestStatus::Passed,
        Some(_) => TestStatus::Failed,
        None => TestStatus::Passed,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CapturedCase {
    id: TestCaseId,
    input: String,
    expected_output: Option<String>,
}

/// Frozen view of a file at the moment its run started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSnapshot {
    language: Language,
    source: String,
    cases: Vec<CapturedCase>,
}

/// Result of one test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestOutcome {
    /// Test case the outcome belongs to.
    pub id: TestCaseId,
    /// Output produced by the engine.
    pub actual_output: String,
    /// Pass/fail verdict.
    pub status: TestStatus,
}

impl RunSnapshot {
    /// Capture the file's language, source and test definitions.
    pub fn capture(file: &CodeFile) -> Self {
        Self {
            language: file.language,
            source: file.source.clone(),
            cases: file
                .test_cases
                .iter()
                .map(|case| CapturedCase {
                    id: case.id,
                    input: case.input.clone(),
                    expected_output: case.expected_output.clone(),
                })
                .collect(),
        }
    }

    /// Evaluate every captured test case independently.
    pub fn evaluate(&self, engine: &dyn ExecutionEngine) -> Vec<TestOutcome> {
        self.cases
            .iter()
            .map(|case| {
                let actual_output = engine.execute(self.language, &self.source, &case.input);
                let status = judge(&actual_output, case.expected_output.as_deref());
                TestOutcome {
                    id: case.id,
                    actual_output,
                    status,
                }
            })
            .collect()
    }
}
