//! Per-file test cases.

use serde::{Deserialize, Serialize};

/// Identifier of a test case, unique within its owning file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TestCaseId(u64);

impl TestCaseId {
    /// Create an id from its raw value (hosts use this to address rows they rendered).
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the underlying numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Run status of a test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    /// The last result no longer matches the test definition.
    Pending,
    /// A run is in flight.
    Running,
    /// Actual output matched (or nothing was expected).
    Passed,
    /// Actual output differed from the expected output.
    Failed,
}

impl TestStatus {
    /// Whether this status is the outcome of a finished run.
    pub fn is_finished(self) -> bool {
        matches!(self, TestStatus::Passed | TestStatus::Failed)
    }
}

/// One input / expected-output pair plus the last run's result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// Identifier, unique within the file.
    pub id: TestCaseId,
    /// Program input.
    pub input: String,
    /// Expected output. `None` or empty means "anything passes".
    pub expected_output: Option<String>,
    /// Output produced by the last run.
    pub actual_output: Option<String>,
    /// Status of the last run; `None` if never run.
    pub status: Option<TestStatus>,
}

impl TestCase {
    fn blank(id: TestCaseId) -> Self {
        Self {
            id,
            input: String::new(),
            expected_output: Some(String::new()),
            actual_output: None,
            status: None,
        }
    }

    /// The expected output, if one is actually defined (non-empty).
    pub fn defined_expectation(&self) -> Option<&str> {
        self.expected_output.as_deref().filter(|s| !s.is_empty())
    }
}

/// Partial update of a test case's definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestCasePatch {
    /// New input, if changing.
    pub input: Option<String>,
    /// New expected output, if changing (`Some(None)` clears it).
    pub expected_output: Option<Option<String>>,
}

/// Ordered collection of test cases owned by one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCaseStore {
    cases: Vec<TestCase>,
    next_id: u64,
}

impl TestCaseStore {
    /// Store holding a single blank test case.
    pub fn with_blank() -> Self {
        let mut store = Self {
            cases: Vec::new(),
            next_id: 1,
        };
        store.add();
        store
    }

    /// Store holding a single test case with the given input and expectation.
    pub fn with_case(input: impl Into<String>, expected_output: Option<String>) -> Self {
        let mut store = Self::with_blank();
        if let Some(case) = store.cases.first_mut() {
            case.input = input.into();
            case.expected_output = expected_output;
        }
        store
    }

    /// Append a blank test case and return its id.
    pub fn add(&mut self) -> TestCaseId {
        let id = TestCaseId(self.next_id);
        self.next_id += 1;
        self.cases.push(TestCase::blank(id));
        id
    }

    /// Remove a test case. The last remaining case is kept; returns whether anything was removed.
    pub fn remove(&mut self, id: TestCaseId) -> bool {
        if self.cases.len() <= 1 {
            return false;
        }
        let before = self.cases.len();
        self.cases.retain(|case| case.id != id);
        self.cases.len() != before
    }

    /// Apply a definition patch. A finished result becomes [`TestStatus::Pending`] since it no
    /// longer describes the edited case. Returns `false` if `id` is unknown.
    pub fn update(&mut self, id: TestCaseId, patch: TestCasePatch) -> bool {
        let Some(case) = self.get_mut(id) else {
            return false;
        };

        let mut changed = false;
        if let Some(input) = patch.input
            && input != case.input
        {
            case.input = input;
            changed = true;
        }
        if let Some(expected) = patch.expected_output
            && expected != case.expected_output
        {
            case.expected_output = expected;
            changed = true;
        }
        if changed && case.status.is_some_and(TestStatus::is_finished) {
            case.status = Some(TestStatus::Pending);
        }
        true
    }

    /// Look up a test case.
    pub fn get(&self, id: TestCaseId) -> Option<&TestCase> {
        self.cases.iter().find(|case| case.id == id)
    }

    /// Look up a test case mutably.
    pub fn get_mut(&mut self, id: TestCaseId) -> Option<&mut TestCase> {
        self.cases.iter_mut().find(|case| case.id == id)
    }

    /// Whether a test case with `id` exists.
    pub fn contains(&self, id: TestCaseId) -> bool {
        self.get(id).is_some()
    }

    /// Number of test cases.
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Always `false` for stores built through the public constructors.
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Iterate test cases in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &TestCase> {
        self.cases.iter()
    }

    /// Iterate test cases mutably in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut TestCase> {
        self.cases.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_store_has_one_case() {
        let store = TestCaseStore::with_blank();
        assert_eq!(store.len(), 1);
        let case = store.iter().next().unwrap();
        assert_eq!(case.input, "");
        assert_eq!(case.expected_output.as_deref(), Some(""));
        assert_eq!(case.defined_expectation(), None);
        assert_eq!(case.status, None);
    }

    #[test]
    fn test_ids_are_generation_ordered_and_last_case_is_kept() {
        let mut store = TestCaseStore::with_blank();
        let b = store.add();
        let c = store.add();
        assert!(b < c);

        let ids: Vec<_> = store.iter().map(|c| c.id).collect();
        assert!(store.remove(ids[0]));
        assert!(store.remove(b));
        assert!(!store.remove(c));
        assert_eq!(store.len(), 1);
        assert!(!store.remove(TestCaseId::new(99)));
    }

    #[test]
    fn test_editing_finished_case_marks_pending() {
        let mut store = TestCaseStore::with_case("Alice", None);
        let id = store.iter().next().unwrap().id;
        store.get_mut(id).unwrap().status = Some(TestStatus::Passed);

        // Same value: nothing changes.
        store.update(
            id,
            TestCasePatch {
                input: Some("Alice".into()),
                ..Default::default()
            },
        );
        assert_eq!(store.get(id).unwrap().status, Some(TestStatus::Passed));

        store.update(
            id,
            TestCasePatch {
                input: Some("Bob".into()),
                ..Default::default()
            },
        );
        assert_eq!(store.get(id).unwrap().status, Some(TestStatus::Pending));
        assert!(!store.update(TestCaseId::new(42), TestCasePatch::default()));
    }
}
