//! Test discovery and concurrent execution of a test tree.

use futures::FutureExt;
use futures::future::{BoxFuture, join_all};
use thiserror::Error;

use crate::report::ResultTree;
use crate::test::Test;

/// Tests arranged the way they were registered: directories containing files containing tests.
#[derive(Debug, Clone)]
pub enum TestTree {
    Tests(Vec<Test>),
    Group(Vec<(String, TestTree)>),
}

impl TestTree {
    pub fn test_count(&self) -> usize {
        match self {
            TestTree::Tests(tests) => tests.len(),
            TestTree::Group(children) => children.iter().map(|(_, child)| child.test_count()).sum(),
        }
    }

    /// Keep tests whose name, or any enclosing group name, contains `keyword`. Empty groups are dropped.
    pub fn filter(&self, keyword: &str) -> TestTree {
        self.filtered(keyword, false).unwrap_or(TestTree::Group(Vec::new()))
    }

    fn filtered(&self, keyword: &str, enclosing_match: bool) -> Option<TestTree> {
        let kept = match self {
            TestTree::Tests(tests) => TestTree::Tests(
                tests
                    .iter()
                    .filter(|test| enclosing_match || test.name().contains(keyword))
                    .cloned()
                    .collect(),
            ),
            TestTree::Group(children) => TestTree::Group(
                children
                    .iter()
                    .filter_map(|(name, child)| {
                        let matched = enclosing_match || name.contains(keyword);
                        child.filtered(keyword, matched).map(|child| (name.clone(), child))
                    })
                    .collect(),
            ),
        };
        (kept.test_count() > 0).then_some(kept)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
    #[error("invalid test path '{0}'")]
    InvalidPath(String),
    #[error("'{0}' is registered both as a test file and as a directory")]
    Conflict(String),
}

/// Produces the tree of tests to run.
pub trait TestDiscovery {
    fn discover(&self) -> Result<TestTree, DiscoveryError>;
}

/// Registers tests under slash-separated paths, e.g. `type-specific/collections/array`.
///
/// The last path segment names a test file; the segments before it name directories. Each segment becomes a
/// group named `/segment`. Paths without tests are pruned.
#[derive(Debug, Clone, Default)]
pub struct SuiteBuilder {
    entries: Vec<(String, Vec<Test>)>,
}

impl SuiteBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, path: impl Into<String>, tests: Vec<Test>) -> Self {
        self.entries.push((path.into(), tests));
        self
    }
}

impl TestDiscovery for SuiteBuilder {
    fn discover(&self) -> Result<TestTree, DiscoveryError> {
        let mut root = Vec::new();
        for (path, tests) in &self.entries {
            let segments: Vec<&str> = path.split('/').filter(|segment| !segment.is_empty()).collect();
            if segments.is_empty() {
                return Err(DiscoveryError::InvalidPath(path.clone()));
            }
            insert(&mut root, &segments, tests.clone(), path)?;
        }
        let tree = TestTree::Group(root);
        tracing::debug!(tests = tree.test_count(), "discovered tests");
        Ok(prune(tree).unwrap_or(TestTree::Group(Vec::new())))
    }
}

fn insert(
    level: &mut Vec<(String, TestTree)>,
    segments: &[&str],
    tests: Vec<Test>,
    path: &str,
) -> Result<(), DiscoveryError> {
    let Some((first, rest)) = segments.split_first() else {
        return Err(DiscoveryError::InvalidPath(path.to_string()));
    };
    let name = format!("/{first}");
    let position = match level.iter().position(|(existing, _)| *existing == name) {
        Some(position) => position,
        None => {
            let node = if rest.is_empty() {
                TestTree::Tests(Vec::new())
            } else {
                TestTree::Group(Vec::new())
            };
            level.push((name, node));
            level.len() - 1
        }
    };
    match (&mut level[position].1, rest.is_empty()) {
        (TestTree::Tests(existing), true) => {
            existing.extend(tests);
            Ok(())
        }
        (TestTree::Group(children), false) => insert(children, rest, tests, path),
        _ => Err(DiscoveryError::Conflict(path.to_string())),
    }
}

fn prune(tree: TestTree) -> Option<TestTree> {
    match tree {
        TestTree::Tests(tests) if tests.is_empty() => None,
        TestTree::Tests(tests) => Some(TestTree::Tests(tests)),
        TestTree::Group(children) => {
            let children: Vec<_> = children
                .into_iter()
                .filter_map(|(name, child)| prune(child).map(|child| (name, child)))
                .collect();
            (!children.is_empty()).then_some(TestTree::Group(children))
        }
    }
}

/// Run every test in `tree` and collect results in the same shape.
///
/// Siblings run concurrently; results keep registration order. Repeated test names within a file are suffixed
/// (` (2)`, ` (3)`, ...) so no result is lost.
pub fn run_tree(tree: &TestTree) -> BoxFuture<'_, ResultTree> {
    async move {
        match tree {
            TestTree::Tests(tests) => {
                let runs = join_all(tests.iter().map(|test| test.run())).await;
                ResultTree::group(
                    tests
                        .iter()
                        .map(|test| test.name().to_string())
                        .zip(runs.into_iter().map(ResultTree::from)),
                )
            }
            TestTree::Group(children) => {
                let results = join_all(children.iter().map(|(_, child)| run_tree(child))).await;
                ResultTree::group(children.iter().map(|(name, _)| name.clone()).zip(results))
            }
        }
    }
    .boxed()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::assertion::Assert;
    use crate::report::Status;

    fn passing(name: &str) -> Test {
        Test::new(name, |e| {
            e.expect(1).to_be(1);
            Ok(())
        })
    }

    fn names(tree: &TestTree) -> Vec<String> {
        match tree {
            TestTree::Tests(tests) => tests.iter().map(|t| t.name().to_string()).collect(),
            TestTree::Group(children) => children
                .iter()
                .flat_map(|(name, child)| names(child).into_iter().map(move |n| format!("{name}{n}")))
                .collect(),
        }
    }

    #[test]
    fn paths_become_nested_groups() {
        let tree = SuiteBuilder::new()
            .register("type-specific/number", vec![passing("a")])
            .register("type-specific/collections/array", vec![passing("b")])
            .register("arithmetic", vec![passing("c")])
            .register("type-specific/number", vec![passing("d")])
            .register("empty", Vec::new())
            .discover()
            .unwrap();
        assert_eq!(tree.test_count(), 4);
        assert_eq!(
            names(&tree),
            [
                "/type-specific/numbera",
                "/type-specific/numberd",
                "/type-specific/collections/arrayb",
                "/arithmeticc"
            ]
        );
    }

    #[test]
    fn conflicting_paths_are_rejected() {
        let result = SuiteBuilder::new()
            .register("dir/file", vec![passing("a")])
            .register("dir", vec![passing("b")])
            .discover();
        assert_eq!(result.unwrap_err(), DiscoveryError::Conflict("dir".to_string()));
        let result = SuiteBuilder::new().register("//", vec![passing("a")]).discover();
        assert!(matches!(result, Err(DiscoveryError::InvalidPath(_))));
    }

    #[test]
    fn filter_matches_tests_and_groups() {
        let tree = SuiteBuilder::new()
            .register("math/add", vec![passing("sum"), passing("carry")])
            .register("text/upper", vec![passing("sum of chars")])
            .discover()
            .unwrap();
        assert_eq!(tree.filter("sum").test_count(), 2);
        assert_eq!(tree.filter("/math").test_count(), 2);
        assert_eq!(tree.filter("nothing").test_count(), 0);
    }

    #[tokio::test]
    async fn results_mirror_the_tree() {
        let tree = SuiteBuilder::new()
            .register("dir/file", vec![passing("same"), passing("same")])
            .register("other", vec![Test::new("stops", |_| anyhow::bail!("boom"))])
            .discover()
            .unwrap();
        let results = run_tree(&tree).await;
        assert_eq!(results.status(), Status::Error);
        let file = results.get("/dir").and_then(|dir| dir.get("/file")).unwrap();
        assert!(file.get("same").is_some());
        assert!(file.get("same (2)").is_some());
        assert_eq!(file.status(), Status::Pass);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn siblings_run_concurrently() {
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let tests = (0..4)
            .map(|index| {
                let (running, peak) = (Arc::clone(&running), Arc::clone(&peak));
                Test::new_async(format!("t{index}"), move |e| {
                    let (running, peak) = (Arc::clone(&running), Arc::clone(&peak));
                    async move {
                        let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                        peak.fetch_max(now, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(50)).await;
                        running.fetch_sub(1, Ordering::SeqCst);
                        e.expect(true).to_be(true);
                        Ok(())
                    }
                })
            })
            .collect();
        let tree = TestTree::Tests(tests);
        let results = run_tree(&tree).await;
        assert_eq!(results.status(), Status::Pass);
        assert!(peak.load(Ordering::SeqCst) > 1);
    }
}
