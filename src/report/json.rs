//! Machine-readable rendering of a result tree.

use std::io::{self, Write};

use serde::Serialize;

use super::{ResultTree, Status, TestReporter, TestSummary};
use crate::outcome::Outcome;
use crate::test::ExecutionError;

#[derive(Serialize)]
struct NodeView<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    status: Status,
    #[serde(flatten)]
    body: BodyView<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum BodyView<'a> {
    Outcomes { outcomes: &'a [Outcome] },
    Error { error: &'a ExecutionError },
    Group { children: Vec<NodeView<'a>> },
}

impl<'a> NodeView<'a> {
    fn new(name: Option<&'a str>, tree: &'a ResultTree) -> Self {
        let body = match tree {
            ResultTree::Outcomes(outcomes) => BodyView::Outcomes { outcomes },
            ResultTree::Error(error) => BodyView::Error { error },
            ResultTree::Group(children) => BodyView::Group {
                children: children
                    .iter()
                    .map(|(name, child)| NodeView::new(Some(name), child))
                    .collect(),
            },
        };
        Self {
            name,
            status: tree.display_status(),
            body,
        }
    }
}

#[derive(Serialize)]
struct SummaryView {
    total: usize,
    passed: usize,
    failed: usize,
    errored: usize,
    warned: usize,
    assertions: usize,
    duration_secs: f64,
}

impl From<&TestSummary> for SummaryView {
    fn from(summary: &TestSummary) -> Self {
        Self {
            total: summary.total,
            passed: summary.passed,
            failed: summary.failed,
            errored: summary.errored,
            warned: summary.warned,
            assertions: summary.assertions,
            duration_secs: summary.duration.as_secs_f64(),
        }
    }
}

#[derive(Serialize)]
struct ReportView<'a> {
    summary: SummaryView,
    results: NodeView<'a>,
}

/// Writes one JSON document describing the whole run.
pub struct JsonReporter<W: Write> {
    out: W,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TestReporter for JsonReporter<W> {
    fn on_run_complete(&mut self, results: &ResultTree, summary: &TestSummary) -> io::Result<()> {
        let report = ReportView {
            summary: summary.into(),
            results: NodeView::new(None, results),
        };
        serde_json::to_writer_pretty(&mut self.out, &report).map_err(io::Error::other)?;
        writeln!(self.out)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use serde_json::Value as Json;

    use super::*;

    #[test]
    fn tree_shape_and_statuses() {
        let tree = ResultTree::group([(
            "/file".to_string(),
            ResultTree::group([
                ("ok".to_string(), ResultTree::Outcomes(vec![Outcome::pass_with_note("took 1ms")])),
                ("stopped".to_string(), ResultTree::Error(ExecutionError::new(0, "Error: boom"))),
                ("empty".to_string(), ResultTree::Outcomes(Vec::new())),
            ]),
        )]);
        let summary = TestSummary::from_tree(&tree, Duration::ZERO);
        let mut reporter = JsonReporter::new(Vec::new());
        reporter.on_run_complete(&tree, &summary).unwrap();
        let json: Json = serde_json::from_slice(&reporter.into_inner()).unwrap();

        assert_eq!(json["summary"]["total"], 3);
        assert_eq!(json["results"]["status"], "error");
        let file = &json["results"]["children"][0];
        assert_eq!(file["name"], "/file");
        assert_eq!(file["children"][0]["outcomes"][0]["note"], "took 1ms");
        assert_eq!(file["children"][1]["error"]["message"], "Error: boom");
        assert_eq!(file["children"][1]["error"]["assertion_index"], 0);
        assert_eq!(file["children"][2]["status"], "warning");
    }
}
