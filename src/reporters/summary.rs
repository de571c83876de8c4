//! One-line summary for CI logs

use super::Report;

pub fn render(report: &Report) -> String {
    let t = &report.totals;
    format!(
        "{}: {} services, {} resources | pattern {} | strategy {} ({}% confidence) | {} critical, {} error, {} warning, {} info\n",
        report.title,
        t.services,
        t.resources,
        report.primary_pattern,
        report.strategy,
        report.confidence,
        t.critical,
        t.errors,
        t.warnings,
        t.info
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_report;

    #[test]
    fn test_summary_is_one_line() {
        let line = render(&test_report());
        assert_eq!(line.lines().count(), 1);
        assert!(line.contains("2 services, 3 resources"));
        assert!(line.contains("pattern stateless"));
        assert!(line.contains("0 critical, 1 error, 0 warning, 0 info"));
    }
}
