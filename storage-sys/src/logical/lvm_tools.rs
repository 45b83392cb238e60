use serde::Deserialize;
use serde_json::{Map, Value};
use storage_types::{LvmEntry, LvmKind, Unit};
use tracing::debug;

use crate::runner::{CommandRunner, render};
use crate::{Result, SysError};

/// `{"report": [{"pv": [...]}]}` as printed with `--reportformat json`.
#[derive(Debug, Deserialize)]
struct ReportEnvelope {
    report: Vec<Map<String, Value>>,
}

/// Check a `--units` argument: exactly one unit letter, no multiplier.
pub fn validate_unit(unit: &str) -> Result<Unit> {
    Ok(unit.parse()?)
}

/// Check a filter keyword (`pv`/`pvs`, `vg`/`vgs`, `lv`/`lvs`).
pub fn validate_filter(filter: &str) -> Result<LvmKind> {
    Ok(filter.parse()?)
}

pub fn report_args(unit: Unit) -> Vec<String> {
    vec![
        "--units".to_string(),
        unit.to_string(),
        "--reportformat".to_string(),
        "json".to_string(),
    ]
}

/// Extract the rows for `kind` from a report envelope, verbatim.
pub fn parse_report(output: &str, kind: LvmKind) -> Result<Vec<LvmEntry>> {
    let malformed = |reason: String| SysError::MalformedOutput {
        probe: kind.command().to_string(),
        reason,
    };

    let envelope: ReportEnvelope =
        serde_json::from_str(output).map_err(|e| malformed(e.to_string()))?;

    let section = envelope
        .report
        .into_iter()
        .next()
        .ok_or_else(|| malformed("empty report list".to_string()))?;

    let rows = section
        .get(kind.report_key())
        .cloned()
        .ok_or_else(|| malformed(format!("report has no '{}' array", kind.report_key())))?;

    serde_json::from_value(rows).map_err(|e| malformed(e.to_string()))
}

/// Run the reporting command for `kind` and parse its rows.
///
/// Unlike the optional object probes, a failure here is fatal: the section
/// is the whole point of the request.
pub fn query_lvm<R: CommandRunner>(
    runner: &R,
    program: &str,
    kind: LvmKind,
    unit: Unit,
) -> Result<Vec<LvmEntry>> {
    let args = report_args(unit);
    let output = runner.run(program, &args)?;

    if !output.success() {
        return Err(SysError::ProbeFailed {
            probe: render(program, &args),
            code: output.exit_code,
            stderr: output.stderr.trim().to_string(),
        });
    }

    let entries = parse_report(&output.stdout, kind)?;
    debug!("{} reported {} rows", kind.command(), entries.len());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PVS: &str = r#"  {
      "report": [
          {
              "pv": [
                  {"pv_name":"/dev/sdb1", "vg_name":"data", "pv_fmt":"lvm2", "pv_attr":"a--", "pv_size":"<1.75t", "pv_free":"158.49g"},
                  {"pv_name":"/dev/sdc1", "vg_name":"", "pv_fmt":"lvm2", "pv_attr":"---", "pv_size":"100.00g", "pv_free":"100.00g"}
              ]
          }
      ]
  }
"#;

    #[test]
    fn parses_pv_rows_verbatim() {
        let rows = parse_report(PVS, LvmKind::Pv).expect("parse");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["pv_size"], "<1.75t");
        assert_eq!(rows[1]["vg_name"], "");

        let columns: Vec<&str> = rows[0].keys().map(String::as_str).collect();
        assert_eq!(
            columns,
            vec!["pv_name", "vg_name", "pv_fmt", "pv_attr", "pv_size", "pv_free"]
        );
    }

    #[test]
    fn parses_lv_example() {
        let rows = parse_report(
            r#"{"report":[{"lv":[{"lv_name":"root","lv_size":"20.00g"}]}]}"#,
            LvmKind::Lv,
        )
        .expect("parse");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["lv_name"], "root");
        assert_eq!(rows[0]["lv_size"], "20.00g");
    }

    #[test]
    fn empty_class_is_an_empty_list() {
        let rows = parse_report(r#"{"report":[{"vg":[]}]}"#, LvmKind::Vg).expect("parse");
        assert!(rows.is_empty());
    }

    #[test]
    fn rejects_mismatched_or_broken_envelopes() {
        for output in [
            "not json",
            r#"{"report":[]}"#,
            r#"{"rows":[]}"#,
            r#"{"report":[{"vg":[]}]}"#,
            r#"{"report":[{"pv":[{"pv_name":1}]}]}"#,
        ] {
            let error = parse_report(output, LvmKind::Pv).expect_err(output);
            assert!(
                matches!(error, SysError::MalformedOutput { ref probe, .. } if probe == "pvs"),
                "{output}: {error}"
            );
        }
    }

    #[test]
    fn validates_units_and_filters() {
        assert!(validate_unit("G").is_ok());
        assert!(validate_unit("m").is_ok());
        assert!(validate_unit("r").is_ok());
        assert!(matches!(validate_unit("3M"), Err(SysError::InvalidUnit(_))));
        assert!(matches!(validate_unit("Gg"), Err(SysError::InvalidUnit(_))));
        assert!(matches!(validate_unit("x"), Err(SysError::InvalidUnit(_))));

        assert_eq!(validate_filter("lvs").expect("lvs"), LvmKind::Lv);
        assert!(matches!(
            validate_filter("all"),
            Err(SysError::InvalidFilter(_))
        ));
    }

    #[test]
    fn embeds_unit_and_format_in_arguments() {
        let unit = validate_unit("g").expect("unit");
        assert_eq!(
            report_args(unit),
            vec!["--units", "g", "--reportformat", "json"]
        );
    }
}
