//! `bale lint` — run the full check battery over a manifest.

use std::path::Path;

use anyhow::{bail, Context};

use bale_core::platform::Platform;
use bale_core::specification::Document;
use bale_lint::{Linter, Results};

pub fn run(path: &Path, platform: Option<&str>, format: Option<&str>) -> anyhow::Result<()> {
    let doc =
        Document::load(path).with_context(|| format!("loading {}", path.display()))?;
    let linter = Linter::new(&doc);

    let results = match platform {
        Some(name) => {
            let platform: Platform = name.parse()?;
            let mut all = Results::new();
            for id in doc.all() {
                all.extend(linter.lint_one(id, platform));
            }
            all
        }
        None => linter.lint(),
    };

    match format {
        None | Some("human") => print!("{}", render_human(&results)),
        Some("json") => println!("{}", serde_json::to_string_pretty(&results)?),
        Some(other) => bail!("unknown format: {other} (expected human or json)"),
    }

    if results.error_count() > 0 {
        bail!(
            "{} error(s) found in {}",
            results.error_count(),
            path.display()
        );
    }
    Ok(())
}

fn render_human(results: &Results) -> String {
    let mut out = String::new();

    for diagnostic in results.iter() {
        out.push_str(&format!("  {diagnostic}\n"));
    }
    if !results.is_empty() {
        out.push('\n');
    }

    out.push_str(&format!(
        "Summary: {} diagnostic(s), {} error(s), {} warning(s)\n",
        results.len(),
        results.error_count(),
        results.warning_count()
    ));
    if results.error_count() == 0 {
        out.push_str("Lint: PASSED\n");
    } else {
        out.push_str("Lint: ISSUES FOUND\n");
    }

    out
}
