//! `bale attributes` — list the attribute catalog.

use bale_core::attribute;

pub fn run() -> anyhow::Result<()> {
    print!("{}", render());
    Ok(())
}

fn render() -> String {
    let mut out = String::new();
    for attr in attribute::attributes() {
        let mut traits = Vec::new();
        if attr.file_patterns {
            traits.push("file patterns");
        }
        if attr.multi_platform {
            traits.push("per platform");
        }
        if attr.inherited {
            traits.push("inherited");
        }
        if traits.is_empty() {
            out.push_str(&format!("  {}\n", attr.name));
        } else {
            out.push_str(&format!("  {} ({})\n", attr.name, traits.join(", ")));
        }
    }
    out
}
