use anyhow::Result;

use crate::cli::InputArgs;
use crate::splitter::{self, SplitPlan};

use super::load_inputs;

pub fn run(input: &InputArgs, json: bool) -> Result<()> {
    let (doc, names) = load_inputs(input)?;
    let plan = splitter::plan(&doc, &names, input.pages_per_file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print!("{}", render(&plan));
    }

    Ok(())
}

fn render(plan: &SplitPlan) -> String {
    let mut out = format!(
        "{} pages, {} per file: {} file(s)\n",
        plan.total_pages,
        plan.pages_per_file,
        plan.files.len()
    );

    for file in &plan.files {
        let pages = if file.chunk.first_page == file.chunk.last_page {
            file.chunk.first_page.to_string()
        } else {
            format!("{}-{}", file.chunk.first_page, file.chunk.last_page)
        };
        out.push_str(&format!(
            "{:>4}  {:<11} {}\n",
            file.chunk.index + 1,
            pages,
            file.file_name
        ));
    }

    for collision in &plan.collisions {
        let chunks: Vec<String> = collision
            .chunks
            .iter()
            .map(|i| (i + 1).to_string())
            .collect();
        out.push_str(&format!(
            "warning: files {} all resolve to {}; only the last is kept\n",
            chunks.join(", "),
            collision.file_name
        ));
    }

    out
}
