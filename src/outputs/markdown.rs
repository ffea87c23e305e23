//! Markdown rendering of a [`BatchReport`].

use super::BatchReport;
use crate::models::PerItemResult;
use crate::utils::{slugify_title, upcase};
use std::error::Error;
use std::fmt::Write;
use tokio::fs;
use tracing::{info, instrument};

/// Convert a report to a Markdown document.
///
/// The document opens with a table of contents linking to each headline,
/// followed by one section per item and the aggregate.
pub fn report_to_markdown(report: &BatchReport) -> String {
    let mut md = String::new();

    writeln!(md, "# {}\n", upcase(&report.query)).unwrap();
    writeln!(
        md,
        "_Generated {} ({} {})_\n",
        report.generated_at, report.local_date, report.local_time
    )
    .unwrap();

    if let Some(warning) = &report.fetch_warning {
        writeln!(md, "> **Error fetching news:** {}\n", warning).unwrap();
    }

    if report.results.is_empty() {
        writeln!(md, "No news items were found.\n").unwrap();
    } else {
        writeln!(md, "## Contents\n").unwrap();
        for r in &report.results {
            writeln!(
                md,
                "- [{}](#{})",
                r.item.title,
                slugify_title(&r.item.title)
            )
            .unwrap();
        }
        writeln!(md).unwrap();

        for r in &report.results {
            write_item(&mut md, r);
        }
    }

    let agg = &report.aggregate;
    writeln!(md, "## Overall news analysis\n").unwrap();
    writeln!(
        md,
        "{} of {} articles scored.\n",
        agg.count,
        report.results.len()
    )
    .unwrap();
    if !agg.is_empty() {
        writeln!(md, "| Measure | Sum |").unwrap();
        writeln!(md, "|---|---|").unwrap();
        writeln!(md, "| Positive | {:.2} |", agg.sum_positive).unwrap();
        writeln!(md, "| Neutral | {:.2} |", agg.sum_neutral).unwrap();
        writeln!(md, "| Negative | {:.2} |", agg.sum_negative).unwrap();
        writeln!(md, "| Compound | {:.4} |\n", agg.sum_compound).unwrap();
        writeln!(
            md,
            "Overall sentiment is **{}** (based on the summed compound score).",
            report.overall
        )
        .unwrap();
    }

    md
}

fn write_item(md: &mut String, r: &PerItemResult) {
    writeln!(md, "## {}\n", r.item.title).unwrap();
    if r.item.published_at.is_empty() {
        writeln!(md, "_{}_\n", r.item.source_name).unwrap();
    } else {
        writeln!(md, "_{}, {}_\n", r.item.source_name, r.item.published_at).unwrap();
    }

    match (&r.content, &r.score) {
        (Some(content), Some(score)) => {
            if let Some(image) = &content.lead_image_url {
                writeln!(md, "![{}]({})\n", r.item.title, image).unwrap();
            }
            if !content.summary.is_empty() {
                writeln!(md, "{}\n", content.summary).unwrap();
            }
            if !content.keywords.is_empty() {
                writeln!(md, "**Keywords:** {}\n", content.keywords.join(", ")).unwrap();
            }
            writeln!(
                md,
                "**Sentiment:** {:.2}% positive, {:.2}% neutral, {:.2}% negative, {} (compound {:.4})\n",
                score.positive * 100.0,
                score.neutral * 100.0,
                score.negative * 100.0,
                score.label(),
                score.compound
            )
            .unwrap();
        }
        _ => {
            if let Some(e) = &r.error {
                writeln!(md, "_Article unavailable: {}_\n", e).unwrap();
            }
        }
    }

    writeln!(md, "[Read more at {}]({})\n", r.item.source_name, r.item.link).unwrap();
}

/// Write the Markdown report to `{markdown_output_dir}/{date}_{stem}.md`.
#[instrument(level = "info", skip_all, fields(%markdown_output_dir))]
pub async fn write_report(
    report: &BatchReport,
    markdown_output_dir: &str,
) -> Result<String, Box<dyn Error>> {
    let path = format!(
        "{}/{}_{}.md",
        markdown_output_dir.trim_end_matches('/'),
        report.local_date,
        report.file_stem()
    );
    fs::write(&path, report_to_markdown(report)).await?;
    info!(%path, "Wrote Markdown report");
    Ok(path)
}
