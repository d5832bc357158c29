//! Interactive HTML chart grid
//!
//! Each group becomes a Chart.js bar chart. The complete chart sits alone on
//! the first row and package charts share the second; without a complete
//! chart every chart shares one row.

use std::fs;
use std::path::Path;

use serde::Serialize;

use super::{chart_title, X_LABEL, Y_LABEL};
use crate::error::{GraphError, Result};
use crate::group::Group;

#[derive(Serialize)]
struct ChartData {
    id: String,
    title: String,
    labels: Vec<String>,
    ratios: Vec<f64>,
}

/// Grid rows in display order
pub fn layout_rows<'g, 'a>(groups: &'g [Group<'a>]) -> Vec<Vec<&'g Group<'a>>> {
    match groups.split_first() {
        None => Vec::new(),
        Some((first, rest)) if first.is_complete() => {
            let mut rows = vec![vec![first]];
            if !rest.is_empty() {
                rows.push(rest.iter().collect());
            }
            rows
        }
        Some(_) => vec![groups.iter().collect()],
    }
}

pub(super) fn write_html(groups: &[Group<'_>], path: &Path) -> Result<()> {
    let html = render_html(groups)?;
    fs::write(path, html).map_err(|err| GraphError::io(path, err))
}

/// Full HTML page for `groups`
pub fn render_html(groups: &[Group<'_>]) -> Result<String> {
    let mut charts = Vec::with_capacity(groups.len());
    let mut grid = String::new();

    for row in layout_rows(groups) {
        grid.push_str(&format!(
            "        <div class=\"chart-row\" style=\"grid-template-columns: repeat({}, 1fr);\">\n",
            row.len()
        ));
        for group in row {
            let id = format!("chart-{}", charts.len());
            grid.push_str(&format!(
                "            <div class=\"chart-container\"><canvas id=\"{}\"></canvas></div>\n",
                id
            ));
            charts.push(ChartData {
                id,
                title: chart_title(&group.kind),
                labels: group.records.iter().map(|r| r.path.clone()).collect(),
                ratios: group.records.iter().map(|r| r.ratio).collect(),
            });
        }
        grid.push_str("        </div>\n");
    }

    if charts.is_empty() {
        grid.push_str("        <p class=\"empty\">No coverage records to chart.</p>\n");
    }

    // "</" inside a script block would end it early
    let data = serde_json::to_string(&charts)
        .map_err(GraphError::render)?
        .replace("</", "<\\/");

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Code Coverage</title>
    <script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            background: #f5f5f5;
            padding: 20px;
            margin: 0;
        }}
        .chart-row {{
            display: grid;
            gap: 20px;
            margin-bottom: 20px;
        }}
        .chart-container {{
            position: relative;
            height: 500px;
            background: white;
            border-radius: 8px;
            padding: 20px;
        }}
        .empty {{
            color: #666;
        }}
    </style>
</head>
<body>
    <div class="grid">
{grid}    </div>
    <script>
        const charts = {data};
        for (const chart of charts) {{
            new Chart(document.getElementById(chart.id), {{
                type: 'bar',
                data: {{
                    labels: chart.labels,
                    datasets: [{{
                        label: '{y_label}',
                        data: chart.ratios,
                        backgroundColor: 'rgba(102, 126, 234, 0.6)',
                        borderColor: '#667eea',
                        borderWidth: 1
                    }}]
                }},
                options: {{
                    responsive: true,
                    maintainAspectRatio: false,
                    plugins: {{
                        legend: {{ display: false }},
                        title: {{ display: true, text: chart.title }}
                    }},
                    scales: {{
                        x: {{ title: {{ display: true, text: '{x_label}' }} }},
                        y: {{
                            beginAtZero: true,
                            max: 100,
                            title: {{ display: true, text: '{y_label}' }}
                        }}
                    }}
                }}
            }});
        }}
    </script>
</body>
</html>
"#,
        grid = grid,
        data = data,
        x_label = X_LABEL,
        y_label = Y_LABEL,
    ))
}
