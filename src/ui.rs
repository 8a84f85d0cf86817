use crate::filter::JobStatusFilter;
use crate::models::{DashboardResponse, InventoryQuery, InventoryRecord, JobRecord, TrendKind};
use crate::summary::{CHART_HEIGHT, CHART_WIDTH, MARGIN_BOTTOM, MARGIN_TOP, MARGIN_X, PlotPoint};
use reqwest::Url;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Inventory,
    Jobs,
}

impl Page {
    const ALL: [Page; 3] = [Page::Dashboard, Page::Inventory, Page::Jobs];

    fn href(self) -> &'static str {
        match self {
            Self::Dashboard => "/",
            Self::Inventory => "/inventory",
            Self::Jobs => "/jobs",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Inventory => "Inventory",
            Self::Jobs => "Projects",
        }
    }
}

pub struct InventoryView<'a> {
    /// `None` while the rows could not be loaded.
    pub items: Option<Vec<&'a InventoryRecord>>,
    pub models: Vec<String>,
    pub locations: Vec<String>,
    pub query: &'a InventoryQuery,
    pub editing: Option<i64>,
    pub alert: Option<String>,
}

pub struct JobsView<'a> {
    pub all: Option<&'a [JobRecord]>,
    pub visible: Vec<&'a JobRecord>,
    pub status: JobStatusFilter,
    pub search: &'a str,
    pub alert: Option<String>,
}

pub fn render_dashboard(dashboard: Option<&DashboardResponse>, kind: TrendKind) -> String {
    let body = match dashboard {
        Some(dashboard) => {
            let metrics = &dashboard.metrics;
            let mut body = String::new();
            body.push_str(r#"<section class="panel">"#);
            body.push_str(&stat_card("Revenue", &format_money(metrics.revenue), "accent"));
            body.push_str(&stat_card("Profit", &format_money(metrics.profit), "accent"));
            body.push_str(&stat_card("Total jobs", &metrics.total_jobs.to_string(), ""));
            body.push_str(&stat_card("Finished", &metrics.finished_jobs.to_string(), "ok"));
            body.push_str(&stat_card("In progress", &metrics.in_progress_jobs.to_string(), "warn"));
            body.push_str(&stat_card("Units in stock", &metrics.inventory_units.to_string(), ""));
            body.push_str(&stat_card("Stock value", &format_money(metrics.inventory_value), ""));
            body.push_str("</section>");

            body.push_str(r#"<section class="card"><div class="card-header"><div>"#);
            let _ = write!(
                body,
                r#"<h2>{}</h2><p class="subtitle">Last {} days, total {}.</p></div>"#,
                kind.title(),
                dashboard.trend.labels.len(),
                format_trend_value(kind, dashboard.trend.total)
            );
            body.push_str(r#"<nav class="tabs">"#);
            for tab in TrendKind::ALL {
                let _ = write!(
                    body,
                    r#"<a class="tab{}" href="/?trend={}">{}</a>"#,
                    if tab == kind { " active" } else { "" },
                    tab.as_str(),
                    tab.title()
                );
            }
            body.push_str("</nav></div>");
            body.push_str(&render_line_chart(&dashboard.trend.labels, &dashboard.trend.points));
            body.push_str("</section>");
            body
        }
        None => loading_notice(),
    };

    render_page(Page::Dashboard, &body, None)
}

pub fn render_inventory(view: &InventoryView<'_>) -> String {
    let mut body = String::new();

    body.push_str(r#"<section class="card"><div class="card-header"><h2>Inventory</h2>"#);
    body.push_str(r#"<form class="filters" method="get" action="/inventory">"#);
    body.push_str(&select_box("model", "All models", &view.models, &view.query.model));
    body.push_str(&select_box("location", "All locations", &view.locations, &view.query.location));
    let _ = write!(
        body,
        r#"<input type="search" name="q" placeholder="Search parts" value="{}" /><button type="submit">Filter</button></form></div>"#,
        escape_html(&view.query.q)
    );

    body.push_str(r#"<form class="add-form" method="post" action="/inventory">"#);
    body.push_str(&inventory_inputs(None));
    body.push_str(r#"<button type="submit">Add item</button></form>"#);

    match &view.items {
        None => body.push_str(&loading_notice()),
        Some(items) => {
            body.push_str(
                r#"<div class="table-wrap"><table><thead><tr><th>Model</th><th>Part</th><th>SKU</th><th>Color</th><th>Location</th><th>Qty</th><th>Part cost</th><th>Shipping</th><th>Added</th><th>Actions</th></tr></thead><tbody>"#,
            );
            if items.is_empty() {
                body.push_str(r#"<tr><td colspan="10" class="empty">No items found.</td></tr>"#);
            }
            for item in items {
                if view.editing == Some(item.id) {
                    body.push_str(&inventory_edit_row(item));
                } else {
                    body.push_str(&inventory_row(item));
                }
            }
            body.push_str("</tbody></table></div>");
        }
    }
    body.push_str("</section>");

    render_page(Page::Inventory, &body, view.alert.as_deref())
}

fn inventory_row(item: &InventoryRecord) -> String {
    format!(
        r#"<tr><td>{model}</td><td>{part}</td><td>{sku}</td><td>{color}</td><td>{location}</td><td>{quantity}</td><td>{cost}</td><td>{shipping}</td><td>{added}</td><td class="actions"><a class="btn" href="/inventory?edit={id}">Edit</a><form method="post" action="/inventory/{id}/delete"><button class="danger" type="submit">Delete</button></form></td></tr>"#,
        model = escape_html(&item.model),
        part = escape_html(&item.part_name),
        sku = escape_html(item.sku.as_deref().unwrap_or("-")),
        color = escape_html(item.color.as_deref().unwrap_or("-")),
        location = escape_html(item.location.as_deref().unwrap_or("-")),
        quantity = item.quantity,
        cost = item.part_cost.map(format_money).unwrap_or_else(|| "-".to_string()),
        shipping = item.shipping_cost.map(format_money).unwrap_or_else(|| "-".to_string()),
        added = item
            .added_at
            .map(|at| at.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string()),
        id = item.id,
    )
}

fn inventory_edit_row(item: &InventoryRecord) -> String {
    format!(
        r#"<tr class="editing"><td colspan="10"><form class="add-form" method="post" action="/inventory/{id}">{inputs}<button type="submit">Save</button><a class="btn" href="/inventory">Cancel</a></form></td></tr>"#,
        id = item.id,
        inputs = inventory_inputs(Some(item)),
    )
}

fn inventory_inputs(item: Option<&InventoryRecord>) -> String {
    let text = |value: Option<&str>| escape_html(value.unwrap_or_default());
    let number = |value: Option<f64>| value.map(|value| value.to_string()).unwrap_or_default();

    format!(
        r#"<input name="model" placeholder="Model" required value="{model}" /><input name="part_name" placeholder="Part name" required value="{part}" /><input name="sku" placeholder="SKU" value="{sku}" /><input name="color" placeholder="Color" value="{color}" /><input name="location" placeholder="Location" value="{location}" /><input name="quantity" type="number" min="0" step="1" placeholder="Quantity" required value="{quantity}" /><input name="part_cost" type="number" min="0" step="0.01" placeholder="Part cost" value="{cost}" /><input name="shipping_cost" type="number" min="0" step="0.01" placeholder="Shipping cost" value="{shipping}" />"#,
        model = text(item.map(|item| item.model.as_str())),
        part = text(item.map(|item| item.part_name.as_str())),
        sku = text(item.and_then(|item| item.sku.as_deref())),
        color = text(item.and_then(|item| item.color.as_deref())),
        location = text(item.and_then(|item| item.location.as_deref())),
        quantity = item.map(|item| item.quantity.to_string()).unwrap_or_default(),
        cost = number(item.and_then(|item| item.part_cost)),
        shipping = number(item.and_then(|item| item.shipping_cost)),
    )
}

pub fn render_jobs(view: &JobsView<'_>) -> String {
    let mut body = String::new();

    if let Some(all) = view.all {
        let finished = all.iter().filter(|job| job.finished).count();
        body.push_str(r#"<section class="panel">"#);
        body.push_str(&stat_card("Total jobs", &all.len().to_string(), ""));
        body.push_str(&stat_card("Finished", &finished.to_string(), "ok"));
        body.push_str(&stat_card("In progress", &(all.len() - finished).to_string(), "warn"));
        body.push_str("</section>");
    }

    body.push_str(r#"<section class="card"><div class="card-header"><h2>Job Tracker</h2><nav class="tabs">"#);
    for status in JobStatusFilter::ALL {
        let _ = write!(
            body,
            r#"<a class="tab{}" href="{}">{}</a>"#,
            if status == view.status { " active" } else { "" },
            escape_html(&jobs_link(status, view.search)),
            status.label()
        );
    }
    body.push_str("</nav></div>");

    let _ = write!(
        body,
        r#"<form class="filters" method="get" action="/jobs"><input type="hidden" name="status" value="{}" /><input type="search" name="q" placeholder="Search parts used" value="{}" /><button type="submit">Search</button></form>"#,
        view.status.as_str(),
        escape_html(view.search)
    );

    body.push_str(
        r#"<form class="add-form" method="post" action="/jobs"><input name="part_used" placeholder="Part Used" required /><input name="job_length_days" type="number" min="0" step="1" placeholder="Job Length (days)" required /><input name="sale_price" type="number" min="0" step="0.01" placeholder="Sale Price" required /><button type="submit">Add Job</button></form>"#,
    );

    match view.all {
        None => body.push_str(&loading_notice()),
        Some(_) => {
            body.push_str(
                r#"<div class="table-wrap"><table><thead><tr><th>Created</th><th>Part Used</th><th>Job Length</th><th>Sale Price</th><th>Status</th><th>Actions</th></tr></thead><tbody>"#,
            );
            if view.visible.is_empty() {
                body.push_str(r#"<tr><td colspan="6" class="empty">No jobs found.</td></tr>"#);
            }
            for job in &view.visible {
                body.push_str(&job_row(job));
            }
            body.push_str("</tbody></table></div>");
        }
    }
    body.push_str("</section>");

    render_page(Page::Jobs, &body, view.alert.as_deref())
}

fn job_row(job: &JobRecord) -> String {
    let (badge, badge_class, toggle) = if job.finished {
        ("Finished", "ok", "Undo")
    } else {
        ("In Progress", "warn", "Mark Finished")
    };
    format!(
        r#"<tr class="{row_class}"><td>{created}</td><td>{part}</td><td>{length} days</td><td>{price}</td><td><span class="badge {badge_class}">{badge}</span></td><td class="actions"><form method="post" action="/jobs/{id}/toggle"><button type="submit">{toggle}</button></form><form method="post" action="/jobs/{id}/delete"><button class="danger" type="submit">Delete</button></form></td></tr>"#,
        row_class = if job.finished { "done" } else { "" },
        created = job
            .created_at
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string()),
        part = escape_html(&job.part_used),
        length = job.job_length_days,
        price = job.sale_price.map(format_money).unwrap_or_else(|| "-".to_string()),
        id = job.id,
    )
}

/// SVG polyline over the summarizer's points, in the same viewBox the points
/// were computed for.
pub fn render_line_chart(labels: &[String], points: &[PlotPoint]) -> String {
    if points.is_empty() {
        return format!(
            r#"<svg class="chart" viewBox="0 0 {CHART_WIDTH} {CHART_HEIGHT}" role="img"><text class="chart-label" x="50%" y="50%" text-anchor="middle">No data yet</text></svg>"#
        );
    }

    let mut svg = format!(r#"<svg class="chart" viewBox="0 0 {CHART_WIDTH} {CHART_HEIGHT}" role="img">"#);
    let baseline = CHART_HEIGHT - MARGIN_BOTTOM;
    for y in [MARGIN_TOP, baseline] {
        let _ = write!(
            svg,
            r#"<line class="chart-grid" x1="{MARGIN_X}" y1="{y}" x2="{}" y2="{y}" />"#,
            CHART_WIDTH - MARGIN_X
        );
    }

    let path = points
        .iter()
        .map(|point| format!("{:.2},{:.2}", point.x, point.y))
        .collect::<Vec<_>>()
        .join(" ");
    let _ = write!(svg, r#"<polyline class="chart-line" points="{path}" />"#);

    let label_every = if points.len() > 8 { 2 } else { 1 };
    for (index, point) in points.iter().enumerate() {
        let _ = write!(
            svg,
            r#"<circle class="chart-point" cx="{:.2}" cy="{:.2}" r="4" />"#,
            point.x, point.y
        );
        if index % label_every == 0 {
            if let Some(label) = labels.get(index) {
                let _ = write!(
                    svg,
                    r#"<text class="chart-label" x="{:.2}" y="{:.2}" text-anchor="middle">{}</text>"#,
                    point.x,
                    baseline + 18.0,
                    escape_html(label)
                );
            }
        }
    }
    svg.push_str("</svg>");
    svg
}

fn stat_card(label: &str, value: &str, tone: &str) -> String {
    format!(
        r#"<div class="stat"><span class="label">{}</span><span class="value {}">{}</span></div>"#,
        escape_html(label),
        tone,
        escape_html(value)
    )
}

fn select_box(name: &str, placeholder: &str, options: &[String], selected: &str) -> String {
    let mut html = format!(r#"<select name="{name}"><option value="">{placeholder}</option>"#);
    for option in options {
        let _ = write!(
            html,
            r#"<option value="{value}"{selected}>{value}</option>"#,
            value = escape_html(option),
            selected = if option == selected { " selected" } else { "" }
        );
    }
    html.push_str("</select>");
    html
}

fn loading_notice() -> String {
    r#"<p class="loading">Loading...</p>"#.to_string()
}

fn render_page(active: Page, body: &str, alert: Option<&str>) -> String {
    let mut nav = String::new();
    for page in Page::ALL {
        let _ = write!(
            nav,
            r#"<a class="{}" href="{}">{}</a>"#,
            if page == active { "active" } else { "" },
            page.href(),
            page.title()
        );
    }

    let alert = alert.map(render_alert).unwrap_or_default();

    PAGE_HTML
        .replace("{{TITLE}}", active.title())
        .replace("{{NAV}}", &nav)
        .replace("{{ALERT}}", &alert)
        .replace("{{BODY}}", body)
}

// Failed writes block the user with a browser alert as well as a banner.
fn render_alert(message: &str) -> String {
    let script_text = serde_json::to_string(message)
        .unwrap_or_else(|_| "\"Request failed\"".to_string())
        .replace("</", "<\\/");
    format!(
        r#"<div class="alert" role="alert">{}</div><script>window.alert({script_text});</script>"#,
        escape_html(message)
    )
}

/// Status tab target that keeps the current search text.
fn jobs_link(status: JobStatusFilter, search: &str) -> String {
    let mut pairs = vec![("status", status.as_str())];
    if !search.is_empty() {
        pairs.push(("q", search));
    }
    Url::parse_with_params("http://localhost/jobs", &pairs)
        .ok()
        .and_then(|url| url.query().map(|query| format!("/jobs?{query}")))
        .unwrap_or_else(|| format!("/jobs?status={}", status.as_str()))
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// `$1,234.50` style, with a leading minus for losses.
pub fn format_money(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

fn format_trend_value(kind: TrendKind, value: f64) -> String {
    match kind {
        TrendKind::Jobs => format!("{value:.0}"),
        TrendKind::Revenue | TrendKind::Profit => format_money(value),
    }
}

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}} · Shop Dashboard</title>
  <style>
    :root {
      --bg: #f4f5fb;
      --ink: #1f2333;
      --muted: #6b7085;
      --accent: #4f46e5;
      --ok: #15803d;
      --warn: #b45309;
      --danger: #c62828;
      --card: #ffffff;
      --line: rgba(31, 35, 51, 0.08);
      --shadow: 0 18px 40px rgba(79, 70, 229, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg), #eef0ff 70%);
      color: var(--ink);
      font-family: "Inter", "Segoe UI", sans-serif;
    }

    header {
      background: #1f2937;
      padding: 0 24px;
    }

    header nav {
      max-width: 1200px;
      margin: 0 auto;
      display: flex;
      gap: 8px;
      height: 60px;
      align-items: center;
    }

    header nav a {
      color: #d1d5db;
      text-decoration: none;
      padding: 8px 12px;
      border-radius: 8px;
      font-weight: 500;
    }

    header nav a.active {
      background: #111827;
      color: white;
    }

    main {
      max-width: 1200px;
      margin: 0 auto;
      padding: 28px 24px 48px;
      display: grid;
      gap: 24px;
    }

    h2 {
      margin: 0;
      font-size: 1.3rem;
    }

    .subtitle {
      margin: 4px 0 0;
      color: var(--muted);
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(170px, 1fr));
      gap: 16px;
    }

    .stat,
    .card {
      background: var(--card);
      border: 1px solid var(--line);
      border-radius: 18px;
      box-shadow: var(--shadow);
    }

    .stat {
      padding: 18px;
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: var(--muted);
    }

    .stat .value {
      font-size: 1.6rem;
      font-weight: 600;
    }

    .value.accent { color: var(--accent); }
    .value.ok { color: var(--ok); }
    .value.warn { color: var(--warn); }

    .card {
      padding: 22px;
      display: grid;
      gap: 18px;
    }

    .card-header {
      display: flex;
      flex-wrap: wrap;
      justify-content: space-between;
      align-items: center;
      gap: 12px;
    }

    .tabs {
      display: flex;
      gap: 6px;
      padding: 6px;
      background: rgba(79, 70, 229, 0.08);
      border-radius: 999px;
    }

    .tab {
      padding: 6px 14px;
      border-radius: 999px;
      color: var(--muted);
      text-decoration: none;
      font-weight: 600;
      font-size: 0.9rem;
    }

    .tab.active {
      background: white;
      color: var(--accent);
    }

    form.filters,
    form.add-form {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
    }

    input,
    select {
      border: 1px solid rgba(79, 70, 229, 0.25);
      border-radius: 8px;
      padding: 8px 10px;
      font: inherit;
      min-width: 110px;
      flex: 1;
    }

    button,
    .btn {
      border: none;
      border-radius: 8px;
      padding: 8px 14px;
      font: inherit;
      font-weight: 600;
      background: #e5e7eb;
      color: var(--ink);
      cursor: pointer;
      text-decoration: none;
    }

    button.danger {
      background: var(--danger);
      color: white;
    }

    .table-wrap {
      overflow-x: auto;
    }

    table {
      width: 100%;
      border-collapse: collapse;
      font-size: 0.92rem;
    }

    th,
    td {
      text-align: left;
      padding: 8px 12px;
      border-bottom: 1px solid var(--line);
    }

    th {
      background: #f3f4f6;
      font-weight: 500;
    }

    tr.done {
      background: #f0fdf4;
    }

    td.actions {
      display: flex;
      gap: 8px;
    }

    td.empty,
    .loading {
      text-align: center;
      color: var(--muted);
    }

    .badge {
      display: inline-block;
      padding: 3px 8px;
      border-radius: 6px;
      font-size: 0.78rem;
      font-weight: 600;
    }

    .badge.ok { background: #bbf7d0; color: #166534; }
    .badge.warn { background: #fef3c7; color: #92400e; }

    .alert {
      background: #fdecea;
      color: var(--danger);
      border-radius: 12px;
      padding: 12px 16px;
      font-weight: 600;
    }

    .chart {
      width: 100%;
      height: 260px;
      display: block;
    }

    .chart-line {
      fill: none;
      stroke: var(--accent);
      stroke-width: 3;
    }

    .chart-point {
      fill: white;
      stroke: var(--accent);
      stroke-width: 2;
    }

    .chart-grid {
      stroke: rgba(31, 35, 51, 0.12);
    }

    .chart-label {
      fill: var(--muted);
      font-size: 11px;
    }
  </style>
</head>
<body>
  <header><nav>{{NAV}}</nav></header>
  <main>
    {{ALERT}}
    {{BODY}}
  </main>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::summarize;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_html(r#"<b>"A&B"</b>"#), "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;");
    }

    #[test]
    fn money_is_grouped_and_signed() {
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(1234.5), "$1,234.50");
        assert_eq!(format_money(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_money(-42.129), "-$42.13");
    }

    #[test]
    fn chart_draws_one_circle_per_point() {
        let labels: Vec<String> = ["01-01", "01-02", "01-03"].iter().map(|s| s.to_string()).collect();
        let summary = summarize(&[1.0, 3.0, 2.0]);
        let svg = render_line_chart(&labels, &summary.points);
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(svg.contains("<polyline"));
        assert!(svg.contains("01-03"));
    }

    #[test]
    fn empty_chart_says_so() {
        assert!(render_line_chart(&[], &[]).contains("No data yet"));
    }

    #[test]
    fn alert_cannot_break_out_of_script() {
        let page = render_page(Page::Jobs, "", Some("</script><b>x</b>"));
        assert!(!page.contains("</script><b>"));
        assert!(page.contains("window.alert("));
    }

    #[test]
    fn jobs_page_shows_loading_when_unavailable() {
        let view = JobsView {
            all: None,
            visible: Vec::new(),
            status: JobStatusFilter::All,
            search: "",
            alert: None,
        };
        let page = render_jobs(&view);
        assert!(page.contains("Loading..."));
        assert!(!page.contains("Total jobs"));
    }

    #[test]
    fn status_tabs_keep_search_text() {
        let view = JobsView {
            all: Some(&[]),
            visible: Vec::new(),
            status: JobStatusFilter::Finished,
            search: "red hinge&x",
            alert: None,
        };
        let page = render_jobs(&view);
        assert!(page.contains(r#"href="/jobs?status=inprogress&amp;q=red+hinge%26x""#));
        assert!(page.contains(r#"<a class="tab active" href="/jobs?status=finished&amp;q=red+hinge%26x">"#));
        assert_eq!(jobs_link(JobStatusFilter::All, ""), "/jobs?status=all");
    }

    #[test]
    fn inventory_page_lists_items_and_marks_selection() {
        let item = InventoryRecord {
            id: 3,
            model: "Falcon".to_string(),
            part_name: "Hinge <v2>".to_string(),
            sku: None,
            color: None,
            location: Some("Shelf A".to_string()),
            quantity: 2,
            part_cost: Some(4.0),
            shipping_cost: None,
            added_at: None,
        };
        let query = InventoryQuery {
            model: "Falcon".to_string(),
            ..InventoryQuery::default()
        };
        let view = InventoryView {
            items: Some(vec![&item]),
            models: vec!["Falcon".to_string()],
            locations: vec!["Shelf A".to_string()],
            query: &query,
            editing: None,
            alert: None,
        };
        let page = render_inventory(&view);
        assert!(page.contains("Hinge &lt;v2&gt;"));
        assert!(page.contains(r#"<option value="Falcon" selected>"#));
        assert!(page.contains("/inventory/3/delete"));
    }
}
