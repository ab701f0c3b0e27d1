//! 대시보드 HTML 페이지.

use folio_analytics::{escape_xml, Chart};

use crate::form::DashboardForm;

const STYLE: &str = "body{font-family:Arial,sans-serif;margin:24px;color:#222}\
form{display:flex;flex-wrap:wrap;gap:16px;align-items:flex-end;margin-bottom:24px}\
label{display:flex;flex-direction:column;font-size:13px;gap:4px}\
select{min-width:220px;min-height:96px}\
.chart{margin:0 0 24px 0}\
figcaption{display:none}\
#graphs>p:not(.empty){color:#b00020}";

/// 필터 폼과 차트 영역으로 구성된 페이지.
#[derive(Debug, Clone, Copy)]
pub struct DashboardPage<'a> {
    /// 선택 목록에 표시할 전체 상품 이름
    pub all_names: &'a [String],
    /// 제출된 폼 (입력값 유지용)
    pub form: &'a DashboardForm,
    /// 차트 또는 인라인 에러 메시지
    pub charts: Result<&'a [Chart], &'a str>,
}

impl DashboardPage<'_> {
    pub fn render(&self) -> String {
        let mut html = String::with_capacity(16 * 1024);
        html.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">");
        html.push_str("<title>Investment Dashboard</title>");
        html.push_str(&format!("<style>{STYLE}</style></head><body>"));
        html.push_str("<h1>Investment Dashboard</h1>");
        self.render_form(&mut html);
        html.push_str("<section id=\"graphs\">");
        self.render_graphs(&mut html);
        html.push_str("</section></body></html>");
        html
    }

    fn render_form(&self, html: &mut String) {
        html.push_str(r#"<form method="post" action="/">"#);
        html.push_str(&format!(
            r#"<label>Start date<input type="date" name="start_date" value="{}"></label>"#,
            escape_xml(self.form.start_date.as_deref().unwrap_or_default())
        ));
        html.push_str(&format!(
            r#"<label>End date<input type="date" name="end_date" value="{}"></label>"#,
            escape_xml(self.form.end_date.as_deref().unwrap_or_default())
        ));

        html.push_str(r#"<label>Investments<select name="investment_name" multiple>"#);
        for name in self.all_names {
            let escaped = escape_xml(name);
            let selected = if self.form.is_selected(name) { " selected" } else { "" };
            html.push_str(&format!(
                r#"<option value="{escaped}"{selected}>{escaped}</option>"#
            ));
        }
        html.push_str("</select></label>");

        html.push_str(&checkbox("trendline", "Show trendlines", self.form.trendline));
        html.push_str(&checkbox("aggregates", "Show portfolio totals", self.form.aggregates));
        html.push_str(r#"<button type="submit">Filter</button></form>"#);
    }

    fn render_graphs(&self, html: &mut String) {
        match self.charts {
            Err(message) => {
                html.push_str(&format!(
                    "<p>Error: {}</p>",
                    escape_xml(message)
                ));
            }
            Ok([]) => {
                html.push_str(r#"<p class="empty">No data for the selected filters.</p>"#)
            }
            Ok(charts) => {
                for chart in charts {
                    html.push_str(&chart.to_html());
                }
            }
        }
    }
}

fn checkbox(name: &str, label: &str, checked: bool) -> String {
    format!(
        r#"<label><span><input type="checkbox" name="{name}" value="on"{checked}> {label}</span></label>"#,
        checked = if checked { " checked" } else { "" },
    )
}
