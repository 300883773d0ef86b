//! 풀이 결과 보고서 모델과 HTML/텍스트 렌더러.
//!
//! GUI 그리드, CLI 출력, HTML 내보내기가 모두 같은 `Report`를 사용한다.

use std::fmt::Write as _;

/// 요약 표의 한 줄 (`<th>label</th><td>value</td>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub label: String,
    pub value: String,
}

/// 소자별 표 (`Individual Components`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// 한 번의 풀이 결과를 화면에 그리기 위한 모델.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub summary: Vec<SummaryRow>,
    pub components: Option<ComponentTable>,
    pub formulas: Vec<(String, String)>,
}

impl Report {
    pub fn with_formulas(formulas: Vec<(String, String)>) -> Self {
        Self {
            formulas,
            ..Self::default()
        }
    }

    pub fn row(&mut self, label: &str, value: String) {
        self.summary.push(SummaryRow {
            label: label.to_string(),
            value,
        });
    }

    pub fn find(&self, label: &str) -> Option<&str> {
        self.summary
            .iter()
            .find(|r| r.label == label)
            .map(|r| r.value.as_str())
    }

    /// 결과 표 HTML.
    pub fn results_html(&self) -> String {
        let mut html = String::from("<table class=\"result-table\">");
        for row in &self.summary {
            let _ = write!(
                html,
                "<tr><th>{}</th><td>{}</td></tr>",
                escape_html(&row.label),
                escape_html(&row.value)
            );
        }
        if let Some(table) = &self.components {
            html.push_str("</table><h4>Individual Components:</h4><table class=\"result-table\">");
            html.push_str("<tr>");
            for header in &table.headers {
                let _ = write!(html, "<th>{}</th>", escape_html(header));
            }
            html.push_str("</tr>");
            for cells in &table.rows {
                html.push_str("<tr>");
                for cell in cells {
                    let _ = write!(html, "<td>{}</td>", escape_html(cell));
                }
                html.push_str("</tr>");
            }
        }
        html.push_str("</table>");
        html
    }

    /// 공식 목록 HTML.
    pub fn formulas_html(&self) -> String {
        let mut html = String::from("<ul>");
        for (label, formula) in &self.formulas {
            let _ = write!(
                html,
                "<li><strong>{}:</strong> {}</li>",
                escape_html(label),
                escape_html(formula)
            );
        }
        html.push_str("</ul>");
        html
    }

    /// 내보내기용 독립 HTML 문서.
    pub fn to_html_document(&self, title: &str) -> String {
        format!(
            "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{t}</title></head>\n<body>\n<h3>{t}</h3>\n{}\n<h4>Formulas:</h4>\n{}\n</body>\n</html>\n",
            self.results_html(),
            self.formulas_html(),
            t = escape_html(title),
        )
    }

    /// CLI 출력용 텍스트.
    pub fn to_text(&self) -> String {
        let width = self
            .summary
            .iter()
            .map(|r| r.label.chars().count())
            .max()
            .unwrap_or(0);
        let mut out = String::new();
        for row in &self.summary {
            let pad = width - row.label.chars().count();
            let _ = writeln!(out, "{}{} : {}", row.label, " ".repeat(pad), row.value);
        }
        if let Some(table) = &self.components {
            out.push_str("\nIndividual Components:\n");
            let _ = writeln!(out, "{}", table.headers.join(" | "));
            for cells in &table.rows {
                let _ = writeln!(out, "{}", cells.join(" | "));
            }
        }
        if !self.formulas.is_empty() {
            out.push_str("\nFormulas:\n");
            for (label, formula) in &self.formulas {
                let _ = writeln!(out, "- {label}: {formula}");
            }
        }
        out
    }
}

/// 소수점 `digits` 자리 고정 표기. 음의 0은 0으로 표시한다.
pub fn fixed(value: f64, digits: usize) -> String {
    let text = format!("{value:.digits$}");
    match text.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => text,
    }
}

/// 값이 없을 때 쓰는 자리 표시 문자.
pub const MISSING: &str = "—";

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
