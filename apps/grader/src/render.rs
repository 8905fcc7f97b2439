//! HTML pages for the browser form flow.
//!
//! Everything that came from the user or the model goes through `escape_html`.
//! Optional lists the model omitted render as empty sections.

use std::fmt::Write;

use crate::grading::models::{GradeRequest, GradeResult, ListEntry, RewriteSuggestion, RubricItem};
use crate::grading::normalizer::value_text;
use crate::grading::strictness::Strictness;

const STYLE: &str = "body{font-family:system-ui,sans-serif;max-width:60rem;margin:2rem auto;padding:0 1rem;color:#222}\
label{display:block;margin-top:1rem;font-weight:600}\
input,select,textarea{width:100%;padding:.4rem;font:inherit}\
textarea{min-height:10rem}\
button{margin-top:1rem;padding:.5rem 1.5rem;font:inherit}\
table{border-collapse:collapse;width:100%}\
td,th{border:1px solid #ccc;padding:.4rem;text-align:left;vertical-align:top}\
.grade{font-size:2rem;font-weight:700}\
.comment{white-space:pre-wrap}\
.error{color:#a00}";

/// Escapes text for safe inclusion in HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        title = escape_html(title),
    )
}

/// The grading form.
pub fn index_page() -> String {
    let options = [Strictness::Easy, Strictness::Medium, Strictness::Hard]
        .iter()
        .map(|s| {
            let selected = if *s == Strictness::default() {
                " selected"
            } else {
                ""
            };
            format!("<option value=\"{s}\"{selected}>{s}</option>")
        })
        .collect::<String>();

    let body = format!(
        "<h1>Honest Grader AI</h1>\n\
         <form method=\"post\" action=\"/grade\">\n\
         <label for=\"assignment_type\">Assignment type</label>\n\
         <input id=\"assignment_type\" name=\"assignment_type\" placeholder=\"essay\" required>\n\
         <label for=\"grade_level\">Grade level</label>\n\
         <input id=\"grade_level\" name=\"grade_level\" placeholder=\"10\" required>\n\
         <label for=\"strictness\">Strictness</label>\n\
         <select id=\"strictness\" name=\"strictness\">{options}</select>\n\
         <label for=\"rubric\">Rubric</label>\n\
         <textarea id=\"rubric\" name=\"rubric\" required></textarea>\n\
         <label for=\"student_work\">Student work</label>\n\
         <textarea id=\"student_work\" name=\"student_work\" required></textarea>\n\
         <button type=\"submit\">Grade</button>\n\
         </form>"
    );
    page("Honest Grader AI", &body)
}

/// The result page for one grade.
pub fn result_page(req: &GradeRequest, result: &GradeResult) -> String {
    let mut body = String::new();

    let _ = write!(
        body,
        "<h1>Grade</h1>\n<p>{assignment} &middot; grade level {level} &middot; {strictness} strictness</p>\n\
         <p class=\"grade\">{letter} &mdash; {score} / {max} ({percent:.1}%)</p>\n",
        assignment = escape_html(&req.assignment_type),
        level = escape_html(&req.grade_level),
        strictness = req.strictness,
        letter = escape_html(&result.letter_grade),
        score = result.overall_score,
        max = result.overall_max,
        percent = result.percent,
    );

    push_list(&mut body, "Assumptions", result.assumptions.as_deref());
    push_breakdown(&mut body, result.rubric_breakdown.as_deref().unwrap_or_default());
    push_list(&mut body, "Strengths", result.strengths.as_deref());
    push_list(&mut body, "Top fixes", result.top_fixes.as_deref());
    push_rewrites(&mut body, result.rewrite_suggestions.as_deref().unwrap_or_default());

    if let Some(comment) = &result.final_comment {
        let _ = write!(
            body,
            "<h2>Final comment</h2>\n<p class=\"comment\">{}</p>\n",
            escape_html(comment)
        );
    }

    body.push_str("<p><a href=\"/\">Grade another</a></p>");
    page("Grade result", &body)
}

/// Shown when the model service could not produce a response at all.
pub fn error_page(message: &str) -> String {
    let body = format!(
        "<h1>Grading failed</h1>\n<p class=\"error\">{}</p>\n<p><a href=\"/\">Try again</a></p>",
        escape_html(message)
    );
    page("Grading failed", &body)
}

fn push_list(body: &mut String, heading: &str, items: Option<&[String]>) {
    let items = items.unwrap_or_default();
    let _ = write!(body, "<h2>{heading}</h2>\n<ul>\n");
    for item in items {
        let _ = writeln!(body, "<li>{}</li>", escape_html(item));
    }
    body.push_str("</ul>\n");
}

fn push_breakdown(body: &mut String, entries: &[ListEntry<RubricItem>]) {
    body.push_str(
        "<h2>Rubric breakdown</h2>\n<table>\n\
         <tr><th>Criterion</th><th>Score</th><th>Why</th><th>How to improve</th></tr>\n",
    );
    for entry in entries {
        let item = match entry {
            ListEntry::Structured(item) => item,
            ListEntry::Raw(value) => {
                let _ = writeln!(
                    body,
                    "<tr><td colspan=\"4\">{}</td></tr>",
                    escape_html(&value_text(value))
                );
                continue;
            }
        };
        let improvements = item
            .how_to_improve
            .iter()
            .flatten()
            .map(|s| format!("<li>{}</li>", escape_html(s)))
            .collect::<String>();
        // A score the model left out shows as "-".
        let score = item.score.as_ref().map_or_else(|| "-".to_string(), value_text);
        let _ = writeln!(
            body,
            "<tr><td>{}</td><td>{} / {}</td><td>{}</td><td><ul>{improvements}</ul></td></tr>",
            escape_html(item.criterion.as_deref().unwrap_or_default()),
            escape_html(&score),
            escape_html(&value_text(&item.max_score)),
            escape_html(item.why.as_deref().unwrap_or_default()),
        );
    }
    body.push_str("</table>\n");
}

fn push_rewrites(body: &mut String, suggestions: &[ListEntry<RewriteSuggestion>]) {
    body.push_str("<h2>Rewrite suggestions</h2>\n");
    for entry in suggestions {
        match entry {
            ListEntry::Structured(s) => {
                let _ = writeln!(
                    body,
                    "<blockquote><p><strong>Original:</strong> {}</p>\
                     <p><strong>Improved:</strong> {}</p>\
                     <p><em>{}</em></p></blockquote>",
                    escape_html(s.original_excerpt.as_deref().unwrap_or_default()),
                    escape_html(s.improved_version.as_deref().unwrap_or_default()),
                    escape_html(s.reason.as_deref().unwrap_or_default()),
                );
            }
            ListEntry::Raw(value) => {
                let _ = writeln!(
                    body,
                    "<blockquote><p>{}</p></blockquote>",
                    escape_html(&value_text(value))
                );
            }
        }
    }
}
