//! HTML rendering of comparison matrices.

use std::fmt::Display;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::compare::ComparisonMatrix;
use crate::stringdata::StringData;

const TABLE_STYLE: &str = "<style>thead {align:center;}\
tbody {color:black;}\
table, th, td {border: 1px solid black; border-collapse: collapse;}\
th, td {padding: 15px;}\
</style>";

const DEFAULT_LABEL_COLOR: &str = "black";

/// Wraps `text` in a colored span.
pub fn color_span(text: &str, color: &str) -> String {
    format!("<span style=\"color:{color}\">{text}</span>")
}

/// Highlights an occurrence of `substring` inside `s`.
///
/// With a byte `position` only that occurrence is colored; without one,
/// every occurrence is.
pub fn color_substring(substring: &str, s: &str, position: Option<usize>, color: &str) -> String {
    match position {
        None => s.replace(substring, &color_span(substring, color)),
        Some(position) => {
            let head = &s[..position];
            let tail = &s[(position + substring.len()).min(s.len())..];
            format!("{head}{}{tail}", color_span(substring, color))
        }
    }
}

fn header_cell(label: &str, data: &StringData) -> String {
    let color = data.label_color(label).unwrap_or(DEFAULT_LABEL_COLOR);
    let string = data.string(label).unwrap_or("");
    format!("{}<br>{}", color_span(label, color), string)
}

/// Renders a comparison matrix as an HTML table.
///
/// Row and column headers carry the labels (in their configured colors) and
/// the strings themselves; the matrix title becomes the caption.
pub fn html_table<T: Display + Clone>(
    matrix: &ComparisonMatrix<T>,
    data: &StringData,
    transpose: bool,
) -> String {
    let matrix = if transpose {
        matrix.transposed()
    } else {
        matrix.clone()
    };

    let mut html = String::from(TABLE_STYLE);
    html.push_str("<table>");
    html.push_str(&format!("<caption>{}</caption>", matrix.title()));

    html.push_str("<thead><tr><th></th>");
    for label in matrix.col_labels() {
        html.push_str(&format!(
            "<th scope=\"col\">{}</th>",
            header_cell(label, data)
        ));
    }
    html.push_str("</tr></thead>");

    for (label, row) in matrix.row_labels().iter().zip(matrix.cells()) {
        html.push_str("<tr>");
        html.push_str(&format!(
            "<th scope=\"row\">{}</th>",
            header_cell(label, data)
        ));
        for cell in row {
            html.push_str(&format!("<td>{cell}</td>"));
        }
        html.push_str("</tr>");
    }
    html.push_str("</table>");
    html
}

/// Writes HTML to a file, optionally wrapped in minimal document tags.
pub fn write_html<P: AsRef<Path>>(html: &str, path: P, include_doctags: bool) -> io::Result<()> {
    let mut file = File::create(path)?;
    if include_doctags {
        file.write_all(
            b"<!DOCTYPE html><html><head><meta charset=\"UTF-8\"><title></title></head><body>",
        )?;
    }
    file.write_all(html.as_bytes())?;
    if include_doctags {
        file.write_all(b"</body>")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::is_same;
    use std::collections::HashMap;

    fn example_data() -> StringData {
        StringData::new(
            vec![
                ("one".to_string(), "abc".to_string()),
                ("two".to_string(), "abd".to_string()),
            ],
            1,
        )
        .unwrap()
        .with_label_colors(HashMap::from([(
            "one".to_string(),
            "#FF4500".to_string(),
        )]))
    }

    #[test]
    fn colors_every_occurrence_without_a_position() {
        let html = color_substring("ab", "abab", None, "red");
        assert_eq!(
            html,
            "<span style=\"color:red\">ab</span><span style=\"color:red\">ab</span>"
        );
    }

    #[test]
    fn colors_one_occurrence_at_a_position() {
        let html = color_substring("ab", "abab", Some(2), "red");
        assert_eq!(html, "ab<span style=\"color:red\">ab</span>");
    }

    #[test]
    fn table_carries_caption_labels_and_cells() {
        let data = example_data();
        let matrix = is_same(&data, "full").unwrap();
        let html = html_table(&matrix, &data, false);

        assert!(html.contains("<caption>Identical strings</caption>"));
        assert!(html.contains("<span style=\"color:#FF4500\">one</span>"));
        assert!(html.contains("<span style=\"color:black\">two</span>"));
        // Two rows of two cells each.
        assert_eq!(html.matches("<td>").count(), 4);
        assert!(html.contains("<td>true</td>"));
        assert!(html.contains("<td>false</td>"));
    }

    #[test]
    fn doctags_are_optional() {
        let dir = tempfile::tempdir().unwrap();
        let data = example_data();
        let matrix = is_same(&data, "full").unwrap();
        let html = html_table(&matrix, &data, false);

        let wrapped = dir.path().join("wrapped.html");
        write_html(&html, &wrapped, true).unwrap();
        let text = std::fs::read_to_string(&wrapped).unwrap();
        assert!(text.starts_with("<!DOCTYPE html>"));
        assert!(text.ends_with("</body>"));

        let bare = dir.path().join("bare.html");
        write_html(&html, &bare, false).unwrap();
        assert_eq!(std::fs::read_to_string(&bare).unwrap(), html);
    }
}
