// src/specs/roster.rs
//! Roster page spec.
//!
//! The roster is one or more plain `<table>`s; each participant row is a `<tr>`
//! of `<td>` cells. Column meaning is positional (see `config::consts`).
//! Header rows use `<th>` or repeat the literal "Name" and are dropped here,
//! as are rows too short to carry a score.

use std::path::Path;

use crate::config::consts::{COL_NAME, MIN_ROW_CELLS};
use crate::core::{html, net};
use crate::error::RosterError;

/// Where the roster page comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RosterInput {
    Url(String),
    File(std::path::PathBuf),
}

impl RosterInput {
    /// `http://`/`https://` → URL, anything else → local file.
    pub fn parse(s: &str) -> Self {
        let t = s.trim();
        if t.starts_with("http://") || t.starts_with("https://") {
            RosterInput::Url(s!(t))
        } else {
            RosterInput::File(t.into())
        }
    }
}

/// Source of raw roster rows.
pub trait RosterSource {
    fn rows(&self) -> Result<Vec<Vec<String>>, RosterError>;
}

impl RosterSource for RosterInput {
    fn rows(&self) -> Result<Vec<Vec<String>>, RosterError> {
        let doc = match self {
            RosterInput::Url(url) => net::http_get(url)?,
            RosterInput::File(path) => read_file(path)?,
        };
        extract_rows(&doc)
    }
}

fn read_file(path: &Path) -> Result<String, RosterError> {
    let bytes = std::fs::read(path)
        .map_err(|source| RosterError::Io { path: path.to_path_buf(), source })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn keep_row(cells: &[String]) -> bool {
    if cells.len() < MIN_ROW_CELLS { return false; }
    let name = cells[COL_NAME].trim();
    !name.is_empty() && !name.eq_ignore_ascii_case("name")
}

/// All participant rows across every table in `doc`, in document order.
pub fn extract_rows(doc: &str) -> Result<Vec<Vec<String>>, RosterError> {
    let tables = html::tag_blocks_ci(doc, "<table", "</table>");
    if tables.is_empty() {
        return Err(RosterError::NoTable);
    }

    let mut out = Vec::new();
    let mut dropped = 0usize;
    for table in &tables {
        for tr in html::tag_blocks_ci(table, "<tr", "</tr>") {
            let cells: Vec<String> = html::tag_blocks_ci(tr, "<td", "</td>")
                .into_iter()
                .map(html::cell_text)
                .collect();
            if keep_row(&cells) {
                out.push(cells);
            } else {
                dropped += 1;
            }
        }
    }
    logd!("Roster: {} tables, {} rows kept, {} dropped", tables.len(), out.len(), dropped);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r##"
    <html><body>
    <TABLE border=1>
      <tr><th>Name</th><th>A</th><th>B</th><th>Puzzles</th><th>C</th><th>PLW</th><th>USCF</th><th>Group</th></tr>
      <tr><td>Name</td><td></td><td></td><td>Puzzles</td><td></td><td>PLW</td><td>USCF</td><td>Group</td></tr>
      <tr class="r1"><td><a href="#">Ada&nbsp;King</a></td><td>x</td><td>y</td><td>1,204</td><td>z</td><td>64</td><td>1850</td><td>Blue</td></tr>
      <tr><td>Short</td><td>1</td></tr>
      <tr><td>  </td><td></td><td></td><td>1</td><td></td><td>90</td></tr>
    </TABLE>
    <table><tr><td>Bo</td><td></td><td></td><td>3</td><td></td><td>0</td></tr></table>
    </body></html>"##;

    #[test]
    fn keeps_participant_rows_only() {
        let rows = extract_rows(PAGE).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], "Ada King");
        assert_eq!(rows[0][3], "1,204");
        assert_eq!(rows[0][7], "Blue");
        assert_eq!(rows[1], vec!["Bo", "", "", "3", "", "0"]);
    }

    #[test]
    fn no_table_is_an_error() {
        assert!(matches!(extract_rows("<p>maintenance</p>"), Err(RosterError::NoTable)));
    }

    #[test]
    fn input_kinds() {
        assert_eq!(RosterInput::parse("http://h/x"), RosterInput::Url(s!("http://h/x")));
        assert_eq!(RosterInput::parse("saved/roster.html"), RosterInput::File("saved/roster.html".into()));
    }
}
