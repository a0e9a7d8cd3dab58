//! Parsing for the blocked, delimiter-separated spec file.
//!
//! Layout:
//! - lines starting with `#` are comments
//! - a blank line (not following another blank line) ends the current block
//! - the first block carries the schema version and component name, one
//!   `keyword value` line each
//! - every later block is one category: a `category NAME` line, a column
//!   header row, then data rows, cells separated by the delimiter
//!
//! Example:
//! ```text
//! schema_version: 2.0.0
//! component: DU
//!
//! category: IMPORT
//! # sources
//!  NAME | LONG_NAME | UNITS   | DIMS | VLOC
//!  ZLE  | height    | m       | xyz  | E
//! ```

use crate::Result;
use crate::model::Category;
use anyhow::{Context, bail};
use regex::Regex;
use std::fs;

/// One data row: ordered `(column name, raw cell)` pairs.
pub type RawRow = Vec<(String, String)>;

#[derive(Debug, Clone)]
pub struct CategoryBlock {
    pub category: Category,
    pub rows: Vec<RawRow>,
}

#[derive(Debug, Clone)]
pub struct ParsedSpecs {
    pub schema_version: String,
    pub component: String,
    pub blocks: Vec<CategoryBlock>,
}

pub fn read_specs(path: &str, delimiter: char) -> Result<ParsedSpecs> {
    let text = fs::read_to_string(path).with_context(|| format!("read spec file {}", path))?;
    parse_specs(&text, delimiter).with_context(|| format!("parse spec file {}", path))
}

pub fn parse_specs(text: &str, delimiter: char) -> Result<ParsedSpecs> {
    // Keyword lines ("schema_version: 2.0.0", "category: IMPORT"): the
    // second whitespace-separated word is the token.
    let token_re = Regex::new(r"^\s*\S+\s+(\S+)")?;

    let blocks = collect_blocks(text);
    if blocks.is_empty() {
        bail!("spec file contains no blocks");
    }

    let header = &blocks[0];
    if header.len() < 2 {
        bail!("header block must carry a schema version line and a component line");
    }
    let schema_version = second_token(&token_re, header[0])?;
    let component = second_token(&token_re, header[1])?;

    let mut parsed = Vec::new();
    for block in &blocks[1..] {
        let (category_lno, category_line) = block[0];
        let token = second_token(&token_re, (category_lno, category_line))?;
        let category = match Category::parse(&token) {
            Some(category) => category,
            None => bail!("unknown category {:?} at line {}", token, category_lno),
        };

        let Some((header_lno, header_line)) = block.get(1).copied() else {
            bail!(
                "{} block at line {} has no column header row",
                category,
                category_lno
            );
        };
        let columns: Vec<String> = split_cells(header_line, delimiter);
        if columns.iter().all(|column| column.is_empty()) {
            bail!("empty column header row at line {}", header_lno);
        }

        let mut rows = Vec::new();
        for (lno, line) in &block[2..] {
            let cells = split_cells(line, delimiter);
            if cells.len() > columns.len()
                && cells[columns.len()..].iter().any(|cell| !cell.is_empty())
            {
                bail!(
                    "row at line {} has {} cells but only {} columns",
                    lno,
                    cells.len(),
                    columns.len()
                );
            }
            // Short rows simply omit their trailing columns.
            rows.push(
                columns
                    .iter()
                    .zip(cells)
                    .map(|(column, cell)| (column.clone(), cell))
                    .collect(),
            );
        }

        parsed.push(CategoryBlock { category, rows });
    }

    Ok(ParsedSpecs {
        schema_version,
        component,
        blocks: parsed,
    })
}

/// Group non-comment lines into blocks separated by blank lines, keeping
/// 1-based line numbers for error reporting.
fn collect_blocks(text: &str) -> Vec<Vec<(usize, &str)>> {
    let mut blocks = Vec::new();
    let mut current: Vec<(usize, &str)> = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.starts_with('#') {
            continue;
        }
        if trimmed.is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.push((lineno + 1, line));
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

fn second_token(re: &Regex, (lno, line): (usize, &str)) -> Result<String> {
    match re.captures(line).and_then(|caps| caps.get(1)) {
        Some(token) => Ok(token.as_str().to_string()),
        None => bail!("expected a keyword and a value at line {}: {:?}", lno, line),
    }
}

fn split_cells(line: &str, delimiter: char) -> Vec<String> {
    line.split(delimiter)
        .map(|cell| cell.trim().to_string())
        .collect()
}
