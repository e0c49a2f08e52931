//! Text forms of the catalogs and of the results.
//!
//! Every input record is `<number> - <value>` on its own line. The value runs
//! from the first `-` to the end of the line, so names and titles may contain
//! hyphens. Blank lines are skipped.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::FileNames;
use crate::model::entity::{Individual, Number, Resource};
use crate::model::team::{Allocation, FixedBinding};
use crate::pool::{Pool, PoolError};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: expected `<number> - <value>`")]
    Malformed { line: usize },
    #[error("line {line}: `{token}` is not a valid number")]
    InvalidNumber { line: usize, token: String },
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}", .path.display())]
    Io { path: PathBuf, #[source] source: std::io::Error },
    #[error("{}: {source}", .path.display())]
    Parse { path: PathBuf, #[source] source: ParseError },
    #[error(transparent)]
    Pool(#[from] PoolError),
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to write {}", .path.display())]
    Io { path: PathBuf, #[source] source: std::io::Error },
}

fn records(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

fn parse_number(line: usize, token: &str) -> Result<Number, ParseError> {
    let token = token.trim();
    token.parse().map_err(|_| ParseError::InvalidNumber { line, token: token.to_string() })
}

fn split_record(line: usize, text: &str) -> Result<(Number, &str), ParseError> {
    let (number, value) = text.split_once('-').ok_or(ParseError::Malformed { line })?;
    Ok((parse_number(line, number)?, value.trim()))
}

fn named_record(line: usize, text: &str) -> Result<(Number, String), ParseError> {
    let (number, value) = split_record(line, text)?;
    if value.is_empty() {
        return Err(ParseError::Malformed { line });
    }
    Ok((number, value.to_string()))
}

pub fn parse_individuals(text: &str) -> Result<Vec<Individual>, ParseError> {
    records(text)
        .map(|(line, record)| named_record(line, record).map(|(number, name)| Individual { number, name }))
        .collect()
}

pub fn parse_resources(text: &str) -> Result<Vec<Resource>, ParseError> {
    records(text)
        .map(|(line, record)| named_record(line, record).map(|(number, title)| Resource { number, title }))
        .collect()
}

/// An empty member list is kept as is and left for validation to reject.
pub fn parse_bindings(text: &str) -> Result<Vec<FixedBinding>, ParseError> {
    records(text)
        .map(|(line, record)| -> Result<FixedBinding, ParseError> {
            let (resource, members) = split_record(line, record)?;
            let members = if members.is_empty() {
                Vec::new()
            } else {
                members.split(',').map(|token| parse_number(line, token)).collect::<Result<Vec<_>, _>>()?
            };
            Ok(FixedBinding { resource, members })
        })
        .collect()
}

fn read_catalog<T>(
    path: &Path,
    kind: &str,
    parse: impl FnOnce(&str) -> Result<Vec<T>, ParseError>,
) -> Result<Vec<T>, LoadError> {
    let text = fs::read_to_string(path)
        .map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
    let items = parse(&text)
        .map_err(|source| LoadError::Parse { path: path.to_path_buf(), source })?;
    info!("Load finished -> {} {kind}", items.len());
    Ok(items)
}

/// Reads the three catalogs from `dir`. A missing bindings file means no
/// fixed bindings.
pub fn load_pool(dir: &Path, files: &FileNames) -> Result<Pool, LoadError> {
    let individuals = read_catalog(&dir.join(&files.individuals), "individuals", parse_individuals)?;
    let resources = read_catalog(&dir.join(&files.resources), "resources", parse_resources)?;
    let bindings_path = dir.join(&files.bindings);
    let bindings = if bindings_path.exists() {
        read_catalog(&bindings_path, "bindings", parse_bindings)?
    } else {
        debug!(path = %bindings_path.display(), "no bindings file, dealing without fixed bindings");
        Vec::new()
    };
    Ok(Pool::new(individuals, resources, bindings)?)
}

/// One block per team: the resource line, a line per member, a blank line.
pub fn render_allocation(allocation: &Allocation) -> String {
    allocation.teams.iter()
        .map(|team| format!("{}\n{}\n\n", team.resource, team.members.iter().join("\n")))
        .collect()
}

/// Output written to a temporary file next to its destination.
///
/// Nothing appears under the destination name until [`Staged::commit`]; a
/// dropped `Staged` removes its temporary file.
pub struct Staged {
    file: NamedTempFile,
    path: PathBuf,
}

impl Staged {
    pub fn commit(self) -> Result<PathBuf, PersistError> {
        let Staged { file, path } = self;
        file.persist(&path)
            .map_err(|e| PersistError::Io { path: path.clone(), source: e.error })?;
        Ok(path)
    }
}

pub fn stage(path: &Path, contents: &str) -> Result<Staged, PersistError> {
    let io_error = |source| PersistError::Io { path: path.to_path_buf(), source };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir).map_err(io_error)?;
    file.write_all(contents.as_bytes()).map_err(io_error)?;
    file.as_file().sync_all().map_err(io_error)?;
    Ok(Staged { file, path: path.to_path_buf() })
}
