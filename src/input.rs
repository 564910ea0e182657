//! Workload file parsing.
//!
//! One process per line: `name priority arrival_time total_time
//! block_interval`, whitespace separated. Blank lines and lines starting
//! with `#` are skipped.

use std::{fs, path::Path, str::FromStr};

use log::debug;
use rustc_hash::FxHashMap;

use crate::{
    error::{Error, LineError, Result},
    sim::ProcessDescriptor,
};

pub fn read_descriptors(path: impl AsRef<Path>) -> Result<Vec<ProcessDescriptor>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| Error::InputUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let descriptors = parse_descriptors(&text)?;
    debug!("Read {} processes from {}", descriptors.len(), path.display());
    Ok(descriptors)
}

pub fn parse_descriptors(text: &str) -> Result<Vec<ProcessDescriptor>> {
    let mut descriptors = Vec::new();
    let mut seen: FxHashMap<String, usize> = FxHashMap::default();

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let desc = parse_line(line).map_err(|reason| Error::MalformedLine {
            line_no,
            line: raw.to_owned(),
            reason,
        })?;

        if let Some(&first_line_no) = seen.get(&desc.name) {
            return Err(Error::DuplicateName {
                name: desc.name,
                line_no,
                first_line_no,
            });
        }
        seen.insert(desc.name.clone(), line_no);
        descriptors.push(desc);
    }

    Ok(descriptors)
}

fn parse_line(line: &str) -> Result<ProcessDescriptor, LineError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let &[name, priority, arrival_time, total_time, block_interval] = fields.as_slice() else {
        return Err(LineError::FieldCount(fields.len()));
    };

    let desc = ProcessDescriptor {
        name: name.to_owned(),
        priority: parse_field("priority", priority)?,
        arrival_time: parse_field("arrival_time", arrival_time)?,
        total_time: parse_field("total_time", total_time)?,
        block_interval: parse_field("block_interval", block_interval)?,
    };

    if desc.block_interval == 0 {
        return Err(LineError::ZeroBlockInterval);
    }
    Ok(desc)
}

fn parse_field<T: FromStr>(field: &'static str, value: &str) -> Result<T, LineError> {
    value.parse().map_err(|_| LineError::NotAnInteger {
        field,
        value: value.to_owned(),
    })
}
