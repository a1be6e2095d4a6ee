use std::fs;
use std::io::{BufWriter, Write};

use serde_json::{Map, Value};

use crate::domain::{AppError, IoConfig, Table};

use super::{local_path, prepare_output};

fn parse_error(details: impl ToString) -> AppError {
    AppError::ParseError { what: "JSON".into(), details: details.to_string() }
}

fn into_record(value: Value) -> Result<Map<String, Value>, AppError> {
    match value {
        Value::Object(record) => Ok(record),
        other => Err(parse_error(format!("expected an object record, found {}", other))),
    }
}

/// Reads an array of records, or one record per line when `lines = true`.
pub fn read(config: &IoConfig) -> Result<Table, AppError> {
    let content = fs::read_to_string(local_path(config)?)?;

    let records = if config.option_bool("lines").unwrap_or(false) {
        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(parse_error).and_then(into_record))
            .collect::<Result<Vec<_>, _>>()?
    } else {
        match serde_json::from_str::<Value>(&content).map_err(parse_error)? {
            Value::Array(items) => items.into_iter().map(into_record).collect::<Result<_, _>>()?,
            other => return Err(parse_error(format!("expected an array of records, found {}", other))),
        }
    };

    Ok(Table::from_records(records))
}

pub fn write(table: &Table, config: &IoConfig) -> Result<(), AppError> {
    let path = prepare_output(config)?;
    let mut out = BufWriter::new(fs::File::create(&path)?);
    let records = table.to_records();

    if config.option_bool("lines").unwrap_or(false) {
        for record in &records {
            serde_json::to_writer(&mut out, record).map_err(parse_error)?;
            out.write_all(b"\n")?;
        }
    } else {
        serde_json::to_writer_pretty(&mut out, &records).map_err(parse_error)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}
