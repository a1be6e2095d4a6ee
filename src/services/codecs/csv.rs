use serde_json::Value;

use crate::domain::{AppError, IoConfig, Table};

use super::{local_path, prepare_output};

fn delimiter(config: &IoConfig) -> Result<u8, AppError> {
    match config.option_str("delimiter") {
        None => Ok(b','),
        Some(value) if value.len() == 1 => Ok(value.as_bytes()[0]),
        Some(value) => Err(AppError::config_error(format!(
            "delimiter must be a single byte, got '{}'",
            value
        ))),
    }
}

fn parse_error(err: csv::Error) -> AppError {
    AppError::ParseError { what: "CSV".into(), details: err.to_string() }
}

pub fn read(config: &IoConfig) -> Result<Table, AppError> {
    let path = local_path(config)?;
    let has_headers = config.option_bool("has_headers").unwrap_or(true);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter(config)?)
        .has_headers(has_headers)
        .flexible(true)
        .from_path(&path)
        .map_err(parse_error)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(parse_error)?;
        rows.push(record.iter().map(|field| Value::String(field.to_string())).collect::<Vec<_>>());
    }

    let columns = if has_headers {
        reader.headers().map_err(parse_error)?.iter().map(str::to_string).collect()
    } else {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        (0..width).map(|i| i.to_string()).collect()
    };

    let mut table = Table::new(columns);
    for row in rows {
        table.push_row(row);
    }
    Ok(table)
}

pub fn write(table: &Table, config: &IoConfig) -> Result<(), AppError> {
    let path = prepare_output(config)?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter(config)?)
        .from_path(&path)
        .map_err(parse_error)?;

    if config.option_bool("has_headers").unwrap_or(true) {
        writer.write_record(&table.columns).map_err(parse_error)?;
    }
    for row in &table.rows {
        writer.write_record(row.iter().map(cell_text)).map_err(parse_error)?;
    }
    writer.flush()?;
    Ok(())
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
