use crate::error::CliError;
use filter_compiler::Conversion;
use model::core::value::Value;
use planner::Dialect;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ConversionReport {
    pub dialect: String,
    pub sql: String,
    pub params: Vec<serde_json::Value>,
    pub columns: Vec<String>,
    pub depth: usize,
}

impl ConversionReport {
    pub fn new(conversion: &Conversion, dialect: &dyn Dialect) -> Self {
        let (sql, params) = conversion.render(dialect);
        ConversionReport {
            dialect: dialect.name(),
            sql,
            params: params.iter().map(json_value).collect(),
            columns: conversion.columns(),
            depth: conversion.depth,
        }
    }
}

fn json_value(value: &Value) -> serde_json::Value {
    match value {
        Value::Int(v) => (*v).into(),
        Value::Uint(v) => (*v).into(),
        Value::Float(v) => (*v).into(),
        Value::String(v) => v.clone().into(),
        Value::Boolean(v) => (*v).into(),
        Value::Bytes(v) => v.clone().into(),
        Value::Null => serde_json::Value::Null,
    }
}

pub fn write_report(report: &ConversionReport, path: &str) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn print_json(report: &ConversionReport) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}

pub fn print_plain(report: &ConversionReport) {
    println!("{}", report.sql);
    for (i, param) in report.params.iter().enumerate() {
        println!("{:<6} {}", format!("[{}]", i + 1), param);
    }
}
