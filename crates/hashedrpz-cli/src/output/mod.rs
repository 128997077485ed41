//! Output formatting for different formats.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::str::FromStr;

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One ownername per line, ready for a zone file
    #[default]
    Plain,
    /// One JSON object per line
    Json,
    /// CSV with a header row
    Csv,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" | "text" => Ok(Self::Plain),
            "json" | "jsonl" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => anyhow::bail!(
                "Unknown output format: {}\n\
                 Valid formats: plain, json, csv",
                s
            ),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// Why an output name was emitted.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RecordKind {
    /// The hashed input name
    Exact,
    /// The input was too long and got wildcarded at the last fitting label
    Fallback,
    /// Extra `*.` sibling blocking every name below the input
    Blanket,
}

/// One output name.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Record<'a> {
    pub input: &'a str,
    pub output: &'a str,
    pub kind: RecordKind,
}

enum Sink<W: Write> {
    Plain(W),
    Json(W),
    Csv(csv::Writer<W>),
}

/// Writes records in the selected [`OutputFormat`].
pub struct RecordWriter<W: Write> {
    sink: Sink<W>,
    echo_ownername: bool,
}

impl<W: Write> RecordWriter<W> {
    /// Wrap `writer`; `echo_ownername` adds `; <input>` comment lines
    /// before plain output.
    pub fn new(format: OutputFormat, writer: W, echo_ownername: bool) -> Self {
        let sink = match format {
            OutputFormat::Plain => Sink::Plain(writer),
            OutputFormat::Json => Sink::Json(writer),
            OutputFormat::Csv => Sink::Csv(csv::Writer::from_writer(writer)),
        };

        Self {
            sink,
            echo_ownername,
        }
    }

    /// Write all records produced for one input name.
    pub fn write_all(&mut self, records: &[Record<'_>]) -> anyhow::Result<()> {
        match &mut self.sink {
            Sink::Plain(w) => {
                if let (true, Some(first)) = (self.echo_ownername, records.first()) {
                    writeln!(w, "; {}", first.input)?;
                }
                for record in records {
                    writeln!(w, "{}", record.output)?;
                }
            }
            Sink::Json(w) => {
                for record in records {
                    serde_json::to_writer(&mut *w, record)?;
                    writeln!(w)?;
                }
            }
            Sink::Csv(w) => {
                for record in records {
                    w.serialize(record)?;
                }
            }
        }

        Ok(())
    }

    /// Flush buffered output.
    pub fn flush(&mut self) -> anyhow::Result<()> {
        match &mut self.sink {
            Sink::Plain(w) | Sink::Json(w) => w.flush()?,
            Sink::Csv(w) => w.flush()?,
        }
        Ok(())
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> anyhow::Result<W> {
        match self.sink {
            Sink::Plain(w) | Sink::Json(w) => Ok(w),
            Sink::Csv(w) => w
                .into_inner()
                .map_err(|e| anyhow::anyhow!("failed to flush CSV output: {}", e.error())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<Record<'static>> {
        vec![
            Record {
                input: "example.net",
                output: "kj8qsm2gn1o42.1qpnbgg",
                kind: RecordKind::Exact,
            },
            Record {
                input: "example.net",
                output: "*.kj8qsm2gn1o42.1qpnbgg",
                kind: RecordKind::Blanket,
            },
        ]
    }

    fn render(format: OutputFormat, echo: bool) -> String {
        let mut writer = RecordWriter::new(format, Vec::new(), echo);
        writer.write_all(&records()).unwrap();
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn plain_output() {
        assert_eq!(
            render(OutputFormat::Plain, false),
            "kj8qsm2gn1o42.1qpnbgg\n*.kj8qsm2gn1o42.1qpnbgg\n"
        );
        assert_eq!(
            render(OutputFormat::Plain, true),
            "; example.net\nkj8qsm2gn1o42.1qpnbgg\n*.kj8qsm2gn1o42.1qpnbgg\n"
        );
    }

    #[test]
    fn json_lines() {
        let out = render(OutputFormat::Json, true);
        let lines: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["input"], "example.net");
        assert_eq!(lines[0]["kind"], "exact");
        assert_eq!(lines[1]["output"], "*.kj8qsm2gn1o42.1qpnbgg");
        assert_eq!(lines[1]["kind"], "blanket");
    }

    #[test]
    fn csv_with_header() {
        assert_eq!(
            render(OutputFormat::Csv, false),
            "input,output,kind\n\
             example.net,kj8qsm2gn1o42.1qpnbgg,exact\n\
             example.net,*.kj8qsm2gn1o42.1qpnbgg,blanket\n"
        );
    }

    #[test]
    fn parse_format_names() {
        assert_eq!("PLAIN".parse::<OutputFormat>().unwrap(), OutputFormat::Plain);
        assert_eq!("jsonl".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
