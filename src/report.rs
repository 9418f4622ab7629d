//! Text Report Module
//! Formats dataset overviews and statistics tables for a text stream.

use crate::data::{CleanReport, Dataset};
use crate::stats::{ClassAggregate, ColumnSummary, Highlight};
use std::io::{self, Write};

const VALUE_WIDTH: usize = 12;
const STAT_HEADERS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Writes the human readable analysis report.
pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write a free-form line, e.g. a stage error message.
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)
    }

    pub fn clean_status(&mut self, report: &CleanReport) -> io::Result<()> {
        if report.is_clean() {
            writeln!(self.out, "\nNo missing values found. Dataset is clean.")
        } else {
            writeln!(
                self.out,
                "\nFound {} missing values. Cleaning dataset...",
                report.missing_values
            )
        }
    }

    /// Record count and the first `rows` records.
    pub fn preview(&mut self, dataset: &Dataset, rows: usize) -> io::Result<()> {
        writeln!(self.out, "\nFirst few rows of the dataset:")?;
        writeln!(
            self.out,
            "{} records x {} columns",
            dataset.height(),
            dataset.width()
        )?;
        writeln!(self.out, "{}", dataset.frame().head(Some(rows)))
    }

    pub fn column_types(&mut self, dataset: &Dataset) -> io::Result<()> {
        writeln!(self.out, "\nData Types:")?;
        let columns = dataset.frame().get_columns();
        let width = name_width(columns.iter().map(|c| c.name().as_str()));

        for column in columns {
            writeln!(
                self.out,
                "{:<width$}  {}",
                column.name().as_str(),
                column.dtype(),
                width = width
            )?;
        }
        Ok(())
    }

    /// One row per column: count, mean, std, min, quartiles, max.
    pub fn statistics(&mut self, summaries: &[ColumnSummary]) -> io::Result<()> {
        writeln!(self.out, "\nBasic Statistics:")?;
        let width = name_width(summaries.iter().map(|s| s.name.as_str()));

        write!(self.out, "{:<width$}", "", width = width)?;
        for header in STAT_HEADERS {
            write!(self.out, " {:>w$}", header, w = VALUE_WIDTH)?;
        }
        writeln!(self.out)?;

        for s in summaries {
            write!(self.out, "{:<width$}", s.name, width = width)?;
            write!(self.out, " {:>w$}", s.count, w = VALUE_WIDTH)?;
            for value in [s.mean, s.std, s.min, s.q25, s.median, s.q75, s.max] {
                write!(self.out, " {:>w$.6}", value, w = VALUE_WIDTH)?;
            }
            writeln!(self.out)?;
        }
        Ok(())
    }

    /// One row per measurement, one column per class.
    pub fn class_means(&mut self, aggregate: &ClassAggregate, label: &str) -> io::Result<()> {
        writeln!(
            self.out,
            "\nGrouped by {} and Mean of Each Feature:",
            label
        )?;
        let width = name_width(
            aggregate
                .measurements()
                .iter()
                .map(|m| m.as_str())
                .chain(std::iter::once(label)),
        );

        write!(self.out, "{:<width$}", label, width = width)?;
        for class in aggregate.classes() {
            write!(self.out, " {:>w$}", class, w = VALUE_WIDTH)?;
        }
        writeln!(self.out)?;

        for (idx, measurement) in aggregate.measurements().iter().enumerate() {
            write!(self.out, "{:<width$}", measurement, width = width)?;
            for row in aggregate.rows() {
                write!(self.out, " {:>w$.6}", row.means[idx], w = VALUE_WIDTH)?;
            }
            writeln!(self.out)?;
        }
        Ok(())
    }

    /// `display_name` is the human readable name of the highlighted measurement.
    pub fn highlight(&mut self, highlight: &Highlight, display_name: &str) -> io::Result<()> {
        writeln!(self.out, "\nInteresting Patterns:")?;
        for (class, value) in &highlight.values {
            writeln!(
                self.out,
                "Class {} Average {}: {}",
                class, display_name, value
            )?;
        }
        Ok(())
    }
}

fn name_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(|n| n.chars().count()).max().unwrap_or(0)
}
