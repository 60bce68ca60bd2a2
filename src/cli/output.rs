use crate::{CheckResult, Report, WordTable};
use anyhow::Result;
use colored::*;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonText {
    file: String,
    words_in_text: usize,
    misspelled: Vec<String>,
}

#[derive(Debug, Serialize)]
struct JsonTimings {
    load: f64,
    check: f64,
    size: f64,
    unload: f64,
    total: f64,
}

#[derive(Debug, Serialize)]
struct JsonOutput {
    texts: Vec<JsonText>,
    words_misspelled: usize,
    words_in_dictionary: usize,
    words_in_text: usize,
    time: JsonTimings,
}

#[derive(Debug, Serialize)]
struct JsonStats {
    words: usize,
    buckets: usize,
    load_factor: f64,
    longest_chain: usize,
    empty_buckets: usize,
    chain_lengths: Vec<usize>,
}

pub fn print_report(
    results: &[CheckResult],
    report: &Report,
    colored_output: bool,
    show_misspelled: bool,
    format: &OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            print_text_report(results, report, colored_output, show_misspelled);
            Ok(())
        }
        OutputFormat::Json => print_json_report(results, report),
    }
}

fn print_text_report(
    results: &[CheckResult],
    report: &Report,
    colored_output: bool,
    show_misspelled: bool,
) {
    if show_misspelled {
        if colored_output {
            println!("\n{}\n", "MISSPELLED WORDS".bold().underline());
        } else {
            println!("\nMISSPELLED WORDS\n");
        }

        for word in results.iter().flat_map(|r| &r.misspelled) {
            if colored_output {
                println!("{}", word.red());
            } else {
                println!("{}", word);
            }
        }
    }

    let rows = [
        ("WORDS MISSPELLED:", report.words_misspelled.to_string()),
        ("WORDS IN DICTIONARY:", report.words_in_dictionary.to_string()),
        ("WORDS IN TEXT:", report.words_in_text.to_string()),
        ("TIME IN load:", seconds(report.timings.load)),
        ("TIME IN check:", seconds(report.timings.check)),
        ("TIME IN size:", seconds(report.timings.size)),
        ("TIME IN unload:", seconds(report.timings.unload)),
        ("TIME IN TOTAL:", seconds(report.timings.total())),
    ];

    println!();
    for (label, value) in rows {
        if colored_output {
            println!("{:<22}{}", label.bold(), value.cyan());
        } else {
            println!("{:<22}{}", label, value);
        }
    }
    println!();
}

fn print_json_report(results: &[CheckResult], report: &Report) -> Result<()> {
    let texts = results
        .iter()
        .map(|r| JsonText {
            file: r.file.display().to_string(),
            words_in_text: r.words_in_text,
            misspelled: r.misspelled.clone(),
        })
        .collect();

    let t = &report.timings;
    let output = JsonOutput {
        texts,
        words_misspelled: report.words_misspelled,
        words_in_dictionary: report.words_in_dictionary,
        words_in_text: report.words_in_text,
        time: JsonTimings {
            load: t.load.as_secs_f64(),
            check: t.check.as_secs_f64(),
            size: t.size.as_secs_f64(),
            unload: t.unload.as_secs_f64(),
            total: t.total().as_secs_f64(),
        },
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn print_stats(table: &WordTable, colored_output: bool, format: &OutputFormat) -> Result<()> {
    let lengths = table.bucket_lengths();
    let longest_chain = lengths.iter().copied().max().unwrap_or(0);
    let empty_buckets = lengths.iter().filter(|&&len| len == 0).count();

    if let OutputFormat::Json = format {
        let stats = JsonStats {
            words: table.size(),
            buckets: table.buckets(),
            load_factor: table.load_factor(),
            longest_chain,
            empty_buckets,
            chain_lengths: lengths,
        };
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Words:         {}", table.size());
    println!("Buckets:       {}", table.buckets());
    println!("Load factor:   {:.2}", table.load_factor());
    println!("Longest chain: {}", longest_chain);
    println!("Empty buckets: {}", empty_buckets);
    println!();

    let width = lengths.len().to_string().len();
    for (bucket, len) in lengths.iter().enumerate() {
        let bar = "#".repeat(bar_len(*len, longest_chain));
        if colored_output {
            println!("{:>width$} {:>8} {}", bucket, len, bar.green(), width = width);
        } else {
            println!("{:>width$} {:>8} {}", bucket, len, bar, width = width);
        }
    }

    Ok(())
}

fn seconds(duration: Duration) -> String {
    format!("{:.2}", duration.as_secs_f64())
}

/// Scales a chain length onto a bar of at most 50 columns.
fn bar_len(len: usize, longest: usize) -> usize {
    if longest == 0 {
        return 0;
    }
    (len * 50).div_ceil(longest)
}
